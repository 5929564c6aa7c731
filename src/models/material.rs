//! Material record data structure.

use serde::{Deserialize, Serialize};

/// One filament table entry, keyed by its 5-digit filament code.
///
/// Field declaration order is the JSON key order of `materials.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    /// Material family name (e.g. "PLA Basic"), taken from the nearest
    /// preceding README section header or the catalog's material key
    pub material: String,

    /// Human-readable color name
    pub color: String,

    /// 5-digit numeric code from the spool tag; unique merge key across runs
    pub filament_code: String,

    /// Upstream variant identifier (e.g. "A00-K0"); blank when unknown
    #[serde(default)]
    pub variant_id: String,

    /// Upstream material identifier (e.g. "GFA00"); blank when unknown.
    /// Never discoverable from the README, only from prior runs.
    #[serde(default)]
    pub material_id: String,
}

impl MaterialRecord {
    /// Sort key for the reproducible output order.
    pub fn sort_key(&self) -> (&str, &str) {
        (&self.material, &self.color)
    }

    /// Render this record as one `MaterialInfo` initializer row for the
    /// firmware header snippet.
    ///
    /// The tuple order matches the `MaterialInfo` struct in the firmware:
    /// materialId, variantId, filamentCode, name, color.
    pub fn snippet_row(&self) -> String {
        format!(
            "    {{\"{}\", \"{}\", \"{}\", \"{}\", \"{}\"}},",
            self.material_id, self.variant_id, self.filament_code, self.material, self.color
        )
    }
}
