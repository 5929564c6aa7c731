// src/models/catalog.rs

//! Typed contract for the upstream filament catalog.
//!
//! The catalog is a triply-nested JSON object,
//! `material group -> material -> color -> filament code`. Deserializing
//! into this shape replaces executing the upstream scraper: a document that
//! does not match the contract is rejected wholesale.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::MaterialRecord;

/// The upstream catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreCatalog(BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>);

impl StoreCatalog {
    /// Number of material groups in the catalog.
    pub fn group_count(&self) -> usize {
        self.0.len()
    }

    /// Flatten the catalog into one record per (material, color, code) leaf.
    ///
    /// The group key only organizes the document; it is not carried into the
    /// records. Identifier fields are left blank pending merge.
    pub fn flatten(&self) -> Vec<MaterialRecord> {
        let mut records = Vec::new();
        for materials in self.0.values() {
            for (material, colors) in materials {
                for (color, code) in colors {
                    records.push(MaterialRecord {
                        material: material.clone(),
                        color: color.clone(),
                        filament_code: code.clone(),
                        variant_id: String::new(),
                        material_id: String::new(),
                    });
                }
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "PLA": {
            "PLA Basic": {
                "Black": "10101",
                "Jade White": "10100"
            },
            "PLA Matte": {
                "Charcoal": "11101"
            }
        },
        "PETG": {
            "PETG HF": {
                "Blue": "33600"
            }
        }
    }"#;

    #[test]
    fn test_flatten_yields_one_record_per_leaf() {
        let catalog: StoreCatalog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.group_count(), 2);

        let records = catalog.flatten();
        assert_eq!(records.len(), 4);

        let black = records
            .iter()
            .find(|r| r.filament_code == "10101")
            .unwrap();
        assert_eq!(black.material, "PLA Basic");
        assert_eq!(black.color, "Black");
        assert_eq!(black.variant_id, "");
        assert_eq!(black.material_id, "");
    }

    #[test]
    fn test_empty_catalog_flattens_to_nothing() {
        let catalog: StoreCatalog = serde_json::from_str("{}").unwrap();
        assert_eq!(catalog.group_count(), 0);
        assert!(catalog.flatten().is_empty());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        // Leaves must be strings, not objects.
        let result: Result<StoreCatalog, _> =
            serde_json::from_str(r#"{"PLA": {"PLA Basic": {"Black": {"code": "10101"}}}}"#);
        assert!(result.is_err());

        // A top-level array is not a catalog.
        let result: Result<StoreCatalog, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
