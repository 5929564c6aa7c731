//! Identifier carry-over merge.
//!
//! Fresh records never carry material ids and may lack variant ids. The
//! merge resolves both from the previous run's output file, with the
//! README-derived rows as the variant-id fallback, then orders the result
//! for reproducible diffs.

use std::collections::HashMap;

use crate::models::MaterialRecord;
use crate::services::ReadmeRow;

/// Resolver for identifier carry-over across runs.
pub struct Merger<'a> {
    /// Previous output records, keyed by filament code
    previous: &'a HashMap<String, MaterialRecord>,
    /// README rows, keyed by filament code
    readme: &'a HashMap<String, ReadmeRow>,
}

impl<'a> Merger<'a> {
    /// Create a merger over the given lookup maps.
    pub fn new(
        previous: &'a HashMap<String, MaterialRecord>,
        readme: &'a HashMap<String, ReadmeRow>,
    ) -> Self {
        Self { previous, readme }
    }

    /// Merge the fresh records into the final output list.
    ///
    /// Duplicate codes collapse by ordered overwrite: the first occurrence
    /// keeps its position, the last occurrence supplies the value. Per
    /// record, `variantId` is the previous run's non-empty value, else the
    /// README row's variant for that code, else blank; `materialId` is the
    /// previous run's value when a previous record exists, else blank (the
    /// README never knows material ids). The result is sorted ascending by
    /// (material, color).
    pub fn merge(&self, fresh: Vec<MaterialRecord>) -> Vec<MaterialRecord> {
        let mut position: HashMap<String, usize> = HashMap::new();
        let mut records: Vec<MaterialRecord> = Vec::new();

        for record in fresh {
            match position.get(&record.filament_code) {
                Some(&at) => records[at] = record,
                None => {
                    position.insert(record.filament_code.clone(), records.len());
                    records.push(record);
                }
            }
        }

        for record in &mut records {
            let prev = self.previous.get(&record.filament_code);

            record.variant_id = prev
                .map(|p| p.variant_id.as_str())
                .filter(|v| !v.is_empty())
                .or_else(|| {
                    self.readme
                        .get(&record.filament_code)
                        .map(|row| row.variant_id.as_str())
                })
                .unwrap_or("")
                .to_string();

            record.material_id = prev.map(|p| p.material_id.clone()).unwrap_or_default();
        }

        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        records
    }
}

/// Convenience function to merge fresh records against the lookup maps.
pub fn merge_records(
    fresh: Vec<MaterialRecord>,
    previous: &HashMap<String, MaterialRecord>,
    readme: &HashMap<String, ReadmeRow>,
) -> Vec<MaterialRecord> {
    Merger::new(previous, readme).merge(fresh)
}

/// Index records by filament code, as the writer's output would be read
/// back on the next run. A later record for the same code wins.
pub fn index_records(records: &[MaterialRecord]) -> HashMap<String, MaterialRecord> {
    records
        .iter()
        .map(|record| (record.filament_code.clone(), record.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(material: &str, color: &str, code: &str) -> MaterialRecord {
        MaterialRecord {
            material: material.to_string(),
            color: color.to_string(),
            filament_code: code.to_string(),
            variant_id: String::new(),
            material_id: String::new(),
        }
    }

    fn make_prior(code: &str, variant: &str, material_id: &str) -> MaterialRecord {
        MaterialRecord {
            material: "Old".to_string(),
            color: "Old".to_string(),
            filament_code: code.to_string(),
            variant_id: variant.to_string(),
            material_id: material_id.to_string(),
        }
    }

    fn make_row(code: &str, variant: &str) -> ReadmeRow {
        ReadmeRow {
            material: "PLA Basic".to_string(),
            color: "Black".to_string(),
            filament_code: code.to_string(),
            variant_id: variant.to_string(),
        }
    }

    fn prior_map(records: &[MaterialRecord]) -> HashMap<String, MaterialRecord> {
        index_records(records)
    }

    fn readme_map(rows: &[ReadmeRow]) -> HashMap<String, ReadmeRow> {
        rows.iter()
            .map(|row| (row.filament_code.clone(), row.clone()))
            .collect()
    }

    #[test]
    fn test_prior_ids_are_preserved() {
        let previous = prior_map(&[make_prior("12345", "V1", "M1")]);
        let readme = HashMap::new();

        let merged = merge_records(
            vec![make_record("PLA Basic", "Black", "12345")],
            &previous,
            &readme,
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].variant_id, "V1");
        assert_eq!(merged[0].material_id, "M1");
        // Fresh material/color win; only the ids carry over.
        assert_eq!(merged[0].material, "PLA Basic");
        assert_eq!(merged[0].color, "Black");
    }

    #[test]
    fn test_readme_fills_variant_without_prior() {
        let previous = HashMap::new();
        let readme = readme_map(&[make_row("10101", "A00-K0")]);

        let merged = merge_records(
            vec![
                make_record("PLA Basic", "Black", "10101"),
                make_record("PLA Basic", "Red", "10200"),
            ],
            &previous,
            &readme,
        );

        assert_eq!(merged[0].variant_id, "A00-K0");
        assert_eq!(merged[0].material_id, "");
        // No README row for this code: variant stays blank.
        assert_eq!(merged[1].variant_id, "");
    }

    #[test]
    fn test_blank_prior_variant_falls_back_to_readme() {
        let previous = prior_map(&[make_prior("10101", "", "GFA00")]);
        let readme = readme_map(&[make_row("10101", "A00-K0")]);

        let merged = merge_records(
            vec![make_record("PLA Basic", "Black", "10101")],
            &previous,
            &readme,
        );

        assert_eq!(merged[0].variant_id, "A00-K0");
        assert_eq!(merged[0].material_id, "GFA00");
    }

    #[test]
    fn test_material_id_never_comes_from_readme() {
        let previous = HashMap::new();
        let readme = readme_map(&[make_row("10101", "A00-K0")]);

        let merged = merge_records(
            vec![make_record("PLA Basic", "Black", "10101")],
            &previous,
            &readme,
        );

        assert_eq!(merged[0].material_id, "");
    }

    #[test]
    fn test_sorted_by_material_then_color() {
        let previous = HashMap::new();
        let readme = HashMap::new();

        let merged = merge_records(
            vec![
                make_record("PLA Matte", "Charcoal", "11101"),
                make_record("ABS", "White", "40100"),
                make_record("PLA Basic", "Red", "10200"),
                make_record("ABS", "Black", "40101"),
                make_record("PLA Basic", "Black", "10101"),
            ],
            &previous,
            &readme,
        );

        let order: Vec<(&str, &str)> = merged.iter().map(|r| r.sort_key()).collect();
        assert_eq!(
            order,
            vec![
                ("ABS", "Black"),
                ("ABS", "White"),
                ("PLA Basic", "Black"),
                ("PLA Basic", "Red"),
                ("PLA Matte", "Charcoal"),
            ]
        );
    }

    #[test]
    fn test_duplicate_codes_collapse_last_value_wins() {
        let previous = HashMap::new();
        let readme = HashMap::new();

        let merged = merge_records(
            vec![
                make_record("PLA Basic", "Black", "10101"),
                make_record("PLA Basic", "Red", "10200"),
                make_record("PLA Basic", "Charcoal Black", "10101"),
            ],
            &previous,
            &readme,
        );

        assert_eq!(merged.len(), 2);
        let black = merged.iter().find(|r| r.filament_code == "10101").unwrap();
        assert_eq!(black.color, "Charcoal Black");
    }

    #[test]
    fn test_remerge_against_own_output_is_idempotent() {
        let previous = prior_map(&[
            make_prior("10101", "A00-K0", "GFA00"),
            make_prior("10200", "A00-R0", ""),
        ]);
        let readme = readme_map(&[make_row("33600", "G02-B0")]);

        let merged = merge_records(
            vec![
                make_record("PLA Basic", "Black", "10101"),
                make_record("PLA Basic", "Red", "10200"),
                make_record("PETG HF", "Blue", "33600"),
            ],
            &previous,
            &readme,
        );

        let again = merge_records(merged.clone(), &index_records(&merged), &HashMap::new());
        assert_eq!(again, merged);
    }
}
