//! Merging the source tables into the one dataset the session works from.

use std::collections::HashMap;

use crate::{
    core::{
        GeoPoint,
        Observation,
        RawTable,
    },
    schema::normalize,
};

/// Merge raw tables into one normalized, de-duplicated collection.
///
/// Tables arrive in priority order: later tables are more local and more
/// recent, so for rows sharing a `sample_id` the later row's values win.
/// The surviving collection keeps first-seen order. Rows without an id
/// (pre-identifier data) de-duplicate by full-row equality instead.
///
/// Never fails: malformed rows are coerced by `schema::normalize`, and an
/// all-empty input is an empty collection.
pub fn reconcile(tables: &[RawTable], fallback: GeoPoint) -> Vec<Observation> {
    let mut merged: Vec<Observation> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for table in tables {
        for raw in &table.rows {
            let obs = normalize(raw, fallback);

            if obs.sample_id.is_empty() {
                if !merged.contains(&obs) {
                    merged.push(obs);
                }
            } else if let Some(&at) = index_by_id.get(&obs.sample_id) {
                // Same identity seen again from a fresher source: replace
                // the values in place so ordering stays stable.
                merged[at] = obs;
            } else {
                index_by_id.insert(obs.sample_id.clone(), merged.len());
                merged.push(obs);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        GeoPoint,
        RawRow,
        RawTable,
    };

    fn table(rows: &[&[(&str, &str)]]) -> RawTable {
        let rows: Vec<RawRow> = rows
            .iter()
            .map(|cells| cells.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
            .collect();
        RawTable { headers: vec!["sample_id".to_string(), "crop".to_string()], rows }
    }

    #[test]
    fn all_empty_input_yields_empty_collection() {
        assert!(reconcile(&[], GeoPoint::default()).is_empty());
        assert!(reconcile(&[RawTable::default()], GeoPoint::default()).is_empty());
    }

    #[test]
    fn local_row_wins_over_remote_for_same_id() {
        let remote = table(&[&[("sample_id", "SARDI25001"), ("crop", "Wheat")]]);
        let local = table(&[&[("sample_id", "SARDI25001"), ("crop", "Barley")]]);

        let merged = reconcile(&[remote, local], GeoPoint::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].crop, "Barley");
    }

    #[test]
    fn surviving_rows_keep_first_seen_order() {
        let remote = table(&[
            &[("sample_id", "SARDI25001"), ("crop", "Wheat")],
            &[("sample_id", "SARDI25002"), ("crop", "Oats")],
        ]);
        let local = table(&[&[("sample_id", "SARDI25001"), ("crop", "Canola")]]);

        let merged = reconcile(&[remote, local], GeoPoint::default());
        let ids: Vec<&str> = merged.iter().map(|o| o.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["SARDI25001", "SARDI25002"]);
        assert_eq!(merged[0].crop, "Canola");
    }

    #[test]
    fn rows_without_ids_deduplicate_by_equality() {
        let a = table(&[&[("crop", "Wheat")], &[("crop", "Wheat")], &[("crop", "Vetch")]]);

        let merged = reconcile(&[a], GeoPoint::default());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].crop, "Wheat");
        assert_eq!(merged[1].crop, "Vetch");
    }

    #[test]
    fn reconcile_is_idempotent() {
        let remote = table(&[
            &[("sample_id", "SARDI25001"), ("crop", "Wheat")],
            &[("sample_id", "SARDI25002"), ("crop", "Oats")],
        ]);
        let local = table(&[&[("sample_id", "SARDI25002"), ("crop", "Lentil")]]);

        let once = reconcile(&[remote.clone(), local.clone()], GeoPoint::default());
        let twice = reconcile(&[remote, local], GeoPoint::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_rows_survive_as_coerced_records() {
        let messy = table(&[&[
            ("sample_id", "SARDI25003"),
            ("crop", "Chickpea"),
            ("date", "never"),
            ("severity1_percent", "banana"),
        ]]);

        let merged = reconcile(&[messy], GeoPoint::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].date, None);
        assert_eq!(merged[0].severity1_percent, 0);
    }
}
