pub mod sample_id;

pub use sample_id::next_sample_id;

use chrono::NaiveDate;

use crate::core::{
    GeoPoint,
    Observation,
    RawRow,
};

// Date formats seen across dataset revisions, day-first first.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%d/%m/%y"];

/// Turn one raw row into an `Observation`. Total and permissive: bad cells
/// are coerced or fall back, they never reject the row.
pub fn normalize(raw: &RawRow, fallback: GeoPoint) -> Observation {
    let disease1 = disease_field(raw, "disease1");
    let disease2 = disease_field(raw, "disease2");
    let disease3 = disease_field(raw, "disease3");

    Observation {
        sample_id: text_field(raw, "sample_id"),
        date: parse_date(&text_field(raw, "date")),
        collector_name: text_field(raw, "collector_name"),
        crop: text_field(raw, "crop"),
        variety: text_field(raw, "variety"),
        plant_stage: text_field(raw, "plant_stage"),
        severity1_percent: severity_for(&disease1, &text_field(raw, "severity1_percent")),
        severity2_percent: severity_for(&disease2, &text_field(raw, "severity2_percent")),
        severity3_percent: severity_for(&disease3, &text_field(raw, "severity3_percent")),
        disease1,
        disease2,
        disease3,
        latitude: parse_coordinate(&text_field(raw, "latitude"), fallback.latitude),
        longitude: parse_coordinate(&text_field(raw, "longitude"), fallback.longitude),
        survey_location: text_field(raw, "survey_location"),
        field_type: text_field(raw, "field_type"),
        agronomist: text_field(raw, "agronomist"),
        photo_filename: text_field(raw, "photo_filename"),
        field_notes: text_field(raw, "field_notes"),
        sample_taken: text_field(raw, "sample_taken"),
        action_tags: text_field(raw, "action_tags"),
    }
}

/// Older exports used capitalized headers for a couple of columns.
fn aliases(column: &str) -> &[&str] {
    match column {
        "agronomist" => &["agronomist", "Agronomist"],
        "action_tags" => &["action_tags", "Action"],
        _ => &[],
    }
}

fn text_field(raw: &RawRow, column: &str) -> String {
    if let Some(value) = raw.get(column) {
        return value.trim().to_string();
    }
    for alias in aliases(column) {
        if let Some(value) = raw.get(*alias) {
            return value.trim().to_string();
        }
    }
    String::new()
}

/// A disease slot filled with the form's "None" placeholder counts as empty.
fn disease_field(raw: &RawRow, column: &str) -> String {
    let value = text_field(raw, column);
    if value.eq_ignore_ascii_case("none") {
        String::new()
    } else {
        value
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    // Last resort: some old spreadsheet rows came back month-first.
    NaiveDate::parse_from_str(value, "%m/%d/%Y").ok()
}

/// Severity for an empty disease slot is always 0; otherwise coerce the cell
/// to an integer and clamp into 0..=100.
fn severity_for(disease: &str, value: &str) -> u8 {
    if disease.is_empty() {
        return 0;
    }
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n.clamp(0.0, 100.0).round() as u8,
        _ => 0,
    }
}

fn parse_coordinate(value: &str, fallback: f64) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::{
        GeoPoint,
        RawRow,
    };

    fn row(cells: &[(&str, &str)]) -> RawRow {
        cells.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn severity_clamped_and_coerced() {
        let raw = row(&[
            ("disease1", "Stripe rust"),
            ("severity1_percent", "150"),
            ("disease2", "Scald"),
            ("severity2_percent", "abc"),
        ]);
        let obs = normalize(&raw, GeoPoint::default());
        assert_eq!(obs.severity1_percent, 100);
        assert_eq!(obs.severity2_percent, 0);
    }

    #[test]
    fn empty_disease_slot_zeroes_severity() {
        let raw = row(&[
            ("disease1", "Stripe rust"),
            ("severity1_percent", "40"),
            ("disease2", "None"),
            ("severity2_percent", "80"),
            ("severity3_percent", "55"),
        ]);
        let obs = normalize(&raw, GeoPoint::default());
        assert_eq!(obs.severity1_percent, 40);
        assert_eq!(obs.disease2, "");
        assert_eq!(obs.severity2_percent, 0);
        assert_eq!(obs.disease3, "");
        assert_eq!(obs.severity3_percent, 0);
    }

    #[test]
    fn dates_parse_day_first() {
        assert_eq!(parse_date("07/08/2025"), NaiveDate::from_ymd_opt(2025, 8, 7));
        assert_eq!(parse_date("2025-08-07"), NaiveDate::from_ymd_opt(2025, 8, 7));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn bad_coordinates_fall_back() {
        let raw = row(&[("latitude", "south-ish"), ("longitude", "140.1")]);
        let obs = normalize(&raw, GeoPoint::default());
        assert_eq!(obs.latitude, GeoPoint::default().latitude);
        assert_eq!(obs.longitude, 140.1);
    }

    #[test]
    fn legacy_headers_map_onto_fields() {
        let raw = row(&[("Agronomist", "J. Field"), ("Action", "Molecular diagnosis")]);
        let obs = normalize(&raw, GeoPoint::default());
        assert_eq!(obs.agronomist, "J. Field");
        assert_eq!(obs.action_tags, "Molecular diagnosis");
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let raw = row(&[("crop", "Wheat")]);
        let obs = normalize(&raw, GeoPoint::default());
        assert_eq!(obs.crop, "Wheat");
        assert_eq!(obs.disease3, "");
        assert_eq!(obs.field_notes, "");
        assert_eq!(obs.date, None);
    }
}
