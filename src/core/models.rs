use std::collections::HashMap;

use chrono::NaiveDate;

/// Canonical column order shared by the local CSV file, the spreadsheet
/// worksheet and the bulk export.
pub const COLUMNS: &[&str] = &[
    "sample_id",
    "date",
    "collector_name",
    "crop",
    "variety",
    "plant_stage",
    "disease1",
    "disease2",
    "disease3",
    "severity1_percent",
    "severity2_percent",
    "severity3_percent",
    "latitude",
    "longitude",
    "survey_location",
    "field_type",
    "agronomist",
    "photo_filename",
    "field_notes",
    "sample_taken",
    "action_tags",
];

pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for GeoPoint {
    // Adelaide, the survey program's home base
    fn default() -> Self {
        GeoPoint { latitude: -34.96, longitude: 138.63 }
    }
}

/// One raw row as it came off the wire: column name -> cell text.
/// Missing columns simply have no entry, which is how column-set drift
/// between dataset revisions shows up.
pub type RawRow = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// One field-survey entry after normalization. Text fields are empty
/// strings rather than options so rendering stays uniform downstream.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    pub sample_id: String,         // PREFIX + zero-padded number, may be empty on old rows
    pub date: Option<NaiveDate>,   // None marks an unparsable input date
    pub collector_name: String,
    pub crop: String,
    pub variety: String,
    pub plant_stage: String,
    pub disease1: String,
    pub disease2: String,
    pub disease3: String,
    pub severity1_percent: u8,     // 0..=100, paired with disease1
    pub severity2_percent: u8,
    pub severity3_percent: u8,
    pub latitude: f64,
    pub longitude: f64,
    pub survey_location: String,
    pub field_type: String,
    pub agronomist: String,
    pub photo_filename: String,    // local filename or remote link, never both
    pub field_notes: String,
    pub sample_taken: String,
    pub action_tags: String,       // comma-joined multi-select
}

impl Observation {
    pub fn date_string(&self) -> String {
        match self.date {
            Some(d) => d.format(DATE_FORMAT).to_string(),
            None => String::new(),
        }
    }

    /// Render the record as one row of cells in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        COLUMNS.iter().map(|col| self.cell(col)).collect()
    }

    fn cell(&self, column: &str) -> String {
        match column {
            "sample_id" => self.sample_id.clone(),
            "date" => self.date_string(),
            "collector_name" => self.collector_name.clone(),
            "crop" => self.crop.clone(),
            "variety" => self.variety.clone(),
            "plant_stage" => self.plant_stage.clone(),
            "disease1" => self.disease1.clone(),
            "disease2" => self.disease2.clone(),
            "disease3" => self.disease3.clone(),
            "severity1_percent" => self.severity1_percent.to_string(),
            "severity2_percent" => self.severity2_percent.to_string(),
            "severity3_percent" => self.severity3_percent.to_string(),
            "latitude" => self.latitude.to_string(),
            "longitude" => self.longitude.to_string(),
            "survey_location" => self.survey_location.clone(),
            "field_type" => self.field_type.clone(),
            "agronomist" => self.agronomist.clone(),
            "photo_filename" => self.photo_filename.clone(),
            "field_notes" => self.field_notes.clone(),
            "sample_taken" => self.sample_taken.clone(),
            "action_tags" => self.action_tags.clone(),
            _ => String::new(),
        }
    }
}
