use std::{
    env,
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::GeoPoint,
    schema::sample_id,
    store::AppendOptions,
};

const CONFIG_FILE: &str = "cropscout.json";
const DEFAULT_REMOTE_CSV_URL: &str =
    "https://raw.githubusercontent.com/pullanagari/Disease_app/main/data_temp.csv";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    pub remote_csv_url: String,
    pub local_data_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub id_prefix: String,
    pub id_start: u64,
    pub id_width: usize,
    pub require_all_sinks: bool,
    pub fallback_location: GeoPoint,
    pub sheets: Option<SheetsConfig>,
}

/// Credentials for the spreadsheet backend. The token is pre-issued; this
/// crate never does the service-account dance itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub api_token: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        ScoutConfig {
            remote_csv_url: DEFAULT_REMOTE_CSV_URL.to_string(),
            local_data_path: PathBuf::from("data/local_disease_data.csv"),
            uploads_dir: PathBuf::from("uploads"),
            id_prefix: sample_id::DEFAULT_PREFIX.to_string(),
            id_start: sample_id::DEFAULT_START,
            id_width: sample_id::DEFAULT_WIDTH,
            require_all_sinks: false,
            fallback_location: GeoPoint::default(),
            sheets: None,
        }
    }
}

impl ScoutConfig {
    /// Defaults, overlaid with the JSON config file when present, overlaid
    /// with `CROPSCOUT_*` environment variables.
    pub fn load() -> Self {
        let path = env::var("CROPSCOUT_CONFIG").unwrap_or_else(|_| CONFIG_FILE.to_string());
        let mut config = Self::from_file(Path::new(&path));
        config.apply_env_overrides();
        config
    }

    pub fn from_file(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|text| {
            serde_json::from_str::<ScoutConfig>(&text).map_err(|e| e.to_string())
        }) {
            Ok(config) => {
                println!("Config loaded from {}", path.display());
                config
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CROPSCOUT_REMOTE_CSV_URL") {
            self.remote_csv_url = url;
        }
        if let Ok(path) = env::var("CROPSCOUT_LOCAL_DATA_PATH") {
            self.local_data_path = PathBuf::from(path);
        }
        if let Ok(dir) = env::var("CROPSCOUT_UPLOADS_DIR") {
            self.uploads_dir = PathBuf::from(dir);
        }
        if let Ok(prefix) = env::var("CROPSCOUT_ID_PREFIX") {
            self.id_prefix = prefix;
        }
        if let Ok(flag) = env::var("CROPSCOUT_REQUIRE_ALL_SINKS") {
            self.require_all_sinks = flag == "1" || flag.eq_ignore_ascii_case("true");
        }
        // Sheet credentials arrive via environment in cloud deployments.
        if let (Ok(id), Ok(token)) =
            (env::var("CROPSCOUT_SHEET_ID"), env::var("CROPSCOUT_SHEET_TOKEN"))
        {
            let endpoint = env::var("CROPSCOUT_SHEET_ENDPOINT").ok();
            self.sheets = Some(SheetsConfig { spreadsheet_id: id, api_token: token, endpoint });
        }
    }

    pub fn append_options(&self) -> AppendOptions {
        AppendOptions {
            id_prefix: self.id_prefix.clone(),
            id_start: self.id_start,
            id_width: self.id_width,
            require_all_sinks: self.require_all_sinks,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::Write,
        path::Path,
    };

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ScoutConfig::from_file(Path::new("does/not/exist.json"));
        assert_eq!(config.id_prefix, "SARDI");
        assert_eq!(config.id_start, 25001);
        assert!(config.sheets.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cropscout.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "id_prefix": "PLOT",
                "sheets": {{ "spreadsheet_id": "abc123", "api_token": "t0k3n", "endpoint": null }}
            }}"#
        )
        .unwrap();

        let config = ScoutConfig::from_file(&path);
        assert_eq!(config.id_prefix, "PLOT");
        assert_eq!(config.id_start, 25001); // untouched default
        assert_eq!(config.sheets.unwrap().spreadsheet_id, "abc123");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cropscout.json");
        fs::write(&path, "{ not json").unwrap();

        let config = ScoutConfig::from_file(&path);
        assert_eq!(config.id_prefix, "SARDI");
    }
}
