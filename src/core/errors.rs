use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("CSV error: {0}")]
    Csv(Box<csv::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(Box<reqwest::Error>),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Sheet API error: {0}")]
    SheetApi(String),

    #[error("Failed to persist record: {0}")]
    Persistence(String),

    #[error("ScoutError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ScoutError {
    fn from(error: std::io::Error) -> Self {
        ScoutError::Io(Box::new(error))
    }
}

impl From<csv::Error> for ScoutError {
    fn from(error: csv::Error) -> Self {
        ScoutError::Csv(Box::new(error))
    }
}

impl From<reqwest::Error> for ScoutError {
    fn from(error: reqwest::Error) -> Self {
        ScoutError::Http(Box::new(error))
    }
}
