use std::{
    fs,
    path::PathBuf,
};

use crate::{
    core::{
        RawTable,
        ScoutError,
    },
    source::{
        parse_csv,
        TableSource,
    },
};

/// The locally persisted supplement, a CSV at a fixed path. A missing file
/// is an empty dataset, not an error: first run has nothing saved yet.
pub struct LocalCsvSource {
    path: PathBuf,
}

impl LocalCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalCsvSource { path: path.into() }
    }
}

impl TableSource for LocalCsvSource {
    fn label(&self) -> &str {
        "local"
    }

    fn fetch(&self) -> Result<RawTable, ScoutError> {
        if !self.path.exists() {
            return Ok(RawTable::default());
        }
        let text = fs::read_to_string(&self.path)?;
        parse_csv(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        io::Write,
    };

    use super::*;
    use crate::source::TableSource;

    #[test]
    fn missing_file_is_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = LocalCsvSource::new(dir.path().join("nope.csv"));
        assert!(source.fetch().unwrap().is_empty());
    }

    #[test]
    fn reads_rows_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "sample_id,crop").unwrap();
        writeln!(file, "SARDI25001,Wheat").unwrap();

        let table = LocalCsvSource::new(&path).fetch().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0]["sample_id"], "SARDI25001");
    }
}
