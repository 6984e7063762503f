//! Spreadsheet capability. The rest of the pipeline only sees the
//! `SheetsClient` trait; a pre-authenticated REST client is injected in
//! production and an in-memory sheet stands in for it in tests.

pub mod rest;

pub use rest::RestSheetsClient;

use std::sync::Mutex;

use crate::core::ScoutError;

pub trait SheetsClient {
    /// Every row of the first worksheet, header row included.
    fn read_all(&self) -> Result<Vec<Vec<String>>, ScoutError>;

    fn append_row(&self, row: &[String]) -> Result<(), ScoutError>;

    /// Clear the worksheet and write the given rows, header row first.
    fn overwrite_all(&self, rows: &[Vec<String>]) -> Result<(), ScoutError>;
}

/// In-process fake with the same contract as the REST client.
#[derive(Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<Vec<String>>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        MemorySheet::default()
    }

    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        MemorySheet { rows: Mutex::new(rows) }
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().expect("sheet lock poisoned").clone()
    }
}

impl SheetsClient for MemorySheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>, ScoutError> {
        Ok(self.rows())
    }

    fn append_row(&self, row: &[String]) -> Result<(), ScoutError> {
        self.rows.lock().expect("sheet lock poisoned").push(row.to_vec());
        Ok(())
    }

    fn overwrite_all(&self, rows: &[Vec<String>]) -> Result<(), ScoutError> {
        *self.rows.lock().expect("sheet lock poisoned") = rows.to_vec();
        Ok(())
    }
}

/// A sheet that always fails, for exercising the partial-persistence path.
#[cfg(test)]
pub struct BrokenSheet;

#[cfg(test)]
impl SheetsClient for BrokenSheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>, ScoutError> {
        Err(ScoutError::SheetApi("backend offline".to_string()))
    }

    fn append_row(&self, _row: &[String]) -> Result<(), ScoutError> {
        Err(ScoutError::SheetApi("backend offline".to_string()))
    }

    fn overwrite_all(&self, _rows: &[Vec<String>]) -> Result<(), ScoutError> {
        Err(ScoutError::SheetApi("backend offline".to_string()))
    }
}
