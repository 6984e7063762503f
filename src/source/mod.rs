//! Source readers: each one fetches a raw table from one backing store.
//! A reader that cannot deliver is substituted with an empty table and a
//! warning, never a hard failure.

pub mod local;
pub mod remote;
pub mod sheet;

pub use local::LocalCsvSource;
pub use remote::RemoteCsvSource;
pub use sheet::SheetSource;

use crate::core::{
    RawRow,
    RawTable,
    ScoutError,
};

/// A fetchable tabular dataset. Implementations must be idempotent: calling
/// `fetch` twice has no side effects beyond the read itself.
pub trait TableSource {
    /// Short name used in warnings and logs, e.g. "remote", "local".
    fn label(&self) -> &str;

    fn fetch(&self) -> Result<RawTable, ScoutError>;
}

#[derive(Debug, Clone)]
pub struct SourceWarning {
    pub source: String,
    pub reason: String,
}

/// The SourceUnavailable policy: a failing reader degrades to an empty table
/// plus a warning the caller can surface in aggregate.
pub fn fetch_or_empty(source: &dyn TableSource) -> (RawTable, Option<SourceWarning>) {
    match source.fetch() {
        Ok(table) => (table, None),
        Err(e) => {
            eprintln!("Source '{}' unavailable: {}", source.label(), e);
            (
                RawTable::default(),
                Some(SourceWarning { source: source.label().to_string(), reason: e.to_string() }),
            )
        }
    }
}

/// Parse CSV text into a raw table. Ragged rows are tolerated; cells beyond
/// the header count are dropped and short rows leave columns absent.
pub fn parse_csv(text: &str) -> Result<RawTable, ScoutError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
