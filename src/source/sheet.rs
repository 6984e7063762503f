use crate::{
    core::{
        RawRow,
        RawTable,
        ScoutError,
    },
    sheets::SheetsClient,
    source::TableSource,
};

/// Reader over the spreadsheet backend. The first worksheet row is the
/// header; every later row becomes one raw record.
pub struct SheetSource<'a> {
    client: &'a dyn SheetsClient,
}

impl<'a> SheetSource<'a> {
    pub fn new(client: &'a dyn SheetsClient) -> Self {
        SheetSource { client }
    }
}

impl TableSource for SheetSource<'_> {
    fn label(&self) -> &str {
        "sheet"
    }

    fn fetch(&self) -> Result<RawTable, ScoutError> {
        let values = self.client.read_all()?;
        Ok(table_from_values(values))
    }
}

pub fn table_from_values(values: Vec<Vec<String>>) -> RawTable {
    let mut values = values.into_iter();
    let headers: Vec<String> = match values.next() {
        Some(header_row) => header_row.into_iter().map(|h| h.trim().to_string()).collect(),
        None => return RawTable::default(),
    };

    let rows = values
        .map(|cells| {
            let mut row = RawRow::new();
            for (header, cell) in headers.iter().zip(cells) {
                row.insert(header.clone(), cell);
            }
            row
        })
        .collect();

    RawTable { headers, rows }
}
