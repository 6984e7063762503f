use reqwest::blocking::Client;

use crate::{
    core::{
        http::fetch_text,
        RawTable,
        ScoutError,
    },
    source::{
        parse_csv,
        TableSource,
    },
};

/// The published reference dataset: a static CSV behind a fixed URL.
pub struct RemoteCsvSource {
    client: Client,
    url: String,
}

impl RemoteCsvSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        RemoteCsvSource { client, url: url.into() }
    }
}

impl TableSource for RemoteCsvSource {
    fn label(&self) -> &str {
        "remote"
    }

    fn fetch(&self) -> Result<RawTable, ScoutError> {
        let body = fetch_text(&self.client, &self.url)?;
        let table = parse_csv(&body)?;
        println!("Fetched {} remote rows from {}", table.len(), self.url);
        Ok(table)
    }
}
