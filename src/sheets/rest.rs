use reqwest::blocking::Client;
use serde_json::{
    json,
    Value,
};

use crate::{
    core::ScoutError,
    sheets::SheetsClient,
};

const DEFAULT_ENDPOINT: &str = "https://sheets.googleapis.com";

// The whole first worksheet; columns never reach past U in practice.
const FULL_RANGE: &str = "A:ZZ";

/// Sheets v4 REST client over a pre-issued bearer token. Token refresh and
/// service-account plumbing live outside this crate; what arrives here is
/// already authorized.
pub struct RestSheetsClient {
    client: Client,
    endpoint: String,
    spreadsheet_id: String,
    token: String,
}

impl RestSheetsClient {
    pub fn new(
        client: Client,
        spreadsheet_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        RestSheetsClient {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            token: token.into(),
        }
    }

    /// Point at a different API host, used against a stub server in tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}{}",
            self.endpoint, self.spreadsheet_id, range, suffix
        )
    }

    fn check(&self, resp: reqwest::blocking::Response) -> Result<Value, ScoutError> {
        if !resp.status().is_success() {
            return Err(ScoutError::SheetApi(format!(
                "HTTP {} from {}",
                resp.status(),
                resp.url()
            )));
        }
        Ok(resp.json()?)
    }
}

impl SheetsClient for RestSheetsClient {
    fn read_all(&self) -> Result<Vec<Vec<String>>, ScoutError> {
        let resp = self
            .client
            .get(self.values_url(FULL_RANGE, ""))
            .bearer_auth(&self.token)
            .send()?;
        let body = self.check(resp)?;

        let values = match body.get("values").and_then(Value::as_array) {
            Some(rows) => rows,
            None => return Ok(Vec::new()), // empty sheet has no "values" key
        };

        let rows = values
            .iter()
            .map(|row| {
                row.as_array()
                    .map(|cells| {
                        cells
                            .iter()
                            .map(|cell| match cell {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Ok(rows)
    }

    fn append_row(&self, row: &[String]) -> Result<(), ScoutError> {
        let resp = self
            .client
            .post(self.values_url(FULL_RANGE, ":append?valueInputOption=USER_ENTERED"))
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()?;
        self.check(resp)?;
        Ok(())
    }

    fn overwrite_all(&self, rows: &[Vec<String>]) -> Result<(), ScoutError> {
        let resp = self
            .client
            .post(self.values_url(FULL_RANGE, ":clear"))
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()?;
        self.check(resp)?;

        let resp = self
            .client
            .put(self.values_url("A1", "?valueInputOption=USER_ENTERED"))
            .bearer_auth(&self.token)
            .json(&json!({ "values": rows }))
            .send()?;
        self.check(resp)?;
        Ok(())
    }
}
