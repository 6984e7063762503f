use std::time::Duration;

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::{
        ACCEPT_ENCODING,
        USER_AGENT,
    },
};

use crate::core::ScoutError;

pub fn http_client() -> Result<Client, ScoutError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| ScoutError::Custom(format!("HTTP client build failed: {e}")))
}

/// GET a small text resource, retrying transient failures a couple of times
/// before giving up.
pub fn fetch_text(client: &Client, url: &str) -> Result<String, ScoutError> {
    let mut attempts: usize = 0;
    loop {
        attempts += 1;

        let resp = client
            .get(url)
            .header(USER_AGENT, "cropscout/0.1 (+reqwest)")
            .header(ACCEPT_ENCODING, "identity")
            .send();

        let resp = match resp {
            Ok(r) => r,
            Err(e) => {
                if attempts < 3 {
                    std::thread::sleep(Duration::from_secs(2 * attempts as u64));
                    continue;
                }
                return Err(ScoutError::Custom(format!("Failed HTTP GET {}: {}", url, e)));
            }
        };

        ensure_success(&resp)?;

        match resp.text() {
            Ok(body) => return Ok(body),
            Err(_) => {
                if attempts < 3 {
                    std::thread::sleep(Duration::from_secs(2 * attempts as u64));
                    continue;
                }
                return Err(ScoutError::Custom(
                    "Failed to read response body".to_string(),
                ));
            }
        }
    }
}

fn ensure_success(resp: &Response) -> Result<(), ScoutError> {
    if !resp.status().is_success() {
        return Err(ScoutError::Custom(format!(
            "HTTP error {} from {}",
            resp.status(),
            resp.url()
        )));
    }
    Ok(())
}
