use crate::errors::{RallyMediaResult, StreamError};
use log::info;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

fn http_client() -> Result<Client, StreamError> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| StreamError::new(e.to_string()))
}

/// Load the raw bytes of a source, remote or local.
///
/// `http://` and `https://` sources are fetched with a single GET; anything
/// else is treated as a filesystem path.
pub async fn load_bytes(source: &str) -> RallyMediaResult<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let client = http_client()?;
        let response = client
            .get(source)
            .send()
            .await
            .map_err(|e| StreamError::new(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StreamError::new(format!("HTTP error: {}", response.status())).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StreamError::new(e.to_string()))?;

        info!("Downloaded {} bytes from {}", bytes.len(), source);
        Ok(bytes.to_vec())
    } else {
        let bytes = std::fs::read(source)?;
        info!("Read {} bytes from {}", bytes.len(), source);
        Ok(bytes)
    }
}

/// Fetch a JSON response envelope.
///
/// The body is parsed but not interpreted; feed the result to the
/// [`crate::envelope`] extractors.
pub async fn fetch_json(url: &str) -> RallyMediaResult<Value> {
    let bytes = load_bytes(url).await?;
    let value = serde_json::from_slice(&bytes)
        .map_err(|e| StreamError::new(format!("invalid JSON envelope: {}", e)))?;
    Ok(value)
}
