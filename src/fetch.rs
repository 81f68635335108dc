use reqwest::{Client, StatusCode};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::data::model::RawTable;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to data source failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Data source answered with HTTP {0}")]
    Status(StatusCode),

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response is not an array of arrays of strings: {0}")]
    Shape(String),
}

/// Remote tabular data source: one GET per call, no retries.
#[derive(Debug, Clone)]
pub struct DatasetClient {
    http: Client,
    url: String,
}

impl DatasetClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the table and decode it. Header validation is left to the loader.
    pub async fn fetch_table(&self) -> Result<RawTable, FetchError> {
        log::debug!("Fetching dataset from {}", self.url);

        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        decode_table(&body)
    }
}

/// Decode a response body into a table, rejecting any other JSON shape.
pub fn decode_table(body: &[u8]) -> Result<RawTable, FetchError> {
    let root: JsonValue = serde_json::from_slice(body)?;
    let JsonValue::Array(rows) = root else {
        return Err(FetchError::Shape("top level is not an array".to_string()));
    };

    let mut table = RawTable::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let JsonValue::Array(cells) = row else {
            return Err(FetchError::Shape(format!("row {i} is not an array")));
        };
        let row = cells
            .into_iter()
            .enumerate()
            .map(|(j, cell)| match cell {
                JsonValue::String(s) => Ok(s),
                other => Err(FetchError::Shape(format!(
                    "row {i}, cell {j} is {other}, expected a string"
                ))),
            })
            .collect::<Result<Vec<String>, FetchError>>()?;
        table.push(row);
    }
    Ok(table)
}
