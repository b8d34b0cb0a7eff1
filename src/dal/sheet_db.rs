use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("Invalid credentials payload: {0}")]
    Credentials(String),
    #[error("Could not sign service account assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid sheets api url: {0}")]
    InvalidUrl(String),
    #[error("Sheets api request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Sheets api returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// One `{range, values}` entry of a batch update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeUpdate {
    pub range: String,
    pub values: Vec<Vec<String>>,
}

/// Tabular store holding both the company tab and the rule tab.
#[async_trait]
pub trait TableStore {
    /// Cell values of `range` (A1 notation, tab included), row by row.
    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError>;

    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> Result<(), SheetError>;
}

/// A1 range on a named tab. The tab name is always quoted, so spaces and
/// punctuation resolve; embedded `'` are doubled.
pub fn tab_range(tab_name: &str, range: &str) -> String {
    format!("'{}'!{}", tab_name.replace('\'', "''"), range)
}

/// Passes successful responses through; anything else becomes [`SheetError::Status`].
pub(crate) async fn ensure_success(
    res: reqwest::Response,
) -> Result<reqwest::Response, SheetError> {
    match res.status() {
        status if status.is_success() => Ok(res),
        status => {
            let body = res.text().await.unwrap_or_default();
            Err(SheetError::Status { status, body })
        }
    }
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchUpdateRequest {
    value_input_option: &'static str,
    data: Vec<RangeUpdate>,
}

/// Google Sheets v4 values API.
pub struct SheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsClient {
    pub fn new(base_url: String, spreadsheet_id: String, access_token: String) -> Self {
        SheetsClient {
            client: Client::new(),
            base_url,
            spreadsheet_id,
            access_token,
        }
    }

    fn values_url(&self, last_segment: &str) -> Result<Url, SheetError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SheetError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(&self.spreadsheet_id)
            .push(last_segment);
        Ok(url)
    }
}

#[async_trait]
impl TableStore for SheetsClient {
    async fn get_values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetError> {
        let mut url = self.values_url("values")?;
        url.path_segments_mut()
            .map_err(|_| SheetError::InvalidUrl(self.base_url.clone()))?
            .push(range);

        let res = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let value_range = ensure_success(res).await?.json::<ValueRange>().await?;

        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn batch_update(&self, updates: Vec<RangeUpdate>) -> Result<(), SheetError> {
        let url = self.values_url("values:batchUpdate")?;
        let body = BatchUpdateRequest {
            value_input_option: "RAW",
            data: updates,
        };

        let res = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        ensure_success(res).await?;

        Ok(())
    }
}
