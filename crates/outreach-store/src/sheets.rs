//! Spreadsheet-backed prospect store over the sheets values API.
//!
//! The whole campaign lives on one sheet tab, one prospect per row, keyed
//! by listing id. Reads pull the full data range in one call; writes go
//! through `values/{range}` update or `values/{range}:append`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;

use outreach_core::{Prospect, SendStatus};

use crate::error::StoreError;
use crate::row;
use crate::ProspectStore;

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

/// First data row; row 1 is the header.
const DATA_START_ROW: usize = 2;

/// Store backed by one spreadsheet tab.
pub struct SheetsStore {
    client: Client,
    spreadsheet_id: String,
    sheet_name: String,
    access_token: Option<String>,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsStore {
    /// Creates a store against the production sheets API.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        spreadsheet_id: &str,
        sheet_name: &str,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        Self::with_base_url(
            spreadsheet_id,
            sheet_name,
            access_token,
            timeout_secs,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a store with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the client cannot be constructed,
    /// or [`StoreError::ApiStatus`] if `base_url` does not parse.
    pub fn with_base_url(
        spreadsheet_id: &str,
        sheet_name: &str,
        access_token: Option<String>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|_| StoreError::ApiStatus {
            status: 0,
            body: format!("invalid base URL: {base_url}"),
        })?;

        Ok(Self {
            client,
            spreadsheet_id: spreadsheet_id.to_owned(),
            sheet_name: sheet_name.to_owned(),
            access_token,
            base_url,
        })
    }

    fn values_url(&self, range: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range,
            ]);
        }
        url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::ApiStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let url = self.values_url(range);
        let response = self.authorized(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        let parsed: ValueRange =
            serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
                context: format!("values range {range}"),
                source: e,
            })?;
        Ok(parsed.values)
    }

    async fn write_range(&self, range: &str, values: Vec<Vec<String>>) -> Result<(), StoreError> {
        let mut url = self.values_url(range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW");
        let response = self
            .authorized(self.client.put(url))
            .json(&json!({ "values": values }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn append_row(&self, cells: Vec<String>) -> Result<(), StoreError> {
        let range = format!("{}!A1:U1:append", self.sheet_name);
        let mut url = self.values_url(&range);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW");
        let response = self
            .authorized(self.client.post(url))
            .json(&json!({ "values": [cells] }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Write the header row if row 1 is empty. Call once per run before
    /// any upserts.
    ///
    /// # Errors
    ///
    /// Propagates API failures from the read or write.
    pub async fn ensure_header(&self) -> Result<(), StoreError> {
        let range = format!("{}!A1:U1", self.sheet_name);
        let existing = self.read_range(&range).await?;
        if existing.is_empty() {
            self.write_range(&range, vec![row::header_row()]).await?;
        }
        Ok(())
    }

    /// All data rows with their absolute sheet row numbers.
    async fn rows(&self) -> Result<Vec<(usize, Prospect)>, StoreError> {
        let range = format!("{}!A{}:U", self.sheet_name, DATA_START_ROW);
        let values = self.read_range(&range).await?;
        Ok(values
            .iter()
            .enumerate()
            .filter_map(|(i, cells)| row::from_row(cells).map(|p| (DATA_START_ROW + i, p)))
            .collect())
    }

    async fn find_row(&self, listing_id: &str) -> Result<Option<usize>, StoreError> {
        Ok(self
            .rows()
            .await?
            .into_iter()
            .find(|(_, p)| p.listing_id == listing_id)
            .map(|(n, _)| n))
    }

    async fn write_prospect_at(&self, sheet_row: usize, prospect: &Prospect) -> Result<(), StoreError> {
        let range = format!("{}!A{sheet_row}:U{sheet_row}", self.sheet_name);
        self.write_range(&range, vec![row::to_row(prospect)]).await
    }
}

#[async_trait]
impl ProspectStore for SheetsStore {
    async fn get(&self, listing_id: &str) -> Result<Option<Prospect>, StoreError> {
        Ok(self
            .rows()
            .await?
            .into_iter()
            .map(|(_, p)| p)
            .find(|p| p.listing_id == listing_id))
    }

    async fn list(&self) -> Result<Vec<Prospect>, StoreError> {
        Ok(self.rows().await?.into_iter().map(|(_, p)| p).collect())
    }

    async fn upsert(&self, prospect: &Prospect) -> Result<(), StoreError> {
        match self.find_row(&prospect.listing_id).await? {
            Some(sheet_row) => self.write_prospect_at(sheet_row, prospect).await,
            None => self.append_row(row::to_row(prospect)).await,
        }
    }

    async fn update_status(
        &self,
        listing_id: &str,
        status: SendStatus,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let rows = self.rows().await?;
        let Some((sheet_row, mut prospect)) =
            rows.into_iter().find(|(_, p)| p.listing_id == listing_id)
        else {
            return Err(StoreError::UnknownListing(listing_id.to_owned()));
        };
        prospect.status = status;
        if sent_at.is_some() {
            prospect.sent_at = sent_at;
        }
        self.write_prospect_at(sheet_row, &prospect).await
    }
}
