//! Google Sheets values API client
//!
//! Reads the fixed ranges bound to each data set. The HTTP client is built on
//! first use and shared by every later request; nothing else is cached, so
//! each read returns the sheet as it is now.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use vyapar_config::{SheetRanges, SheetsConfig};
use vyapar_core::{DataSet, DataStore, RawTable, TableSet};

use crate::SheetsError;

/// One `ValueRange` from the values API
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    range: String,
    /// Absent when the range is empty
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

/// Data store backed by one spreadsheet
pub struct SheetsClient {
    config: SheetsConfig,
    ranges: SheetRanges,
    client: OnceCell<Client>,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig, ranges: SheetRanges) -> Result<Self, SheetsError> {
        if config.spreadsheet_id.is_empty() {
            return Err(SheetsError::Configuration(
                "spreadsheet id not set (VYAPAR__SHEETS__SPREADSHEET_ID)".to_string(),
            ));
        }
        Url::parse(&config.endpoint)
            .map_err(|e| SheetsError::Configuration(format!("endpoint {}: {}", config.endpoint, e)))?;

        Ok(Self {
            config,
            ranges,
            client: OnceCell::new(),
        })
    }

    pub fn ranges(&self) -> &SheetRanges {
        &self.ranges
    }

    fn http(&self) -> Result<&Client, SheetsError> {
        self.client.get_or_try_init(|| {
            tracing::debug!(endpoint = %self.config.endpoint, "Building sheets HTTP client");
            Client::builder()
                .timeout(Duration::from_secs(self.config.timeout_secs))
                .build()
                .map_err(|e| SheetsError::Network(e.to_string()))
        })
    }

    /// `{endpoint}/v4/spreadsheets/{id}/{tail...}`, each segment percent-encoded
    fn spreadsheet_url(&self, tail: &[&str]) -> Result<Url, SheetsError> {
        let mut url = Url::parse(&self.config.endpoint)
            .map_err(|e| SheetsError::Configuration(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::Configuration("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.config.spreadsheet_id.as_str()])
            .extend(tail);
        Ok(url)
    }

    pub(crate) fn read_url(&self, data_set: DataSet) -> Result<Url, SheetsError> {
        self.spreadsheet_url(&["values", self.ranges.range(data_set)])
    }

    pub(crate) fn batch_url(&self, data_sets: &[DataSet]) -> Result<Url, SheetsError> {
        let mut url = self.spreadsheet_url(&["values:batchGet"])?;
        {
            let mut query = url.query_pairs_mut();
            for data_set in data_sets {
                query.append_pair("ranges", self.ranges.range(*data_set));
            }
        }
        Ok(url)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, SheetsError> {
        let response = self
            .http()?
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl DataStore for SheetsClient {
    async fn read(&self, data_set: DataSet) -> vyapar_core::Result<RawTable> {
        let url = self.read_url(data_set)?;
        let value_range: ValueRange = self.get_json(url).await?;
        let table = into_table(value_range.values);
        tracing::debug!(
            data_set = %data_set,
            range = %value_range.range,
            rows = table.len(),
            "Read sheet range"
        );
        Ok(table)
    }

    /// Single `values:batchGet` call; ranges come back in request order
    async fn batch_read(&self, data_sets: &[DataSet]) -> vyapar_core::Result<TableSet> {
        if data_sets.is_empty() {
            return Ok(TableSet::new());
        }
        let url = self.batch_url(data_sets)?;
        let response: BatchGetResponse = self.get_json(url).await?;
        let tables = match_ranges(data_sets, response.value_ranges)?;
        tracing::debug!(data_sets = data_sets.len(), "Batch read sheet ranges");
        Ok(tables)
    }

    fn name(&self) -> &str {
        "google_sheets"
    }
}

fn match_ranges(
    data_sets: &[DataSet],
    value_ranges: Vec<ValueRange>,
) -> Result<TableSet, SheetsError> {
    if value_ranges.len() != data_sets.len() {
        return Err(SheetsError::InvalidResponse(format!(
            "requested {} ranges, received {}",
            data_sets.len(),
            value_ranges.len()
        )));
    }
    Ok(data_sets
        .iter()
        .copied()
        .zip(value_ranges.into_iter().map(|vr| into_table(vr.values)))
        .collect())
}

fn into_table(values: Vec<Vec<Value>>) -> RawTable {
    values
        .into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> SheetsClient {
        let config = SheetsConfig {
            spreadsheet_id: "sheet-123".to_string(),
            access_token: "token".to_string(),
            ..Default::default()
        };
        SheetsClient::new(config, SheetRanges::default()).unwrap()
    }

    #[test]
    fn test_requires_spreadsheet_id() {
        let result = SheetsClient::new(SheetsConfig::default(), SheetRanges::default());
        assert!(matches!(result, Err(SheetsError::Configuration(_))));
    }

    #[test]
    fn test_read_url_encodes_range() {
        let url = client().read_url(DataSet::Expenses).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Expense_Income_Journal!A:F"
        );
    }

    #[test]
    fn test_batch_url() {
        let url = client()
            .batch_url(&[DataSet::Inventory, DataSet::Transactions])
            .unwrap();
        assert_eq!(url.path(), "/v4/spreadsheets/sheet-123/values:batchGet");
        let ranges: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "ranges")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(ranges, vec!["Buckets!A5:D14", "Buckets!A17:F"]);
    }

    #[test]
    fn test_value_range_parsing() {
        let vr: ValueRange = serde_json::from_value(json!({
            "range": "Buckets!A5:D14",
            "majorDimension": "ROWS",
            "values": [["Product", "Pallavi", "Tularam", "Total"], ["TATA G", 12, "8", null]]
        }))
        .unwrap();
        let table = into_table(vr.values);
        assert_eq!(table[1], vec!["TATA G", "12", "8", ""]);
    }

    #[test]
    fn test_empty_range_has_no_values_key() {
        let vr: ValueRange = serde_json::from_value(json!({"range": "Buckets!A17:F"})).unwrap();
        assert!(into_table(vr.values).is_empty());
    }

    #[test]
    fn test_batch_response_matched_in_order() {
        let response: BatchGetResponse = serde_json::from_value(json!({
            "spreadsheetId": "sheet-123",
            "valueRanges": [
                {"range": "Buckets!A17:F1000", "values": [["Date"], ["01/04"]]},
                {"range": "Expense_Income_Journal!A1:F1000"}
            ]
        }))
        .unwrap();
        let tables = match_ranges(
            &[DataSet::Transactions, DataSet::Expenses],
            response.value_ranges,
        )
        .unwrap();
        assert_eq!(tables[&DataSet::Transactions].len(), 2);
        assert!(tables[&DataSet::Expenses].is_empty());
    }

    #[test]
    fn test_batch_response_count_mismatch() {
        let result = match_ranges(&[DataSet::Inventory, DataSet::Expenses], Vec::new());
        assert!(matches!(result, Err(SheetsError::InvalidResponse(_))));
    }
}
