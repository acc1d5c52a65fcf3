use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::source::RowSource;
use crate::types::RawRow;

/// Longest slice of an upstream error body kept in the error message.
const ERROR_BODY_EXCERPT: usize = 200;

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`. The API omits `values`
/// entirely when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    values: Option<Vec<Vec<serde_json::Value>>>,
}

/// Google Sheets v4 values client.
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    api_key: Option<String>,
    access_token: Option<String>,
}

impl SheetsClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.sheets_api_url.trim_end_matches('/').to_string(),
            spreadsheet_id: cfg.spreadsheet_id.clone(),
            api_key: cfg.api_key.clone(),
            access_token: cfg.access_token.clone(),
        })
    }

    fn values_url(&self, range: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("invalid SHEETS_API_URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("SHEETS_API_URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    async fn fetch_range(&self, range: &str) -> Result<Vec<RawRow>> {
        let url = self.values_url(range)?;
        info!(range, "Fetching rows from Google Sheets");

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            warn!(range, %status, "Sheets API request failed");
            return Err(AppError::SourceUnavailable(format!(
                "Sheets API returned {status} for {range}: {excerpt}"
            )));
        }

        let parsed: ValueRange = serde_json::from_str(&body)?;
        let rows: Vec<RawRow> = parsed
            .values
            .unwrap_or_default()
            .into_iter()
            .map(RawRow::from_json_cells)
            .collect();

        debug!(
            range,
            resolved_range = parsed.range.as_deref().unwrap_or(""),
            rows = rows.len(),
            "Sheets API response parsed"
        );
        info!(range, "Data fetched successfully, rows: {}", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    const VALUES_PATH: &str = "/v4/spreadsheets/sheet-id/values/Realtime!A:J";

    #[tokio::test]
    async fn fetch_range_returns_rows() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VALUES_PATH))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Realtime!A1:J3",
                "majorDimension": "ROWS",
                "values": [
                    ["Timestamp", "Date", "Game", "Draw", "N1"],
                    ["t1", "2024-05-01", "EZ2", "9PM", "04", "11"],
                    ["t2", "2024-05-01", "Swertres", "2PM", 7]
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = SheetsClient::new(&Config::for_tests(&mock_server.uri())).unwrap();
        let rows = client.fetch_range("Realtime!A:J").await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].game(), "EZ2");
        assert_eq!(rows[1].tail(), &["04".to_string(), "11".to_string()]);
        assert_eq!(rows[2].cell(4), "7");
    }

    #[tokio::test]
    async fn missing_values_is_an_empty_range() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VALUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "Realtime!A1:J1000",
                "majorDimension": "ROWS"
            })))
            .mount(&mock_server)
            .await;

        let client = SheetsClient::new(&Config::for_tests(&mock_server.uri())).unwrap();
        let rows = client.fetch_range("Realtime!A:J").await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_source_unavailable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VALUES_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
            .mount(&mock_server)
            .await;

        let client = SheetsClient::new(&Config::for_tests(&mock_server.uri())).unwrap();
        let err = client.fetch_range("Realtime!A:J").await.unwrap_err();
        match err {
            AppError::SourceUnavailable(msg) => {
                assert!(msg.contains("403"), "{msg}");
                assert!(msg.contains("PERMISSION_DENIED"), "{msg}");
            }
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn access_token_is_sent_as_bearer() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VALUES_PATH))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "values": [["header"]]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut cfg = Config::for_tests(&mock_server.uri());
        cfg.api_key = None;
        cfg.access_token = Some("secret-token".to_string());

        let client = SheetsClient::new(&cfg).unwrap();
        let rows = client.fetch_range("Realtime!A:J").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn invalid_json_is_reported() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VALUES_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = SheetsClient::new(&Config::for_tests(&mock_server.uri())).unwrap();
        let err = client.fetch_range("Realtime!A:J").await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
