//! Stats source adapter.
//!
//! Retrieves one day of builder statistics from relayscan-compatible
//! services at `{base_url}/stats/day/{YYYY-MM-DD}/json`. The response body
//! looks like:
//!
//! ```json
//! {
//!   "builders": [
//!     {
//!       "info": { "extra_data": "Titan (titanbuilder.xyz)", "num_blocks": 3210 },
//!       "children": [{ "extra_data": "titan-sub", "num_blocks": 12 }]
//!     }
//!   ]
//! }
//! ```
//!
//! A body without a `builders` array means the service has no stats for that
//! day and is reported as a decode error.

use std::future::Future;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{BuilderRecord, ChildRecord};
use crate::config::StatsConfig;
use crate::dates::format_date;
use crate::error::StatsError;

/// A provider of daily builder statistics.
///
/// Uses native async functions in traits; implementations may simply write
/// `async fn fetch_day`.
pub trait StatsSource: Send + Sync {
    /// Fetch the raw builder records for a single day.
    ///
    /// ## Errors
    ///
    /// Any failure for the day (transport, timeout, non-2xx, undecodable
    /// body) is returned; callers decide whether to skip the day.
    fn fetch_day(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<BuilderRecord>, StatsError>> + Send;
}

#[derive(Debug, Deserialize)]
struct DayResponse {
    builders: Vec<WireBuilder>,
}

#[derive(Debug, Deserialize)]
struct WireBuilder {
    info: WireIdentity,
    #[serde(default)]
    children: Option<Vec<WireIdentity>>,
}

#[derive(Debug, Deserialize)]
struct WireIdentity {
    #[serde(default)]
    extra_data: Option<String>,
    #[serde(default)]
    num_blocks: u64,
}

impl DayResponse {
    fn into_records(self) -> Vec<BuilderRecord> {
        self.builders
            .into_iter()
            .map(|builder| BuilderRecord {
                key: builder.info.extra_data.unwrap_or_default(),
                blocks: builder.info.num_blocks,
                children: builder
                    .children
                    .unwrap_or_default()
                    .into_iter()
                    .map(|child| ChildRecord {
                        key: child.extra_data.unwrap_or_default(),
                        blocks: child.num_blocks,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// HTTP stats source for relayscan.io and compatible services.
#[derive(Debug, Clone)]
pub struct RelayscanSource {
    client: Client,
    base_url: String,
}

impl RelayscanSource {
    /// Creates a source whose requests time out after `config.timeout`.
    pub fn new(config: &StatsConfig) -> Result<Self, StatsError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(StatsError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the stats document for `date`.
    pub fn day_url(&self, date: NaiveDate) -> String {
        format!("{}/stats/day/{}/json", self.base_url, format_date(date))
    }
}

impl StatsSource for RelayscanSource {
    #[instrument(skip(self), fields(date = %date))]
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<BuilderRecord>, StatsError> {
        let day = format_date(date);
        let url = self.day_url(date);
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&day, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status { date: day, status });
        }

        let body: DayResponse = response.json().await.map_err(|e| request_error(&day, e))?;
        let records = body.into_records();
        debug!(builders = records.len(), "Decoded stats");

        Ok(records)
    }
}

fn request_error(date: &str, err: reqwest::Error) -> StatsError {
    if err.is_timeout() {
        StatsError::Timeout {
            date: date.to_string(),
        }
    } else {
        StatsError::Http {
            date: date.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn source_for(server: &MockServer) -> RelayscanSource {
        let config = StatsConfig::new()
            .base_url(format!("{}/", server.uri()))
            .timeout(Duration::from_millis(500));
        RelayscanSource::new(&config).expect("client builds")
    }

    #[test]
    fn day_url_uses_iso_date_and_trims_slash() {
        let config = StatsConfig::new().base_url("https://stats.example/");
        let source = RelayscanSource::new(&config).unwrap();
        assert_eq!(
            source.day_url(ymd(2024, 1, 5)),
            "https://stats.example/stats/day/2024-01-05/json"
        );
    }

    #[test]
    fn wire_format_decodes_parents_and_children() {
        let body: DayResponse = serde_json::from_value(serde_json::json!({
            "builders": [
                {
                    "info": { "extra_data": " Titan ", "num_blocks": 40 },
                    "children": [{ "extra_data": "sub", "num_blocks": 2 }]
                },
                { "info": { "num_blocks": 3 }, "children": null },
                { "info": { "extra_data": "solo", "num_blocks": 1 } }
            ]
        }))
        .unwrap();

        let records = body.into_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].key, " Titan ");
        assert_eq!(records[0].children[0].key, "sub");
        assert_eq!(records[1].key, "");
        assert!(records[1].children.is_empty());
        assert!(records[2].children.is_empty());
    }

    #[tokio::test]
    async fn fetch_day_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-01/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "builders": [
                    { "info": { "extra_data": "A", "num_blocks": 10 },
                      "children": [{ "extra_data": "B", "num_blocks": 3 }] }
                ]
            })))
            .mount(&server)
            .await;

        let records = source_for(&server).fetch_day(ymd(2024, 1, 1)).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "A");
        assert_eq!(records[0].blocks, 10);
        assert_eq!(records[0].children[0].blocks, 3);
    }

    #[tokio::test]
    async fn fetch_day_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-02/json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_day(ymd(2024, 1, 2)).await.unwrap_err();
        assert!(matches!(
            err,
            StatsError::Status { ref date, status } if date == "2024-01-02" && status.as_u16() == 404
        ));
    }

    #[tokio::test]
    async fn fetch_day_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-03/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "builders": [] }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_day(ymd(2024, 1, 3)).await.unwrap_err();
        assert!(matches!(err, StatsError::Timeout { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn fetch_day_malformed_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-04/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&server)
            .await;

        let err = source_for(&server).fetch_day(ymd(2024, 1, 4)).await.unwrap_err();
        assert!(matches!(err, StatsError::Http { .. }));
    }

    #[tokio::test]
    async fn collect_days_skips_failed_day_over_http() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-01/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "builders": [{ "info": { "extra_data": "A", "num_blocks": 10 } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-02/json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = source_for(&server);
        let merged = crate::stats::collect_days(&source, &[ymd(2024, 1, 1), ymd(2024, 1, 2)])
            .await
            .unwrap();

        assert_eq!(merged.counts["A"], 10);
        assert_eq!(merged.counts.len(), 1);
    }

    #[tokio::test]
    async fn body_without_builders_is_not_a_retrieved_day() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stats/day/2024-01-01/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "no stats yet" })),
            )
            .mount(&server)
            .await;

        let source = source_for(&server);
        let err = source.fetch_day(ymd(2024, 1, 1)).await.unwrap_err();
        assert!(matches!(err, StatsError::Http { ref date, .. } if date == "2024-01-01"));

        let err = crate::stats::collect_days(&source, &[ymd(2024, 1, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::NoData), "got {err:?}");
    }

    #[test]
    fn empty_builders_array_still_decodes() {
        let body: DayResponse =
            serde_json::from_value(serde_json::json!({ "builders": [] })).unwrap();
        assert!(body.into_records().is_empty());
    }
}
