//! Live holiday lookup against the holidays-jp API.

use std::collections::HashSet;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::fetch::{HttpClient, fetch_bytes};

const DEFAULT_BASE_URL: &str = "https://holidays-jp.github.io/api/v1";

/// Abstraction over a provider of public-holiday dates for one year.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Returns the set of holiday dates within `year`.
    async fn fetch_year(&self, year: i32) -> Result<HashSet<NaiveDate>>;
}

/// [`HolidaySource`] backed by the holidays-jp date.json endpoint.
pub struct ApiHolidaySource<C: HttpClient> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> ApiHolidaySource<C> {
    pub fn new(client: C) -> Self {
        let base_url = std::env::var("HOLIDAY_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { client, base_url }
    }
}

#[async_trait]
impl<C: HttpClient> HolidaySource for ApiHolidaySource<C> {
    async fn fetch_year(&self, year: i32) -> Result<HashSet<NaiveDate>> {
        let url = format!("{}/{}/date.json", self.base_url, year);
        let bytes = fetch_bytes(&self.client, &url).await?;
        parse_payload(&bytes)
    }
}

/// Validates and decodes a holiday payload.
///
/// The expected shape is a JSON object keyed by `YYYY-MM-DD` date strings
/// (values are holiday names and are ignored). Keys that are not exact
/// 10-character dates are skipped; any non-object payload is rejected so the
/// caller falls back to the static table.
fn parse_payload(bytes: &[u8]) -> Result<HashSet<NaiveDate>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let Some(map) = value.as_object() else {
        bail!("holiday payload is not a date-keyed object");
    };

    let holidays = map
        .keys()
        .filter_map(|key| parse_iso_date(key))
        .collect();

    Ok(holidays)
}

fn parse_iso_date(key: &str) -> Option<NaiveDate> {
    if key.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_payload_object() {
        let payload = r#"{"2025-01-01": "元日", "2025-01-13": "成人の日"}"#;
        let holidays = parse_payload(payload.as_bytes()).unwrap();

        assert_eq!(holidays.len(), 2);
        assert!(holidays.contains(&date(2025, 1, 1)));
        assert!(holidays.contains(&date(2025, 1, 13)));
    }

    #[test]
    fn test_parse_payload_skips_non_date_keys() {
        let payload = r#"{"2025-01-01": "元日", "note": "x", "2025-1-1": "bad pad"}"#;
        let holidays = parse_payload(payload.as_bytes()).unwrap();

        assert_eq!(holidays.len(), 1);
        assert!(holidays.contains(&date(2025, 1, 1)));
    }

    #[test]
    fn test_parse_payload_rejects_array() {
        assert!(parse_payload(br#"["2025-01-01"]"#).is_err());
    }

    #[test]
    fn test_parse_payload_rejects_scalar() {
        assert!(parse_payload(b"42").is_err());
        assert!(parse_payload(b"null").is_err());
    }

    #[test]
    fn test_parse_payload_rejects_invalid_json() {
        assert!(parse_payload(b"{broken").is_err());
    }
}
