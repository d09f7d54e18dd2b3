use std::collections::BTreeMap;

use serde::Deserialize;

use fx_core::settings::settings;
use fx_core::RateTable;

use super::{RateSource, RateSourceError};

/// The free `open.er-api.com` endpoint (`/v6/latest/<pivot>`).
///
/// Response shape: `{"result": "success", "base_code": "USD", "rates": {...}}`;
/// on failure `result` is `"error"` and `error-type` says why.
pub struct OpenErApiSource {
    url: String,
}

impl OpenErApiSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Source at the configured `rates.source_url`.
    pub fn from_settings() -> Self {
        Self::new(settings().rates.source_url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RateSource for OpenErApiSource {
    fn fetch(&self) -> Result<RateTable, RateSourceError> {
        let url = self.url.as_str();
        let body = ureq::get(url)
            .call()
            .map_err(|e| RateSourceError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| RateSourceError::Http(format!("{url}: {e}")))?;
        parse_response(&body)
    }
}

#[derive(Deserialize)]
struct Response {
    result: String,
    #[serde(default)]
    rates: BTreeMap<String, f64>,
    #[serde(rename = "error-type", default)]
    error_type: Option<String>,
}

pub fn parse_response(json: &str) -> Result<RateTable, RateSourceError> {
    let resp: Response = serde_json::from_str(json)
        .map_err(|e| RateSourceError::Parse(format!("rate JSON: {e}")))?;
    if resp.result != "success" {
        return Err(RateSourceError::Parse(format!(
            "rate source returned {:?} ({})",
            resp.result,
            resp.error_type.as_deref().unwrap_or("no error type")
        )));
    }
    let table = RateTable::from_pairs(resp.rates);
    if table.is_empty() {
        return Err(RateSourceError::Parse("response has no usable rates".to_string()));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_success() {
        let json = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "rates": {"USD": 1, "EUR": 0.92, "INR": 83.2}
        }"#;
        let table = parse_response(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("EUR").unwrap().to_string(), "0.92");
    }

    #[test]
    fn parse_error_result() {
        let json = r#"{"result": "error", "error-type": "unsupported-code"}"#;
        let err = parse_response(json).unwrap_err();
        assert!(err.to_string().contains("unsupported-code"));
    }

    #[test]
    fn parse_empty_rates() {
        let err = parse_response(r#"{"result": "success", "rates": {}}"#).unwrap_err();
        assert!(matches!(err, RateSourceError::Parse(_)));
    }

    #[test]
    fn parse_garbage() {
        assert!(parse_response("<html>").is_err());
    }

    #[test]
    fn default_url_from_settings() {
        assert_eq!(
            OpenErApiSource::from_settings().url(),
            "https://open.er-api.com/v6/latest/USD"
        );
    }
}
