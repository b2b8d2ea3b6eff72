//! HTTP forecast source

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{ClientResult, ForecastClient};

/// Client fetching per-location forecast documents over HTTPS
pub struct HttpForecastClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpForecastClient {
    /// Build a client rooted at `base_url`; per-location documents hang
    /// off it as `<base_url>/<location>.json`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let mut raw = base_url.to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base: Url::parse(&raw)?,
        })
    }

    fn endpoint(&self, location: &str) -> ClientResult<Url> {
        Ok(self.base.join(&format!("{location}.json"))?)
    }
}

/// Map service documents that mean "no forecast" to `None`
fn normalize(value: Value) -> Option<Value> {
    match &value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::String(s) if s.is_empty() => None,
        _ => Some(value),
    }
}

#[async_trait::async_trait]
impl ForecastClient for HttpForecastClient {
    async fn fetch(&self, location: &str) -> ClientResult<Option<Value>> {
        let url = self.endpoint(location)?;
        debug!(%url, "requesting forecast");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let value: Value = response.json().await?;

        Ok(normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_joins_below_base() {
        let client = HttpForecastClient::new("https://api.example.com/v1/forecasts").unwrap();
        let url = client.endpoint("moscow").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/forecasts/moscow.json");
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = HttpForecastClient::new("https://api.example.com/v1/forecasts/").unwrap();
        let url = client.endpoint("paris").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/forecasts/paris.json");
    }

    #[test]
    fn test_normalize_empty_documents() {
        assert_eq!(normalize(Value::Null), None);
        assert_eq!(normalize(json!({})), None);
        assert_eq!(normalize(json!("")), None);

        let doc = json!({"forecasts": []});
        assert_eq!(normalize(doc.clone()), Some(doc));
    }
}
