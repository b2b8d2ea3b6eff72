//! In-memory forecast source for tests and offline runs

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use crate::{ClientError, ClientResult, ForecastClient};

/// Client serving forecasts from a fixed map. Locations can be marked
/// as failing to exercise per-city error isolation.
#[derive(Debug, Clone, Default)]
pub struct CannedForecastClient {
    forecasts: HashMap<String, Value>,
    failing: HashSet<String>,
}

impl CannedForecastClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forecast(mut self, location: &str, forecast: Value) -> Self {
        self.forecasts.insert(location.to_string(), forecast);
        self
    }

    pub fn with_failure(mut self, location: &str) -> Self {
        self.failing.insert(location.to_string());
        self
    }
}

#[async_trait::async_trait]
impl ForecastClient for CannedForecastClient {
    async fn fetch(&self, location: &str) -> ClientResult<Option<Value>> {
        if self.failing.contains(location) {
            return Err(ClientError::Unavailable(location.to_string()));
        }
        Ok(self.forecasts.get(location).cloned())
    }
}
