//! Day statistics over raw hourly forecasts
//!
//! Interprets the forecast document returned by the remote API and
//! reduces each day's hourly observations to a [`DayData`] summary.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{CityData, DayData};

/// Hour-of-day bounds of the analyzed daytime window (inclusive)
pub const WINDOW_START: u32 = 9;
pub const WINDOW_END: u32 = 19;

/// Conditions counting toward `relevant_cond_hours`: dry weather only
pub const FAVORABLE_CONDITIONS: [&str; 4] = ["clear", "partly-cloudy", "cloudy", "overcast"];

/// Raw forecast document, interpreted only by this module. Unknown
/// fields from the service are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub forecasts: Vec<DayForecast>,
}

/// One forecast day of hourly observations
#[derive(Debug, Clone, Deserialize)]
pub struct DayForecast {
    pub date: String,
    #[serde(default)]
    pub hours: Vec<HourForecast>,
}

/// A single hourly observation. The service encodes the hour as a
/// decimal string.
#[derive(Debug, Clone, Deserialize)]
pub struct HourForecast {
    pub hour: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl HourForecast {
    fn hour_of_day(&self) -> Option<u32> {
        self.hour.parse().ok()
    }

    fn is_favorable(&self) -> bool {
        self.condition
            .as_deref()
            .is_some_and(|c| FAVORABLE_CONDITIONS.contains(&c))
    }
}

/// Reduce one forecast day to its summary. Hours outside the daytime
/// window, and hours with a non-numeric hour field, are ignored.
fn summarize_day(day: &DayForecast) -> DayData {
    let window: Vec<&HourForecast> = day
        .hours
        .iter()
        .filter(|h| {
            h.hour_of_day()
                .is_some_and(|hour| (WINDOW_START..=WINDOW_END).contains(&hour))
        })
        .collect();

    let hours: Vec<u32> = window.iter().filter_map(|h| h.hour_of_day()).collect();
    let temps: Vec<f64> = window.iter().filter_map(|h| h.temp).collect();

    DayData {
        date: day.date.clone(),
        hours_start: hours.iter().min().copied(),
        hours_end: hours.iter().max().copied(),
        hours_count: window.len() as u32,
        temp_avg: (!temps.is_empty()).then(|| temps.iter().sum::<f64>() / temps.len() as f64),
        relevant_cond_hours: window.iter().filter(|h| h.is_favorable()).count() as u32,
    }
}

/// Reduce a raw forecast to per-day summaries in calendar order.
/// Days with unparseable dates sort before the rest, keeping their
/// relative order.
pub fn analyze_forecast(payload: &ForecastPayload) -> CityData {
    let mut days: Vec<DayData> = payload.forecasts.iter().map(summarize_day).collect();
    days.sort_by_key(|d| NaiveDate::parse_from_str(&d.date, "%Y-%m-%d").ok());
    CityData { days }
}
