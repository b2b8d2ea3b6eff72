//! Per-city forecast summary types

use serde::{Deserialize, Serialize};

/// One calendar day's summary for one city
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayData {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,

    /// First analyzed hour of the day, absent when no hour fell inside
    /// the daytime window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_start: Option<u32>,

    /// Last analyzed hour of the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_end: Option<u32>,

    /// Number of hours included in the analyzed window
    pub hours_count: u32,

    /// Mean temperature over the analyzed hours; absent when zero valid
    /// temperature samples contributed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_avg: Option<f64>,

    /// Hours meeting the favorable-condition predicate
    pub relevant_cond_hours: u32,
}

/// Chronologically ordered day summaries for one city
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CityData {
    pub days: Vec<DayData>,
}
