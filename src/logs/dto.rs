use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One consumed item inside a food log. Numeric fields default to 0 so a
/// partially filled manual entry still stores cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogItem {
    #[serde(default)]
    pub barcode: Option<String>,
    pub name: String,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub sugar: f64,
}

fn default_quantity() -> f64 {
    1.0
}

/// Partial item update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogItem {
    pub barcode: Option<String>,
    pub name: Option<String>,
    pub serving_size: Option<String>,
    pub quantity: Option<f64>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub sugar: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<LogItem>,
}

/// `start`/`end` as RFC 3339 strings; both must be present for a range
/// filter to apply.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemMessage<T: Serialize> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<T>,
}

/// Summed nutrients over a log range, rounded to display precision.
#[derive(Debug, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
}
