//! Wave forecast result payload

use serde::{Deserialize, Serialize};

/// One forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveForecastEntry {
    pub time: String,
    pub height: f64,
    pub direction: String,
    pub period: f64,
}

/// Result attached to a completed wave forecast job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveForecastData {
    pub data: Vec<WaveForecastEntry>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}
