//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not pipeline
//! types themselves. Chart specs are serialized as-is.

use crate::dataset::DatasetStats;
use crate::pipeline::{OptionScope, RangeControl};
use serde::{Deserialize, Serialize};

// ============================================
// SELECTOR DTOs
// ============================================

/// Governorate options query parameters
#[derive(Debug, Deserialize)]
pub struct OptionsParams {
    /// `all` or `governorate-level`
    #[serde(default)]
    pub scope: OptionScope,
}

/// Governorate options response
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub scope: OptionScope,
    /// `All` followed by the sorted governorates
    pub options: Vec<String>,
}

// ============================================
// CHART DTOs
// ============================================

/// Proportion chart query parameters
#[derive(Debug, Deserialize)]
pub struct AttractionsParams {
    /// Governorate to show; `All` or absent for no filter
    #[serde(default)]
    pub governorate: Option<String>,
}

/// Distribution chart query parameters
#[derive(Debug, Deserialize)]
pub struct TourismIndexParams {
    /// Governorate to show; `All` or absent for no filter
    #[serde(default)]
    pub governorate: Option<String>,
    /// Lower bound of the index range (inclusive)
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound of the index range (inclusive)
    #[serde(default)]
    pub max: Option<f64>,
}

/// Range control query parameters
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    #[serde(default)]
    pub governorate: Option<String>,
}

/// Range control response
#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub governorate: String,
    /// Absent when the governorate has no indexed, labeled record
    pub range: Option<RangeControl>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Dataset summary
    pub dataset: DatasetStats,
    /// Path the dataset was loaded from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
