//! Risk tier classification of aggregated exposure

use crate::error::{ExposureError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Totals at or above this are high concentration
pub const HIGH_EXPOSURE_THRESHOLD: f64 = 750_000.0;

/// Totals at or above this (and below the high threshold) are medium
pub const MEDIUM_EXPOSURE_THRESHOLD: f64 = 400_000.0;

/// Concentration tier of a geographic cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// [0, 400000)
    Low,
    /// [400000, 750000)
    Medium,
    /// [750000, Inf)
    High,
}

impl RiskTier {
    /// Map marker color for this tier
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Low => "green",
            RiskTier::Medium => "orange",
            RiskTier::High => "red",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier boundaries; both are inclusive lower bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high: f64,
    pub medium: f64,
}

impl RiskThresholds {
    /// Both bounds must be finite and `medium` must not exceed `high`
    pub fn new(high: f64, medium: f64) -> Result<Self> {
        if !high.is_finite() || !medium.is_finite() || medium > high {
            return Err(ExposureError::InvalidThresholds { high, medium });
        }
        Ok(Self { high, medium })
    }

    /// Classify an aggregated exposure total
    pub fn classify(&self, total: f64) -> RiskTier {
        if total >= self.high {
            RiskTier::High
        } else if total >= self.medium {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: HIGH_EXPOSURE_THRESHOLD,
            medium: MEDIUM_EXPOSURE_THRESHOLD,
        }
    }
}

/// Classify against the standard 750k / 400k thresholds
pub fn classify(total: f64) -> RiskTier {
    RiskThresholds::default().classify(total)
}
