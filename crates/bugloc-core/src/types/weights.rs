//! Validated fusion weights.

use serde::Serialize;

use crate::errors::ConfigError;

/// `alpha` blends text similarity against bug-history similarity; `beta`
/// blends the text/stack score against commit-log recency. Both lie in
/// `[0, 1]`, which `new` enforces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FusionWeights {
    alpha: f64,
    beta: f64,
}

impl FusionWeights {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        check_unit_interval("fusion.alpha", alpha)?;
        check_unit_interval("fusion.beta", beta)?;
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("must be between 0.0 and 1.0, got {value}"),
        });
    }
    Ok(())
}
