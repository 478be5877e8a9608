//! Fusion run configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::BugOrder;

/// Configuration for a fusion run. Read once per run, never per bug.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FusionConfig {
    /// Product whose bugs are fused. Required.
    pub product_name: Option<String>,
    /// Text-vs-history blend weight in [0, 1]. Default: 0.2.
    pub alpha: Option<f64>,
    /// Commit-log weight in [0, 1]. Default: 0.2.
    pub beta: Option<f64>,
    /// Worker count. 0 = one per CPU. Default: 1.
    pub concurrency: Option<usize>,
    /// Process bugs oldest fix first. Default: false.
    pub order_by_fixed_date: Option<bool>,
}

impl FusionConfig {
    pub fn effective_alpha(&self) -> f64 {
        self.alpha.unwrap_or(constants::DEFAULT_ALPHA)
    }

    pub fn effective_beta(&self) -> f64 {
        self.beta.unwrap_or(constants::DEFAULT_BETA)
    }

    /// Configured worker count with `0` resolved against the machine.
    pub fn effective_workers(&self) -> usize {
        match self.concurrency.unwrap_or(constants::DEFAULT_CONCURRENCY) {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(constants::MAX_CONCURRENCY),
            n => n,
        }
    }

    pub fn effective_order(&self) -> BugOrder {
        if self.order_by_fixed_date.unwrap_or(false) {
            BugOrder::ByFixedDate
        } else {
            BugOrder::Unordered
        }
    }
}
