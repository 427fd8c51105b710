use crate::category::ToolCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gap (ms) within which consecutive same-key events join one burst.
pub const DEFAULT_BURST_GAP_MS: u64 = 5_000;
/// Gap (ms) beyond which consecutive bursts split into separate phases.
pub const DEFAULT_PHASE_GAP_MS: u64 = 10_000;

/// Tunables for timeline reconstruction.
///
/// Serde defaults let a partial `[timeline]` TOML table override just one
/// threshold; `category_overrides` extends or reshapes the built-in
/// tool-name → category table without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_burst_gap_ms")]
    pub burst_gap_ms: u64,
    #[serde(default = "default_phase_gap_ms")]
    pub phase_gap_ms: u64,
    #[serde(default)]
    pub category_overrides: HashMap<String, ToolCategory>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            burst_gap_ms: DEFAULT_BURST_GAP_MS,
            phase_gap_ms: DEFAULT_PHASE_GAP_MS,
            category_overrides: HashMap::new(),
        }
    }
}

fn default_burst_gap_ms() -> u64 {
    DEFAULT_BURST_GAP_MS
}

fn default_phase_gap_ms() -> u64 {
    DEFAULT_PHASE_GAP_MS
}
