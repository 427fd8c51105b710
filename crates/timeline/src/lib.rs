//! Timeline reconstruction engine.
//!
//! Converts the flat, chronologically ordered event stream served by the
//! monitor backend into bursts (runs of same-identity events with small
//! inter-arrival gaps) and phases (runs of bursts separated by larger idle
//! gaps), plus whole-timeline summary statistics. Every function here is a
//! pure total function over its inputs: results are ephemeral values that are
//! recomputed from scratch on each refresh tick or filter change, never
//! mutated incrementally.

pub mod burst;
pub mod category;
pub mod config;
pub mod filter;
pub mod phase;
pub mod stats;

pub use burst::{build_bursts, Burst, BurstKind};
pub use category::{builtin_category, category_for, event_category, phase_label, ToolCategory};
pub use config::TimelineConfig;
pub use filter::TimelineFilter;
pub use phase::{build_phases, Phase, ToolUsage};
pub use stats::{compute_stats, TimelineStats, ToolShare};

#[cfg(test)]
pub(crate) mod testing;
