use crate::category::{event_category, ToolCategory};
use crate::config::TimelineConfig;
use agentlens_core::TimelineEvent;

/// One row of the per-tool distribution, sorted descending by count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolShare {
    pub name: String,
    pub count: usize,
    pub category: ToolCategory,
}

/// Whole-timeline summary figures shown in the header strip.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStats {
    pub total_calls: usize,
    pub unique_tools: usize,
    pub success_count: usize,
    pub error_count: usize,
    /// Fraction in `[0.0, 1.0]`; an empty timeline reads as fully successful.
    pub success_rate: f64,
    pub total_duration_ms: i64,
    pub phase_count: usize,
    pub tool_distribution: Vec<ToolShare>,
}

/// Aggregate summary statistics over the full (unfiltered) event stream.
///
/// `phase_count` is supplied by the caller because the phase view may be
/// built from a filtered stream while the header always summarizes the whole
/// session. Agent events pool under the single name "Agent" regardless of
/// their individual agent names.
pub fn compute_stats(
    events: &[TimelineEvent],
    phase_count: usize,
    config: &TimelineConfig,
) -> TimelineStats {
    let mut success_count = 0usize;
    let mut error_count = 0usize;
    let mut total_duration_ms = 0i64;
    let mut shares: Vec<ToolShare> = Vec::new();

    for event in events {
        let name = match event {
            TimelineEvent::ToolCall { tool_call, .. } => {
                if tool_call.is_error() {
                    error_count += 1;
                } else {
                    success_count += 1;
                }
                if let Some(duration) = tool_call.duration_ms {
                    total_duration_ms += duration;
                }
                tool_call.tool_name.as_str()
            }
            TimelineEvent::Agent { .. } => {
                success_count += 1;
                "Agent"
            }
        };
        match shares.iter_mut().find(|share| share.name == name) {
            Some(share) => share.count += 1,
            None => shares.push(ToolShare {
                name: name.to_string(),
                count: 1,
                category: event_category(event, config),
            }),
        }
    }

    let total_calls = events.len();
    let success_rate = if total_calls == 0 {
        1.0
    } else {
        success_count as f64 / total_calls as f64
    };

    let unique_tools = shares.len();
    // Stable sort keeps first-occurrence order among equal counts.
    shares.sort_by(|a, b| b.count.cmp(&a.count));

    TimelineStats {
        total_calls,
        unique_tools,
        success_count,
        error_count,
        success_rate,
        total_duration_ms,
        phase_count,
        tool_distribution: shares,
    }
}
