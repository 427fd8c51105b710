use crate::category::{category_for, ToolCategory};
use crate::config::TimelineConfig;
use agentlens_core::time::timestamp_ms;
use agentlens_core::TimelineEvent;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    ToolCall,
    Agent,
}

/// A maximal run of same-identity events with small inter-arrival gaps.
///
/// Holds references into the caller's event sequence; bursts are ephemeral
/// per-call values and never outlive the snapshot they were derived from.
#[derive(Debug, Clone)]
pub struct Burst<'a> {
    pub events: Vec<&'a TimelineEvent>,
    pub name: String,
    pub kind: BurstKind,
    pub category: ToolCategory,
    pub count: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub avg_duration_ms: Option<i64>,
    pub started_at: Option<&'a str>,
    pub ended_at: Option<&'a str>,
    /// True iff the burst has more than one event and all of them carry the
    /// exact same (non-epoch) normalized timestamp — parallel dispatch.
    pub is_parallel: bool,
}

/// Group an ordered event sequence into bursts.
///
/// A new burst starts when the burst key changes or the absolute gap between
/// adjacent timestamps exceeds `config.burst_gap_ms`. The order of `events`
/// defines adjacency; the final run is always flushed. Empty input yields
/// empty output.
pub fn build_bursts<'a>(
    events: &[&'a TimelineEvent],
    config: &TimelineConfig,
) -> Vec<Burst<'a>> {
    let mut bursts = Vec::new();
    let mut iter = events.iter().copied();
    let Some(first) = iter.next() else {
        return bursts;
    };

    let mut run = vec![first];
    let mut run_key = first.burst_key();
    let mut prev_ms = timestamp_ms(first.timestamp());

    for event in iter {
        let key = event.burst_key();
        let event_ms = timestamp_ms(event.timestamp());
        if key == run_key && event_ms.abs_diff(prev_ms) <= config.burst_gap_ms {
            run.push(event);
        } else {
            bursts.push(seal_burst(std::mem::replace(&mut run, vec![event]), config));
            run_key = key;
        }
        prev_ms = event_ms;
    }
    bursts.push(seal_burst(run, config));
    bursts
}

/// Compute burst aggregates over a non-empty run.
fn seal_burst<'a>(events: Vec<&'a TimelineEvent>, config: &TimelineConfig) -> Burst<'a> {
    // The walk in `build_bursts` always seeds a run before sealing it.
    let first = events[0];
    let last = events[events.len() - 1];

    let (name, kind, category) = match first {
        TimelineEvent::ToolCall { tool_call, .. } => (
            tool_call.tool_name.clone(),
            BurstKind::ToolCall,
            category_for(&tool_call.tool_name, config),
        ),
        TimelineEvent::Agent { agent, .. } => (
            agent.agent_name.clone().unwrap_or_else(|| "Agent".to_string()),
            BurstKind::Agent,
            ToolCategory::Agent,
        ),
    };

    let mut success_count = 0usize;
    let mut error_count = 0usize;
    let mut duration_total = 0i64;
    let mut duration_count = 0usize;
    let mut distinct_stamps: BTreeSet<i64> = BTreeSet::new();

    for event in &events {
        match event {
            TimelineEvent::ToolCall { tool_call, .. } => {
                if tool_call.is_error() {
                    error_count += 1;
                } else {
                    success_count += 1;
                }
                if let Some(duration) = tool_call.duration_ms {
                    duration_total += duration;
                    duration_count += 1;
                }
            }
            // No error state is modeled on agent lifecycle markers here; a
            // still-running agent is not a failure.
            TimelineEvent::Agent { .. } => success_count += 1,
        }
        let ms = timestamp_ms(event.timestamp());
        if ms != 0 {
            distinct_stamps.insert(ms);
        }
    }

    let avg_duration_ms = if duration_count > 0 {
        Some((duration_total as f64 / duration_count as f64).round() as i64)
    } else {
        None
    };
    let is_parallel = events.len() > 1 && distinct_stamps.len() == 1;

    Burst {
        count: events.len(),
        started_at: first.timestamp(),
        ended_at: last.timestamp(),
        events,
        name,
        kind,
        category,
        success_count,
        error_count,
        avg_duration_ms,
        is_parallel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{agent_event, refs, tool_event, tool_event_with_duration};

    #[test]
    fn empty_input_yields_empty_output() {
        let bursts = build_bursts(&[], &TimelineConfig::default());
        assert!(bursts.is_empty());
    }

    #[test]
    fn consecutive_same_tool_calls_merge_into_one_burst() {
        let events = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00"),
            tool_event("Read", "success", "2026-01-01T00:00:02"),
            tool_event("Read", "error", "2026-01-01T00:00:04"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].name, "Read");
        assert_eq!(bursts[0].count, 3);
        assert_eq!(bursts[0].success_count, 2);
        assert_eq!(bursts[0].error_count, 1);
        assert_eq!(bursts[0].category, ToolCategory::File);
        assert_eq!(bursts[0].started_at, Some("2026-01-01T00:00:00"));
        assert_eq!(bursts[0].ended_at, Some("2026-01-01T00:00:04"));
    }

    #[test]
    fn key_change_splits_bursts() {
        let events = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00"),
            tool_event("Bash", "success", "2026-01-01T00:00:01"),
            tool_event("Read", "success", "2026-01-01T00:00:02"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 3);
        assert_eq!(bursts[1].kind, BurstKind::ToolCall);
        assert_eq!(bursts[1].category, ToolCategory::Execution);
    }

    #[test]
    fn gap_at_threshold_groups_one_past_splits() {
        let config = TimelineConfig::default();
        let at_threshold = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00.000"),
            tool_event("Read", "success", "2026-01-01T00:00:05.000"),
        ];
        assert_eq!(build_bursts(&refs(&at_threshold), &config).len(), 1);

        let past_threshold = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00.000"),
            tool_event("Read", "success", "2026-01-01T00:00:05.001"),
        ];
        assert_eq!(build_bursts(&refs(&past_threshold), &config).len(), 2);
    }

    #[test]
    fn burst_concatenation_reproduces_input() {
        let events = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00"),
            tool_event("Read", "success", "2026-01-01T00:00:01"),
            tool_event("Bash", "error", "2026-01-01T00:00:02"),
            agent_event("explorer", "2026-01-01T00:00:30"),
            tool_event("Grep", "success", "2026-01-01T00:01:00"),
        ];
        let event_refs = refs(&events);
        let bursts = build_bursts(&event_refs, &TimelineConfig::default());

        let flattened: Vec<&TimelineEvent> = bursts
            .iter()
            .flat_map(|b| b.events.iter().copied())
            .collect();
        assert_eq!(flattened.len(), event_refs.len());
        for (original, grouped) in event_refs.iter().zip(&flattened) {
            assert!(std::ptr::eq(*original, *grouped));
        }
    }

    #[test]
    fn descending_order_input_groups_by_absolute_gap() {
        // The core is direction-agnostic: a descending snapshot groups the
        // same runs because gaps are compared by absolute value.
        let events = vec![
            tool_event("Read", "success", "2026-01-01T00:00:04"),
            tool_event("Read", "success", "2026-01-01T00:00:02"),
            tool_event("Read", "success", "2026-01-01T00:00:00"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].started_at, Some("2026-01-01T00:00:04"));
        assert_eq!(bursts[0].ended_at, Some("2026-01-01T00:00:00"));
    }

    #[test]
    fn identical_timestamps_detect_parallel_dispatch() {
        let events = vec![
            tool_event("Read", "success", "2026-01-01T00:00:00"),
            tool_event("Read", "success", "2026-01-01T00:00:00"),
            tool_event("Read", "success", "2026-01-01T00:00:00"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].count, 3);
        assert!(bursts[0].is_parallel);
    }

    #[test]
    fn single_event_burst_is_not_parallel() {
        let events = vec![tool_event("Read", "success", "2026-01-01T00:00:00")];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert!(!bursts[0].is_parallel);
    }

    #[test]
    fn events_without_timestamps_are_not_parallel() {
        let mut a = tool_event("Read", "success", "");
        let mut b = tool_event("Read", "success", "");
        for event in [&mut a, &mut b] {
            if let TimelineEvent::ToolCall { timestamp, .. } = event {
                *timestamp = None;
            }
        }
        let events = vec![a, b];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 1);
        assert!(!bursts[0].is_parallel);
    }

    #[test]
    fn average_duration_ignores_missing_values() {
        let events = vec![
            tool_event_with_duration("Bash", "success", "2026-01-01T00:00:00", Some(100)),
            tool_event_with_duration("Bash", "success", "2026-01-01T00:00:01", None),
            tool_event_with_duration("Bash", "success", "2026-01-01T00:00:02", Some(201)),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts[0].avg_duration_ms, Some(151));
    }

    #[test]
    fn average_duration_is_none_when_no_event_carries_one() {
        let events = vec![
            tool_event("Bash", "success", "2026-01-01T00:00:00"),
            tool_event("Bash", "success", "2026-01-01T00:00:01"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts[0].avg_duration_ms, None);
    }

    #[test]
    fn agent_events_group_by_agent_name_and_count_as_success() {
        let events = vec![
            agent_event("explorer", "2026-01-01T00:00:00"),
            agent_event("explorer", "2026-01-01T00:00:01"),
            agent_event("builder", "2026-01-01T00:00:02"),
        ];
        let bursts = build_bursts(&refs(&events), &TimelineConfig::default());
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0].name, "explorer");
        assert_eq!(bursts[0].kind, BurstKind::Agent);
        assert_eq!(bursts[0].category, ToolCategory::Agent);
        assert_eq!(bursts[0].success_count, 2);
        assert_eq!(bursts[0].error_count, 0);
    }
}
