//! Shared event fixtures for engine tests.

use agentlens_core::{AgentRun, TimelineEvent, ToolCall};

pub(crate) fn tool_event(name: &str, status: &str, ts: &str) -> TimelineEvent {
    tool_event_full(name, status, ts, None, None)
}

pub(crate) fn tool_event_with_duration(
    name: &str,
    status: &str,
    ts: &str,
    duration_ms: Option<i64>,
) -> TimelineEvent {
    tool_event_full(name, status, ts, duration_ms, None)
}

pub(crate) fn tool_event_with_input(
    name: &str,
    status: &str,
    ts: &str,
    input: serde_json::Value,
) -> TimelineEvent {
    tool_event_full(name, status, ts, None, Some(input))
}

pub(crate) fn tool_event_full(
    name: &str,
    status: &str,
    ts: &str,
    duration_ms: Option<i64>,
    input: Option<serde_json::Value>,
) -> TimelineEvent {
    let timestamp = (!ts.is_empty()).then(|| ts.to_string());
    TimelineEvent::ToolCall {
        timestamp: timestamp.clone(),
        tool_call: ToolCall {
            id: None,
            session_id: "s1".to_string(),
            tool_name: name.to_string(),
            tool_input: input,
            tool_response: None,
            status: status.to_string(),
            error: None,
            started_at: timestamp,
            ended_at: None,
            duration_ms,
        },
    }
}

pub(crate) fn agent_event(name: &str, ts: &str) -> TimelineEvent {
    agent_event_typed(Some(name), Some("general-purpose"), ts)
}

pub(crate) fn agent_event_typed(
    name: Option<&str>,
    agent_type: Option<&str>,
    ts: &str,
) -> TimelineEvent {
    let timestamp = (!ts.is_empty()).then(|| ts.to_string());
    TimelineEvent::Agent {
        timestamp: timestamp.clone(),
        agent: AgentRun {
            id: None,
            session_id: "s1".to_string(),
            agent_name: name.map(str::to_string),
            agent_type: agent_type.map(str::to_string),
            status: "running".to_string(),
            started_at: timestamp,
            ended_at: None,
        },
    }
}

pub(crate) fn refs(events: &[TimelineEvent]) -> Vec<&TimelineEvent> {
    events.iter().collect()
}
