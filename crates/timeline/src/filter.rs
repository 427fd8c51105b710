use crate::category::{event_category, ToolCategory};
use crate::config::TimelineConfig;
use agentlens_core::TimelineEvent;
use std::collections::BTreeSet;

/// Event-level filter state driven by the toolbar.
///
/// All three axes compose with AND semantics: an event must match the
/// category set, the errors-only switch, and the text query to survive.
/// The default state passes everything through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineFilter {
    pub categories: BTreeSet<ToolCategory>,
    pub errors_only: bool,
    pub query: String,
}

impl Default for TimelineFilter {
    fn default() -> Self {
        Self {
            categories: ToolCategory::ALL.into_iter().collect(),
            errors_only: false,
            query: String::new(),
        }
    }
}

impl TimelineFilter {
    /// True when any axis deviates from the pass-everything default.
    pub fn is_active(&self) -> bool {
        self.categories.len() != ToolCategory::ALL.len()
            || self.errors_only
            || !self.query.trim().is_empty()
    }

    /// Flip one category's membership in the enabled set. Deselecting every
    /// category is allowed and yields an empty timeline.
    pub fn toggle_category(&mut self, category: ToolCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Select the events that pass every enabled axis, preserving input
    /// order. Returns references into the caller's snapshot.
    pub fn apply<'a>(
        &self,
        events: &'a [TimelineEvent],
        config: &TimelineConfig,
    ) -> Vec<&'a TimelineEvent> {
        let query = self.query.trim().to_lowercase();
        events
            .iter()
            .filter(|event| self.matches(event, &query, config))
            .collect()
    }

    fn matches(&self, event: &TimelineEvent, query: &str, config: &TimelineConfig) -> bool {
        if !self.categories.contains(&event_category(event, config)) {
            return false;
        }
        match event {
            TimelineEvent::ToolCall { tool_call, .. } => {
                if self.errors_only && !tool_call.is_error() {
                    return false;
                }
                if !query.is_empty() {
                    let in_name = tool_call.tool_name.to_lowercase().contains(query);
                    let in_input = tool_call
                        .tool_input
                        .as_ref()
                        .is_some_and(|input| payload_text(input).to_lowercase().contains(query));
                    if !in_name && !in_input {
                        return false;
                    }
                }
            }
            TimelineEvent::Agent { agent, .. } => {
                // Agent lifecycle markers carry no error state.
                if self.errors_only {
                    return false;
                }
                if !query.is_empty() {
                    let in_name = agent
                        .agent_name
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(query));
                    let in_type = agent
                        .agent_type
                        .as_ref()
                        .is_some_and(|ty| ty.to_lowercase().contains(query));
                    if !in_name && !in_type {
                        return false;
                    }
                }
            }
        }
        true
    }
}

/// Searchable text of a tool input payload. JSON strings match on their bare
/// content; everything else matches on its compact serialization, so queries
/// can hit field names and nested values alike.
fn payload_text(input: &serde_json::Value) -> String {
    match input {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
