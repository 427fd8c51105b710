use crate::config::TimelineConfig;
use agentlens_core::TimelineEvent;
use serde::{Deserialize, Serialize};

/// Closed set of tool classifications used for filtering, coloring, and
/// phase dominance detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    File,
    Search,
    Execution,
    Agent,
    Other,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 5] = [
        ToolCategory::File,
        ToolCategory::Search,
        ToolCategory::Execution,
        ToolCategory::Agent,
        ToolCategory::Other,
    ];

    /// Short label for filter chips and distribution rows.
    pub fn label(self) -> &'static str {
        match self {
            ToolCategory::File => "File Ops",
            ToolCategory::Search => "Search",
            ToolCategory::Execution => "Execution",
            ToolCategory::Agent => "Agents",
            ToolCategory::Other => "Other",
        }
    }
}

/// Built-in tool-name → category table. Dispatch data, not logic: unmapped
/// names fall through to `Other`.
const BUILTIN_CATEGORIES: &[(&str, ToolCategory)] = &[
    ("Read", ToolCategory::File),
    ("Write", ToolCategory::File),
    ("Edit", ToolCategory::File),
    ("Glob", ToolCategory::File),
    ("NotebookEdit", ToolCategory::File),
    ("Grep", ToolCategory::Search),
    ("WebSearch", ToolCategory::Search),
    ("WebFetch", ToolCategory::Search),
    ("Bash", ToolCategory::Execution),
    ("Task", ToolCategory::Execution),
    ("Skill", ToolCategory::Execution),
    ("EnterPlanMode", ToolCategory::Execution),
    ("ExitPlanMode", ToolCategory::Execution),
    ("TeamCreate", ToolCategory::Execution),
    ("TeamDelete", ToolCategory::Execution),
    ("TaskCreate", ToolCategory::Execution),
    ("TaskUpdate", ToolCategory::Execution),
    ("TaskList", ToolCategory::Execution),
    ("TaskOutput", ToolCategory::Execution),
    ("TaskGet", ToolCategory::Execution),
    ("SendMessage", ToolCategory::Execution),
];

/// Category of a tool name from the built-in table alone.
pub fn builtin_category(tool_name: &str) -> ToolCategory {
    BUILTIN_CATEGORIES
        .iter()
        .find(|(name, _)| *name == tool_name)
        .map(|(_, category)| *category)
        .unwrap_or(ToolCategory::Other)
}

/// Category of a tool name, honoring config overrides first. Total: never
/// fails, unknown names resolve to `Other`.
pub fn category_for(tool_name: &str, config: &TimelineConfig) -> ToolCategory {
    config
        .category_overrides
        .get(tool_name)
        .copied()
        .unwrap_or_else(|| builtin_category(tool_name))
}

/// Derived category of a timeline event. Agent events are unconditionally
/// `Agent` and never consult the lookup table.
pub fn event_category(event: &TimelineEvent, config: &TimelineConfig) -> ToolCategory {
    match event {
        TimelineEvent::Agent { .. } => ToolCategory::Agent,
        TimelineEvent::ToolCall { tool_call, .. } => category_for(&tool_call.tool_name, config),
    }
}

/// Phase label for a dominant category.
pub fn phase_label(category: ToolCategory) -> &'static str {
    match category {
        ToolCategory::File => "Research Phase",
        ToolCategory::Search => "Search Phase",
        ToolCategory::Execution => "Execution Phase",
        ToolCategory::Agent => "Agent Activity Phase",
        ToolCategory::Other => "Activity Phase",
    }
}
