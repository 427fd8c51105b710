use serde::{Deserialize, Serialize};

/// Tool-call status string reported by the monitor backend.
pub const STATUS_ERROR: &str = "error";

/// A recorded agent session as listed by the monitor API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Option<i64>,
    pub session_id: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub cache_read_tokens: u64,
    #[serde(default)]
    pub cache_write_tokens: u64,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub tool_call_count: u64,
}

/// Full session payload including recorded tool calls and sub-agent runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub agents: Vec<AgentRun>,
}

/// A single recorded tool invocation.
///
/// `tool_input` and `tool_response` are opaque payloads: the backend stores
/// whatever the agent recorded, which may be structured JSON or a bare string.
/// The core never interprets them beyond stringification for text filtering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: Option<i64>,
    pub session_id: String,
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
    #[serde(default)]
    pub tool_response: Option<serde_json::Value>,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
}

impl ToolCall {
    /// Anything other than an explicit `"error"` status counts as success.
    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }
}

/// Lifecycle record for a sub-agent spawned within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub id: Option<i64>,
    pub session_id: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
    pub status: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
}

/// A single entry in a session's chronological timeline.
///
/// The backend merges tool calls and agent lifecycle markers into one ordered
/// stream, tagging each entry with a representative `timestamp` used for all
/// temporal comparison. The core is direction-agnostic: callers must supply a
/// consistently ordered sequence, ascending or descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEvent {
    ToolCall {
        timestamp: Option<String>,
        tool_call: ToolCall,
    },
    Agent {
        timestamp: Option<String>,
        agent: AgentRun,
    },
}

impl TimelineEvent {
    /// The representative timestamp used for ordering and grouping.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            TimelineEvent::ToolCall { timestamp, .. } | TimelineEvent::Agent { timestamp, .. } => {
                timestamp.as_deref()
            }
        }
    }

    /// Grouping identity for burst detection: tool name for tool calls,
    /// agent name for agent events (sentinel `"unknown"` when absent).
    pub fn burst_key(&self) -> String {
        match self {
            TimelineEvent::ToolCall { tool_call, .. } => format!("tool:{}", tool_call.tool_name),
            TimelineEvent::Agent { agent, .. } => {
                format!("agent:{}", agent.agent_name.as_deref().unwrap_or("unknown"))
            }
        }
    }

    /// Human-facing name for list rows and burst headers.
    pub fn display_name(&self) -> &str {
        match self {
            TimelineEvent::ToolCall { tool_call, .. } => &tool_call.tool_name,
            TimelineEvent::Agent { agent, .. } => agent.agent_name.as_deref().unwrap_or("Agent"),
        }
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, TimelineEvent::Agent { .. })
    }

    pub fn as_tool_call(&self) -> Option<&ToolCall> {
        match self {
            TimelineEvent::ToolCall { tool_call, .. } => Some(tool_call),
            TimelineEvent::Agent { .. } => None,
        }
    }

    pub fn as_agent(&self) -> Option<&AgentRun> {
        match self {
            TimelineEvent::Agent { agent, .. } => Some(agent),
            TimelineEvent::ToolCall { .. } => None,
        }
    }
}

/// A project grouping sessions by working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<i64>,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub session_count: u64,
    #[serde(default)]
    pub total_input_tokens: u64,
    #[serde(default)]
    pub total_output_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub last_active: Option<String>,
}

/// Per-tool aggregate as reported by the monitor's `/tools/stats` route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStats {
    pub tool_name: String,
    pub count: u64,
    #[serde(default)]
    pub error_count: u64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub avg_duration_ms: Option<f64>,
}

/// Cross-session dashboard aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub active_sessions: u64,
    #[serde(default)]
    pub total_tool_calls: u64,
    #[serde(default)]
    pub total_input_tokens: u64,
    #[serde(default)]
    pub total_output_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub tool_distribution: Vec<ToolStats>,
    #[serde(default)]
    pub recent_sessions: Vec<Session>,
    #[serde(default)]
    pub recent_errors: Vec<ToolCall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool_call(name: &str, status: &str) -> ToolCall {
        ToolCall {
            id: Some(1),
            session_id: "s1".to_string(),
            tool_name: name.to_string(),
            tool_input: None,
            tool_response: None,
            status: status.to_string(),
            error: None,
            started_at: Some("2026-01-01T00:00:00".to_string()),
            ended_at: None,
            duration_ms: Some(120),
        }
    }

    #[test]
    fn timeline_event_tool_call_roundtrip() {
        let event = TimelineEvent::ToolCall {
            timestamp: Some("2026-01-01T00:00:00".to_string()),
            tool_call: tool_call("Read", "success"),
        };
        let raw = serde_json::to_string(&event).unwrap();
        assert!(raw.contains("\"type\":\"tool_call\""));
        let parsed: TimelineEvent = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.display_name(), "Read");
        assert_eq!(parsed.burst_key(), "tool:Read");
        assert!(!parsed.is_agent());
    }

    #[test]
    fn timeline_event_agent_from_backend_json() {
        let raw = json!({
            "type": "agent",
            "timestamp": "2026-01-01 00:00:05",
            "agent": {
                "id": 7,
                "session_id": "s1",
                "agent_name": "explorer",
                "agent_type": "general-purpose",
                "status": "running",
                "started_at": "2026-01-01 00:00:05",
                "ended_at": null
            }
        });
        let parsed: TimelineEvent = serde_json::from_value(raw).unwrap();
        assert!(parsed.is_agent());
        assert_eq!(parsed.burst_key(), "agent:explorer");
        assert_eq!(parsed.display_name(), "explorer");
    }

    #[test]
    fn agent_without_name_uses_sentinel_key() {
        let event = TimelineEvent::Agent {
            timestamp: None,
            agent: AgentRun {
                id: None,
                session_id: "s1".to_string(),
                agent_name: None,
                agent_type: None,
                status: "running".to_string(),
                started_at: None,
                ended_at: None,
            },
        };
        assert_eq!(event.burst_key(), "agent:unknown");
        assert_eq!(event.display_name(), "Agent");
    }

    #[test]
    fn tool_call_status_classification() {
        assert!(tool_call("Bash", "error").is_error());
        assert!(!tool_call("Bash", "success").is_error());
        // Unknown status strings degrade to success rather than failing.
        assert!(!tool_call("Bash", "pending").is_error());
    }

    #[test]
    fn session_detail_flattens_session_fields() {
        let raw = json!({
            "id": 3,
            "session_id": "abc",
            "status": "active",
            "model": "opus",
            "tool_calls": [],
            "agents": []
        });
        let detail: SessionDetail = serde_json::from_value(raw).unwrap();
        assert_eq!(detail.session.session_id, "abc");
        assert!(detail.tool_calls.is_empty());
    }
}
