use std::time::Duration;

use agentlens_api_client::{ApiClient, RetryConfig, SessionListQuery};
use agentlens_core::{Session, TimelineEvent};

use crate::config::AppConfig;

/// Commands that require async I/O (network calls).
pub enum AsyncCommand {
    LoadSessions,
    LoadTimeline { session_id: String },
}

/// Results returned by async commands.
pub enum CommandResult {
    Sessions(Result<Vec<Session>, String>),
    Timeline {
        session_id: String,
        result: Result<Vec<TimelineEvent>, String>,
    },
}

fn make_client(config: &AppConfig) -> Result<ApiClient, String> {
    ApiClient::new(&config.server.url, Duration::from_secs(10))
        .map_err(|e| format!("Failed to create HTTP client: {e}"))
}

pub async fn execute(cmd: AsyncCommand, config: &AppConfig) -> CommandResult {
    match cmd {
        AsyncCommand::LoadSessions => {
            let result = async {
                let client = make_client(config)?;
                let page = client
                    .list_sessions(&SessionListQuery::default())
                    .await
                    .map_err(|e| format!("{e}"))?;
                Ok(page.items)
            }
            .await;
            CommandResult::Sessions(result)
        }

        AsyncCommand::LoadTimeline { session_id } => {
            // One quick retry round keeps a transient hiccup invisible while
            // bounding how long the event loop stays blocked.
            let retry = RetryConfig {
                max_retries: 1,
                delays: vec![1],
            };
            let result = async {
                let client = make_client(config)?;
                client
                    .session_timeline_retrying(&session_id, &retry)
                    .await
                    .map_err(|e| format!("{e}"))
            }
            .await;
            CommandResult::Timeline { session_id, result }
        }
    }
}
