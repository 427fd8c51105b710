use crate::app::App;
use crate::format::{relative_time, truncate};
use crate::theme::{status_color, Theme};
use chrono::Utc;
use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.sessions.is_empty() {
        let msg = if app.loading_sessions {
            "Loading sessions..."
        } else {
            "No sessions recorded yet. Is the monitor backend running?"
        };
        render_empty(frame, area, msg);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = app
        .sessions
        .iter()
        .map(|session| {
            let model = session.model.as_deref().unwrap_or("unknown");
            let project = session.project_name.as_deref().unwrap_or("-");
            let age = relative_time(session.started_at.as_deref(), now);

            let line1 = Line::from(vec![
                Span::styled(
                    format!(" {} ", session.status),
                    Style::new().fg(status_color(&session.status)).bold(),
                ),
                Span::styled(
                    truncate(&session.session_id, 40),
                    Style::new().fg(Theme::TEXT_PRIMARY).bold(),
                ),
            ]);
            let line2 = Line::from(vec![
                Span::raw("   "),
                Span::styled(age, Style::new().fg(Theme::TEXT_PRIMARY)),
                Span::styled("  ", Style::new().fg(Theme::TEXT_MUTED)),
                Span::styled(model.to_string(), Style::new().fg(Theme::ACCENT_BLUE)),
                Span::styled("  ", Style::new().fg(Theme::TEXT_MUTED)),
                Span::styled(project.to_string(), Style::new().fg(Theme::ACCENT_PURPLE)),
                Span::styled("  ", Style::new().fg(Theme::TEXT_MUTED)),
                Span::styled(
                    format!("{} tool calls", session.tool_call_count),
                    Style::new().fg(Theme::ACCENT_YELLOW),
                ),
            ]);
            let line3 = Line::raw("");

            ListItem::new(vec![line1, line2, line3])
        })
        .collect();

    let list = List::new(items)
        .block(Theme::block_dim().title(" Sessions "))
        .highlight_style(
            Style::new()
                .bg(Theme::BG_SURFACE)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(" > ")
        .highlight_spacing(ratatui::widgets::HighlightSpacing::Always);

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_empty(frame: &mut Frame, area: Rect, msg: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        msg,
        Style::new().fg(Theme::TEXT_SECONDARY),
    )))
    .block(Theme::block_dim().title(" Sessions "))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, View};
    use crate::async_ops::CommandResult;
    use crate::config::AppConfig;
    use agentlens_core::Session;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn session(id: &str, status: &str) -> Session {
        Session {
            id: Some(1),
            session_id: id.to_string(),
            project_id: None,
            project_name: Some("demo".to_string()),
            status: status.to_string(),
            model: Some("opus".to_string()),
            started_at: Some("2026-01-01T00:00:00".to_string()),
            ended_at: None,
            input_tokens: 0,
            output_tokens: 0,
            cache_read_tokens: 0,
            cache_write_tokens: 0,
            estimated_cost: 0.0,
            tool_call_count: 7,
        }
    }

    #[test]
    fn render_lists_sessions_with_metadata() {
        let mut app = App::new(AppConfig::default());
        app.apply_command_result(CommandResult::Sessions(Ok(vec![
            session("abc-123", "active"),
            session("def-456", "completed"),
        ])));
        assert_eq!(app.view, View::SessionList);

        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &mut app, area);
            })
            .expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("abc-123"));
        assert!(text.contains("def-456"));
        assert!(text.contains("7 tool calls"));
        assert!(text.contains("opus"));
    }

    #[test]
    fn render_shows_empty_state() {
        let mut app = App::new(AppConfig::default());
        app.loading_sessions = false;

        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, &mut app, area);
            })
            .expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("No sessions recorded yet"));
    }
}
