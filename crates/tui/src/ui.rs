use crate::app::{App, FlashLevel, View};
use crate::format::truncate;
use crate::theme::Theme;
use crate::views::{help, session_list, timeline};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);

    match app.underlying_view() {
        View::SessionList | View::Help => session_list::render(frame, app, body_area),
        View::Timeline => timeline::render(frame, app, body_area),
    }

    render_footer(frame, app, footer_area);

    // Help overlay on top of whatever was underneath
    if matches!(app.view, View::Help) {
        help::render(frame, frame.area());
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut left_spans = vec![Span::styled(
        " agentlens ",
        Style::new().fg(Theme::ACCENT_ORANGE).bold(),
    )];

    match app.underlying_view() {
        View::SessionList | View::Help => {
            let count_span = if app.loading_sessions {
                Span::styled("Loading...", Style::new().fg(Theme::ACCENT_YELLOW).italic())
            } else {
                Span::styled(
                    format!("{} sessions", app.sessions.len()),
                    Style::new().fg(Theme::TEXT_SECONDARY),
                )
            };
            left_spans.push(Span::styled("  ", Style::new()));
            left_spans.push(count_span);
        }
        View::Timeline => {
            if let Some(ref session) = app.selected_session {
                left_spans.push(Span::styled("  ", Style::new()));
                left_spans.push(Span::styled(
                    truncate(&session.session_id, 40),
                    Style::new().fg(Theme::ACCENT_BLUE).bold(),
                ));
                if let Some(ref model) = session.model {
                    left_spans.push(Span::styled(
                        format!("  {model}"),
                        Style::new().fg(Theme::TEXT_SECONDARY),
                    ));
                }
            }
            if app.loading_timeline {
                left_spans.push(Span::styled(
                    "  refreshing...",
                    Style::new().fg(Theme::ACCENT_YELLOW).italic(),
                ));
            }
        }
    }

    let paragraph = Paragraph::new(Line::from(left_spans)).alignment(Alignment::Left);
    frame.render_widget(paragraph, inner);

    // Right side: server URL + auto-refresh state
    let mut right_spans = vec![Span::styled(
        app.config
            .server
            .url
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .to_string(),
        Style::new().fg(Theme::TEXT_SECONDARY),
    )];
    if matches!(app.underlying_view(), View::Timeline) {
        let (label, color) = if app.auto_refresh {
            (
                format!(" auto {}s ", app.config.refresh_interval_secs),
                Theme::ACCENT_GREEN,
            )
        } else {
            (" auto off ".to_string(), Theme::TEXT_MUTED)
        };
        right_spans.push(Span::styled("  ", Style::new()));
        right_spans.push(Span::styled(label, Style::new().fg(color)));
    }
    let right = Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right);
    frame.render_widget(right, inner);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let mut spans = match app.underlying_view() {
        View::SessionList | View::Help => vec![
            Span::styled(" j/k ", key_style),
            Span::styled("navigate  ", desc_style),
            Span::styled("Enter ", key_style),
            Span::styled("open  ", desc_style),
            Span::styled("r ", key_style),
            Span::styled("reload  ", desc_style),
            Span::styled("? ", key_style),
            Span::styled("help  ", desc_style),
            Span::styled("q ", key_style),
            Span::styled("quit", desc_style),
        ],
        View::Timeline => {
            if app.searching {
                vec![
                    Span::styled(
                        " / ",
                        Style::new().fg(Color::Black).bg(Theme::ACCENT_YELLOW).bold(),
                    ),
                    Span::styled(
                        format!(" {}", app.filter.query),
                        Style::new().fg(Theme::TEXT_PRIMARY),
                    ),
                    Span::styled("  ESC cancel  Enter confirm", desc_style),
                ]
            } else {
                vec![
                    Span::styled(" 1-5 ", key_style),
                    Span::styled("categories  ", desc_style),
                    Span::styled("e ", key_style),
                    Span::styled("errors  ", desc_style),
                    Span::styled("/ ", key_style),
                    Span::styled("filter  ", desc_style),
                    Span::styled("v ", key_style),
                    Span::styled("view  ", desc_style),
                    Span::styled("a ", key_style),
                    Span::styled("auto  ", desc_style),
                    Span::styled("r ", key_style),
                    Span::styled("refresh  ", desc_style),
                    Span::styled("Esc ", key_style),
                    Span::styled("back", desc_style),
                ]
            }
        }
    };

    if let Some((ref msg, level)) = app.flash_message {
        let color = match level {
            FlashLevel::Success => Theme::ACCENT_GREEN,
            FlashLevel::Error => Theme::ACCENT_RED,
            FlashLevel::Info => Theme::ACCENT_BLUE,
        };
        spans.push(Span::styled("  ", Style::new()));
        spans.push(Span::styled(msg.as_str(), Style::new().fg(color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
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

    #[test]
    fn full_frame_renders_header_body_and_footer() {
        let mut app = App::new(AppConfig::default());
        app.loading_sessions = false;

        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, &mut app)).expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("agentlens"));
        assert!(text.contains("0 sessions"));
        assert!(text.contains("quit"));
    }

    #[test]
    fn error_flash_appears_in_footer() {
        let mut app = App::new(AppConfig::default());
        app.loading_sessions = false;
        app.flash("Refresh failed: boom (r to retry)".to_string(), FlashLevel::Error);

        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, &mut app)).expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("Refresh failed: boom (r to retry)"));
    }
}
