use crate::app::{App, ViewMode};
use crate::format::{clock_time, format_duration_ms};
use crate::theme::{category_color, Theme};
use agentlens_timeline::{
    build_bursts, build_phases, compute_stats, Burst, Phase, TimelineStats, ToolCategory,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the timeline detail view. The whole burst/phase/stats structure is
/// recomputed from the raw snapshot on every frame; nothing derived is cached
/// across refreshes or filter changes.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let filtered = app.filter.apply(&app.events, &app.config.timeline);
    let bursts = build_bursts(&filtered, &app.config.timeline);
    let phases = build_phases(bursts, &app.config.timeline);
    let stats = compute_stats(&app.events, phases.len(), &app.config.timeline);

    let [toolbar_area, stats_area, body_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_toolbar(frame, app, toolbar_area);
    render_stats_bar(frame, &stats, stats_area);

    let lines = match app.view_mode {
        ViewMode::Grouped => grouped_lines(&phases),
        ViewMode::Flat => flat_lines(&filtered),
    };
    render_body(frame, &mut app.scroll, body_area, lines, filtered.len());
}

fn render_toolbar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    for (i, category) in ToolCategory::ALL.iter().enumerate() {
        let active = app.filter.categories.contains(category);
        let style = if active {
            Style::new().fg(Color::Black).bg(category_color(*category)).bold()
        } else {
            Style::new().fg(Theme::TEXT_MUTED)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, category.label()), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::styled(" │ ", Style::new().fg(Theme::GUTTER)));
    let errors_style = if app.filter.errors_only {
        Style::new().fg(Color::Black).bg(Theme::ACCENT_RED).bold()
    } else {
        Style::new().fg(Theme::TEXT_MUTED)
    };
    spans.push(Span::styled(" e:errors ", errors_style));

    spans.push(Span::raw(" "));
    let mode_label = match app.view_mode {
        ViewMode::Grouped => " v:grouped ",
        ViewMode::Flat => " v:flat ",
    };
    spans.push(Span::styled(
        mode_label,
        Style::new().fg(Color::Black).bg(Theme::ACCENT_BLUE).bold(),
    ));

    if app.searching {
        spans.push(Span::styled(
            " / ",
            Style::new().fg(Color::Black).bg(Theme::ACCENT_YELLOW).bold(),
        ));
        spans.push(Span::styled(
            format!(" {}", app.filter.query),
            Style::new().fg(Theme::TEXT_PRIMARY),
        ));
        spans.push(Span::styled("_", Style::new().fg(Theme::ACCENT_YELLOW)));
    } else if !app.filter.query.trim().is_empty() {
        spans.push(Span::styled(
            format!("  /{}", app.filter.query),
            Style::new().fg(Theme::ACCENT_YELLOW),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Theme::block());
    frame.render_widget(paragraph, area);
}

fn render_stats_bar(frame: &mut Frame, stats: &TimelineStats, area: Rect) {
    let success_pct = (stats.success_rate * 100.0).round() as i64;
    let mut spans = vec![
        Span::styled(
            format!(" {} calls ", stats.total_calls),
            Style::new().fg(Theme::TEXT_PRIMARY).bold(),
        ),
        Span::styled("  ", Style::new()),
        Span::styled(
            format!("{success_pct}% ok"),
            Style::new().fg(Theme::ACCENT_GREEN),
        ),
        Span::styled("  ", Style::new()),
        Span::styled(
            format!("{} errors", stats.error_count),
            Style::new().fg(if stats.error_count > 0 {
                Theme::ACCENT_RED
            } else {
                Theme::TEXT_MUTED
            }),
        ),
        Span::styled("  ", Style::new()),
        Span::styled(
            format!("{} tools", stats.unique_tools),
            Style::new().fg(Theme::ACCENT_BLUE),
        ),
        Span::styled("  ", Style::new()),
        Span::styled(
            format!("{} phases", stats.phase_count),
            Style::new().fg(Theme::ACCENT_PURPLE),
        ),
    ];
    if stats.total_duration_ms > 0 {
        spans.push(Span::styled("  ", Style::new()));
        spans.push(Span::styled(
            format_duration_ms(stats.total_duration_ms),
            Style::new().fg(Theme::ACCENT_YELLOW),
        ));
    }

    // Top tools, space permitting.
    for share in stats.tool_distribution.iter().take(3) {
        spans.push(Span::styled("  ", Style::new().fg(Theme::TEXT_MUTED)));
        spans.push(Span::styled(
            format!("{} x{}", share.name, share.count),
            Style::new().fg(category_color(share.category)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Theme::block());
    frame.render_widget(paragraph, area);
}

fn grouped_lines<'a>(phases: &'a [Phase<'a>]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for phase in phases {
        lines.push(phase_header_line(phase));
        for burst in &phase.bursts {
            lines.push(burst_line(burst));
        }
        lines.push(Line::raw(""));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No events match the current filters.",
            Style::new().fg(Theme::TEXT_SECONDARY),
        )));
    }
    lines
}

fn phase_header_line<'a>(phase: &'a Phase<'a>) -> Line<'a> {
    let mut spans = vec![
        Span::styled("── ", Style::new().fg(Theme::GUTTER)),
        Span::styled(
            phase.label.as_str(),
            Style::new()
                .fg(category_color(phase.dominant_category))
                .bold(),
        ),
        Span::styled(
            format!("  {} calls", phase.total_calls),
            Style::new().fg(Theme::TEXT_SECONDARY),
        ),
        Span::styled(
            format!(
                "  {} → {}",
                clock_time(phase.started_at),
                clock_time(phase.ended_at)
            ),
            Style::new().fg(Theme::TEXT_MUTED),
        ),
    ];
    let badges: Vec<String> = phase
        .tool_summary
        .iter()
        .take(3)
        .map(|usage| format!("{} x{}", usage.name, usage.count))
        .collect();
    if !badges.is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", badges.join(" · ")),
            Style::new().fg(Theme::TEXT_CONTENT),
        ));
    }
    Line::from(spans)
}

fn burst_line<'a>(burst: &'a Burst<'a>) -> Line<'a> {
    let mut spans = vec![
        Span::styled("  ▍ ", Style::new().fg(category_color(burst.category))),
        Span::styled(
            burst.name.as_str(),
            Style::new().fg(Theme::TEXT_PRIMARY).bold(),
        ),
    ];
    if burst.count > 1 {
        spans.push(Span::styled(
            format!(" x{}", burst.count),
            Style::new().fg(Theme::TEXT_SECONDARY),
        ));
    }
    if burst.is_parallel {
        spans.push(Span::styled(
            " parallel",
            Style::new().fg(Theme::ACCENT_PURPLE).bold(),
        ));
    }
    if burst.error_count > 0 {
        spans.push(Span::styled(
            format!("  {} err", burst.error_count),
            Style::new().fg(Theme::ACCENT_RED),
        ));
    }
    if let Some(avg) = burst.avg_duration_ms {
        spans.push(Span::styled(
            format!("  avg {}", format_duration_ms(avg)),
            Style::new().fg(Theme::ACCENT_YELLOW),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", clock_time(burst.started_at)),
        Style::new().fg(Theme::TEXT_MUTED),
    ));
    Line::from(spans)
}

fn flat_lines<'a>(events: &[&'a agentlens_core::TimelineEvent]) -> Vec<Line<'a>> {
    if events.is_empty() {
        return vec![Line::from(Span::styled(
            "  No events match the current filters.",
            Style::new().fg(Theme::TEXT_SECONDARY),
        ))];
    }
    events
        .iter()
        .map(|event| {
            let mut spans = vec![Span::styled(
                format!("  {}  ", clock_time(event.timestamp())),
                Style::new().fg(Theme::TEXT_MUTED),
            )];
            match event.as_tool_call() {
                Some(tool_call) => {
                    spans.push(Span::styled(
                        format!("{:<16}", event.display_name()),
                        Style::new().fg(Theme::TEXT_PRIMARY),
                    ));
                    let status_style = if tool_call.is_error() {
                        Style::new().fg(Theme::ACCENT_RED).bold()
                    } else {
                        Style::new().fg(Theme::ACCENT_GREEN)
                    };
                    spans.push(Span::styled(tool_call.status.as_str(), status_style));
                    if let Some(duration) = tool_call.duration_ms {
                        spans.push(Span::styled(
                            format!("  {}", format_duration_ms(duration)),
                            Style::new().fg(Theme::ACCENT_YELLOW),
                        ));
                    }
                }
                None => {
                    spans.push(Span::styled(
                        format!("{:<16}", event.display_name()),
                        Style::new().fg(Theme::ACCENT_YELLOW).bold(),
                    ));
                    spans.push(Span::styled("agent", Style::new().fg(Theme::TEXT_SECONDARY)));
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn render_body(
    frame: &mut Frame,
    scroll: &mut u16,
    area: Rect,
    lines: Vec<Line<'_>>,
    filtered_count: usize,
) {
    // Keep the scroll offset inside the rendered content.
    let max_scroll = (lines.len() as u16).saturating_sub(1);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let title = format!(" Timeline ({filtered_count} events) ");
    let paragraph = Paragraph::new(lines)
        .block(Theme::block_dim().title(title))
        .scroll((*scroll, 0));
    frame.render_widget(paragraph, area);
}
