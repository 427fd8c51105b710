use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

pub fn render(frame: &mut Frame, area: Rect) {
    // Center the help overlay
    let popup_width = 58u16.min(area.width.saturating_sub(4));
    let popup_height = 24u16.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Theme::block_accent()
        .title(" Keyboard Shortcuts ")
        .padding(Theme::PADDING_CARD);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::new().fg(Theme::ACCENT_YELLOW).bold();
    let desc_style = Style::new().fg(Theme::TEXT_CONTENT);
    let header_style = Style::new().fg(Theme::ACCENT_BLUE).bold();
    let close_hint_line = Line::from(Span::styled(
        "Press any key to close",
        Style::new().fg(Color::DarkGray),
    ));

    let mut lines = vec![
        Line::from(Span::styled("── Session List ──", header_style)),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Navigate up/down", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  g/G       ", key_style),
            Span::styled("Jump to first/last", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Open session timeline", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Reload session list", desc_style),
        ]),
        Line::raw(""),
        Line::from(Span::styled("── Timeline ──", header_style)),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Scroll", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  1-5       ", key_style),
            Span::styled("Toggle category chips", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::styled("Errors only", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  /         ", key_style),
            Span::styled("Text filter (name / input / agent)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  x         ", key_style),
            Span::styled("Clear all filters", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  v         ", key_style),
            Span::styled("Grouped / flat view", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  a         ", key_style),
            Span::styled("Toggle auto-refresh", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  r         ", key_style),
            Span::styled("Refresh now", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Esc       ", key_style),
            Span::styled("Back to session list", desc_style),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  q         ", key_style),
            Span::styled("Quit", desc_style),
        ]),
        Line::raw(""),
        close_hint_line.clone(),
    ];

    // Keep close hint visible even when the help body exceeds the popup height.
    let max_lines = inner.height as usize;
    if max_lines == 0 {
        return;
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = close_hint_line;
        }
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::render;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
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
    fn render_shows_shortcuts_and_close_hint() {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area);
            })
            .expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("Keyboard Shortcuts"));
        assert!(text.contains("Session List"));
        assert!(text.contains("Timeline"));
        assert!(text.contains("Press any key to close"));
    }

    #[test]
    fn render_handles_small_terminal_area() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal
            .draw(|frame| {
                render(frame, Rect::new(0, 0, 30, 10));
            })
            .expect("draw");

        let text = buffer_to_string(terminal.backend().buffer());
        assert!(text.contains("Keyboard"));
    }
}
