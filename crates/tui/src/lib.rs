mod app;
mod async_ops;
mod config;
mod format;
mod theme;
mod ui;
mod views;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides both the config file and `AGENTLENS_SERVER`.
    pub server_url: Option<String>,
}

/// Launch the TUI.
pub fn run(options: RunOptions) -> Result<()> {
    let mut app_config = config::load_config();
    if let Some(url) = options.server_url {
        app_config.server.url = url.trim_end_matches('/').to_string();
    }
    let mut app = App::new(app_config);

    // Terminal setup
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    loop {
        // ── Auto-refresh tick ─────────────────────────────────────────
        if app.refresh_due() {
            app.request_timeline_refresh();
        }

        // ── Handle pending async command ─────────────────────────────
        if let Some(cmd) = app.pending_command.take() {
            let result = rt.block_on(async_ops::execute(cmd, &app.config));
            app.apply_command_result(result);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}
