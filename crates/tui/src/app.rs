use std::time::{Duration, Instant};

use agentlens_core::Session;
use agentlens_core::TimelineEvent;
use agentlens_timeline::{TimelineFilter, ToolCategory};
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SessionList,
    Timeline,
    Help,
}

/// Timeline body layout: grouped shows phases and bursts, flat shows every
/// filtered event as its own row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grouped,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
    Error,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,

    // ── Session list ─────────────────────────────────────────────────
    pub sessions: Vec<Session>,
    pub list_state: ListState,
    pub loading_sessions: bool,

    // ── Timeline ─────────────────────────────────────────────────────
    /// Last good snapshot: kept verbatim across failed refreshes.
    pub events: Vec<TimelineEvent>,
    pub selected_session: Option<Session>,
    pub filter: TimelineFilter,
    pub view_mode: ViewMode,
    pub scroll: u16,
    pub searching: bool,
    pub auto_refresh: bool,
    pub loading_timeline: bool,
    pub last_refresh: Option<Instant>,

    // ── Shared ───────────────────────────────────────────────────────
    pub flash_message: Option<(String, FlashLevel)>,
    pub pending_command: Option<AsyncCommand>,
    help_return: View,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            view: View::SessionList,
            config,
            sessions: Vec::new(),
            list_state: ListState::default(),
            loading_sessions: true,
            events: Vec::new(),
            selected_session: None,
            filter: TimelineFilter::default(),
            view_mode: ViewMode::Grouped,
            scroll: 0,
            searching: false,
            auto_refresh: true,
            loading_timeline: false,
            last_refresh: None,
            flash_message: None,
            pending_command: Some(AsyncCommand::LoadSessions),
            help_return: View::SessionList,
        }
    }

    pub fn selected_list_session(&self) -> Option<&Session> {
        self.list_state.selected().and_then(|i| self.sessions.get(i))
    }

    /// The view the body should show; the help overlay draws on top of it.
    pub fn underlying_view(&self) -> View {
        if self.view == View::Help {
            self.help_return
        } else {
            self.view
        }
    }

    /// Whether the auto-refresh timer has elapsed for the timeline view.
    pub fn refresh_due(&self) -> bool {
        if !self.auto_refresh || self.view != View::Timeline || self.loading_timeline {
            return false;
        }
        let interval = Duration::from_secs(self.config.refresh_interval_secs.max(1));
        match self.last_refresh {
            Some(at) => at.elapsed() >= interval,
            None => true,
        }
    }

    pub fn request_timeline_refresh(&mut self) {
        if self.pending_command.is_some() {
            return;
        }
        let Some(session_id) = self
            .selected_session
            .as_ref()
            .map(|s| s.session_id.clone())
        else {
            return;
        };
        self.loading_timeline = true;
        self.pending_command = Some(AsyncCommand::LoadTimeline { session_id });
    }

    pub fn apply_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Sessions(Ok(sessions)) => {
                self.sessions = sessions;
                self.loading_sessions = false;
                if !self.sessions.is_empty() && self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
            }
            CommandResult::Sessions(Err(e)) => {
                self.loading_sessions = false;
                tracing::warn!("session list fetch failed: {e}");
                self.flash(format!("Failed to load sessions: {e} (r to retry)"), FlashLevel::Error);
            }
            CommandResult::Timeline { session_id, result } => {
                self.loading_timeline = false;
                self.last_refresh = Some(Instant::now());
                // A stale response for a session we already left is dropped.
                let current = self
                    .selected_session
                    .as_ref()
                    .map(|s| s.session_id.as_str());
                if current != Some(session_id.as_str()) {
                    return;
                }
                match result {
                    Ok(events) => {
                        self.events = events;
                        if matches!(self.flash_message, Some((_, FlashLevel::Error))) {
                            self.flash_message = None;
                        }
                    }
                    Err(e) => {
                        // Last good snapshot stays on screen.
                        tracing::warn!("timeline fetch failed: {e}");
                        self.flash(format!("Refresh failed: {e} (r to retry)"), FlashLevel::Error);
                    }
                }
            }
        }
    }

    pub fn flash(&mut self, message: String, level: FlashLevel) {
        self.flash_message = Some((message, level));
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.view == View::Help {
            self.view = self.help_return;
            return false;
        }
        if self.searching {
            self.handle_search_key(key);
            return false;
        }
        match self.view {
            View::SessionList => self.handle_session_list_key(key),
            View::Timeline => self.handle_timeline_key(key),
            View::Help => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.filter.query.clear();
                self.searching = false;
            }
            KeyCode::Enter => self.searching = false,
            KeyCode::Backspace => {
                self.filter.query.pop();
            }
            KeyCode::Char(c) => self.filter.query.push(c),
            _ => {}
        }
    }

    fn handle_session_list_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char('g') => {
                if !self.sessions.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('G') => {
                if !self.sessions.is_empty() {
                    self.list_state.select(Some(self.sessions.len() - 1));
                }
            }
            KeyCode::Enter => self.open_selected_session(),
            KeyCode::Char('r') => {
                if self.pending_command.is_none() {
                    self.loading_sessions = true;
                    self.pending_command = Some(AsyncCommand::LoadSessions);
                }
            }
            KeyCode::Char('?') => self.open_help(),
            _ => {}
        }
        false
    }

    fn handle_timeline_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                self.view = View::SessionList;
                self.events.clear();
                self.selected_session = None;
                self.filter.reset();
                self.scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Char('g') => self.scroll = 0,
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                self.filter.toggle_category(ToolCategory::ALL[index]);
            }
            KeyCode::Char('e') => self.filter.errors_only = !self.filter.errors_only,
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('x') => self.filter.reset(),
            KeyCode::Char('v') => {
                self.view_mode = match self.view_mode {
                    ViewMode::Grouped => ViewMode::Flat,
                    ViewMode::Flat => ViewMode::Grouped,
                };
                self.scroll = 0;
            }
            KeyCode::Char('a') => {
                self.auto_refresh = !self.auto_refresh;
                let label = if self.auto_refresh { "on" } else { "off" };
                self.flash(format!("Auto-refresh {label}"), FlashLevel::Info);
            }
            KeyCode::Char('r') => self.request_timeline_refresh(),
            KeyCode::Char('?') => self.open_help(),
            _ => {}
        }
        false
    }

    fn open_help(&mut self) {
        self.help_return = self.view;
        self.view = View::Help;
    }

    fn open_selected_session(&mut self) {
        let Some(session) = self.selected_list_session().cloned() else {
            return;
        };
        self.selected_session = Some(session);
        self.view = View::Timeline;
        self.events.clear();
        self.filter = TimelineFilter::default();
        self.scroll = 0;
        self.last_refresh = None;
        self.request_timeline_refresh();
    }

    fn select_next(&mut self) {
        if self.sessions.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.sessions.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.sessions.is_empty() {
            return;
        }
        let previous = self.list_state.selected().map(|i| i.saturating_sub(1));
        self.list_state.select(previous.or(Some(0)));
    }
}
