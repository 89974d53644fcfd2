use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use octograph_core::{
    fetch_contribution_calendar, fetch_language_breakdown, fetch_recent_repos, CancelToken,
    ContributionCalendar, FetchState, GithubClient, LanguageTotal, Repo,
};
use tokio::runtime::Handle;

use super::event::{Event, FetchResult};
use super::themes::{Theme, ThemeName};

/// Recent-repo grid size, matching the profile page layout.
const RECENT_REPO_LIMIT: usize = 12;

/// Configuration for TUI initialization
pub struct TuiConfig {
    pub user: String,
    pub year: i32,
    pub token: Option<String>,
    pub theme: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Languages,
    Calendar,
    Repos,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Languages, Tab::Calendar, Tab::Repos]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Languages => "Languages",
            Tab::Calendar => "Calendar",
            Tab::Repos => "Repos",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Languages => Tab::Calendar,
            Tab::Calendar => Tab::Repos,
            Tab::Repos => Tab::Languages,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Languages => Tab::Repos,
            Tab::Calendar => Tab::Languages,
            Tab::Repos => Tab::Calendar,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub theme: Theme,
    pub user: String,
    pub year: i32,

    pub languages: FetchState<Vec<LanguageTotal>>,
    pub calendar: FetchState<ContributionCalendar>,
    pub repos: FetchState<Vec<Repo>>,

    pub scroll_offset: usize,
    pub selected_index: usize,
    pub max_visible_items: usize,

    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub terminal_width: u16,
    pub terminal_height: u16,

    pub spinner_frame: usize,

    client: GithubClient,
    runtime: Handle,
    events_tx: mpsc::Sender<Event>,
    languages_cancel: CancelToken,
    calendar_cancel: CancelToken,
    repos_cancel: CancelToken,
}

impl App {
    pub fn new(config: TuiConfig, runtime: Handle, events_tx: mpsc::Sender<Event>) -> Self {
        let theme_name: ThemeName = config.theme.parse().unwrap_or(ThemeName::Green);
        let client = GithubClient::new(config.token);

        Self {
            should_quit: false,
            current_tab: Tab::Languages,
            theme: Theme::from_name(theme_name),
            user: config.user,
            year: config.year,
            languages: FetchState::Idle,
            calendar: FetchState::Idle,
            repos: FetchState::Idle,
            scroll_offset: 0,
            selected_index: 0,
            max_visible_items: 20,
            status_message: None,
            status_message_time: None,
            terminal_width: 80,
            terminal_height: 24,
            spinner_frame: 0,
            client,
            runtime,
            events_tx,
            languages_cancel: CancelToken::new(),
            calendar_cancel: CancelToken::new(),
            repos_cancel: CancelToken::new(),
        }
    }

    pub fn reload_all(&mut self) {
        self.spawn_languages();
        self.spawn_calendar();
        self.spawn_repos();
    }

    /// Start a language fetch, superseding any in-flight one.
    pub fn spawn_languages(&mut self) {
        self.languages_cancel.cancel();
        self.languages_cancel = CancelToken::new();
        self.languages = FetchState::Loading;

        let client = self.client.clone();
        let user = self.user.clone();
        let cancel = self.languages_cancel.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_language_breakdown(&client, &user, &cancel).await;
            if !cancel.is_cancelled() {
                let _ = tx.send(Event::Fetch(FetchResult::Languages(cancel, result)));
            }
        });
    }

    pub fn spawn_calendar(&mut self) {
        self.calendar_cancel.cancel();
        self.calendar_cancel = CancelToken::new();
        self.calendar = FetchState::Loading;

        let client = self.client.clone();
        let user = self.user.clone();
        let year = self.year;
        let cancel = self.calendar_cancel.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_contribution_calendar(&client, &user, year, &cancel).await;
            if !cancel.is_cancelled() {
                let _ = tx.send(Event::Fetch(FetchResult::Calendar(cancel, result)));
            }
        });
    }

    pub fn spawn_repos(&mut self) {
        self.repos_cancel.cancel();
        self.repos_cancel = CancelToken::new();
        self.repos = FetchState::Loading;

        let client = self.client.clone();
        let user = self.user.clone();
        let cancel = self.repos_cancel.clone();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let result = fetch_recent_repos(&client, &user, RECENT_REPO_LIMIT).await;
            if !cancel.is_cancelled() {
                let _ = tx.send(Event::Fetch(FetchResult::Repos(cancel, result)));
            }
        });
    }

    /// Commit a finished fetch. Results whose token was superseded are
    /// dropped so a stale response never overwrites fresher state.
    pub fn apply_fetch(&mut self, result: FetchResult) {
        match result {
            FetchResult::Languages(token, result) => {
                if token.is_cancelled() {
                    return;
                }
                self.languages = FetchState::from_result(result);
                self.clamp_selection();
            }
            FetchResult::Calendar(token, result) => {
                if token.is_cancelled() {
                    return;
                }
                self.calendar = FetchState::from_result(result);
            }
            FetchResult::Repos(token, result) => {
                if token.is_cancelled() {
                    return;
                }
                self.repos = FetchState::from_result(result);
                self.clamp_selection();
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 20;

        if let Some(status_time) = self.status_message_time {
            if status_time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.current_tab = self.current_tab.next();
                self.reset_selection();
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.current_tab = self.current_tab.prev();
                self.reset_selection();
            }
            KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('r') => {
                self.reload_current();
            }
            KeyCode::Char('[') => {
                self.switch_year(-1);
            }
            KeyCode::Char(']') => {
                self.switch_year(1);
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
            }
            KeyCode::Char('y') => {
                self.copy_selected_to_clipboard();
            }
            _ => {}
        }
        false
    }

    fn reload_current(&mut self) {
        match self.current_tab {
            Tab::Languages => self.spawn_languages(),
            Tab::Calendar => self.spawn_calendar(),
            Tab::Repos => self.spawn_repos(),
        }
        self.set_status("Reloading");
    }

    fn switch_year(&mut self, delta: i32) {
        self.year += delta;
        self.spawn_calendar();
        self.set_status(&format!("Year: {}", self.year));
    }

    fn cycle_theme(&mut self) {
        let new_theme = self.theme.name.next();
        self.theme = Theme::from_name(new_theme);
        self.set_status(&format!("Theme: {}", new_theme.as_str()));
    }

    fn copy_selected_to_clipboard(&mut self) {
        let text = match self.current_tab {
            Tab::Languages => self
                .languages
                .data()
                .and_then(|totals| totals.get(self.selected_index))
                .map(|t| format!("{}: {:.1}%", t.name, t.share)),
            Tab::Calendar => self
                .calendar
                .data()
                .map(|c| format!("{} contributions in {}", c.total, self.year)),
            Tab::Repos => self
                .repos
                .data()
                .and_then(|repos| repos.get(self.selected_index))
                .map(|r| r.html_url.clone()),
        };

        if let Some(text) = text {
            match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(&text)) {
                Ok(_) => self.set_status("Copied to clipboard"),
                Err(_) => self.set_status("Failed to copy"),
            }
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        // Ensure at least 1 visible item to prevent division/slice issues
        self.max_visible_items = (height.saturating_sub(10) as usize).max(1);
        self.clamp_selection();
    }

    /// Clamp selection and scroll offset to valid bounds after data/resize changes
    fn clamp_selection(&mut self) {
        let len = self.current_list_len();
        if len == 0 {
            self.selected_index = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
        let max_scroll = len.saturating_sub(self.max_visible_items);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }

    fn reset_selection(&mut self) {
        self.scroll_offset = 0;
        self.selected_index = 0;
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            }
        }
    }

    fn move_selection_down(&mut self) {
        let max_index = self.current_list_len().saturating_sub(1);
        if self.selected_index < max_index {
            self.selected_index += 1;
            if self.selected_index >= self.scroll_offset + self.max_visible_items {
                self.scroll_offset = self.selected_index - self.max_visible_items + 1;
            }
        }
    }

    fn current_list_len(&self) -> usize {
        match self.current_tab {
            Tab::Languages => self.languages.data().map(Vec::len).unwrap_or(0),
            Tab::Repos => self.repos.data().map(Vec::len).unwrap_or(0),
            Tab::Calendar => 0,
        }
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
        self.status_message_time = Some(Instant::now());
    }

    pub fn is_fetching(&self) -> bool {
        self.languages.is_loading() || self.calendar.is_loading() || self.repos.is_loading()
    }

    pub fn is_narrow(&self) -> bool {
        self.terminal_width < 80
    }

    pub fn is_very_narrow(&self) -> bool {
        self.terminal_width < 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use octograph_core::ApiError;

    // The runtime is never driven, so spawned fetch tasks sit unpolled and
    // no request leaves the process. Keep it alive for the App's lifetime.
    fn test_app() -> (tokio::runtime::Runtime, App) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (tx, _rx) = mpsc::channel();
        let config = TuiConfig {
            user: "octocat".to_string(),
            year: 2025,
            token: None,
            theme: "green".to_string(),
        };
        let app = App::new(config, rt.handle().clone(), tx);
        (rt, app)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_totals() -> Vec<LanguageTotal> {
        vec![
            LanguageTotal {
                name: "Rust".to_string(),
                bytes: 9000,
                share: 75.0,
            },
            LanguageTotal {
                name: "TypeScript".to_string(),
                bytes: 3000,
                share: 25.0,
            },
        ]
    }

    #[test]
    fn test_tab_cycle_wraps() {
        let mut tab = Tab::Languages;
        for _ in 0..Tab::all().len() {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Languages);
        assert_eq!(Tab::Languages.prev(), Tab::Repos);
    }

    #[test]
    fn test_quit_key() {
        let (_rt, mut app) = test_app();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (_rt, mut app) = test_app();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.handle_key_event(event));
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_key_advances_view() {
        let (_rt, mut app) = test_app();
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.current_tab, Tab::Calendar);
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.current_tab, Tab::Languages);
    }

    #[test]
    fn test_year_switch_supersedes_previous_fetch() {
        let (_rt, mut app) = test_app();
        app.spawn_calendar();
        let first = app.calendar_cancel.clone();
        assert!(!first.is_cancelled());

        app.handle_key_event(key(KeyCode::Char(']')));
        assert_eq!(app.year, 2026);
        assert!(first.is_cancelled());
        assert!(!app.calendar_cancel.is_cancelled());
        assert!(app.calendar.is_loading());
    }

    #[test]
    fn test_apply_fetch_drops_superseded_result() {
        let (_rt, mut app) = test_app();
        let stale = CancelToken::new();
        stale.cancel();
        app.apply_fetch(FetchResult::Languages(stale, Ok(sample_totals())));
        assert!(app.languages.data().is_none());
    }

    #[test]
    fn test_apply_fetch_commits_live_result() {
        let (_rt, mut app) = test_app();
        app.apply_fetch(FetchResult::Languages(CancelToken::new(), Ok(sample_totals())));
        assert_eq!(app.languages.data().map(Vec::len), Some(2));
    }

    #[test]
    fn test_apply_fetch_records_error() {
        let (_rt, mut app) = test_app();
        app.apply_fetch(FetchResult::Calendar(
            CancelToken::new(),
            Err(ApiError::RateLimited { status: 403 }),
        ));
        assert!(app.calendar.error().is_some_and(ApiError::is_rate_limit));
    }

    #[test]
    fn test_selection_clamps_to_shorter_list() {
        let (_rt, mut app) = test_app();
        app.apply_fetch(FetchResult::Languages(CancelToken::new(), Ok(sample_totals())));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.selected_index, 1);

        let shorter = vec![LanguageTotal {
            name: "Zig".to_string(),
            bytes: 100,
            share: 100.0,
        }];
        app.apply_fetch(FetchResult::Languages(CancelToken::new(), Ok(shorter)));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_selection_stops_at_list_end() {
        let (_rt, mut app) = test_app();
        app.apply_fetch(FetchResult::Languages(CancelToken::new(), Ok(sample_totals())));
        for _ in 0..5 {
            app.handle_key_event(key(KeyCode::Down));
        }
        assert_eq!(app.selected_index, 1);
        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_theme_cycle_updates_status() {
        let (_rt, mut app) = test_app();
        app.handle_key_event(key(KeyCode::Char('t')));
        assert_eq!(app.theme.name, ThemeName::Blue);
        assert_eq!(app.status_message.as_deref(), Some("Theme: blue"));
    }

    #[test]
    fn test_reload_marks_current_tab_loading() {
        let (_rt, mut app) = test_app();
        app.apply_fetch(FetchResult::Languages(CancelToken::new(), Ok(sample_totals())));
        assert!(!app.is_fetching());
        app.handle_key_event(key(KeyCode::Char('r')));
        assert!(app.languages.is_loading());
        assert!(app.is_fetching());
    }
}
