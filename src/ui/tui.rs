mod render;

use crate::api::model::{Analysis, AnalysisRequest};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::store::fetch::NewsFetcher;
use crate::store::state::{Action, AppState};
use crate::ui::form::AnalysisForm;
use crate::view::filter::filter_by_local_day;
use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

// How long to wait for input before redrawing with fresh store state
const TICK: Duration = Duration::from_millis(100);

/// Which panel receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    History,
    Filter,
}

/// Work the dashboard asks the runner to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Analyze(AnalysisRequest),
    RefreshHistory,
    ClearCurrent,
}

/// View-local dashboard state. Shared data lives in the store.
#[derive(Debug, Clone)]
pub struct Dashboard {
    form: AnalysisForm,
    focus: Focus,
    filter_text: String,
    history_selected: usize,
    results_scroll: u16,
    /// Historical analysis open in the detail modal
    detail: Option<Analysis>,
    detail_scroll: u16,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            form: AnalysisForm::new(),
            focus: Focus::Form,
            filter_text: String::new(),
            history_selected: 0,
            results_scroll: 0,
            detail: None,
            detail_scroll: 0,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn form(&self) -> &AnalysisForm {
        &self.form
    }

    pub fn detail(&self) -> Option<&Analysis> {
        self.detail.as_ref()
    }

    /// History entries matching the date filter, plus the filter error if
    /// the text is not a valid date (the list is then left unfiltered).
    pub fn visible_history<'a>(&self, state: &'a AppState) -> (Vec<&'a Analysis>, Option<String>) {
        match filter_by_local_day(&state.previous_analyses, &self.filter_text) {
            Ok(entries) => (entries, None),
            Err(e) => (state.previous_analyses.iter().collect(), Some(e.user_message())),
        }
    }

    /// Translate a key press into view changes and, maybe, a command
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }

        if self.detail.is_some() {
            self.handle_detail_key(key);
            return None;
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key, state),
            Focus::History => self.handle_history_key(key, state),
            Focus::Filter => {
                self.handle_filter_key(key);
                None
            }
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.detail = None;
                self.detail_scroll = 0;
            }
            KeyCode::Up => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            KeyCode::Down => self.detail_scroll = self.detail_scroll.saturating_add(1),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, state: &AppState) -> Option<Command> {
        match key.code {
            KeyCode::Tab => {
                self.focus = Focus::History;
                None
            }
            KeyCode::Enter => {
                // One analysis at a time
                if state.loading {
                    return None;
                }
                self.results_scroll = 0;
                self.form.submit().map(Command::Analyze)
            }
            KeyCode::Esc => Some(Command::ClearCurrent),
            KeyCode::Left | KeyCode::Right => {
                self.form.toggle_date();
                None
            }
            KeyCode::Up => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.results_scroll = self.results_scroll.saturating_add(1);
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.clear();
                None
            }
            KeyCode::Char(c) if !state.loading && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.push(c);
                None
            }
            KeyCode::Backspace if !state.loading => {
                self.form.pop();
                None
            }
            _ => None,
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, state: &AppState) -> Option<Command> {
        let (visible, _) = self.visible_history(state);
        match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Tab | KeyCode::Esc => {
                self.focus = Focus::Form;
                None
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Filter;
                None
            }
            KeyCode::Char('r') => Some(Command::RefreshHistory),
            KeyCode::Up => {
                self.history_selected = self.history_selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.history_selected < visible.len().saturating_sub(1) {
                    self.history_selected += 1;
                }
                None
            }
            KeyCode::Enter => {
                if let Some(analysis) = visible.get(self.history_selected) {
                    self.detail = Some((*analysis).clone());
                    self.detail_scroll = 0;
                }
                None
            }
            _ => None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.focus = Focus::History,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter_text.clear();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => self.filter_text.push(c),
            KeyCode::Backspace => {
                self.filter_text.pop();
            }
            _ => {}
        }
        self.history_selected = 0;
    }
}

/// Interactive terminal dashboard
pub struct DashboardTui {
    config: Config,
    fetcher: NewsFetcher,
    runtime: Handle,
    view: Dashboard,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardTui {
    pub fn new(config: Config, fetcher: NewsFetcher, runtime: Handle) -> Self {
        Self {
            config,
            fetcher,
            runtime,
            view: Dashboard::new(),
            tasks: Vec::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        // Always restore terminal, even if we early-return with an error.
        struct TerminalRestore;
        impl Drop for TerminalRestore {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
            }
        }
        let _restore = TerminalRestore;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        if self.config.fetch_on_load {
            self.execute(Command::RefreshHistory);
        }

        info!(api_url = %self.config.api_url, "dashboard started");

        loop {
            let state = self.fetcher.store().snapshot();
            terminal.draw(|f| render::render_dashboard(f, &self.view, &state))?;

            self.tasks.retain(|task| !task.is_finished());

            if !event::poll(TICK)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match self.view.handle_key(key, &state) {
                    Some(Command::Quit) => break,
                    Some(command) => self.execute(command),
                    None => {}
                }
            }
        }

        // Don't leave requests writing into a store nobody renders.
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("dashboard closed");

        Ok(())
    }

    fn execute(&mut self, command: Command) {
        debug!(?command, "executing command");
        match command {
            Command::Analyze(request) => {
                // Before the spawn, so the next key already sees the form locked
                self.fetcher.store().dispatch(Action::SetLoading(true));
                let fetcher = self.fetcher.clone();
                self.tasks.push(self.runtime.spawn(async move {
                    // Failure already landed in the store
                    let _ = fetcher.analyze(request).await;
                }));
            }
            Command::RefreshHistory => {
                let fetcher = self.fetcher.clone();
                self.tasks.push(self.runtime.spawn(async move {
                    fetcher.fetch_history().await;
                }));
            }
            Command::ClearCurrent => self.fetcher.clear_current(),
            Command::Quit => {}
        }
    }
}
