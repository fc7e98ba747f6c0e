use std::time::Duration;

use chrono::{Local, NaiveTime};
use log::{info, warn};

use super::event::AppEvent;
use super::mode::AppMode;
use super::render_state::RenderState;
use crate::engine::config::Config;
use crate::engine::error::PacerError;
use crate::input::{Acquisition, DocumentSource, LoadError, LoadedDocument, PdfExtractor, WebFetcher};
use crate::reading::{DisplayCase, Pacer, PacerState, StartOutcome, Wpm};
use crate::storage::{History, HistoryStore, PreferenceStore, Preferences};
use crate::ui::command::{command_to_app_event, parse_command};

pub struct App {
    mode: AppMode,
    pacer: Pacer,
    config: Config,
    acquisition: Acquisition,
    display_case: DisplayCase,
    preference_store: Option<PreferenceStore>,
    history: History,
    history_store: Option<HistoryStore>,
    source: Option<DocumentSource>,
    status: Option<String>,
    command_input: String,
    show_help: bool,
}

impl App {
    /// Starts in command mode with nothing loaded and nothing persisted.
    pub fn new(config: Config) -> Result<Self, PacerError> {
        let pacer = Pacer::with_config(config.pacer.clone())?;
        let acquisition = Acquisition::new(PdfExtractor::new(), WebFetcher::new(config.web.clone()));
        let history = History::new(config.history.capacity);
        Ok(Self {
            mode: AppMode::Command,
            pacer,
            config,
            acquisition,
            display_case: DisplayCase::default(),
            preference_store: None,
            history,
            history_store: None,
            source: None,
            status: None,
            command_input: String::new(),
            show_help: false,
        })
    }

    /// Restores saved preferences and history, and saves later changes to
    /// the same stores.
    pub fn with_storage(mut self, preferences: PreferenceStore, history: HistoryStore) -> Self {
        if let Some(saved) = preferences.load() {
            self.apply_preferences(saved);
        }
        self.history = history.load(self.config.history.capacity);
        self.preference_store = Some(preferences);
        self.history_store = Some(history);
        self
    }

    fn apply_preferences(&mut self, saved: Preferences) {
        if let Err(e) = self.pacer.set_rate(saved.wpm as i64) {
            warn!("Ignoring saved rate: {}", e);
        }
        self.display_case = saved.display_case;
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display_case(&self) -> DisplayCase {
        self.display_case
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn source(&self) -> Option<&DocumentSource> {
        self.source.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    pub fn get_wpm(&self) -> Wpm {
        self.pacer.wpm()
    }

    /// Wait until the next word is due, if playback is running.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.pacer.time_until_next_tick()
    }

    /// Moves the reading clock to `now` (time since the app started) and
    /// advances the word if one came due. Returns how many advanced.
    pub fn advance_clock(&mut self, now: Duration) -> usize {
        let was_complete = self.pacer.state() == PacerState::Complete;
        let advanced = self.pacer.advance_to(now);
        if !was_complete && self.pacer.state() == PacerState::Complete {
            self.on_complete();
        }
        advanced
    }

    fn on_complete(&mut self) {
        let words = self.pacer.session().len();
        let label = format!("DONE: {} words @ {}", words, self.pacer.wpm());
        info!("{}", label);
        self.record_history(&label);
        self.status = Some("End of text. Press r to restart".to_string());
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoadSource(source) => {
                let result = self.acquisition.load_source(&source);
                self.finish_load(result);
            }
            AppEvent::LoadClipboard => {
                let result = self.acquisition.load_clipboard();
                self.finish_load(result);
            }
            AppEvent::LoadText(text) => self.load_document(LoadedDocument::manual(text)),
            AppEvent::SetRate(input) => self.set_rate_from_input(&input),
            AppEvent::Start => self.start(),
            AppEvent::Pause => self.pause(),
            AppEvent::Reset => self.reset(),
            AppEvent::ToggleCase => self.toggle_case(),
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
            AppEvent::Help => {
                self.show_help = !self.show_help;
            }
            AppEvent::Warning(message) => {
                warn!("{}", message);
                self.status = Some(message);
            }
            AppEvent::InvalidCommand(input) => {
                self.status = Some(format!("Unknown command: {}", input));
            }
            AppEvent::None => {}
        }
    }

    /// Reader controls. Only acts in reading mode.
    pub fn handle_keypress(&mut self, key: char) {
        if self.mode != AppMode::Reading {
            return;
        }
        match key {
            ' ' => {
                if self.pacer.is_running() {
                    self.pause();
                } else {
                    self.start();
                }
            }
            'r' => self.reset(),
            '+' | '=' => self.adjust_rate(self.rate_step()),
            '-' | '_' => self.adjust_rate(self.rate_step().saturating_neg()),
            'c' => self.toggle_case(),
            ':' | '@' => {
                self.enter_command_mode();
                self.command_input.push(key);
            }
            'q' => self.mode = AppMode::Quit,
            _ => {}
        }
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = AppMode::Command;
        self.command_input.clear();
    }

    /// Back to the reader controls, discarding any half-typed command.
    pub fn leave_command_mode(&mut self) {
        self.command_input.clear();
        self.show_help = false;
        if self.mode == AppMode::Command {
            self.mode = AppMode::Reading;
        }
    }

    pub fn push_command_char(&mut self, c: char) {
        if self.mode == AppMode::Command {
            self.command_input.push(c);
        }
    }

    pub fn pop_command_char(&mut self) {
        self.command_input.pop();
    }

    /// Parses and runs the command deck contents.
    pub fn submit_command(&mut self) {
        let input = std::mem::take(&mut self.command_input);
        let event = command_to_app_event(parse_command(&input));
        self.handle_event(event);
    }

    /// Hands a document to the pacer. Switches to reading mode but does not start.
    pub fn load_document(&mut self, document: LoadedDocument) {
        match self.pacer.load_text(&document.text) {
            Ok(count) => {
                info!("Loaded {} words from {}", count, document.source);
                self.status = Some(format!("Loaded {} words. Space to start", count));
                self.record_history(&document.source);
                self.source = Some(document.source);
                self.show_help = false;
                if self.mode != AppMode::Quit {
                    self.mode = AppMode::Reading;
                }
            }
            Err(e) => {
                warn!("Load from {} rejected: {}", document.source, e);
                self.status = Some(e.to_string());
            }
        }
    }

    fn finish_load(&mut self, result: Result<LoadedDocument, LoadError>) {
        match result {
            Ok(document) => self.load_document(document),
            Err(e) => {
                warn!("{}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    pub fn start(&mut self) {
        self.status = match self.pacer.start() {
            StartOutcome::Started | StartOutcome::AlreadyRunning => None,
            StartOutcome::AtEnd => Some("End of text. Press r to restart".to_string()),
            StartOutcome::NothingLoaded => Some("Nothing loaded. Try @file or @@".to_string()),
        };
    }

    pub fn pause(&mut self) {
        self.pacer.pause();
    }

    pub fn reset(&mut self) {
        self.pacer.reset();
        self.status = None;
    }

    fn set_rate_from_input(&mut self, input: &str) {
        let result = Wpm::parse(input, &self.config.pacer.wpm_range)
            .and_then(|wpm| self.pacer.set_rate(wpm.get() as i64));
        match result {
            Ok(wpm) => {
                self.status = Some(format!("Rate set to {}", wpm));
                self.save_preferences();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn rate_step(&self) -> i32 {
        i32::try_from(self.config.pacer.wpm_step).unwrap_or(i32::MAX)
    }

    fn adjust_rate(&mut self, delta: i32) {
        let before = self.pacer.wpm();
        if self.pacer.adjust_rate(delta) != before {
            self.save_preferences();
        }
    }

    pub fn toggle_case(&mut self) {
        self.display_case = self.display_case.toggled();
        self.save_preferences();
    }

    fn save_preferences(&self) {
        let Some(store) = &self.preference_store else {
            return;
        };
        let preferences = Preferences {
            wpm: self.pacer.wpm().get(),
            display_case: self.display_case,
        };
        if let Err(e) = store.save(&preferences) {
            warn!("Could not save preferences: {}", e);
        }
    }

    fn record_history(&mut self, label: &dyn std::fmt::Display) {
        self.history.record(local_time(), label);
        if let Some(store) = &self.history_store {
            if let Err(e) = store.save(&self.history) {
                warn!("Could not save history: {}", e);
            }
        }
    }

    pub fn get_render_state(&self) -> RenderState {
        RenderState {
            source_label: self.source.as_ref().map(ToString::to_string),
            status: self.status.clone(),
            command_input: self.command_input.clone(),
            history: self.history.entries().to_vec(),
            show_help: self.show_help,
            ..RenderState::from_session(
                self.mode,
                self.pacer.session(),
                self.display_case,
                self.config.reader.context_words,
            )
        }
    }
}

fn local_time() -> NaiveTime {
    Local::now().time()
}
