//! Playback engine: advances a `PacingSession` on a one-shot timer.
//!
//! At most one timer is armed per pacer. Every arm cancels the previous
//! handle first, and a fired handle that is not the current one is dropped,
//! so overlapping schedules cannot exist.
//!
//! Pausing throws away the part of the interval already waited; resuming
//! waits a full fresh interval.

use std::time::Duration;

use log::{debug, info, warn};

use crate::engine::config::{EmptyTokenPolicy, PacerConfig};
use crate::engine::error::PacerError;
use crate::reading::scheduler::{Scheduler, TimerId, TimerQueue};
use crate::reading::state::{PacerState, PacingSession, Progress};
use crate::reading::{tokenize_text, Token, Wpm};

/// Result of `start` / `resume`. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// Complete: `reset` or `load` first.
    AtEnd,
    NothingLoaded,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running, or a stale timer.
    Ignored,
    Advanced,
    /// Advanced onto the end; the run has stopped.
    Completed,
}

pub struct Pacer<S: Scheduler = TimerQueue> {
    session: PacingSession,
    config: PacerConfig,
    scheduler: S,
    pending: Option<TimerId>,
}

impl Pacer<TimerQueue> {
    pub fn with_config(config: PacerConfig) -> Result<Self, PacerError> {
        Self::new(config, TimerQueue::new())
    }

    /// Moves the clock to `now` and fires the armed timer if it is due.
    ///
    /// A late timer re-arms from `now`, not from its missed deadline, so a
    /// stalled host advances one token per wake-up instead of skipping a
    /// burst of words nobody saw. Returns how many tokens were advanced.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let due = self.scheduler.pop_due(now);
        self.scheduler.settle(now);
        match due {
            Some(id) if self.fire(id) != Tick::Ignored => 1,
            _ => 0,
        }
    }

    pub fn advance_by(&mut self, elapsed: Duration) -> usize {
        let now = self.scheduler.now() + elapsed;
        self.advance_to(now)
    }

    /// Wait before the next advance is due, if one is armed.
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.pending?;
        self.scheduler.time_until_next()
    }
}

impl<S: Scheduler> Pacer<S> {
    /// Starts with no tokens at `config.default_wpm`.
    pub fn new(config: PacerConfig, scheduler: S) -> Result<Self, PacerError> {
        let wpm = Wpm::new(config.default_wpm as i64, &config.wpm_range)?;
        Ok(Self {
            session: PacingSession::new(wpm),
            config,
            scheduler,
            pending: None,
        })
    }

    pub fn session(&self) -> &PacingSession {
        &self.session
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn config(&self) -> &PacerConfig {
        &self.config
    }

    pub fn state(&self) -> PacerState {
        self.session.state()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn position(&self) -> usize {
        self.session.position()
    }

    pub fn wpm(&self) -> Wpm {
        self.session.wpm()
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.session.current_token()
    }

    pub fn progress(&self) -> Progress {
        self.session.progress()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the tokens, rewinds to 0 and stops. Never starts playback.
    pub fn load_tokens(&mut self, tokens: Vec<Token>) {
        self.disarm();
        info!("Loaded {} tokens", tokens.len());
        self.session.replace_tokens(tokens);
    }

    /// Validating load for raw word sequences. Empty elements are handled by
    /// `PacerConfig::empty_token_policy`. Returns the number of tokens loaded.
    pub fn load<I, W>(&mut self, words: I) -> Result<usize, PacerError>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let mut tokens = Vec::new();
        for (index, word) in words.into_iter().enumerate() {
            match Token::new(word) {
                Some(token) => tokens.push(token),
                None => match self.config.empty_token_policy {
                    EmptyTokenPolicy::Reject => {
                        return Err(PacerError::InvalidInput { index });
                    }
                    EmptyTokenPolicy::Skip => {
                        warn!("Skipping empty token at index {}", index);
                    }
                },
            }
        }
        let count = tokens.len();
        self.load_tokens(tokens);
        Ok(count)
    }

    /// Tokenizes and loads `text`. Whitespace-only text is `EmptySource` and
    /// leaves the current session as it was.
    pub fn load_text(&mut self, text: &str) -> Result<usize, PacerError> {
        let tokens = tokenize_text(text);
        if tokens.is_empty() {
            return Err(PacerError::EmptySource);
        }
        let count = tokens.len();
        self.load_tokens(tokens);
        Ok(count)
    }

    /// Begins advancing after one full interval.
    pub fn start(&mut self) -> StartOutcome {
        if self.session.is_running() {
            return StartOutcome::AlreadyRunning;
        }
        if self.session.is_empty() {
            return StartOutcome::NothingLoaded;
        }
        if self.session.is_complete() {
            return StartOutcome::AtEnd;
        }
        self.session.set_running(true);
        self.arm();
        info!(
            "Playback started at token {} ({})",
            self.session.position(),
            self.session.wpm()
        );
        StartOutcome::Started
    }

    pub fn resume(&mut self) -> StartOutcome {
        self.start()
    }

    /// Stops advancing. Idempotent.
    pub fn pause(&mut self) {
        if self.session.is_running() {
            info!("Playback paused at token {}", self.session.position());
        }
        self.session.set_running(false);
        self.disarm();
    }

    pub fn reset(&mut self) {
        self.disarm();
        self.session.rewind();
        debug!("Session reset");
    }

    /// Takes effect from the next arm; a delay already in flight keeps its deadline.
    pub fn set_rate(&mut self, wpm: i64) -> Result<Wpm, PacerError> {
        let wpm = Wpm::new(wpm, &self.config.wpm_range)?;
        self.session.set_wpm(wpm);
        debug!("Rate set to {}", wpm);
        Ok(wpm)
    }

    /// Like `set_rate` but clamps into range; for dial-style controls.
    pub fn adjust_rate(&mut self, delta: i32) -> Wpm {
        let wpm = self
            .session
            .wpm()
            .saturating_adjust(delta, &self.config.wpm_range);
        self.session.set_wpm(wpm);
        wpm
    }

    /// Timer entry point. Ignores any id other than the one currently armed.
    pub fn fire(&mut self, id: TimerId) -> Tick {
        if self.pending != Some(id) {
            debug!("Ignoring stale timer {:?}", id);
            return Tick::Ignored;
        }
        self.pending = None;
        self.tick()
    }

    /// Advances exactly one token if running, then re-arms or stops at the end.
    pub fn tick(&mut self) -> Tick {
        if !self.session.is_running() {
            debug!("Ignoring tick while not running");
            return Tick::Ignored;
        }
        self.session.step();
        if self.session.is_running() {
            self.arm();
            Tick::Advanced
        } else {
            self.disarm();
            info!("Playback complete after {} tokens", self.session.len());
            Tick::Completed
        }
    }

    fn arm(&mut self) {
        self.disarm();
        let id = self.scheduler.arm(self.session.wpm().interval());
        self.pending = Some(id);
    }

    fn disarm(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
    }
}

impl<S: Scheduler> Drop for Pacer<S> {
    fn drop(&mut self) {
        self.disarm();
    }
}
