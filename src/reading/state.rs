use crate::reading::{Token, Wpm};

/// Where a session stands, derived from `position` and `running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacerState {
    /// Position 0 and not running.
    Idle,
    Running,
    /// Stopped part-way through.
    Paused,
    /// Every token has been shown.
    Complete,
}

/// Snapshot of how far a session has got.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
    /// `position / total`, or 0 when nothing is loaded.
    pub fraction: f64,
    pub estimated_seconds_remaining: f64,
}

/// Mutable state of one reading run.
///
/// Invariants: `position <= tokens.len()`, and `running` is false whenever
/// `position == tokens.len()`.
#[derive(Debug, Clone)]
pub struct PacingSession {
    tokens: Vec<Token>,
    position: usize,
    wpm: Wpm,
    running: bool,
}

impl PacingSession {
    pub fn new(wpm: Wpm) -> Self {
        Self {
            tokens: Vec::new(),
            position: 0,
            wpm,
            running: false,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn wpm(&self) -> Wpm {
        self.wpm
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        !self.tokens.is_empty() && self.position == self.tokens.len()
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn state(&self) -> PacerState {
        if self.running {
            PacerState::Running
        } else if self.is_complete() {
            PacerState::Complete
        } else if self.position == 0 {
            PacerState::Idle
        } else {
            PacerState::Paused
        }
    }

    pub fn progress(&self) -> Progress {
        let total = self.tokens.len();
        let remaining = total - self.position;
        let fraction = if total == 0 {
            0.0
        } else {
            self.position as f64 / total as f64
        };
        Progress {
            position: self.position,
            total,
            fraction,
            estimated_seconds_remaining: 60.0 * remaining as f64 / self.wpm.get() as f64,
        }
    }

    /// Swaps in a new token sequence, back at the start and stopped.
    pub(crate) fn replace_tokens(&mut self, tokens: Vec<Token>) {
        self.tokens = tokens;
        self.position = 0;
        self.running = false;
    }

    pub(crate) fn rewind(&mut self) {
        self.position = 0;
        self.running = false;
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running && self.position < self.tokens.len();
    }

    pub(crate) fn set_wpm(&mut self, wpm: Wpm) {
        self.wpm = wpm;
    }

    /// Moves forward one token. Stops the run on reaching the end.
    /// Returns false if already at the end.
    pub(crate) fn step(&mut self) -> bool {
        if self.position >= self.tokens.len() {
            self.running = false;
            return false;
        }
        self.position += 1;
        if self.position == self.tokens.len() {
            self.running = false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::tokenize_text;

    fn session(text: &str, wpm: i64) -> PacingSession {
        let mut session = PacingSession::new(Wpm::new(wpm, &(1..=2000)).unwrap());
        session.replace_tokens(tokenize_text(text));
        session
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = PacingSession::new(Wpm::new(300, &(1..=2000)).unwrap());
        assert_eq!(session.state(), PacerState::Idle);
        assert!(session.current_token().is_none());
        assert!(session.is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn test_progress_of_empty_session_is_zero() {
        let session = session("", 300);
        let progress = session.progress();
        assert_eq!(progress.fraction, 0.0);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.estimated_seconds_remaining, 0.0);
    }

    #[test]
    fn test_progress_halfway() {
        let mut session = session("the quick brown fox", 60);
        session.step();
        session.step();
        let progress = session.progress();
        assert_eq!(progress.position, 2);
        assert_eq!(progress.fraction, 0.5);
        // 2 words left at 60 WPM
        assert_eq!(progress.estimated_seconds_remaining, 2.0);
    }

    #[test]
    fn test_step_stops_at_end() {
        let mut session = session("a b", 300);
        session.set_running(true);
        assert!(session.step());
        assert!(session.is_running());
        assert!(session.step());
        assert!(!session.is_running());
        assert_eq!(session.state(), PacerState::Complete);
        assert!(!session.step());
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn test_set_running_refused_at_end() {
        let mut session = session("a", 300);
        session.step();
        session.set_running(true);
        assert!(!session.is_running());
    }

    #[test]
    fn test_paused_state_mid_sequence() {
        let mut session = session("a b c", 300);
        session.step();
        assert_eq!(session.state(), PacerState::Paused);
        assert_eq!(session.current_token().unwrap().as_str(), "b");
    }

    #[test]
    fn test_replace_tokens_rewinds_and_stops() {
        let mut session = session("a b c", 300);
        session.set_running(true);
        session.step();
        session.replace_tokens(tokenize_text("x y"));
        assert_eq!(session.position(), 0);
        assert!(!session.is_running());
        assert_eq!(session.current_token().unwrap().as_str(), "x");
    }
}
