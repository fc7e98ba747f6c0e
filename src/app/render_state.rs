use crate::app::mode::AppMode;
use crate::reading::{DisplayCase, PacerState, PacingSession, Progress, Wpm};

/// Render state for UI components
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: AppMode,
    pub pacer_state: PacerState,
    /// Current token with the display case applied.
    pub current_word: Option<String>,
    /// Neighbouring words, filled only while playback is stopped.
    pub context_left: Vec<String>,
    pub context_right: Vec<String>,
    pub progress: Progress,
    pub wpm: Wpm,
    pub source_label: Option<String>,
    pub status: Option<String>,
    pub command_input: String,
    pub history: Vec<String>,
    pub show_help: bool,
}

impl RenderState {
    /// Word, context and progress from `session`; everything else empty.
    pub fn from_session(
        mode: AppMode,
        session: &PacingSession,
        case: DisplayCase,
        context_window: usize,
    ) -> Self {
        let tokens = session.tokens();
        let current_index = session.position();
        let pacer_state = session.state();
        let word = |index: usize| tokens[index].display(case).into_owned();

        let (context_left, context_right) = if pacer_state == PacerState::Running {
            (vec![], vec![])
        } else {
            let start = current_index.saturating_sub(context_window);
            let end = (current_index + context_window + 1).min(tokens.len());
            let left = (start..current_index).map(word).collect();
            let right = (current_index + 1..end).map(word).collect();
            (left, right)
        };

        Self {
            mode,
            pacer_state,
            current_word: session.current_token().map(|t| t.display(case).into_owned()),
            context_left,
            context_right,
            progress: session.progress(),
            wpm: session.wpm(),
            source_label: None,
            status: None,
            command_input: String::new(),
            history: vec![],
            show_help: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::tokenize_text;

    fn session(text: &str, steps: usize) -> PacingSession {
        let mut session = PacingSession::new(Wpm::new(300, &(1..=2000)).unwrap());
        session.replace_tokens(tokenize_text(text));
        for _ in 0..steps {
            session.step();
        }
        session
    }

    #[test]
    fn test_empty_session() {
        let state = RenderState::from_session(AppMode::Command, &session("", 0), DisplayCase::AsWritten, 3);
        assert_eq!(state.current_word, None);
        assert!(state.context_left.is_empty());
        assert!(state.context_right.is_empty());
        assert_eq!(state.progress.total, 0);
    }

    #[test]
    fn test_context_window_around_current() {
        let session = session("one two three four five six seven", 3);
        let state = RenderState::from_session(AppMode::Reading, &session, DisplayCase::AsWritten, 2);
        assert_eq!(state.current_word.as_deref(), Some("four"));
        assert_eq!(state.context_left, vec!["two", "three"]);
        assert_eq!(state.context_right, vec!["five", "six"]);
    }

    #[test]
    fn test_context_clipped_at_edges() {
        let state = RenderState::from_session(
            AppMode::Reading,
            &session("alpha beta", 0),
            DisplayCase::AsWritten,
            3,
        );
        assert!(state.context_left.is_empty());
        assert_eq!(state.context_right, vec!["beta"]);
    }

    #[test]
    fn test_complete_session_has_no_word() {
        let state = RenderState::from_session(AppMode::Reading, &session("a b", 2), DisplayCase::AsWritten, 3);
        assert_eq!(state.pacer_state, PacerState::Complete);
        assert_eq!(state.current_word, None);
        assert_eq!(state.context_left, vec!["a", "b"]);
    }

    #[test]
    fn test_no_context_while_running() {
        let mut session = session("a b c", 1);
        session.set_running(true);
        let state = RenderState::from_session(AppMode::Reading, &session, DisplayCase::AsWritten, 3);
        assert!(state.context_left.is_empty());
        assert!(state.context_right.is_empty());
    }

    #[test]
    fn test_upper_case_applied() {
        let state = RenderState::from_session(AppMode::Reading, &session("quiet words", 0), DisplayCase::Upper, 3);
        assert_eq!(state.current_word.as_deref(), Some("QUIET"));
        assert_eq!(state.context_right, vec!["WORDS"]);
    }
}
