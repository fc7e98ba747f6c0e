/// Which part of the screen owns the keyboard.
///
/// Playback state lives in the pacer; the mode only decides whether keys are
/// reader controls or command deck input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the command deck.
    Command,
    /// Single-key reader controls.
    Reading,
    Quit,
}
