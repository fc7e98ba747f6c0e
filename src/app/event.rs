/// Application events
#[derive(Debug, PartialEq, Clone)]
pub enum AppEvent {
    /// Local path or http(s) URL.
    LoadSource(String),
    LoadClipboard,
    /// Manually entered words.
    LoadText(String),
    /// Rate as typed; validated by the app.
    SetRate(String),
    Start,
    Pause,
    Reset,
    ToggleCase,
    Quit,
    Help,
    Warning(String),
    InvalidCommand(String),
    None,
}
