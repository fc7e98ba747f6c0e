//! Command parsing for TUI command deck
//!
//! - `:q` or `:quit` → Quit
//! - `:h` or `:help` → Help
//! - `:wpm N` → set the reading rate
//! - `:start`, `:pause`, `:reset`, `:case` → reader controls
//! - `:text words...` → read the typed words
//! - `@path` or `@https://...` → load a file or web page
//! - `@@` → load clipboard

use crate::app::AppEvent;

/// Commands that can be parsed from command deck input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    Help,
    SetRate(String),
    Start,
    Pause,
    Reset,
    ToggleCase,
    LoadText(String),
    LoadSource(String),
    LoadClipboard,
    Unknown(String),
}

/// Parse command deck input string into a Command
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    if input.is_empty() {
        return Command::Unknown(input.to_string());
    }

    if let Some(cmd) = input.strip_prefix(':') {
        let (name, argument) = match cmd.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd, ""),
        };
        match (name, argument) {
            ("q" | "quit", "") => Command::Quit,
            ("h" | "help", "") => Command::Help,
            ("start", "") => Command::Start,
            ("pause", "") => Command::Pause,
            ("reset", "") => Command::Reset,
            ("case", "") => Command::ToggleCase,
            ("wpm", rate) if !rate.is_empty() => Command::SetRate(rate.to_string()),
            ("text", text) if !text.is_empty() => Command::LoadText(text.to_string()),
            _ => Command::Unknown(input.to_string()),
        }
    } else if let Some(rest) = input.strip_prefix('@') {
        let source = rest.trim();
        if source.is_empty() || source == "@" {
            Command::LoadClipboard
        } else {
            Command::LoadSource(source.to_string())
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

/// Convert a parsed command into an AppEvent
pub fn command_to_app_event(command: Command) -> AppEvent {
    match command {
        Command::Quit => AppEvent::Quit,
        Command::Help => AppEvent::Help,
        Command::SetRate(rate) => AppEvent::SetRate(rate),
        Command::Start => AppEvent::Start,
        Command::Pause => AppEvent::Pause,
        Command::Reset => AppEvent::Reset,
        Command::ToggleCase => AppEvent::ToggleCase,
        Command::LoadText(text) => AppEvent::LoadText(text),
        Command::LoadSource(source) => AppEvent::LoadSource(source),
        Command::LoadClipboard => AppEvent::LoadClipboard,
        Command::Unknown(input) => AppEvent::InvalidCommand(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quit_variants() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit"), Command::Quit);
    }

    #[test]
    fn test_parse_help_variants() {
        assert_eq!(parse_command(":h"), Command::Help);
        assert_eq!(parse_command(":help"), Command::Help);
    }

    #[test]
    fn test_parse_reader_controls() {
        assert_eq!(parse_command(":start"), Command::Start);
        assert_eq!(parse_command(":pause"), Command::Pause);
        assert_eq!(parse_command(":reset"), Command::Reset);
        assert_eq!(parse_command(":case"), Command::ToggleCase);
    }

    #[test]
    fn test_parse_wpm() {
        assert_eq!(parse_command(":wpm 450"), Command::SetRate("450".to_string()));
        assert_eq!(parse_command(":wpm   -5 "), Command::SetRate("-5".to_string()));
        assert!(matches!(parse_command(":wpm"), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_text_keeps_words() {
        assert_eq!(
            parse_command(":text read  these\twords"),
            Command::LoadText("read  these\twords".to_string())
        );
        assert!(matches!(parse_command(":text"), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_argument_on_bare_command_is_unknown() {
        assert!(matches!(parse_command(":quit now"), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_load_file() {
        assert_eq!(
            parse_command("@test.txt"),
            Command::LoadSource("test.txt".to_string())
        );
    }

    #[test]
    fn test_parse_load_file_with_spaces() {
        assert_eq!(
            parse_command("@  test.txt"),
            Command::LoadSource("test.txt".to_string())
        );
    }

    #[test]
    fn test_parse_load_url() {
        assert_eq!(
            parse_command("@https://example.com/post"),
            Command::LoadSource("https://example.com/post".to_string())
        );
    }

    #[test]
    fn test_parse_load_clipboard() {
        assert_eq!(parse_command("@@"), Command::LoadClipboard);
        assert_eq!(parse_command("@"), Command::LoadClipboard);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_command(""), Command::Unknown(_)));
        assert!(matches!(parse_command("   "), Command::Unknown(_)));
    }

    #[test]
    fn test_parse_invalid_command() {
        assert!(matches!(parse_command("invalid"), Command::Unknown(_)));
        assert!(matches!(parse_command(":bogus"), Command::Unknown(_)));
    }

    #[test]
    fn test_command_to_app_event_quit() {
        assert_eq!(command_to_app_event(Command::Quit), AppEvent::Quit);
    }

    #[test]
    fn test_command_to_app_event_load_source() {
        let event = command_to_app_event(Command::LoadSource("test.txt".to_string()));
        assert_eq!(event, AppEvent::LoadSource("test.txt".to_string()));
    }

    #[test]
    fn test_command_to_app_event_set_rate() {
        let event = command_to_app_event(Command::SetRate("300".to_string()));
        assert_eq!(event, AppEvent::SetRate("300".to_string()));
    }

    #[test]
    fn test_command_to_app_event_unknown() {
        let event = command_to_app_event(Command::Unknown("invalid".to_string()));
        assert!(matches!(event, AppEvent::InvalidCommand(_)));
    }
}
