use crate::app::mode::AppMode;
use crate::app::RenderState;
use crate::reading::{split_at_midpoint, PacerState, Progress, WordSplit};
use crate::ui::theme::colors;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub const IDLE_TEXT: &str = "AWAITING DATA STREAM";

/// Column where the word must start so its pivot lands on the centre column
/// of a `width`-cell row.
pub fn pivot_start_column(split: &WordSplit<'_>, width: u16) -> u16 {
    let centre = width / 2;
    let left = UnicodeWidthStr::width(split.left).min(u16::MAX as usize) as u16;
    centre.saturating_sub(left)
}

/// The word as one line: dim left part, bold accent pivot, dim right part,
/// padded so the pivot sits on the centre column.
pub fn word_line(word: &str, width: u16) -> Line<'static> {
    let split = split_at_midpoint(word);
    let padding = pivot_start_column(&split, width) as usize;
    let side = Style::default().fg(colors::dimmed());

    Line::from(vec![
        Span::raw(" ".repeat(padding)),
        Span::styled(split.left.to_string(), side),
        Span::styled(
            split.pivot.to_string(),
            Style::default()
                .fg(colors::anchor())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(split.right.to_string(), side),
    ])
}

pub fn render_word_display(word: &str, width: u16) -> Paragraph<'static> {
    Paragraph::new(word_line(word, width))
        .alignment(Alignment::Left)
        .style(Style::default().bg(colors::background()))
}

pub fn render_placeholder() -> Paragraph<'static> {
    Paragraph::new(IDLE_TEXT)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(colors::dimmed())
                .bg(colors::background())
                .add_modifier(Modifier::BOLD),
        )
}

/// Filled and empty cell counts for a `width`-cell bar.
pub fn progress_cells(progress: &Progress, width: usize) -> (usize, usize) {
    let filled = ((progress.fraction * width as f64) as usize).min(width);
    (filled, width - filled)
}

pub fn render_progress_bar(progress: &Progress, width: usize) -> Line<'static> {
    let (filled, empty) = progress_cells(progress, width);
    Line::from(vec![
        Span::styled("─".repeat(filled), Style::default().fg(colors::anchor())),
        Span::styled("─".repeat(empty), Style::default().fg(colors::border())),
    ])
    .alignment(Alignment::Center)
}

/// Whole minutes left, rounded up: `"3 MIN"`.
pub fn format_time_remaining(progress: &Progress) -> String {
    let minutes = (progress.estimated_seconds_remaining / 60.0).ceil() as u64;
    format!("{} MIN", minutes)
}

pub fn state_label(state: PacerState) -> &'static str {
    match state {
        PacerState::Idle => "READY",
        PacerState::Running => "READING",
        PacerState::Paused => "PAUSED",
        PacerState::Complete => "DONE",
    }
}

pub fn status_text(state: &RenderState) -> String {
    let mut parts = vec![
        state_label(state.pacer_state).to_string(),
        state.wpm.to_string(),
        format!("{}/{}", state.progress.position, state.progress.total),
    ];
    if state.progress.total > 0 {
        parts.push(format_time_remaining(&state.progress));
    }
    if let Some(status) = &state.status {
        parts.push(status.clone());
    }
    parts.join(" | ")
}

pub fn render_status_line(state: &RenderState) -> Paragraph<'static> {
    Paragraph::new(status_text(state))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors::dimmed()).bg(colors::background()))
}

pub fn render_header(source_label: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "QUANTREAD",
        Style::default()
            .fg(colors::anchor())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(label) = source_label {
        spans.push(Span::styled(
            format!("  {}", label),
            Style::default().fg(colors::dimmed()),
        ));
    }
    Line::from(spans)
}

pub fn render_context_left(words: &[String]) -> Paragraph<'static> {
    Paragraph::new(words.join(" "))
        .alignment(Alignment::Right)
        .style(Style::default().fg(colors::dimmed()).bg(colors::background()))
}

pub fn render_context_right(words: &[String]) -> Paragraph<'static> {
    Paragraph::new(words.join(" "))
        .alignment(Alignment::Left)
        .style(Style::default().fg(colors::dimmed()).bg(colors::background()))
}

pub fn render_history(entries: &[String]) -> Paragraph<'static> {
    let lines: Vec<Line> = if entries.is_empty() {
        vec![Line::from("No history yet")]
    } else {
        entries.iter().map(|entry| Line::from(entry.clone())).collect()
    };
    Paragraph::new(lines)
        .block(
            Block::default()
                .title(" HISTORY ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::border())),
        )
        .style(Style::default().fg(colors::dimmed()).bg(colors::background()))
}

pub fn render_help() -> Paragraph<'static> {
    let text = [
        "space  start / pause      r  reset",
        "+ / -  change rate        c  toggle case",
        ":  or  @  or  Esc  command deck     q  quit",
        "",
        "@file  @https://url  @@ clipboard  :text words",
        ":wpm N  :start  :pause  :reset  :case  :q",
    ]
    .join("\n");
    Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" HELP ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::border())),
        )
        .style(Style::default().fg(colors::text()).bg(colors::surface()))
}

pub fn render_command_deck(frame: &mut Frame, area: Rect, state: &RenderState) {
    frame.render_widget(Clear, area);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let accent_bar =
        Paragraph::new("▌").style(Style::default().fg(colors::anchor()).bg(colors::surface()));
    frame.render_widget(accent_bar, layout[0]);

    let input_text = match state.mode {
        AppMode::Command if state.command_input.is_empty() => {
            " COMMAND  Type @file, @url, @@, :text words, :h or :q".to_string()
        }
        AppMode::Command => format!(" COMMAND  {}▏", state.command_input),
        AppMode::Reading => " READING  space start/pause · : commands · q quit".to_string(),
        AppMode::Quit => " QUIT ".to_string(),
    };

    let input_widget = Paragraph::new(input_text)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::border())),
        )
        .style(Style::default().fg(colors::text()).bg(colors::surface()));
    frame.render_widget(input_widget, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{tokenize_text, DisplayCase, PacingSession, Wpm};

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn progress(position: usize, total: usize, seconds: f64) -> Progress {
        Progress {
            position,
            total,
            fraction: if total == 0 { 0.0 } else { position as f64 / total as f64 },
            estimated_seconds_remaining: seconds,
        }
    }

    #[test]
    fn test_pivot_lands_on_centre_column() {
        // "read": left "re", pivot "a"
        let split = split_at_midpoint("read");
        assert_eq!(pivot_start_column(&split, 20), 8);
        let line = word_line("read", 20);
        let text = text_of(&line);
        assert_eq!(text.chars().nth(10), Some('a'));
    }

    #[test]
    fn test_pivot_column_uses_cell_width() {
        // wide CJK characters take two cells each
        let split = split_at_midpoint("日本語で");
        assert_eq!(split.left, "日本");
        assert_eq!(pivot_start_column(&split, 20), 6);
    }

    #[test]
    fn test_long_word_never_underflows() {
        let split = split_at_midpoint("incomprehensibilities");
        assert_eq!(pivot_start_column(&split, 4), 0);
    }

    #[test]
    fn test_word_line_spans() {
        let line = word_line("quick", 10);
        assert_eq!(line.spans[1].content, "qu");
        assert_eq!(line.spans[2].content, "i");
        assert_eq!(line.spans[3].content, "ck");
        assert_eq!(line.spans[2].style.fg, Some(colors::anchor()));
    }

    #[test]
    fn test_progress_cells_zero_total() {
        assert_eq!(progress_cells(&progress(0, 0, 0.0), 20), (0, 20));
    }

    #[test]
    fn test_progress_cells_halfway_and_full() {
        assert_eq!(progress_cells(&progress(50, 100, 0.0), 20), (10, 10));
        assert_eq!(progress_cells(&progress(4, 4, 0.0), 20), (20, 0));
    }

    #[test]
    fn test_progress_bar_width() {
        let bar = render_progress_bar(&progress(1, 4, 0.0), 20);
        assert_eq!(text_of(&bar).chars().count(), 20);
    }

    #[test]
    fn test_time_remaining_rounds_up() {
        assert_eq!(format_time_remaining(&progress(0, 10, 61.0)), "2 MIN");
        assert_eq!(format_time_remaining(&progress(0, 10, 60.0)), "1 MIN");
        assert_eq!(format_time_remaining(&progress(10, 10, 0.0)), "0 MIN");
    }

    #[test]
    fn test_status_text() {
        let mut session = PacingSession::new(Wpm::new(60, &(1..=2000)).unwrap());
        session.replace_tokens(tokenize_text("a b c"));
        let mut state =
            RenderState::from_session(AppMode::Reading, &session, DisplayCase::AsWritten, 3);
        state.status = Some("Loaded 3 words".to_string());
        assert_eq!(status_text(&state), "READY | 60 WPM | 0/3 | 1 MIN | Loaded 3 words");
    }

    #[test]
    fn test_status_text_without_document() {
        let session = PacingSession::new(Wpm::new(300, &(1..=2000)).unwrap());
        let state =
            RenderState::from_session(AppMode::Command, &session, DisplayCase::AsWritten, 3);
        assert_eq!(status_text(&state), "READY | 300 WPM | 0/0");
    }

    #[test]
    fn test_header_includes_source() {
        let line = render_header(Some("WEB: example.com"));
        assert_eq!(text_of(&line), "QUANTREAD  WEB: example.com");
    }

    #[test]
    fn test_widgets_build() {
        let _ = render_placeholder();
        let _ = render_help();
        let _ = render_history(&[]);
        let _ = render_context_left(&["a".to_string()]);
        let _ = render_context_right(&[]);
    }
}
