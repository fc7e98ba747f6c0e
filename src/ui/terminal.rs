use crate::app::{mode::AppMode, App, RenderState};
use crate::ui::reader::view::{
    render_command_deck, render_context_left, render_context_right, render_header, render_help,
    render_history, render_placeholder, render_progress_bar, render_status_line,
    render_word_display,
};
use crate::ui::terminal_guard::TerminalGuard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, io::Error> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    /// Runs until the app quits. Time is measured from `clock`, the same
    /// origin the app was started against.
    pub fn run_event_loop(&mut self, app: &mut App, clock: Instant) -> io::Result<()> {
        let render_tick = Duration::from_millis(1000 / 60);

        loop {
            app.advance_clock(clock.elapsed());
            if app.mode() == AppMode::Quit {
                info!("Quit requested");
                return Ok(());
            }

            self.render_frame(app)?;

            // wake for whichever comes first: the next word or the next frame
            let poll_timeout = app
                .time_until_next_tick()
                .map_or(render_tick, |next| next.min(render_tick));

            if event::poll(poll_timeout)? {
                let event = event::read()?;
                // any timer armed by this key is measured from now
                app.advance_clock(clock.elapsed());
                if let Event::Key(key) = event {
                    handle_key_event(app, key);
                }
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let render_state = app.get_render_state();
        let bar_width = app.config().reader.progress_bar_width;
        let history_rows = history_panel_rows(app.config().history.capacity);

        self.terminal
            .draw(|frame| draw(frame, &render_state, bar_width, history_rows))?;
        Ok(())
    }
}

/// One row per entry plus the border.
fn history_panel_rows(capacity: usize) -> u16 {
    u16::try_from(capacity).unwrap_or(u16::MAX).saturating_add(2)
}

fn draw(frame: &mut Frame, state: &RenderState, bar_width: usize, history_rows: u16) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(crate::ui::theme::colors::background())),
        area,
    );

    let side_panel = if state.show_help {
        9
    } else if state.mode == AppMode::Command {
        history_rows
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // header
            Constraint::Min(3),             // word and context
            Constraint::Length(1),          // progress
            Constraint::Length(1),          // status
            Constraint::Length(side_panel), // history or help
            Constraint::Length(2),          // command deck
        ])
        .split(area);

    frame.render_widget(render_header(state.source_label.as_deref()), rows[0]);
    draw_reading_area(frame, rows[1], state);
    frame.render_widget(render_progress_bar(&state.progress, bar_width), rows[2]);
    frame.render_widget(render_status_line(state), rows[3]);

    if state.show_help {
        frame.render_widget(render_help(), rows[4]);
    } else if state.mode == AppMode::Command {
        frame.render_widget(render_history(&state.history), rows[4]);
    }

    render_command_deck(frame, rows[5], state);
}

fn draw_reading_area(frame: &mut Frame, area: Rect, state: &RenderState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // word
            Constraint::Length(1), // spacer
            Constraint::Length(1), // context
            Constraint::Min(0),
        ])
        .split(area);

    match &state.current_word {
        Some(word) => frame.render_widget(render_word_display(word, rows[1].width), rows[1]),
        None => frame.render_widget(render_placeholder(), rows[1]),
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    frame.render_widget(render_context_left(&state.context_left), halves[0]);
    frame.render_widget(render_context_right(&state.context_right), halves[1]);
}

/// Maps one key event onto the app: reader controls in reading mode, line
/// editing in the command deck.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.handle_event(crate::app::AppEvent::Quit);
        return;
    }

    match app.mode() {
        AppMode::Command => match key.code {
            KeyCode::Enter => app.submit_command(),
            KeyCode::Esc => app.leave_command_mode(),
            KeyCode::Backspace => app.pop_command_char(),
            KeyCode::Char(c) => app.push_command_char(c),
            _ => {}
        },
        AppMode::Reading => match key.code {
            KeyCode::Esc => app.enter_command_mode(),
            KeyCode::Char(c) => app.handle_keypress(c),
            _ => {}
        },
        AppMode::Quit => {}
    }
}
