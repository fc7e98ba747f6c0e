pub mod ovp;
pub mod pacer;
pub mod scheduler;
pub mod state;
pub mod timing;
pub mod token;

pub use ovp::{split_at_midpoint, WordSplit};
pub use pacer::{Pacer, StartOutcome, Tick};
pub use scheduler::{Scheduler, TimerId, TimerQueue};
pub use state::{PacerState, PacingSession, Progress};
pub use timing::{tokenize_text, wpm_to_milliseconds, Wpm};
pub use token::{DisplayCase, Token};
