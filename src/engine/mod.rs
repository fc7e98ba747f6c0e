pub mod config;
pub mod error;

pub use config::{Config, ConfigError, EmptyTokenPolicy, PacerConfig};
pub use error::PacerError;

pub use crate::reading::{Pacer, PacerState, Progress, StartOutcome, Tick, Wpm};
