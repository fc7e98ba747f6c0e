use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{info, warn};
use quantread::app::{App, AppEvent};
use quantread::engine::config::Config;
use quantread::input::beam;
use quantread::reading::Wpm;
use quantread::storage::{HistoryStore, PreferenceStore};
use quantread::ui::TuiManager;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "quantread", version, about = "Terminal RSVP speed reader")]
struct Args {
    /// File path or http(s) URL to read
    source: Option<String>,

    /// Read these words instead of a file
    #[arg(long, conflicts_with_all = ["source", "beam"])]
    text: Option<String>,

    /// Read beam messages (one JSON object per line) from stdin
    #[arg(long, conflicts_with = "source")]
    beam: bool,

    /// Words per minute
    #[arg(short, long)]
    wpm: Option<String>,

    /// Start playback as soon as the text is loaded
    #[arg(short, long)]
    start: bool,

    /// Config file (default: <config dir>/quantread/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "quantread.log")]
    log_file: PathBuf,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Do not read or write preferences and history
    #[arg(long)]
    no_persist: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match File::create(&args.log_file) {
        Ok(log_file) => {
            if let Err(e) = WriteLogger::init(level, log_config, log_file) {
                eprintln!("quantread: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!(
            "quantread: cannot open log file {}: {}; logging disabled",
            args.log_file.display(),
            e
        ),
    }

    let config = Config::load_or_default(args.config.as_deref())?;
    let wpm = args
        .wpm
        .as_deref()
        .map(|raw| Wpm::parse(raw, &config.pacer.wpm_range))
        .transpose()?;

    let clock = Instant::now();
    let mut app = App::new(config)?;
    info!("QuantRead starting up");

    if !args.no_persist {
        match (
            PreferenceStore::at_default_location(),
            HistoryStore::at_default_location(),
        ) {
            (Ok(preferences), Ok(history)) => app = app.with_storage(preferences, history),
            (Err(e), _) | (_, Err(e)) => warn!("Persistence disabled: {}", e),
        }
    }

    if let Some(wpm) = wpm {
        app.handle_event(AppEvent::SetRate(wpm.get().to_string()));
    }

    if let Some(text) = args.text {
        app.handle_event(AppEvent::LoadText(text));
    } else if args.beam {
        match beam::receive(io::stdin().lock())? {
            Some(document) => app.load_document(document),
            None => warn!("No beam received on stdin"),
        }
    } else if let Some(source) = args.source {
        app.handle_event(AppEvent::LoadSource(source));
    }

    if args.start {
        app.advance_clock(clock.elapsed());
        app.start();
    }

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app, clock)?;

    info!("QuantRead shutting down");
    Ok(())
}
