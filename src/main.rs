//! Skycast - a terminal weather dashboard
//!
//! Shows current conditions, hourly and daily forecasts and active alerts
//! for the device's location or any searched city, backed by the
//! OpenWeatherMap API.

use std::fs::File;
use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use skycast::app::App;
use skycast::cli::{Cli, StartupConfig};
use skycast::config::Config;
use skycast::ui;

/// Log file written next to the working directory
const LOG_FILE: &str = "skycast.log";

/// Sets up a panic hook that restores the terminal before printing the
/// panic message. This ensures the terminal is usable even if the
/// application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Routes log records to a file so they never corrupt the TUI.
fn setup_logging() {
    let config = ConfigBuilder::new().build();
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, config, file);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A .env file is optional; the real environment wins
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    // Fail on a missing API key before touching the terminal
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    setup_logging();

    match run(config, startup).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, startup: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = tokio::sync::mpsc::channel(32);
    let mut app = App::new(&config, &startup, tx);
    app.start(startup);

    // Main event loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Drain completed background work
        while let Ok(message) = rx.try_recv() {
            app.handle_message(message);
        }

        // Fire any search whose debounce window elapsed
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
