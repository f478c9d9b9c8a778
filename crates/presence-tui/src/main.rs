//! Presence - a terminal admin console for employee attendance.
//!
//! This application provides a keyboard-driven interface for managing
//! employees, reviewing daily attendance, and configuring the office
//! geofence used to validate clock-ins.

mod app;
mod router;
mod ui;
mod utils;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use presence_core::Config;
use router::Route;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "presence.log";

/// Initialize the tracing subscriber for logging.
///
/// The terminal is owned by the UI, so logs go to a daily file in the cache
/// directory. The returned guard flushes the writer when dropped.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let dir = config.cache_dir().ok()?;
    std::fs::create_dir_all(&dir).ok()?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        dir,
        LOG_FILE_PREFIX,
    ));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();
    Some(guard)
}

/// Starting path: `--route <path>`, else the last visited route, else `/`.
fn start_path(args: &[String], last_route: Option<&str>) -> String {
    args.iter()
        .position(|a| a == "--route")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .or(last_route)
        .unwrap_or("/")
        .to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialize logging
    let _log_guard = init_tracing(&config);
    info!("Presence starting");
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    // Create app before the terminal so startup errors print normally
    let mut app = App::new(config)?;

    let args: Vec<String> = std::env::args().collect();
    let start = Route::parse(&start_path(&args, app.config.last_route.as_deref()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start(start);

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.remember_route();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Presence shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Let spawned loads make progress, then pick up their results
        tokio::task::yield_now().await;
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_start_path() {
        assert_eq!(start_path(&args(&["presence"]), None), "/");
        assert_eq!(start_path(&args(&["presence"]), Some("/settings")), "/settings");
        assert_eq!(
            start_path(&args(&["presence", "--route", "/employees"]), Some("/settings")),
            "/employees"
        );
        assert_eq!(start_path(&args(&["presence", "--route"]), Some("/settings")), "/settings");
    }
}
