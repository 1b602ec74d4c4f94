//! ValueLens TUI — terminal chart browser for valuation multiples.
//!
//! Layout:
//! 1. Tickers — every ticker in the snapshot, cursor highlighted
//! 2. Chart — selected metric with fast/slow EMA overlays
//! 3. Summary — last, mean, max, min and latest EMA values
//! 4. Status bar — key hints and the last status or error message

mod app;
mod input;
mod theme;
mod ui;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use valuelens_core::config::CONFIG_FILE;
use valuelens_core::{Config, ValuationRepository};

use crate::app::AppState;

#[derive(Parser, Debug)]
#[command(name = "valuelens-tui", about = "ValueLens terminal chart browser")]
struct Args {
    /// Path to a TOML config file. Defaults to <config dir>/valuelens/config.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canonical snapshot. Defaults to `data.canonical_path` from the config.
    #[arg(long)]
    data: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to a file; stderr belongs to the terminal UI.
    init_file_logging();

    let default_config = dirs::config_dir().map(|d| d.join("valuelens").join(CONFIG_FILE));
    let config = Config::resolve(args.config.as_deref(), default_config.as_deref())
        .context("loading config")?;
    let builder = config.chart_builder()?;
    let repo = match args.data {
        Some(path) => ValuationRepository::new(path).with_policy(config.lookup.match_policy),
        None => config.repository(),
    };

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(repo, builder, config.chart.default_start_year);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

/// Log to `<data dir>/valuelens/valuelens-tui.log`. Logging is skipped when
/// the file cannot be opened.
fn init_file_logging() {
    let Some(dir) = dirs::data_local_dir().map(|d| d.join("valuelens")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::options()
        .create(true)
        .append(true)
        .open(dir.join("valuelens-tui.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}
