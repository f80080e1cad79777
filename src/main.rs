mod app;
mod config;
mod data;
mod model;
mod presenter;
mod ui;

#[cfg(test)]
mod test_support;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use data::DataClient;
use presenter::FetchOutcome;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Matchup endpoint URL, overrides the config file
    #[arg(short, long)]
    url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// File logging, enabled by `MATCHUP_TUI_LOG=<path>`. The terminal belongs to
/// the UI, so nothing is logged to stdout or stderr.
fn init_tracing() {
    let Ok(log_path) = std::env::var("MATCHUP_TUI_LOG") else {
        return;
    };

    let Ok(file) = File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {}", log_path);
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    // Resolve the endpoint before touching the terminal so a bad URL fails
    // with a readable error.
    let config = Config::load(args.config.as_deref())?.with_endpoint(args.url);
    let endpoint = config.endpoint_url()?;
    info!(%endpoint, "starting matchup screen");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Fetch results come back from the worker task on this channel
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut app = App::new(DataClient::new(endpoint), tx);

    // Screen appeared
    app.load_matchup();

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    exit_result(res)
}

/// Surface a render-loop failure once the terminal is back to normal.
fn exit_result(res: io::Result<()>) -> Result<()> {
    res.context("matchup screen failed")
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<FetchOutcome>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        while let Ok(outcome) = rx.try_recv() {
            app.on_outcome(outcome);
        }
        app.on_tick();

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}
