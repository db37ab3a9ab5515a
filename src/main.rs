mod config;
mod models;
mod report;
mod roadmap;
mod schedule;
mod status;
mod tui;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use crossterm::{
    event::{Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::Level;

use config::Config;
use report::Report;
use tui::App;

/// study-progress — study hours and language level against a course calendar
#[derive(Parser, Debug)]
#[command(name = "study-progress", version, about)]
struct Cli {
    /// Write the default config file and exit
    #[arg(long)]
    init: bool,

    /// Config file to use instead of ~/.config/study-progress/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show the dashboard as of this date instead of today
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Print the report as JSON and exit
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging();

    if cli.init {
        let path = Config::generate_default(cli.config.as_deref())?;
        println!("Generated config file at: {}", path.display());
        println!("Edit the course dates, hours and levels, then run study-progress.");
        return Ok(());
    }

    let (config, source) = Config::load(cli.config.as_deref()).with_context(|| {
        "Failed to load configuration.\n\
         Run `study-progress --init` to generate a config file,\n\
         or point STUDY_PROGRESS_CONFIG at one."
    })?;
    tracing::info!(%source, log = ?log_path, "configuration loaded");

    let course = config
        .validate()
        .with_context(|| format!("Invalid configuration in {source}"))?;

    if cli.json {
        let now = cli.date.unwrap_or_else(|| Local::now().date_naive());
        let report = Report::build(&course, now);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let app = App::new(course, source, cli.date);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    finish(result)
}

/// Hands a dashboard failure back to the shell once the terminal is restored.
fn finish(result: Result<()>) -> Result<()> {
    if let Err(ref e) = result {
        tracing::error!(error = %e, "dashboard exited with an error");
    }
    result
}

/// Logs go to a file because the dashboard owns the terminal.
fn init_logging() -> Option<PathBuf> {
    let dir = dirs::cache_dir()?.join("study-progress");
    std::fs::create_dir_all(&dir).ok()?;
    let path = dir.join("study-progress.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        app.frame_count = app.frame_count.wrapping_add(1);
        app.refresh();
        terminal.draw(|f| tui::ui::render(f, &mut app))?;

        if let Some(Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        })) = tui::event::poll_event(Duration::from_millis(250))?
        {
            tui::event::handle_key(&mut app, code, modifiers);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
