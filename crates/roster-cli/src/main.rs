//! `roster` — terminal UI for the department and seller registry.
//!
//! # Usage
//!
//! ```
//! roster --database ~/roster.db
//! roster --config ~/.config/roster/roster.toml --log-file roster.log
//! roster --in-memory
//! ```

mod app;
mod constraints;
mod dialog;
mod ui;

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  rc::Rc,
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use roster_core::entity::Department;
use roster_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Terminal UI for departments and sellers")]
struct Args {
  /// Path to a TOML config file (database, log_file).
  #[arg(short, long, value_name = "FILE", default_value = "roster.toml")]
  config: PathBuf,

  /// SQLite database file (default: roster.db).
  #[arg(long, value_name = "FILE")]
  database: Option<String>,

  /// Write logs to this file. Logging is off without one.
  #[arg(long, value_name = "FILE")]
  log_file: Option<String>,

  /// Use a throwaway in-memory database seeded with sample departments.
  #[arg(long)]
  in_memory: bool,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct Settings {
  database: PathBuf,
  #[serde(default)]
  log_file: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<Settings> {
  // Defaults, then the config file, then ROSTER_* variables, then flags.
  let settings = config::Config::builder()
    .set_default("database", "roster.db")?
    .add_source(config::File::from(args.config.as_path()).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .set_override_option("database", args.database.clone())?
    .set_override_option("log_file", args.log_file.clone())?
    .build()
    .context("failed to read config file")?;

  let mut settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;
  settings.database = expand_tilde(&settings.database);
  settings.log_file = settings.log_file.as_deref().map(expand_tilde);
  Ok(settings)
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

/// Send tracing output to `path`; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
  let file = File::options()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("failed to open log file {}", path.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

fn open_store(settings: &Settings, in_memory: bool) -> Result<SqliteStore> {
  if !in_memory {
    return SqliteStore::open(&settings.database)
      .with_context(|| format!("failed to open store at {:?}", settings.database));
  }

  let store = SqliteStore::open_in_memory().context("failed to open in-memory store")?;
  for name in ["Computers", "Electronics", "Fashion", "Books"] {
    store
      .save_department(&Department { id: None, name: name.into() })
      .context("failed to seed departments")?;
  }
  Ok(store)
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();
  let settings = load_settings(&args)?;

  if let Some(path) = &settings.log_file {
    init_tracing(path)?;
  }

  let store = Rc::new(open_store(&settings, args.in_memory)?);
  tracing::info!(database = ?settings.database, in_memory = args.in_memory, "store opened");

  let mut app = App::new(store.clone(), store);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = app.load().and_then(|()| run_event_loop(&mut terminal, &mut app));

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  if let Err(e) = &run_result {
    tracing::error!(error = %e, "fatal");
  }
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250))? {
      continue;
    }
    match event::read()? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key)? {
          break;
        }
      }
      // Terminal will redraw on next iteration.
      _ => {}
    }
  }
  Ok(())
}
