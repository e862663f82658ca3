use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use env_logger::{Builder, Env, Target, WriteStyle};
use ratatui::DefaultTerminal;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ebrp_tracker::app::{Action, App};
use ebrp_tracker::boundary;
use ebrp_tracker::cli;
use ebrp_tracker::catalog::Catalog;
use ebrp_tracker::config::Settings;
use ebrp_tracker::list::SortMode;
use ebrp_tracker::persistence::{FileStore, VisitedStore};
use ebrp_tracker::tracker::Tracker;
use ebrp_tracker::ui::{self, Theme};

const ENV_LOG: &str = "EBRP_LOG";
const ENV_LOG_STYLE: &str = "EBRP_LOG_STYLE";

#[derive(Parser, Debug)]
#[command(author, version, about = "Visual checklist of East Bay Regional Parks")]
struct Cli {
    /// Config file layered over the user and local config files
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON park list to use instead of the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// GeoJSON file with park boundaries
    #[arg(long, global = true)]
    boundaries: Option<PathBuf>,

    /// Progress store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Initial list order
    #[arg(long, value_enum, global = true)]
    sort: Option<SortMode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive map and checklist (default)
    Tui,
    /// Print visited counts and the visited parks
    Stats,
    /// Write ebrp-progress-<date>.json
    Export {
        /// Directory to write into, defaults to export_dir
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Replace saved progress with an exported file
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Forget every visited park
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print the effective settings as TOML
    Config,
}

impl Cli {
    /// Flags win over every config layer
    fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.catalog {
            settings.catalog_path = Some(path.clone());
        }
        if let Some(path) = &self.boundaries {
            settings.boundaries_path = path.clone();
        }
        if let Some(path) = &self.store {
            settings.store_path = path.clone();
        }
        if let Some(sort) = self.sort {
            settings.sort = sort;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut settings);

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            // The terminal belongs to the UI, so logs go to a file
            init_logging(Some(&settings.log_path));
            run_tui(&settings)
        }
        Command::Stats => {
            init_logging(None);
            cli::print_stats(&build_tracker(&settings, false)?, &mut io::stdout().lock())
        }
        Command::Export { dir } => {
            init_logging(None);
            let tracker = build_tracker(&settings, false)?;
            let dir = dir.unwrap_or_else(|| settings.export_dir.clone());
            let path = tracker.export_snapshot(&dir, Utc::now().date_naive())?;
            println!("Exported progress to {}", path.display());
            Ok(())
        }
        Command::Import { file, yes } => {
            init_logging(None);
            let mut tracker = build_tracker(&settings, false)?;
            cli::import(&mut tracker, &file, yes, &mut io::stdin().lock(), &mut io::stdout().lock())
        }
        Command::Clear { yes } => {
            init_logging(None);
            let mut tracker = build_tracker(&settings, false)?;
            cli::clear(&mut tracker, yes, &mut io::stdin().lock(), &mut io::stdout().lock())
        }
        Command::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}

fn init_logging(log_path: Option<&Path>) {
    let mut builder = Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    );

    if let Some(path) = log_path {
        match open_log(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
                builder.write_style(WriteStyle::Never);
            }
            Err(err) => {
                eprintln!("logging disabled, cannot open {}: {}", path.display(), err);
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Headless commands skip the boundary file; they never draw the map
fn build_tracker(settings: &Settings, with_boundaries: bool) -> Result<Tracker> {
    let catalog = match &settings.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::builtin(),
    };
    let features = if with_boundaries {
        boundary::load_or_empty(&settings.boundaries_path)
    } else {
        Vec::new()
    };
    let store = FileStore::open(&settings.store_path)?;
    log::info!(
        "{} parks, progress store {}",
        catalog.len(),
        store.path().display()
    );

    Ok(Tracker::new(
        catalog,
        &features,
        VisitedStore::new(Box::new(store)),
        settings.sort,
    ))
}

fn run_tui(settings: &Settings) -> Result<()> {
    let tracker = build_tracker(settings, true)?;
    let mut app = App::new(
        tracker,
        settings.export_dir.clone(),
        Theme::from_settings(&settings.theme),
    );

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &mut app);

    // Disable mouse capture and restore terminal
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Route mouse events: hover, clicks, drag to pan, scroll to zoom
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    app.hover(mouse.column, mouse.row);

    match mouse.kind {
        // Scroll wheel zooms towards the cursor (or scrolls the list)
        MouseEventKind::ScrollUp => app.scroll_up(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll_down(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.dispatch(Action::Pan(-15, 0)),
        MouseEventKind::ScrollRight => app.dispatch(Action::Pan(15, 0)),
        // Click, or click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => app.begin_drag(mouse.column, mouse.row),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(mouse.column, mouse.row),
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        // Draw; a resize is picked up by the next draw
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    log::info!("quitting with {} parks visited", app.tracker.visited().len());
    Ok(())
}
