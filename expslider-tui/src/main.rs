//! Experiment slider TUI.
//!
//! Usage: `expslider-tui [experiment.json|experiment.toml]`
//!
//! With no argument the last experiment is reopened; failing that, the
//! built-in two-frame demo runs. Logs go to a file under the data directory.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use expslider_core::{Experiment, Session};
use expslider_tui::persistence::{self, PersistedState};
use expslider_tui::{demo, input, ui, AppState};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    // Paths
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("expslider");
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("expslider")
        .join("state.json");

    init_tracing_to_file(&data_dir.join("expslider-tui.log"))?;

    let persisted = persistence::load(&state_path);
    let arg = std::env::args_os().nth(1).map(PathBuf::from);
    let (experiment, name, path) = resolve_experiment(arg, &persisted)?;
    let output_dir = persisted
        .output_dir
        .clone()
        .unwrap_or_else(|| data_dir.join("sessions"));

    let session = Session::new(experiment).context("experiment cannot run")?;
    let mut app = AppState::new(session, name, path, output_dir);
    app.advance();
    info!(experiment = %app.experiment_name, "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let state = persistence::extract(&app, &persisted);
    if let Err(err) = persistence::save(&state_path, &state) {
        warn!(error = %err, "failed to save tui state");
    }
    if !app.session.is_finished() {
        info!(progress = ?app.session.progress(), "session abandoned before the last frame");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Experiment to run: the argument, else the last one used, else the demo.
fn resolve_experiment(
    arg: Option<PathBuf>,
    persisted: &PersistedState,
) -> Result<(Experiment, String, Option<PathBuf>)> {
    if let Some(path) = arg {
        let experiment = Experiment::load(&path)
            .with_context(|| format!("failed to load experiment {}", path.display()))?;
        return Ok((experiment, display_name(&path), Some(path)));
    }
    if let Some(path) = &persisted.last_experiment {
        match Experiment::load(path) {
            Ok(experiment) => return Ok((experiment, display_name(path), Some(path.clone()))),
            Err(err) => warn!(path = %path.display(), error = %err, "last experiment unavailable"),
        }
    }
    Ok((demo::experiment(), demo::NAME.to_string(), None))
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn init_tracing_to_file(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open log file {}", log_path.display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
