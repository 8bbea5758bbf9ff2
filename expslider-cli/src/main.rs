//! Experiment slider CLI — schema, validation and headless runs.
//!
//! Commands:
//! - `schema` — print the slider frame's property and data schemas as JSON
//! - `validate` — check an experiment file; non-zero exit on any problem
//! - `simulate` — run an experiment with scripted drags and print the exp data

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use expslider_core::schema::{SLIDER_DATA_SCHEMA, SLIDER_FRAME_SCHEMA};
use expslider_core::session::{store, FrameRegistry};
use expslider_core::{Experiment, PriorResults, Session, SessionError};

#[derive(Parser)]
#[command(
    name = "expslider",
    about = "Experiment slider frame — schemas, validation and headless runs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the frame and data schemas as JSON.
    Schema,
    /// Validate every frame of an experiment file (JSON, or TOML by extension).
    Validate {
        /// Path to the experiment file.
        experiment: PathBuf,
    },
    /// Run an experiment headlessly with scripted drags.
    Simulate {
        /// Path to the experiment file.
        experiment: PathBuf,

        /// Drag a frame's handle: `<frame>=<value>`. Repeatable; applied in order.
        #[arg(long = "drag", value_parser = parse_drag)]
        drags: Vec<(String, f64)>,

        /// Save the session record into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema => run_schema(),
        Commands::Validate { experiment } => run_validate(&experiment),
        Commands::Simulate {
            experiment,
            drags,
            output_dir,
        } => run_simulate(&experiment, &drags, output_dir.as_deref()),
    }
}

fn parse_drag(s: &str) -> Result<(String, f64), String> {
    let (frame, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <frame>=<value>, got '{s}'"))?;
    if frame.is_empty() {
        return Err(format!("missing frame id in '{s}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value in '{s}': {e}"))?;
    if value.is_nan() {
        return Err(format!("'{s}' is not a position on the slider"));
    }
    Ok((frame.to_string(), value))
}

fn run_schema() -> Result<()> {
    let doc = json!({
        "frame": SLIDER_FRAME_SCHEMA.to_json(),
        "data": SLIDER_DATA_SCHEMA.to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn load(path: &Path) -> Result<Experiment> {
    Experiment::load(path).with_context(|| format!("failed to load {}", path.display()))
}

/// Problems with each frame's static properties, in sequence order.
///
/// Carried initial values are only known at run time, so a placeholder stands
/// in for them here.
fn frame_problems(experiment: &Experiment, registry: &FrameRegistry) -> Vec<(String, String)> {
    let mut problems = Vec::new();
    for id in &experiment.sequence {
        let Some(def) = experiment.frames.get(id) else {
            continue;
        };
        let Some(frame) = registry.build(&def.kind) else {
            continue;
        };
        let mut properties = def.properties.clone();
        if def.initial_value_from.is_some() {
            properties.insert("initialValue".into(), json!(0.0));
        }
        if let Err(err) = frame.schema().validate(&properties).into_result() {
            problems.push((id.clone(), err.to_string()));
        }
    }
    problems
}

/// Build a session, naming the registered kinds when a frame's kind is unknown.
fn open_session(experiment: Experiment, registry: FrameRegistry) -> Result<Session> {
    let known = registry.kinds().collect::<Vec<_>>().join(", ");
    match Session::with_registry(experiment, registry) {
        Ok(session) => Ok(session),
        Err(err @ SessionError::UnknownKind { .. }) => bail!("{err} (known kinds: {known})"),
        Err(err) => Err(err.into()),
    }
}

fn run_validate(path: &Path) -> Result<()> {
    let experiment = load(path)?;
    let registry = FrameRegistry::default();
    let problems = frame_problems(&experiment, &registry);
    let frame_count = experiment.sequence.len();
    open_session(experiment, registry)
        .with_context(|| format!("{} is not runnable", path.display()))?;

    if !problems.is_empty() {
        for (id, problem) in &problems {
            eprintln!("{id}: {problem}");
        }
        bail!("{} of {frame_count} frames are invalid", problems.len());
    }
    println!("{}: {frame_count} frames OK", path.display());
    Ok(())
}

fn run_simulate(path: &Path, drags: &[(String, f64)], output_dir: Option<&Path>) -> Result<()> {
    let experiment = load(path)?;
    for (frame, _) in drags {
        if !experiment.sequence.contains(frame) {
            bail!("--drag names frame '{frame}', which is not in the sequence");
        }
    }

    let mut session = open_session(experiment, FrameRegistry::default())?;
    let exp_data = simulate(&mut session, drags)?;
    println!("{}", serde_json::to_string_pretty(&exp_data)?);

    if let Some(dir) = output_dir {
        let saved = store::save(dir, &session.record())?;
        eprintln!("Session saved to {}", saved.display());
    }
    Ok(())
}

/// Run every frame, applying the scripted drags to handle 0 of their frame.
fn simulate(session: &mut Session, drags: &[(String, f64)]) -> Result<PriorResults> {
    while let Some(active) = session.advance()? {
        let id = active.id.clone();
        for (_, value) in drags.iter().filter(|(frame, _)| *frame == id) {
            let Some(slider) = active.slider_mut() else {
                warn!(frame = %id, "frame is not a slider; drag skipped");
                continue;
            };
            let outcome = slider.drag(0, *value);
            if outcome.is_rejected() {
                warn!(frame = %id, value, ?outcome, "scripted drag ignored");
            }
        }
        let data = session.complete_active()?;
        info!(frame = %id, data = %serde_json::Value::Object(data), "frame simulated");
    }
    Ok(session.exp_data().clone())
}
