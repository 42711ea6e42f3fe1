#![forbid(unsafe_code)]

//! Command-line player for linked-list polynomial operations.
//!
//! # Running
//!
//! ```sh
//! cargo run -p polylink-harness -- --p1 "2, 0, 3" --p2 "1, 0, 5" --op add
//! cargo run -p polylink-harness -- --p1 "1, 1" --p2 "1, -1" --op mul --instant
//! cargo run -p polylink-harness -- --p1 "3, 2" --p2 "1" --op sub --jsonl
//! ```
//!
//! Ctrl+C pauses playback after the current step and exits.
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `RUST_LOG` | tracing filter, e.g. `polylink_runtime=debug` |
//! | `POLYLINK_STEP_DELAY_MS` | base delay between steps |
//! | `POLYLINK_SPEED` | initial speed factor |

use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use polylink_core::{InputError, Operation, PolynomialForm, generate};
use polylink_extras::{TextRenderer, complexity_label};
use polylink_harness::{trace_checksum, trace_to_jsonl};
use polylink_runtime::{PlaybackConfig, PlaybackController, PlaybackState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polylink-harness")]
#[command(about = "Step through linked-list polynomial arithmetic")]
struct Cli {
    /// First polynomial's coefficients, highest power first ("2, 0, 3")
    #[arg(long)]
    p1: String,
    /// Second polynomial's coefficients, highest power first
    #[arg(long)]
    p2: String,
    /// add, sub, or mul
    #[arg(long, default_value = "add")]
    op: Operation,
    /// Playback speed factor (positive)
    #[arg(long)]
    speed: Option<f64>,
    /// No pacing or animation delays
    #[arg(long)]
    instant: bool,
    /// Print the trace as JSON Lines and exit
    #[arg(long)]
    jsonl: bool,
    /// Render only the first N steps, one at a time
    #[arg(long)]
    steps: Option<usize>,
    /// Hide pseudocode lines
    #[arg(long)]
    no_code: bool,
}

#[derive(Debug)]
enum CliError {
    Input(InputError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(err) => write!(f, "invalid input: {err}"),
            Self::Io(err) => write!(f, "output failed: {err}"),
            Self::Json(err) => write!(f, "trace export failed: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<InputError> for CliError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let p1 = PolynomialForm::from_coefficient_list(&cli.p1)?.build();
    let p2 = PolynomialForm::from_coefficient_list(&cli.p2)?.build();
    let steps = generate(&p1, &p2, cli.op);
    info!(
        operation = %cli.op,
        steps = steps.len(),
        checksum = %trace_checksum(&steps)?,
        "trace generated"
    );

    if cli.jsonl {
        let mut out = io::stdout().lock();
        out.write_all(trace_to_jsonl(&steps)?.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    {
        let mut out = io::stdout().lock();
        writeln!(out, "P1: {p1}")?;
        writeln!(out, "P2: {p2}")?;
        writeln!(out, "{} ({})", cli.op, complexity_label(cli.op))?;
        writeln!(out)?;
    }

    let mut config = PlaybackConfig::from_env();
    if cli.instant {
        config = config.with_step_delay(Duration::ZERO);
    }
    if let Some(speed) = cli.speed {
        let before = config.initial_speed;
        config = config.with_speed(speed);
        if config.initial_speed == before && before.get() != speed {
            warn!(speed, "ignoring invalid speed factor");
        }
    }

    let renderer = TextRenderer::new(io::stdout())
        .with_animation(!cli.instant)
        .with_code(!cli.no_code);
    let mut controller = PlaybackController::with_config(renderer, config);
    let total = steps.len();
    controller.load(steps);

    let state = match cli.steps {
        Some(limit) => {
            for _ in 0..limit {
                if !controller.step_once().await {
                    break;
                }
            }
            controller.state()
        }
        None => tokio::select! {
            state = controller.play() => state,
            Ok(()) = tokio::signal::ctrl_c() => {
                warn!("interrupted");
                PlaybackState::Paused
            }
        },
    };

    info!(?state, cursor = controller.cursor(), total, "playback stopped");
    if state != PlaybackState::Finished {
        eprintln!("stopped at step {}/{}", controller.cursor(), total);
    }
    match controller.renderer_mut().take_error() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
