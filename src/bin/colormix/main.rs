//! colormix - Terminal monitor for a simulated mixing-extruder print
//!
//! Run with: cargo run -- --mode gradient --height 20

mod logging;
mod planner;
mod settings;
mod ui;

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use colormix::{
    stepper::{segment_queue, StepperRunner},
    Mixer, Wide,
};
use rtrb::RingBuffer;
use tracing::info;

use planner::Planner;
use settings::FileConfig;
use ui::{
    state::{ControlMessage, StepperUpdate},
    UiApp,
};

/// Mixing steppers on the simulated machine.
pub const STEPPERS: usize = 4;

/// Pulses the stepper thread issues per wakeup.
const PULSE_BUDGET: usize = 2_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Selected tool only
    Tool,
    /// Blend from --start-tool to --end-tool over the print height
    Gradient,
    /// Random mix per band over the print height
    Random,
}

#[derive(Parser, Debug)]
#[command(name = "colormix", version, about = "Mixing extruder print monitor")]
struct Cli {
    /// TOML file with [mixer] and [print] tables
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Height mode to run
    #[arg(long, value_enum, default_value_t = RunMode::Gradient)]
    mode: RunMode,
    /// Print height in mm
    #[arg(long)]
    height: Option<f32>,
    /// Layer height in mm
    #[arg(long)]
    layer: Option<f32>,
    /// Tool selected at start
    #[arg(long, default_value_t = 0)]
    tool: u8,
    #[arg(long, default_value_t = 0)]
    start_tool: u8,
    #[arg(long, default_value_t = 1)]
    end_tool: u8,
    /// Log file (the terminal belongs to the UI)
    #[arg(long, default_value = "colormix.log")]
    log: PathBuf,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init_tracing(&cli.log)?;

    let mut file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    if let Some(height) = cli.height {
        file.print.height = height;
    }
    if let Some(layer) = cli.layer {
        file.print.layer_height = layer;
    }
    file.print.validate()?;

    let mixer = Mixer::<Wide, STEPPERS>::new(file.mixer.clone())
        .map_err(|err| eyre!("mixer configuration rejected: {err}"))?;
    info!(mode = ?cli.mode, print = ?file.print, "starting simulated print");

    // Planner -> stepper segments, planner/stepper -> UI updates, UI -> planner control
    let (segment_tx, segment_rx) = segment_queue::<Wide, STEPPERS>(256);
    let (planner_tx, planner_rx) = RingBuffer::new(64);
    let (stepper_tx, stepper_rx) = RingBuffer::<StepperUpdate>::new(64);
    let (control_tx, control_rx) = RingBuffer::<ControlMessage>::new(16);

    let stop = Arc::new(AtomicBool::new(false));

    let mut planner = Planner::new(mixer, file.print, segment_tx, control_rx, planner_tx);
    planner
        .start(cli.mode, cli.tool, cli.start_tool, cli.end_tool)
        .wrap_err("failed to set up the height mode")?;
    let initial = planner.snapshot();

    let planner_stop = stop.clone();
    let planner_thread = thread::Builder::new()
        .name("planner".into())
        .spawn(move || planner.run(&planner_stop))?;

    let stepper_stop = stop.clone();
    let stepper_thread = thread::Builder::new()
        .name("stepper".into())
        .spawn(move || {
            let mut runner = StepperRunner::<Wide, STEPPERS, _>::new(segment_rx);
            let mut stepper_tx = stepper_tx;
            while !stepper_stop.load(Ordering::Relaxed) {
                let issued = runner.run(PULSE_BUDGET, |_| {});
                let _ = stepper_tx.push(StepperUpdate {
                    pulses: *runner.pulses(),
                    segments: runner.segments(),
                });
                if issued < PULSE_BUDGET {
                    thread::sleep(Duration::from_millis(2));
                }
            }
        })?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(planner_rx, stepper_rx, control_tx, initial).run(&mut terminal);
    ratatui::restore();

    stop.store(true, Ordering::Relaxed);
    planner_thread
        .join()
        .map_err(|_| eyre!("planner thread panicked"))?;
    stepper_thread
        .join()
        .map_err(|_| eyre!("stepper thread panicked"))?;

    info!("monitor closed");
    result
}
