use gravsim::{Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario YAML, looked up under `scenarios/` unless the path exists
    #[arg(short, long, default_value = "solar_system.yaml")]
    file_name: String,

    /// Number of ticks to run instead of `simulation.t_end`
    #[arg(long)]
    steps: Option<u64>,

    /// Log a progress line every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    report_every: u64,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let given = PathBuf::from(file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
    };

    ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))
}

// Scenarios pick their own units, so the step is printed as given
fn step_line(h0: f64) -> String {
    format!("Time step: {h0} time units per tick")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;
    let start_mass = scenario.total_mass();
    let mut engine = scenario.into_engine()?;

    let steps = args
        .steps
        .unwrap_or_else(|| engine.parameters().steps_for(engine.parameters().t_end));

    println!("System has total mass of {start_mass:e}");
    println!("{}", step_line(engine.parameters().h0));
    println!("Running {steps} ticks");

    for tick in 1..=steps {
        let report = engine.advance(None)?;
        for err in &report.errors {
            log::warn!("tick {tick}: {err}");
        }
        if args.report_every > 0 && tick % args.report_every == 0 {
            info!(
                "{}: {} bodies, {} collisions so far",
                engine.formatted_time(),
                engine.bodies().len(),
                engine.collisions()
            );
        }
    }

    println!("\nSimulation ended at t = {:e} ({})", engine.time(), engine.formatted_time());
    println!("Collisions: {}", engine.collisions());
    for (i, body) in engine.registry().alive().enumerate() {
        println!("Body {} ({:?}) has mass of {:e}", i + 1, body.id, body.m);
    }
    println!("System has total mass of {:e}", engine.registry().total_mass());

    Ok(())
}
