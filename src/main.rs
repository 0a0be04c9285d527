//! Burger Dodge headless runner
//!
//! Plays one attempt in autopilot mode at a simulated 60 Hz and prints the
//! final snapshot as JSON.
//!
//! Usage: `burger-dodge [seed] [tuning.json]`

use std::process::ExitCode;

use burger_dodge::sim::{FieldSize, GameEvent};
use burger_dodge::{EngineError, FrameDriver, SimulationEngine, Tuning};

fn load_tuning(seed: Option<u64>, path: Option<&str>) -> Result<Tuning, EngineError> {
    let mut tuning = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };
    if let Some(seed) = seed {
        tuning.seed = seed;
    }
    Ok(tuning)
}

fn run() -> Result<(), EngineError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse::<u64>().ok());
    let tuning = load_tuning(seed, args.get(1).map(String::as_str))?;

    let mut engine = SimulationEngine::new(FieldSize::default(), tuning)?;
    log::info!("Engine initialized with seed: {}", engine.seed());

    let mut driver = FrameDriver::new();
    driver.set_idle_mode(true);
    engine.start()?;

    let frame_dt = 1.0 / engine.tuning().tick_rate as f32;
    while !engine.phase().is_terminal() {
        driver.update(&mut engine, frame_dt);
        for event in engine.drain_events() {
            match event {
                GameEvent::Collision { id, payload, weight } => {
                    log::debug!("Hit by #{} (+{}), weight {}", id, payload, weight);
                }
                GameEvent::Won { level, points } => {
                    log::info!("Won level {} for {} points", level, points);
                }
                GameEvent::Lost { level, weight } => {
                    log::info!("Lost level {} at weight {}", level, weight);
                }
                _ => {}
            }
        }
    }

    let json = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Burger Dodge (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
