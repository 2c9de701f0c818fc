use std::{env, error::Error, path::PathBuf};

use glam::Vec2;
use log::{LevelFilter, info};
use voxel_sim::{
    config::WorldConfig, simulation::Simulation, systems::player::MovementInput,
};

const TICK_RATE: f32 = 60.0;
const DEFAULT_TICKS: u64 = 300;

/// Value following `flag` in the argument list
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match flag_value(&args, "--config") {
        Some(path) => WorldConfig::load(&PathBuf::from(path))?,
        None => WorldConfig::default(),
    };
    let ticks = match flag_value(&args, "--ticks") {
        Some(value) => value.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    let mut sim = Simulation::new(&config)?;
    if let Some(path) = flag_value(&args, "--save") {
        sim.world().config().save(&PathBuf::from(path))?;
        info!("Config written to {path}");
    }

    // Walk forward and hop whenever possible
    let dt = 1.0 / TICK_RATE;
    for _ in 0..ticks {
        let report = sim.tick(dt);
        sim.set_input(MovementInput {
            direction: Vec2::new(0.0, 1.0),
            jump: report.grounded,
        });
        if report.tick % TICK_RATE as u64 == 0 {
            info!(
                "t={:.1}s position {:.2} grounded {} contacts {}",
                report.tick as f32 * dt,
                report.position,
                report.grounded,
                report.contacts
            );
        }
        // Walked off the edge of the world
        if report.position.y < -10.0 {
            sim.respawn();
        }
    }

    for (kind, count) in sim.world().count_blocks() {
        println!("{:>10}: {count}", kind.name());
    }
    println!("visible blocks: {}", sim.world().iter_visible().count());
    Ok(())
}
