//! Gravity Maze headless driver
//!
//! Runs the simulation at a fixed 1/60 s step with a scripted autopilot and
//! prints a run summary.
//!
//! Usage: `gravity-maze [tuning.json|-] [seed] [frames]`

use std::process::ExitCode;

use gravity_maze::Tuning;
use gravity_maze::consts::MAX_FRAME_DT;
use gravity_maze::sim::{InputState, SimEvent, Simulation, tick};

const DEFAULT_FRAMES: u64 = 60 * 60;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Gravity Maze (headless) starting...");

    let mut args = std::env::args().skip(1);

    let tuning = match args.next().filter(|a| a != "-") {
        Some(path) => match Tuning::load(&path) {
            Ok(t) => t,
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("invalid seed: {}", e);
            return ExitCode::FAILURE;
        }
        None => rand::random(),
    };

    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("invalid frame count: {}", e);
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    log::info!("Seed {}, {} frames", seed, frames);
    let mut sim = Simulation::new(tuning, seed);

    let mut levels = 0u32;
    let mut reflections = 0u32;
    let mut bounces = 0u32;

    for frame in 0..frames {
        // Bank some spin every five seconds and drop a pillar every twenty
        if frame % 300 == 299 {
            sim.bounce_impulse();
        }
        if frame % 1200 == 1199 {
            sim.clone_pillar_at_player();
        }

        let input = autopilot(&sim, frame);
        tick(&mut sim, &input, MAX_FRAME_DT);

        for event in &sim.events {
            match event {
                SimEvent::LevelComplete { level } => {
                    levels += 1;
                    log::info!("Frame {}: finished level {}", frame, level);
                }
                SimEvent::Reflected { .. } => reflections += 1,
                SimEvent::WallBounce => bounces += 1,
                SimEvent::CollectiblePicked { .. } => {}
            }
        }
    }

    let hud = sim.hud();
    println!("seed:          {}", seed);
    println!("frames:        {}", frames);
    println!("levels done:   {}", levels);
    println!("collectibles:  {}", sim.collected);
    println!("reflections:   {}", reflections);
    println!("wall bounces:  {}", bounces);
    println!("final speed:   {:.0}%", hud.speed_fraction * 100.0);
    println!("final spin:    {:.1}", hud.spin_energy);

    ExitCode::SUCCESS
}

/// Hold the directions that point at the exit; boost every other second
fn autopilot(sim: &Simulation, frame: u64) -> InputState {
    let to_end = sim.maze.end.to_vec2() - sim.player().position.to_vec2();
    let dead_zone = sim.player_radius();
    InputState {
        up: to_end.y > dead_zone,
        down: to_end.y < -dead_zone,
        left: to_end.x < -dead_zone,
        right: to_end.x > dead_zone,
        boost: (frame / 60) % 2 == 1,
    }
}
