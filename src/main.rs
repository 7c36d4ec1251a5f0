//! Pixelkin headless runner.
//!
//! Loads a level and a physics config, then steps the simulation for a fixed
//! number of frames and logs what a renderer would receive: animation frame
//! submissions, flap cues and patrol transitions.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --level assets/levels/nest.json --frames 600
//! ```

use bevy_ecs::observer::On;
use clap::Parser;
use log::{debug, info, trace, warn};
use std::path::PathBuf;

use pixelkin::events::animation::AnimationFinished;
use pixelkin::events::patrol::PatrolStateChanged;
use pixelkin::game::Game;
use pixelkin::resources::level::Level;
use pixelkin::resources::physicsconfig::PhysicsConfig;

/// Pixelkin 2D simulation runner
#[derive(Parser)]
#[command(version, about = "Runs a Pixelkin level headless and logs its output.")]
struct Cli {
    /// Level file (JSON).
    #[arg(long, value_name = "PATH", default_value = "assets/levels/nest.json")]
    level: PathBuf,

    /// Physics config file (INI). Missing keys keep their defaults.
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = PhysicsConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{e}; using default physics");
    }

    let level = match Level::load(&cli.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut game = Game::new(config);
    if let Err(e) = game.load_level(&level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    game.world.add_observer(|trigger: On<PatrolStateChanged>| {
        let ev = trigger.event();
        info!("{:?}: {:?} -> {:?}", ev.entity, ev.from, ev.to);
    });
    game.world.add_observer(|trigger: On<AnimationFinished>| {
        let ev = trigger.event();
        debug!("{:?}: animation '{}' finished", ev.entity, ev.tag);
    });

    for frame in 0..cli.frames {
        game.step(cli.dt);

        for cue in game.drain_jump_cues() {
            debug!(
                "frame {frame}: {:?} flap cue at ({:.1}, {:.1}) x{}",
                cue.entity, cue.x, cue.y, cue.particles
            );
        }
        for submission in game.drain_frames() {
            trace!(
                "frame {frame}: draw {:?} '{}' @{:.0}ms at ({:.1}, {:.1}) dir {}",
                submission.entity,
                submission.tag,
                submission.elapsed_ms,
                submission.x,
                submission.y,
                submission.direction
            );
        }
    }

    info!("Simulated {} frames", cli.frames);
}
