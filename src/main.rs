use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use crosswalk_trainer::simulation::{
    FixedStepLoop, GameSession, InputScript, LoopExit, SessionConfig, SessionEvent,
    DEFAULT_SEED, REQUIRED_APPEARANCES,
};

#[derive(Parser)]
#[command(name = "crosswalk_trainer")]
#[command(about = "Street-crossing training scenario with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Maximum number of simulation ticks to run in headless mode
    #[arg(long, default_value = "4000")]
    ticks: u64,

    /// Simulation ticks per second
    #[arg(long, default_value = "60")]
    tick_hz: u32,

    /// Seed for the vehicle layout and pedestrian schedule
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Input script for headless mode, e.g. "forward*34,left+cross,wait*120"
    #[arg(long, default_value = "")]
    script: String,

    /// Start with cheat mode enabled
    #[arg(long)]
    cheat: bool,

    /// End the session once the final waypoint is reached
    #[arg(long)]
    complete_on_arrival: bool,

    /// Draw the town map with every report
    #[arg(long)]
    map: bool,

    /// Print a summary every N simulated seconds (0 disables)
    #[arg(long, default_value = "10")]
    report_every: u32,

    /// Real milliseconds to wait between ticks in headless mode
    #[arg(long, default_value = "0")]
    pace_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.tick_hz == 0 {
        bail!("--tick-hz must be at least 1");
    }

    let config = SessionConfig {
        seed: cli.seed,
        cheat: cli.cheat,
        complete_on_final_waypoint: cli.complete_on_arrival,
        ..SessionConfig::default()
    };

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, cli.tick_hz);
            return Ok(());
        }
        #[cfg(not(feature = "ui"))]
        {
            bail!("UI feature is not enabled. Rebuild with --features ui");
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run_headless(&cli, config)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli, config: SessionConfig) -> Result<()> {
    let mut script = InputScript::parse(&cli.script).context("Failed to parse --script")?;
    let delta = 1.0 / f64::from(cli.tick_hz);

    info!(
        "Running crossing session headless: seed {}, {} Hz, up to {} ticks, {} scripted ticks",
        config.seed,
        cli.tick_hz,
        cli.ticks,
        script.len_ticks()
    );

    let mut session = GameSession::new(config);
    let ticks_per_report = u64::from(cli.report_every) * u64::from(cli.tick_hz);

    println!("Initial state:");
    session.print_summary();
    if cli.map {
        session.draw_map();
    }
    println!();

    let runner = FixedStepLoop::new(delta)
        .with_max_ticks(cli.ticks)
        .with_pace(Duration::from_millis(cli.pace_ms));

    let mut destroyed = 0usize;
    let exit = runner.run(&mut session, &mut script, |session, report| {
        destroyed += report
            .events
            .iter()
            .filter(|e| matches!(e, SessionEvent::VehicleDestroyed(_)))
            .count();

        let tick = session.clock.ticks();
        if ticks_per_report > 0 && tick > 0 && tick % ticks_per_report == 0 {
            println!("--- After tick {} ({:.1}s simulated time) ---", tick, session.elapsed());
            session.print_summary();
            if cli.map {
                session.draw_map();
            }
            println!();
        }
    });

    println!("=== Final State ===");
    session.print_summary();
    if cli.map {
        session.draw_map();
    }

    log_completion(&session, exit, destroyed);
    Ok(())
}

fn log_completion(session: &GameSession, exit: LoopExit, destroyed: usize) {
    let stopped_by = match exit {
        LoopExit::Cancelled { .. } => "quit",
        LoopExit::Terminal { .. } => "session ended",
        LoopExit::TickLimit { .. } => "tick limit",
    };

    info!("=== SESSION COMPLETE ===");
    info!("Stopped by: {}", stopped_by);
    info!("Ticks run: {}", exit.ticks());
    info!("Elapsed time: {:.2}s", session.elapsed());
    info!("Terminal reason: {}", session.reason());
    info!(
        "Appearances: {}/{}",
        session.pedestrian.appearances, REQUIRED_APPEARANCES
    );
    info!(
        "Waypoint: {}/{}",
        session.waypoints.current_index(),
        session.waypoints.last_index()
    );
    info!("Vehicles destroyed: {}", destroyed);
}

#[cfg(feature = "ui")]
fn run_with_ui(config: SessionConfig, tick_hz: u32) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    use crosswalk_trainer::ui::{CrosswalkUIPlugin, SessionResource};

    println!("Starting Crosswalk Trainer UI...");
    println!();
    println!("Controls:");
    println!("  W/A/S/D  - Walk");
    println!("  E        - Press the crossing button (stand next to the pole)");
    println!("  C        - Toggle cheat mode");
    println!("  N        - Force the pedestrian to appear (debug)");
    println!("  R        - Restart after game over");
    println!("  ESC      - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,crosswalk_trainer=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Crosswalk Trainer".into(),
                        resolution: (1200, 800).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(Time::<Fixed>::from_hz(f64::from(tick_hz)))
        .insert_resource(SessionResource::new(config, 1.0 / f64::from(tick_hz)))
        .add_plugins(CrosswalkUIPlugin)
        .run();
}
