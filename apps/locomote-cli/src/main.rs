use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glam::{Vec2, Vec3};
use locomote_common::{Capsule, ControllerConfig};
use locomote_input::ActionEvent;
use locomote_sim::debug_text::{describe, format_record};
use locomote_sim::{InputScript, RunOptions, Runner, SimWorld, StaticWorld};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locomote", about = "CLI tool for first-person locomotion")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Print the effective, validated configuration as JSON
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Run a scripted simulation on flat ground
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        script: ScriptArgs,
        /// Number of fixed ticks to simulate
        #[arg(short, long, default_value = "100")]
        ticks: u64,
        /// Fixed ticks per second
        #[arg(long, default_value = "50")]
        tick_rate: f64,
        /// Rendered frames per second
        #[arg(long, default_value = "144")]
        frame_rate: f64,
        /// Longest frame, in seconds, fed to the fixed-step clock
        #[arg(long, default_value = "0.1")]
        max_frame_dt: f64,
        /// Start this many meters above the ground
        #[arg(long, default_value = "0")]
        drop: f32,
        /// Print every Nth tick
        #[arg(long, default_value = "5")]
        every: u64,
    },
}

/// Tunables: a JSON file, then per-field overrides.
#[derive(Args)]
struct ConfigArgs {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    move_speed: Option<f32>,
    #[arg(long)]
    look_speed: Option<f32>,
    /// Pitch limit in degrees
    #[arg(long)]
    look_x_limit: Option<f32>,
    #[arg(long)]
    gravity: Option<f32>,
    /// Peak jump height in meters
    #[arg(long)]
    jump_force: Option<f32>,
    #[arg(long)]
    ground_check_distance: Option<f32>,
    /// Normalize diagonal movement
    #[arg(long)]
    normalize_diagonal: bool,
}

impl ConfigArgs {
    fn resolve(&self) -> anyhow::Result<ControllerConfig> {
        let mut config = match &self.config {
            Some(path) => ControllerConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ControllerConfig::default(),
        };
        let overrides = [
            (&mut config.move_speed, self.move_speed),
            (&mut config.look_speed, self.look_speed),
            (&mut config.look_x_limit, self.look_x_limit),
            (&mut config.gravity, self.gravity),
            (&mut config.jump_force, self.jump_force),
            (&mut config.ground_check_distance, self.ground_check_distance),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        config.normalize_diagonal |= self.normalize_diagonal;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct ScriptArgs {
    /// Move input held from tick 0, as "strafe,forward"
    #[arg(long = "move", value_parser = parse_vec2, allow_hyphen_values = true)]
    move_input: Option<Vec2>,
    /// Release move input at this tick
    #[arg(long)]
    move_until: Option<u64>,
    /// Look input held from tick 0, as "yaw,pitch"
    #[arg(long, value_parser = parse_vec2, allow_hyphen_values = true)]
    look: Option<Vec2>,
    /// Release look input at this tick
    #[arg(long)]
    look_until: Option<u64>,
    /// Press jump before this tick (repeatable)
    #[arg(long)]
    jump_at: Vec<u64>,
}

impl ScriptArgs {
    fn build(&self) -> InputScript {
        let mut script = InputScript::new();
        if let Some(m) = self.move_input {
            script = script.move_from(0, m);
            if let Some(t) = self.move_until {
                script = script.at(t, ActionEvent::MoveCanceled);
            }
        }
        if let Some(l) = self.look {
            script = script.look_from(0, l);
            if let Some(t) = self.look_until {
                script = script.at(t, ActionEvent::LookCanceled);
            }
        }
        for &t in &self.jump_at {
            script = script.jump_at(t);
        }
        script
    }
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("locomote v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", locomote_common::crate_info());
            println!("input: {}", locomote_input::crate_info());
            println!("kernel: {}", locomote_kernel::crate_info());
            println!("sim: {}", locomote_sim::crate_info());
        }
        Commands::Config { config } => {
            let config = config.resolve()?;
            println!("{}", config.to_json_pretty()?);
        }
        Commands::Simulate {
            config,
            script,
            ticks,
            tick_rate,
            frame_rate,
            max_frame_dt,
            drop,
            every,
        } => {
            let config = config.resolve()?;
            let capsule = Capsule::default();
            let world = SimWorld::new(
                StaticWorld::flat(0.0),
                Vec3::new(0.0, capsule.half_height() + drop.max(0.0), 0.0),
                capsule,
            );
            let options = RunOptions {
                tick_rate,
                frame_rate,
                max_frame_dt,
            };
            tracing::info!(ticks, tick_rate, frame_rate, "simulating");

            let mut runner = Runner::new(world, config, script.build(), options)?;
            let records = runner.run_ticks(ticks);
            let every = every.max(1);
            for (i, r) in records.iter().enumerate() {
                if r.tick % every == 0 || i + 1 == records.len() {
                    println!("{}", format_record(r));
                }
            }

            let jumps = records.iter().filter(|r| r.jumped).count();
            let peak = records
                .iter()
                .map(|r| r.position.y)
                .fold(f32::MIN, f32::max);
            println!();
            print!("{}", describe(runner.world(), runner.controller()));
            println!(
                "Frames: {}  Jumps: {}  Peak center height: {:.2}",
                runner.frames(),
                jumps,
                peak
            );
        }
    }

    Ok(())
}
