/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cleaning_robot::config::SimulationConfig;
use cleaning_robot::evaluation::{evaluate, prepare};
use cleaning_robot::planner::Mode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "clean-room", version, about = "Simulate a robot cleaning a room")]
struct Cli {
    /// JSON config file. Missing fields take their defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the config's seed.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[arg(long, value_enum, global = true)]
    mode: Option<ModeArg>,

    /// Overrides the config's starting liquid.
    #[arg(long, global = true)]
    liquid: Option<u32>,

    #[arg(long, global = true)]
    max_ticks: Option<i32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one room, drawing it after every tick.
    Run {
        /// Pause between ticks in milliseconds.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,

        /// Print snapshots as JSON lines instead of drawing them.
        #[arg(long)]
        json: bool,

        /// Only print the final state.
        #[arg(long)]
        quiet: bool,
    },
    /// Run many rooms and summarise.
    Evaluate {
        #[arg(short, long, default_value_t = 100)]
        runs: u64,

        /// Print every run report as JSON, then the summary.
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Optimal,
    Wander,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Optimal => Mode::Optimal,
            ModeArg::Wander => Mode::Wander,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(liquid) = cli.liquid {
        config.liquid = Some(liquid);
    }
    if let Some(max_ticks) = cli.max_ticks {
        config.max_ticks = max_ticks;
    }
    config.validate()?;
    Ok(config)
}

fn run(config: &SimulationConfig, delay_ms: u64, json: bool, quiet: bool) -> Result<()> {
    let (scenario, mut simulation) =
        prepare(config, config.seed).context("could not set up the room")?;
    info!(
        seed = config.seed,
        width = scenario.width,
        height = scenario.height,
        targets = scenario.target_count(),
        "starting run"
    );

    let delay = Duration::from_millis(delay_ms);
    let mut failure = None;
    simulation.run_with(|room, tick| {
        if quiet || failure.is_some() {
            return;
        }
        let snapshot = room.snapshot();
        if json {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{}", line),
                Err(e) => failure = Some(e),
            }
        } else {
            println!("tick {}\n{}\n", tick, snapshot);
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    });
    if let Some(e) = failure {
        return Err(e).context("could not write snapshot");
    }

    let room = simulation.environment();
    if quiet {
        println!("{}", room.snapshot());
    }
    println!(
        "ticks: {}, cleaned: {}/{}, score: {}",
        simulation.time_steps(),
        room.cleaned(),
        scenario.target_count(),
        simulation.score()
    );
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Run {
            delay_ms,
            json,
            quiet,
        } => run(&config, delay_ms, json, quiet),
        Command::Evaluate { runs, json } => {
            let (reports, evaluation) = evaluate(&config, runs)?;
            if json {
                for report in &reports {
                    println!("{}", serde_json::to_string(report)?);
                }
                println!("{}", serde_json::to_string(&evaluation)?);
            } else {
                println!("{}", evaluation);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "clean-room",
            "evaluate",
            "--runs",
            "5",
            "--mode",
            "wander",
            "--seed",
            "3",
        ]);
        let config = load_config(&cli).expect("config failed");
        assert_eq!(config.mode, Mode::Wander);
        assert_eq!(config.seed, 3);
        assert!(matches!(cli.command, Command::Evaluate { runs: 5, .. }));
    }

    #[test]
    fn test_rejects_zero_tick_budget() {
        let cli = Cli::parse_from(["clean-room", "--max-ticks", "0", "run"]);
        assert!(load_config(&cli).is_err());
    }
}
