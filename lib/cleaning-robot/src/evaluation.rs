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

//! Run the robot over many random rooms and summarise how it did.

use rand::{Rng as _, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::grid::Location;
use crate::planner::{Mode, Rng, SweepBot};
use crate::room::Room;
use crate::scenario::{Scenario, ScenarioError};
use crate::{Environment, Simulation};

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub seed: u64,
    pub mode: Mode,
    pub width: i32,
    pub height: i32,
    pub targets: usize,
    pub cleaned: i32,
    pub ticks: i32,
    pub score: i32,

    /// The robot shut down before the tick budget ran out.
    pub finished: bool,
    pub at_home: bool,
    pub targets_left: usize,
}

impl RunReport {
    fn new(
        seed: u64,
        mode: Mode,
        scenario: &Scenario,
        simulation: &Simulation<Room, SweepBot>,
    ) -> Self {
        let room = simulation.environment();
        Self {
            seed,
            mode,
            width: scenario.width,
            height: scenario.height,
            targets: scenario.target_count(),
            cleaned: room.cleaned(),
            ticks: simulation.time_steps(),
            score: simulation.score(),
            finished: room.is_done(),
            at_home: room.robot().location() == Location::ORIGIN,
            targets_left: room.grid().targets_remaining(),
        }
    }

    /// Everything cleaned and the robot shut down at home.
    pub fn completed(&self) -> bool {
        self.finished && self.at_home && self.targets_left == 0
    }
}

/// Draw the room for `seed` and set up a simulation over it, without running it.
pub fn prepare(
    config: &SimulationConfig,
    seed: u64,
) -> Result<(Scenario, Simulation<Room, SweepBot>), ScenarioError> {
    let mut rng = Rng::seed_from_u64(seed);
    let scenario = Scenario::generate(&config.scenario, &mut rng)?;
    let liquid = config
        .liquid
        .unwrap_or_else(|| scenario.target_count() as u32);
    let room = scenario.build_room(liquid)?;
    let agent = SweepBot::new(config.mode, rng.gen());
    Ok((scenario, Simulation::new(room, agent, config.max_ticks)))
}

pub fn run_once(config: &SimulationConfig, seed: u64) -> Result<RunReport, ScenarioError> {
    let (scenario, mut simulation) = prepare(config, seed)?;
    simulation.run();
    let report = RunReport::new(seed, config.mode, &scenario, &simulation);
    debug!(
        seed,
        ticks = report.ticks,
        cleaned = report.cleaned,
        completed = report.completed(),
        "run finished"
    );
    Ok(report)
}

/// Summary over many runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub runs: usize,
    pub completed: usize,
    pub mean_ticks: f64,
    pub mean_score: f64,
    pub targets_left: usize,
}

impl Evaluation {
    pub fn from_reports(reports: &[RunReport]) -> Self {
        let runs = reports.len();
        let mean = |total: i64| {
            if runs == 0 {
                0.0
            } else {
                total as f64 / runs as f64
            }
        };
        Self {
            runs,
            completed: reports.iter().filter(|report| report.completed()).count(),
            mean_ticks: mean(reports.iter().map(|report| report.ticks as i64).sum()),
            mean_score: mean(reports.iter().map(|report| report.score as i64).sum()),
            targets_left: reports.iter().map(|report| report.targets_left).sum(),
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} runs completed, mean ticks {:.1}, mean score {:.1}, {} targets left",
            self.completed, self.runs, self.mean_ticks, self.mean_score, self.targets_left
        )
    }
}

/// Run `runs` rooms in parallel, seeded `config.seed`, `config.seed + 1`, and so on. Reports come
/// back in seed order.
pub fn evaluate(
    config: &SimulationConfig,
    runs: u64,
) -> Result<(Vec<RunReport>, Evaluation), ScenarioError> {
    let reports = (0..runs)
        .into_par_iter()
        .map(|i| run_once(config, config.seed.wrapping_add(i)))
        .collect::<Result<Vec<_>, _>>()?;
    let evaluation = Evaluation::from_reports(&reports);
    info!(
        runs = evaluation.runs,
        completed = evaluation.completed,
        mean_ticks = evaluation.mean_ticks,
        "evaluation finished"
    );
    Ok((reports, evaluation))
}
