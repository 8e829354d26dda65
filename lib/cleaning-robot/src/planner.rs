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

//! Column-sweep coverage planner.
//!
//! The robot sees its own square and the eight around it, so walking down one column also
//! covers the columns on either side. Sweeping columns 1, 4, 7, ... therefore covers the room,
//! alternating down and up like a lawn mower. The robot does not know the room's width; it
//! learns where the right wall is when it bumps into it while crossing, and that column becomes
//! the last one swept.
//!
//! [`decide`] is a pure function of the percept and the planner's memory. [`SweepBot`] wraps it
//! as an [`Agent`], owning the memory and the random number generator.

use std::collections::{BTreeSet, VecDeque};

use rand::Rng as _;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::Action;
use crate::heading::{Heading, Turn};
use crate::perception::Percept;
use crate::Agent;

pub type Rng = rand_pcg::Pcg64;

/// How the robot explores when there is nothing in reach to clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Column sweep.
    Optimal,

    /// Biased random walk.
    Wander,
}

/// Everything the planner remembers between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepMemory {
    done_columns: BTreeSet<i32>,
    final_column: Option<i32>,
    pending: VecDeque<Action>,
}

impl SweepMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column currently being swept or travelled to.
    pub fn active_column(&self) -> i32 {
        self.final_column
            .unwrap_or(1 + 3 * self.done_columns.len() as i32)
    }

    /// Sweeps alternate direction, starting downwards from the top row.
    pub fn sweep_heading(&self) -> Heading {
        if self.done_columns.len() % 2 == 0 {
            Heading::Down
        } else {
            Heading::Up
        }
    }

    /// The right wall has been found and the column next to it swept.
    pub fn coverage_complete(&self) -> bool {
        self.final_column
            .map_or(false, |column| self.done_columns.contains(&column))
    }

    fn complete_column(&mut self, column: i32) {
        if column == self.active_column() && self.done_columns.insert(column) {
            debug!(column, done = self.done_columns.len(), "column swept");
        }
    }

    fn discover_wall(&mut self, column: i32) {
        if self.final_column.is_none() {
            debug!(column, "found the right wall");
            self.final_column = Some(column);
        }
    }
}

/// Choose the next action.
///
/// In priority order: clean the current square; react to a bump; queue a detour to the first
/// neighbour holding a target; run the queued detour; follow the sweep; wander.
pub fn decide(
    percept: &Percept,
    memory: &SweepMemory,
    mode: Mode,
    rng: &mut Rng,
) -> (Action, SweepMemory) {
    let mut memory = memory.clone();

    if let Some(action) = percept.target_here().and_then(Action::clean) {
        return (action, memory);
    }

    // A detour's own moves are always inside the room, so a bump seen mid-detour is ignored.
    if percept.bump() && memory.pending.is_empty() && !memory.coverage_complete() {
        let column = percept.location.col;
        match (mode, percept.heading) {
            (Mode::Wander, _) => return (random_turn(rng), memory),
            (Mode::Optimal, Heading::Down) => {
                memory.complete_column(column);
                return (Action::TurnLeft, memory);
            }
            (Mode::Optimal, Heading::Up) => {
                memory.complete_column(column);
                return (Action::TurnRight, memory);
            }
            (Mode::Optimal, Heading::Right) => memory.discover_wall(column),
            (Mode::Optimal, Heading::Left) => {}
        }
    }

    if memory.pending.is_empty() {
        if let Some(neighbor) = percept.nearest_target() {
            debug!(location = %percept.location, neighbor = neighbor.name(), "detour queued");
            memory.pending.extend(Action::detour(neighbor));
        }
    }

    if let Some(action) = memory.pending.pop_front() {
        return (action, memory);
    }

    match mode {
        Mode::Optimal => {
            let action = if memory.coverage_complete() {
                head_home(percept)
            } else {
                let column = percept.location.col;
                let active = memory.active_column();
                let target = if column < active {
                    Heading::Right
                } else if column > active {
                    Heading::Left
                } else {
                    memory.sweep_heading()
                };
                steer(percept, target)
            };
            (action, memory)
        }
        Mode::Wander => (wander(percept, rng), memory),
    }
}

/// Turn towards `target`, or step forward if already facing it.
fn steer(percept: &Percept, target: Heading) -> Action {
    match percept.heading.turn_towards(target) {
        Some(turn) => Action::turn(turn),
        None if percept.bump() => Action::TurnRight,
        None => Action::MoveForward,
    }
}

/// Up to row 0, then left to column 0, then power down.
fn head_home(percept: &Percept) -> Action {
    if percept.location.row > 0 {
        steer(percept, Heading::Up)
    } else if percept.location.col > 0 {
        steer(percept, Heading::Left)
    } else {
        Action::Dock
    }
}

fn random_turn(rng: &mut Rng) -> Action {
    if rng.gen_bool(0.5) {
        Action::turn(Turn::Right)
    } else {
        Action::turn(Turn::Left)
    }
}

/// Mostly forward, sometimes a turn.
fn wander(percept: &Percept, rng: &mut Rng) -> Action {
    match rng.gen_range(1..=8) {
        1 => Action::TurnRight,
        2 => Action::TurnLeft,
        _ if percept.bump() => random_turn(rng),
        _ => Action::MoveForward,
    }
}

/// The planner as an [`Agent`].
#[derive(Debug, Clone)]
pub struct SweepBot {
    mode: Mode,
    memory: SweepMemory,
    rng: Rng,
}

impl SweepBot {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            mode,
            memory: SweepMemory::new(),
            rng: Rng::seed_from_u64(seed),
        }
    }

}

impl Agent for SweepBot {
    type Action = Action;
    type Percept = Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        let (action, memory) = decide(percept, &self.memory, self.mode, &mut self.rng);
        self.memory = memory;
        action
    }
}
