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

// PEAS - Performance, Environment, Action, Sensing
//
// A robot cleans a room it cannot see all of. It senses its own square and the eight around it,
// plus a bump signal when the square ahead is a wall, and has enough liquid for a fixed number
// of cleans before it must go home.

use num_traits::Zero;

pub mod action;
pub mod config;
pub mod entity;
pub mod evaluation;
pub mod grid;
pub mod heading;
pub mod perception;
pub mod planner;
pub mod robot;
pub mod room;
pub mod scenario;
pub mod snapshot;

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Perception, the Agent will return an Action.
///
/// Notice that the Agent is not aware of an Environment, it's only interface
/// is the Perception coming in then the Action going out.
pub trait Agent {
    type Action;
    type Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action;
}

/// An Environment runs a single Agent in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    type Action;
    type Percept;
    type Score: num_traits::NumAssign + Copy;

    fn percept(&self) -> Self::Percept;
    fn execute_action(&mut self, action: &Self::Action);

    /// Returns the score of the Environment. This is not cumulative or stateful. This is the score
    /// of the Environment at the current state.
    fn score(&self) -> Self::Score;

    /// Whether there is nothing left for an Agent to do, e.g. it has shut down.
    fn is_done(&self) -> bool;
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles, until the Environment is done or the time step budget runs out. The Agent's score
/// (Performance) is continually kept up to date.
///
/// The Simulation is aware of both the Environment and the single Agent. Notice that the Agent's
/// generic Action and Percept come from the Environment. The Agent still does not need to know that
/// the Environment exists, but the Agent definitely needs the Environment's Action and Percept
/// types.
pub struct Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    environment: _Environment,
    agent: _Agent,
    max_time_steps: i32,
    time_steps: i32,
    score: _Environment::Score,
}

impl<_Environment, _Agent> Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    pub fn new(environment: _Environment, agent: _Agent, max_time_steps: i32) -> Self {
        Self {
            environment,
            agent,
            max_time_steps,
            time_steps: 0,
            score: _Environment::Score::zero(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.environment.is_done() || self.time_steps >= self.max_time_steps
    }

    /// Run one cycle. The percept is taken before the action changes anything. Returns false,
    /// without doing anything, once the simulation is done.
    pub fn step(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        let percept = self.environment.percept();
        let action = self.agent.act(&percept);
        self.environment.execute_action(&action);
        self.score += self.environment.score();
        self.time_steps += 1;
        true
    }

    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Like [`Simulation::run`], calling `observe` before the first step and after every step.
    pub fn run_with<F>(&mut self, mut observe: F)
    where
        F: FnMut(&_Environment, i32),
    {
        observe(&self.environment, self.time_steps);
        while self.step() {
            observe(&self.environment, self.time_steps);
        }
    }

    pub fn score(&self) -> <_Environment as Environment>::Score {
        self.score
    }

    pub fn time_steps(&self) -> i32 {
        self.time_steps
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }

    pub fn agent(&self) -> &_Agent {
        &self.agent
    }
}
