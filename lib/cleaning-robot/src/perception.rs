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

//! What the robot senses: its own square, the eight squares around it, and whether the next step
//! forward would hit a wall.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::grid::{Grid, Location};
use crate::heading::Heading;

/// One of the eight squares around the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Neighbor {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Neighbor {
    /// Scan order used by the planner when looking for something to clean.
    pub const ALL: [Neighbor; 8] = [
        Neighbor::Up,
        Neighbor::Down,
        Neighbor::Left,
        Neighbor::Right,
        Neighbor::UpLeft,
        Neighbor::UpRight,
        Neighbor::DownLeft,
        Neighbor::DownRight,
    ];

    /// Vertical part of the offset, if any.
    pub fn vertical(self) -> Option<Heading> {
        match self {
            Neighbor::Up | Neighbor::UpLeft | Neighbor::UpRight => Some(Heading::Up),
            Neighbor::Down | Neighbor::DownLeft | Neighbor::DownRight => Some(Heading::Down),
            Neighbor::Left | Neighbor::Right => None,
        }
    }

    /// Horizontal part of the offset, if any.
    pub fn horizontal(self) -> Option<Heading> {
        match self {
            Neighbor::Left | Neighbor::UpLeft | Neighbor::DownLeft => Some(Heading::Left),
            Neighbor::Right | Neighbor::UpRight | Neighbor::DownRight => Some(Heading::Right),
            Neighbor::Up | Neighbor::Down => None,
        }
    }

    pub fn opposite(self) -> Neighbor {
        match self {
            Neighbor::Up => Neighbor::Down,
            Neighbor::Down => Neighbor::Up,
            Neighbor::Left => Neighbor::Right,
            Neighbor::Right => Neighbor::Left,
            Neighbor::UpLeft => Neighbor::DownRight,
            Neighbor::UpRight => Neighbor::DownLeft,
            Neighbor::DownLeft => Neighbor::UpRight,
            Neighbor::DownRight => Neighbor::UpLeft,
        }
    }

    /// The neighbouring square of `location` in this direction.
    pub fn of(self, location: Location) -> Location {
        let step = |heading: Option<Heading>, location: Location| match heading {
            Some(heading) => heading.forward(location),
            None => location,
        };
        step(self.horizontal(), step(self.vertical(), location))
    }

    /// Wire name, e.g. `up-left`.
    pub fn name(self) -> &'static str {
        match self {
            Neighbor::Up => "up",
            Neighbor::Down => "down",
            Neighbor::Left => "left",
            Neighbor::Right => "right",
            Neighbor::UpLeft => "up-left",
            Neighbor::UpRight => "up-right",
            Neighbor::DownLeft => "down-left",
            Neighbor::DownRight => "down-right",
        }
    }

    pub fn from_name(name: &str) -> Option<Neighbor> {
        Neighbor::ALL.into_iter().find(|n| n.name() == name)
    }
}

/// A single sensor reading. Taken before the tick's action is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    pub location: Location,
    pub heading: Heading,

    /// What is on the robot's own square, plus a trailing `Bump` if the square ahead is outside
    /// the room.
    pub here: Vec<EntityKind>,

    /// Occupants of the eight neighbours, indexed in [`Neighbor::ALL`] order.
    pub around: [Vec<EntityKind>; 8],
}

impl Percept {
    pub fn neighbor(&self, neighbor: Neighbor) -> &[EntityKind] {
        let index = Neighbor::ALL
            .iter()
            .position(|n| *n == neighbor)
            .unwrap_or_default();
        &self.around[index]
    }

    pub fn bump(&self) -> bool {
        self.here.contains(&EntityKind::Bump)
    }

    /// The first target on the robot's own square.
    pub fn target_here(&self) -> Option<EntityKind> {
        self.here.iter().copied().find(|kind| kind.is_target())
    }

    /// The first neighbour, in scan order, that holds something to clean.
    pub fn nearest_target(&self) -> Option<Neighbor> {
        Neighbor::ALL
            .into_iter()
            .zip(self.around.iter())
            .find(|(_, occupants)| occupants.iter().any(|kind| kind.is_target()))
            .map(|(neighbor, _)| neighbor)
    }
}

/// Sense the room from `location`, facing `heading`.
pub fn perceive(grid: &Grid, location: Location, heading: Heading) -> Percept {
    let mut here = grid.occupants(location);
    if !grid.contains(heading.forward(location)) {
        here.push(EntityKind::Bump);
    }
    let around = Neighbor::ALL.map(|neighbor| grid.occupants(neighbor.of(location)));
    Percept {
        location,
        heading,
        here,
        around,
    }
}
