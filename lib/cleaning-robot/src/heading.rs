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

//! Headings and turns.
//!
//! Rows grow downwards, like on a screen, so `Up` decreases the row and a
//! right turn is clockwise.

use serde::{Deserialize, Serialize};

use crate::grid::Location;

/// The direction the robot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Towards row 0.
    Up,

    /// Towards the last row.
    Down,

    /// Towards column 0.
    Left,

    /// Towards the last column.
    Right,
}

/// A quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Counter-clockwise.
    Left,

    /// Clockwise.
    Right,
}

impl Heading {
    /// All four headings, clockwise from `Up`.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Heading after a quarter turn.
    pub fn rotate(self, turn: Turn) -> Heading {
        match (self, turn) {
            (Heading::Right, Turn::Right) => Heading::Down,
            (Heading::Right, Turn::Left) => Heading::Up,
            (Heading::Left, Turn::Right) => Heading::Up,
            (Heading::Left, Turn::Left) => Heading::Down,
            (Heading::Up, Turn::Right) => Heading::Right,
            (Heading::Up, Turn::Left) => Heading::Left,
            (Heading::Down, Turn::Right) => Heading::Left,
            (Heading::Down, Turn::Left) => Heading::Right,
        }
    }

    /// The heading pointing the other way.
    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Unit step as `(d_col, d_row)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Right => (1, 0),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
        }
    }

    /// The cell one step ahead of `location`. No bounds checking.
    pub fn forward(self, location: Location) -> Location {
        let (d_col, d_row) = self.delta();
        location.offset(d_col, d_row)
    }

    /// The single turn that gets closer to `target`, or `None` if already facing it.
    ///
    /// An about-face needs two turns; this returns `Turn::Right` for the first of them.
    pub fn turn_towards(self, target: Heading) -> Option<Turn> {
        if self == target {
            None
        } else if self.rotate(Turn::Left) == target {
            Some(Turn::Left)
        } else {
            Some(Turn::Right)
        }
    }

    /// The turns needed to face `target`, shortest first.
    pub fn turns_to(self, target: Heading) -> Vec<Turn> {
        let mut turns = Vec::with_capacity(2);
        let mut heading = self;
        while let Some(turn) = heading.turn_towards(target) {
            turns.push(turn);
            heading = heading.rotate(turn);
        }
        turns
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heading::Up => write!(f, "up"),
            Heading::Down => write!(f, "down"),
            Heading::Left => write!(f, "left"),
            Heading::Right => write!(f, "right"),
        }
    }
}
