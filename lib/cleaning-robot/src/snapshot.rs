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

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::grid::Location;
use crate::heading::Heading;

/// A copy of the room at one tick, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub robot: Location,
    pub heading: Heading,
    pub liquid: u32,

    /// `cells[row][col]`, occupants bottom first.
    pub cells: Vec<Vec<Vec<EntityKind>>>,
}

impl Snapshot {
    /// Character for one square: the robot, else the top occupant, else `.`.
    pub fn glyph(&self, col: i32, row: i32) -> char {
        if self.robot == Location::new(col, row) {
            return 'R';
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .and_then(|occupants| occupants.last())
            .map_or('.', |kind| kind.glyph())
    }
}

// print out squares, and row and column numbers which start at 0. column numbers wrap at 10.
impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity(((self.width * 2 + 4) * (self.height + 1)) as usize);

        s.push_str("   ");
        for col in 0..self.width {
            s.push_str(&format!("{}", col % 10));
            if col < self.width - 1 {
                s.push(' ');
            }
        }
        s.push('\n');

        for row in 0..self.height {
            s.push_str(&format!("{:>2} ", row));
            for col in 0..self.width {
                s.push(self.glyph(col, row));
                if col < self.width - 1 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        write!(f, "{}facing {}, liquid {}", s, self.heading, self.liquid)
    }
}
