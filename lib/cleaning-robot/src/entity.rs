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

use crate::grid::Location;

/// What sits on a square of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// First kind of mess, removed with `clean-stain`.
    Stain,

    /// Second kind of mess, removed with `clean-spill`.
    Spill,

    /// Someone standing in the room. Never cleaned.
    Person,

    /// The wall is one step ahead. Only ever produced by perception, never stored.
    Bump,
}

impl EntityKind {
    /// Whether the robot is expected to clean this.
    pub fn is_target(self) -> bool {
        matches!(self, EntityKind::Stain | EntityKind::Spill)
    }

    /// Single character used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            EntityKind::Stain => 'A',
            EntityKind::Spill => 'B',
            EntityKind::Person => 'P',
            EntityKind::Bump => '#',
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Stain => write!(f, "stain"),
            EntityKind::Spill => write!(f, "spill"),
            EntityKind::Person => write!(f, "person"),
            EntityKind::Bump => write!(f, "bump"),
        }
    }
}

/// An entity stored in the grid. `location` always matches the cell the grid files it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub location: Location,
}
