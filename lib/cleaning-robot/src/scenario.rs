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

//! Random rooms.
//!
//! A square room of side `n`, between `m` = 2 and `n - 1` things to clean (at least one of them a
//! spill), and one person standing somewhere. Nothing starts on the origin square.

use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::EntityKind;
use crate::grid::{Grid, HashMap, Location};
use crate::planner::Rng;
use crate::robot::Robot;
use crate::room::Room;

/// Smallest room the planner is guaranteed to cover.
pub const MIN_SIDE: i32 = 3;

/// Scenario error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    #[error("room size range {min}..={max} is invalid, sides must be at least 3")]
    InvalidSizeRange { min: i32, max: i32 },

    #[error("room is {width}x{height}, sides must be at least 3")]
    TooSmall { width: i32, height: i32 },

    #[error("{kind} at {location} is outside the room")]
    OutOfBounds { kind: EntityKind, location: Location },

    #[error("{kind} at {location} shares its square with something else")]
    Overlap { kind: EntityKind, location: Location },

    #[error("{kind} placed on the origin")]
    AtOrigin { kind: EntityKind },

    #[error("{kind} cannot be placed in a room")]
    NotPlaceable { kind: EntityKind },

    #[error("{liquid} units of liquid cannot clean {targets} targets")]
    NotEnoughLiquid { liquid: u32, targets: usize },
}

/// Bounds for random rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub min_side: i32,
    pub max_side: i32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            min_side: MIN_SIDE,
            max_side: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: EntityKind,
    pub location: Location,
}

/// Room size plus where everything starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub placements: Vec<Placement>,
}

impl Scenario {
    pub fn new(width: i32, height: i32, placements: Vec<Placement>) -> Self {
        Self {
            width,
            height,
            placements,
        }
    }

    /// Draw a random room.
    pub fn generate(config: &ScenarioConfig, rng: &mut Rng) -> Result<Self, ScenarioError> {
        if config.min_side < MIN_SIDE || config.max_side < config.min_side {
            return Err(ScenarioError::InvalidSizeRange {
                min: config.min_side,
                max: config.max_side,
            });
        }

        let side = rng.gen_range(config.min_side..=config.max_side);
        let targets = rng.gen_range(2..=side - 1);
        let spills = rng.gen_range(1..=targets);
        let stains = targets - spills;

        let mut taken = vec![Location::ORIGIN];
        let mut placements = Vec::with_capacity(targets as usize + 1);
        let counts = [
            (EntityKind::Stain, stains),
            (EntityKind::Person, 1),
            (EntityKind::Spill, spills),
        ];
        for (kind, count) in counts {
            let mut placed = 0;
            while placed < count {
                let location = Location::new(rng.gen_range(0..side), rng.gen_range(0..side));
                if !taken.contains(&location) {
                    taken.push(location);
                    placements.push(Placement { kind, location });
                    placed += 1;
                }
            }
        }

        debug!(side, stains, spills, "generated scenario");
        Ok(Self::new(side, side, placements))
    }

    pub fn target_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.kind.is_target())
            .count()
    }

    /// Check the placements fit the room, do not overlap, and keep the origin clear.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.width < MIN_SIDE || self.height < MIN_SIDE {
            return Err(ScenarioError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }

        let bounds = Grid::new(self.width, self.height);
        let mut seen: HashMap<Location, EntityKind> = HashMap::default();
        for &Placement { kind, location } in &self.placements {
            if kind == EntityKind::Bump {
                return Err(ScenarioError::NotPlaceable { kind });
            }
            if !bounds.contains(location) {
                return Err(ScenarioError::OutOfBounds { kind, location });
            }
            if location == Location::ORIGIN {
                return Err(ScenarioError::AtOrigin { kind });
            }
            if seen.insert(location, kind).is_some() {
                return Err(ScenarioError::Overlap { kind, location });
            }
        }
        Ok(())
    }

    /// Build the room with a robot at the origin carrying `liquid` units.
    pub fn build_room(&self, liquid: u32) -> Result<Room, ScenarioError> {
        self.validate()?;
        let targets = self.target_count();
        if (liquid as usize) < targets {
            return Err(ScenarioError::NotEnoughLiquid { liquid, targets });
        }

        let mut grid = Grid::new(self.width, self.height);
        for placement in &self.placements {
            grid.spawn(placement.kind, placement.location);
        }
        Ok(Room::new(grid, Robot::new(liquid)))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;
    use crate::planner::Rng;

    fn place(kind: EntityKind, col: i32, row: i32) -> Placement {
        Placement {
            kind,
            location: Location::new(col, row),
        }
    }

    #[test]
    fn test_rejects_bad_size_range() {
        let mut rng = Rng::seed_from_u64(1);
        let config = ScenarioConfig {
            min_side: 2,
            max_side: 5,
        };
        assert_eq!(
            Scenario::generate(&config, &mut rng),
            Err(ScenarioError::InvalidSizeRange { min: 2, max: 5 })
        );
    }

    #[test]
    fn test_validate_catches_each_problem() {
        let too_small = Scenario::new(2, 5, vec![]);
        assert!(matches!(too_small.validate(), Err(ScenarioError::TooSmall { .. })));

        let outside = Scenario::new(4, 4, vec![place(EntityKind::Stain, 4, 0)]);
        assert!(matches!(outside.validate(), Err(ScenarioError::OutOfBounds { .. })));

        let origin = Scenario::new(4, 4, vec![place(EntityKind::Spill, 0, 0)]);
        assert_eq!(
            origin.validate(),
            Err(ScenarioError::AtOrigin {
                kind: EntityKind::Spill
            })
        );

        let overlap = Scenario::new(
            4,
            4,
            vec![place(EntityKind::Stain, 1, 1), place(EntityKind::Person, 1, 1)],
        );
        assert!(matches!(overlap.validate(), Err(ScenarioError::Overlap { .. })));

        let bump = Scenario::new(4, 4, vec![place(EntityKind::Bump, 1, 1)]);
        assert!(matches!(bump.validate(), Err(ScenarioError::NotPlaceable { .. })));
    }

    #[test]
    fn test_build_room_needs_enough_liquid() {
        let scenario = Scenario::new(
            4,
            4,
            vec![
                place(EntityKind::Stain, 1, 1),
                place(EntityKind::Spill, 2, 2),
                place(EntityKind::Person, 3, 3),
            ],
        );
        assert_eq!(scenario.target_count(), 2);
        assert_eq!(
            scenario.build_room(1).err(),
            Some(ScenarioError::NotEnoughLiquid {
                liquid: 1,
                targets: 2
            })
        );
        let room = scenario.build_room(3).expect("build failed");
        assert_eq!(room.robot().liquid(), 3);
        assert_eq!(room.grid().targets_remaining(), 2);
        assert_eq!(room.grid().occupants(Location::new(3, 3)), vec![EntityKind::Person]);
    }

    proptest! {
        #[test]
        fn test_generated_scenarios_are_valid(seed in any::<u64>()) {
            let mut rng = Rng::seed_from_u64(seed);
            let config = ScenarioConfig::default();
            let scenario = Scenario::generate(&config, &mut rng).expect("generate failed");
            prop_assert!(scenario.validate().is_ok());
            prop_assert_eq!(scenario.width, scenario.height);
            prop_assert!((config.min_side..=config.max_side).contains(&scenario.width));

            let targets = scenario.target_count() as i32;
            prop_assert!(targets >= 2 && targets < scenario.width);

            let kinds = |kind| scenario.placements.iter().filter(|p| p.kind == kind).count();
            prop_assert_eq!(kinds(EntityKind::Person), 1);
            prop_assert!(kinds(EntityKind::Spill) >= 1);
        }
    }
}
