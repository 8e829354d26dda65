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

use tracing::{debug, info, warn};

use crate::action::Action;
use crate::entity::EntityKind;
use crate::grid::Grid;
use crate::heading::Turn;
use crate::perception::{perceive, Percept};
use crate::robot::Robot;
use crate::snapshot::Snapshot;
use crate::Environment;

/// The room the robot cleans. Owns the grid and the robot's body; the robot's planner lives
/// outside, and only sees the room through [`Percept`]s.
#[derive(Debug, Clone)]
pub struct Room {
    grid: Grid,
    robot: Robot,
    cleaned: i32,
}

impl Room {
    pub fn new(grid: Grid, robot: Robot) -> Self {
        let mut room = Self {
            grid,
            robot,
            cleaned: 0,
        };
        room.update_liveness();
        room
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Targets cleaned so far.
    pub fn cleaned(&self) -> i32 {
        self.cleaned
    }

    /// Read-only picture of the room for renderers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            robot: self.robot.location(),
            heading: self.robot.heading(),
            liquid: self.robot.liquid(),
            cells: self.grid.occupancy(),
        }
    }

    /// Execute an action given by name. Names outside the vocabulary do nothing.
    pub fn execute_named(&mut self, name: &str) {
        match name.parse::<Action>() {
            Ok(action) => self.execute_action(&action),
            Err(e) => debug!(%e, "ignoring action"),
        }
    }

    fn clean(&mut self, expected: EntityKind) {
        let location = self.robot.location();
        let Some((key, found)) = self.grid.first_target_at(location) else {
            debug!(%location, %expected, "nothing to clean");
            return;
        };
        if !self.robot.clean(found, expected) {
            debug!(%location, %expected, %found, "wrong cleaner for this square");
            return;
        }

        if let Err(e) = self.grid.remove(key) {
            warn!(%e, %location, "cleaned entity was not in the grid");
            return;
        }
        self.robot.consume_liquid();
        self.cleaned += 1;
        info!(
            %location,
            kind = %found,
            liquid = self.robot.liquid(),
            remaining = self.grid.targets_remaining(),
            "cleaned"
        );

        if self.robot.liquid() == 0 {
            self.robot.return_home();
            info!(steps = self.robot.path().len(), "out of liquid, returned home");
        }
    }

    fn update_liveness(&mut self) {
        if self.robot.is_alive() && self.robot.liquid() == 0 && self.robot.is_home() {
            self.robot.power_down();
        }
    }
}

impl Environment for Room {
    type Action = Action;
    type Percept = Percept;
    type Score = i32;

    fn percept(&self) -> Self::Percept {
        perceive(&self.grid, self.robot.location(), self.robot.heading())
    }

    fn execute_action(&mut self, action: &Self::Action) {
        if !self.robot.is_alive() {
            return;
        }
        match *action {
            Action::TurnLeft => self.robot.turn(Turn::Left),
            Action::TurnRight => self.robot.turn(Turn::Right),
            Action::MoveForward => {
                self.robot.move_forward();
                if !self.grid.contains(self.robot.location()) {
                    warn!(location = %self.robot.location(), "robot left the room");
                }
            }
            Action::CleanStain | Action::CleanSpill => {
                if let Some(expected) = action.expected_target() {
                    self.clean(expected);
                }
            }
            Action::Approach(neighbor) => self.robot.approach(neighbor),
            Action::Retreat(neighbor) => self.robot.retreat(neighbor),
            Action::Dock => {
                if self.robot.is_home() {
                    info!(liquid = self.robot.liquid(), "docked");
                    self.robot.power_down();
                } else {
                    warn!(location = %self.robot.location(), "cannot dock away from home");
                }
            }
            Action::NoOp => {}
        }
        self.update_liveness();
    }

    fn score(&self) -> Self::Score {
        self.cleaned
    }

    fn is_done(&self) -> bool {
        !self.robot.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Location;
    use crate::heading::Heading;
    use crate::perception::Neighbor;

    fn room_with(targets: &[(EntityKind, Location)], liquid: u32) -> Room {
        let mut grid = Grid::new(5, 5);
        for (kind, location) in targets {
            grid.spawn(*kind, *location);
        }
        Room::new(grid, Robot::new(liquid))
    }

    #[test]
    fn test_room_returns_percept_of_robot_square() {
        let room = room_with(&[(EntityKind::Stain, Location::new(0, 1))], 1);
        let percept = room.percept();
        assert_eq!(percept.location, Location::ORIGIN);
        assert_eq!(percept.heading, Heading::Down);
        assert!(percept.here.is_empty());
        assert_eq!(percept.neighbor(Neighbor::Down), &[EntityKind::Stain]);
    }

    #[test]
    fn test_clean_removes_target_and_uses_liquid() {
        let mut room = room_with(
            &[
                (EntityKind::Stain, Location::ORIGIN),
                (EntityKind::Spill, Location::new(3, 3)),
            ],
            2,
        );
        room.execute_action(&Action::CleanStain);
        assert_eq!(room.cleaned(), 1);
        assert_eq!(room.score(), 1);
        assert_eq!(room.robot().liquid(), 1);
        assert!(room.grid().occupants(Location::ORIGIN).is_empty());
        assert!(!room.is_done());
    }

    #[test]
    fn test_clean_wrong_kind_does_nothing() {
        let mut room = room_with(&[(EntityKind::Stain, Location::ORIGIN)], 1);
        room.execute_action(&Action::CleanSpill);
        assert_eq!(room.cleaned(), 0);
        assert_eq!(room.robot().liquid(), 1);
        assert_eq!(room.grid().occupants(Location::ORIGIN), vec![EntityKind::Stain]);
    }

    #[test]
    fn test_last_clean_sends_robot_home() {
        let mut room = room_with(&[(EntityKind::Spill, Location::new(2, 3))], 1);
        room.execute_action(&Action::Approach(Neighbor::Right));
        room.execute_action(&Action::Approach(Neighbor::Right));
        for _ in 0..3 {
            room.execute_action(&Action::MoveForward);
        }
        assert_eq!(room.robot().location(), Location::new(2, 3));

        room.execute_action(&Action::CleanSpill);
        assert_eq!(room.robot().location(), Location::ORIGIN);
        assert_eq!(room.robot().heading(), Heading::Left);
        assert_eq!(room.robot().liquid(), 0);
        assert!(room.is_done());
    }

    #[test]
    fn test_clean_only_matches_first_target_on_square() {
        let mut room = room_with(
            &[
                (EntityKind::Person, Location::ORIGIN),
                (EntityKind::Stain, Location::ORIGIN),
                (EntityKind::Spill, Location::ORIGIN),
            ],
            2,
        );
        room.execute_action(&Action::CleanSpill);
        assert_eq!(room.cleaned(), 0);
        assert_eq!(room.robot().liquid(), 2);

        room.execute_action(&Action::CleanStain);
        assert_eq!(room.cleaned(), 1);
        assert_eq!(
            room.grid().occupants(Location::ORIGIN),
            vec![EntityKind::Person, EntityKind::Spill]
        );

        room.execute_action(&Action::CleanSpill);
        assert_eq!(room.cleaned(), 2);
        assert_eq!(room.robot().liquid(), 0);
        assert!(room.is_done());
    }

    #[test]
    fn test_dead_robot_ignores_actions() {
        let mut room = room_with(&[], 0);
        assert!(room.is_done());
        room.execute_action(&Action::MoveForward);
        assert_eq!(room.robot().location(), Location::ORIGIN);
    }

    #[test]
    fn test_dock_only_at_home() {
        let mut room = room_with(&[(EntityKind::Stain, Location::new(4, 4))], 1);
        room.execute_action(&Action::MoveForward);
        room.execute_action(&Action::Dock);
        assert!(!room.is_done());
        room.execute_action(&Action::Approach(Neighbor::Up));
        room.execute_action(&Action::Dock);
        assert!(room.is_done());
    }

    #[test]
    fn test_unknown_action_names_are_ignored() {
        let mut room = room_with(&[(EntityKind::Stain, Location::new(4, 4))], 1);
        let before = room.snapshot();
        room.execute_named("vacuum-everything");
        assert_eq!(room.snapshot(), before);
        room.execute_named("move-forward");
        assert_eq!(room.robot().location(), Location::new(0, 1));
    }

    #[test]
    fn test_snapshot_reflects_grid() {
        let room = room_with(&[(EntityKind::Person, Location::new(1, 2))], 1);
        let snapshot = room.snapshot();
        assert_eq!(snapshot.width, 5);
        assert_eq!(snapshot.height, 5);
        assert_eq!(snapshot.robot, Location::ORIGIN);
        assert_eq!(snapshot.cells[2][1], vec![EntityKind::Person]);
    }
}
