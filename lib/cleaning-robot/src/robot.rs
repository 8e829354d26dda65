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

//! The robot's body: where it is, which way it faces, and how much cleaning liquid is left.
//!
//! The body trusts its caller. Nothing here checks the room's bounds; the planner only moves
//! forward when perception reported no bump.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::entity::EntityKind;
use crate::grid::Location;
use crate::heading::{Heading, Turn};
use crate::perception::Neighbor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    location: Location,
    heading: Heading,
    liquid: u32,
    path: Vec<Location>,
    alive: bool,
}

impl Robot {
    /// A robot at the origin, facing down.
    pub fn new(liquid: u32) -> Self {
        Self::at(Location::ORIGIN, Heading::Down, liquid)
    }

    fn at(location: Location, heading: Heading, liquid: u32) -> Self {
        Self {
            location,
            heading,
            liquid,
            path: vec![location],
            alive: true,
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn liquid(&self) -> u32 {
        self.liquid
    }

    /// Every square the robot has stood on, starting square first.
    pub fn path(&self) -> &[Location] {
        &self.path
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_home(&self) -> bool {
        self.location == Location::ORIGIN
    }

    pub fn power_down(&mut self) {
        self.alive = false;
    }

    /// One square ahead.
    pub fn move_forward(&mut self) {
        self.location = self.heading.forward(self.location);
        self.path.push(self.location);
        trace!(location = %self.location, heading = %self.heading, "moved");
    }

    pub fn turn(&mut self, turn: Turn) {
        self.heading = self.heading.rotate(turn);
    }

    /// Turn on the spot until facing `heading`. Returns the number of turns taken.
    pub fn face(&mut self, heading: Heading) -> usize {
        let turns = self.heading.turns_to(heading);
        for turn in &turns {
            self.turn(*turn);
        }
        turns.len()
    }

    /// Use up one unit of liquid. Running dry is a planner bug; the level stays at zero.
    pub fn consume_liquid(&mut self) {
        match self.liquid.checked_sub(1) {
            Some(liquid) => self.liquid = liquid,
            None => warn!(location = %self.location, "tried to use liquid with none left"),
        }
    }

    /// Whether `found` is what a clean action aimed at `expected` can clean.
    pub fn clean(&self, found: EntityKind, expected: EntityKind) -> bool {
        expected.is_target() && found == expected
    }

    /// Step onto a neighbouring square and face the way it was facing before.
    ///
    /// Diagonal neighbours are reached vertically first.
    pub fn approach(&mut self, neighbor: Neighbor) {
        let legs = [neighbor.vertical(), neighbor.horizontal()];
        self.walk_legs(legs.into_iter().flatten());
    }

    /// Step back from a neighbouring square, horizontally first, so that
    /// `retreat(d.opposite())` retraces `approach(d)`.
    pub fn retreat(&mut self, neighbor: Neighbor) {
        let legs = [neighbor.horizontal(), neighbor.vertical()];
        self.walk_legs(legs.into_iter().flatten());
    }

    fn walk_legs(&mut self, legs: impl Iterator<Item = Heading>) {
        let resume = self.heading;
        for leg in legs {
            self.face(leg);
            self.move_forward();
        }
        self.face(resume);
    }

    /// Drive straight back to the origin: up to row 0, then left to column 0. Ends facing left.
    pub fn return_home(&mut self) {
        self.face(Heading::Up);
        for _ in 0..self.location.row {
            self.move_forward();
        }
        self.turn(Turn::Left);
        for _ in 0..self.location.col {
            self.move_forward();
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn any_heading() -> impl Strategy<Value = Heading> {
        prop::sample::select(Heading::ALL.to_vec())
    }

    fn any_neighbor() -> impl Strategy<Value = Neighbor> {
        prop::sample::select(Neighbor::ALL.to_vec())
    }

    #[test]
    fn test_new_robot_starts_at_origin_facing_down() {
        let robot = Robot::new(3);
        assert_eq!(robot.location(), Location::ORIGIN);
        assert_eq!(robot.heading(), Heading::Down);
        assert_eq!(robot.liquid(), 3);
        assert_eq!(robot.path(), &[Location::ORIGIN]);
        assert!(robot.is_alive());
    }

    #[test]
    fn test_move_forward_records_path() {
        let mut robot = Robot::new(1);
        robot.move_forward();
        robot.turn(Turn::Left);
        robot.move_forward();
        assert_eq!(robot.location(), Location::new(1, 1));
        assert_eq!(
            robot.path(),
            &[Location::ORIGIN, Location::new(0, 1), Location::new(1, 1)]
        );
    }

    #[test]
    fn test_consume_liquid_clamps_at_zero() {
        let mut robot = Robot::new(1);
        robot.consume_liquid();
        assert_eq!(robot.liquid(), 0);
        robot.consume_liquid();
        assert_eq!(robot.liquid(), 0);
    }

    #[test]
    fn test_clean_matches_expected_kind_only() {
        let robot = Robot::new(1);
        assert!(robot.clean(EntityKind::Stain, EntityKind::Stain));
        assert!(robot.clean(EntityKind::Spill, EntityKind::Spill));
        assert!(!robot.clean(EntityKind::Spill, EntityKind::Stain));
        assert!(!robot.clean(EntityKind::Person, EntityKind::Person));
    }

    #[test]
    fn test_return_home_from_each_heading() {
        for heading in Heading::ALL {
            let mut robot = Robot::at(Location::new(4, 6), heading, 0);
            robot.return_home();
            assert_eq!(robot.location(), Location::ORIGIN);
            assert_eq!(robot.heading(), Heading::Left);
            // 6 squares up, 4 squares left, plus the starting square.
            assert_eq!(robot.path().len(), 11);
        }
    }

    #[test]
    fn test_diagonal_approach_goes_vertical_first() {
        let mut robot = Robot::at(Location::new(2, 2), Heading::Right, 1);
        robot.approach(Neighbor::DownLeft);
        assert_eq!(
            robot.path(),
            &[Location::new(2, 2), Location::new(2, 3), Location::new(1, 3)]
        );
        assert_eq!(robot.heading(), Heading::Right);
    }

    proptest! {
        #[test]
        fn test_detour_returns_to_start(
            heading in any_heading(),
            neighbor in any_neighbor(),
        ) {
            let start = Location::new(5, 5);
            let mut robot = Robot::at(start, heading, 1);
            robot.approach(neighbor);
            prop_assert_eq!(robot.location(), neighbor.of(start));
            prop_assert_eq!(robot.heading(), heading);
            robot.retreat(neighbor.opposite());
            prop_assert_eq!(robot.location(), start);
            prop_assert_eq!(robot.heading(), heading);
        }

        #[test]
        fn test_detour_stays_next_to_start(
            heading in any_heading(),
            neighbor in any_neighbor(),
        ) {
            let start = Location::new(5, 5);
            let mut robot = Robot::at(start, heading, 1);
            robot.approach(neighbor);
            robot.retreat(neighbor.opposite());
            for step in robot.path() {
                prop_assert!((step.col - start.col).abs() <= 1);
                prop_assert!((step.row - start.row).abs() <= 1);
            }
        }
    }
}
