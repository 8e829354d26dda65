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

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::heading::Turn;
use crate::perception::Neighbor;

/// Everything the robot can be told to do in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    TurnLeft,
    TurnRight,
    MoveForward,

    /// Clean a stain on the robot's own square.
    CleanStain,

    /// Clean a spill on the robot's own square.
    CleanSpill,

    /// Step onto a neighbouring square, keeping the current heading.
    Approach(Neighbor),

    /// Step back from a neighbouring square. `Retreat(d)` undoes `Approach(d.opposite())`.
    Retreat(Neighbor),

    /// Power down. Only honoured at the origin.
    Dock,

    NoOp,
}

impl Action {
    pub fn turn(turn: Turn) -> Action {
        match turn {
            Turn::Left => Action::TurnLeft,
            Turn::Right => Action::TurnRight,
        }
    }

    /// The clean action for a target kind.
    pub fn clean(kind: EntityKind) -> Option<Action> {
        match kind {
            EntityKind::Stain => Some(Action::CleanStain),
            EntityKind::Spill => Some(Action::CleanSpill),
            EntityKind::Person | EntityKind::Bump => None,
        }
    }

    /// The target kind a clean action expects to find, if this is a clean action.
    pub fn expected_target(self) -> Option<EntityKind> {
        match self {
            Action::CleanStain => Some(EntityKind::Stain),
            Action::CleanSpill => Some(EntityKind::Spill),
            _ => None,
        }
    }

    /// The pair of actions that visits a neighbour and comes back.
    pub fn detour(neighbor: Neighbor) -> [Action; 2] {
        [
            Action::Approach(neighbor),
            Action::Retreat(neighbor.opposite()),
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::TurnLeft => write!(f, "turn-left"),
            Action::TurnRight => write!(f, "turn-right"),
            Action::MoveForward => write!(f, "move-forward"),
            Action::CleanStain => write!(f, "clean-stain"),
            Action::CleanSpill => write!(f, "clean-spill"),
            Action::Approach(neighbor) => write!(f, "approach-{}", neighbor.name()),
            Action::Retreat(neighbor) => write!(f, "retreat-{}", neighbor.name()),
            Action::Dock => write!(f, "dock"),
            Action::NoOp => write!(f, "no-op"),
        }
    }
}

/// The action name is not part of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0:?}")]
pub struct ActionParseError(pub String);

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "turn-left" => Action::TurnLeft,
            "turn-right" => Action::TurnRight,
            "move-forward" => Action::MoveForward,
            "clean-stain" => Action::CleanStain,
            "clean-spill" => Action::CleanSpill,
            "dock" => Action::Dock,
            "no-op" => Action::NoOp,
            _ => {
                if let Some(neighbor) = s.strip_prefix("approach-").and_then(Neighbor::from_name) {
                    Action::Approach(neighbor)
                } else if let Some(neighbor) =
                    s.strip_prefix("retreat-").and_then(Neighbor::from_name)
                {
                    Action::Retreat(neighbor)
                } else {
                    return Err(ActionParseError(s.to_string()));
                }
            }
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        let mut actions = vec![
            Action::TurnLeft,
            Action::TurnRight,
            Action::MoveForward,
            Action::CleanStain,
            Action::CleanSpill,
            Action::Dock,
            Action::NoOp,
        ];
        for neighbor in Neighbor::ALL {
            actions.extend(Action::detour(neighbor));
        }
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_unknown_names_are_rejected() {
        assert!("jump".parse::<Action>().is_err());
        assert!("approach-sideways".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_detour_pairs_come_back() {
        assert_eq!(
            Action::detour(Neighbor::UpLeft),
            [
                Action::Approach(Neighbor::UpLeft),
                Action::Retreat(Neighbor::DownRight)
            ]
        );
    }

    #[test]
    fn test_clean_actions_match_targets() {
        assert_eq!(Action::clean(EntityKind::Stain), Some(Action::CleanStain));
        assert_eq!(Action::clean(EntityKind::Person), None);
        assert_eq!(Action::CleanSpill.expected_target(), Some(EntityKind::Spill));
        assert_eq!(Action::MoveForward.expected_target(), None);
    }
}
