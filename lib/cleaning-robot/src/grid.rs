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

//! The room's floor: a bounded grid of cells, each holding zero or more entities.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::entity::{Entity, EntityKind};

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;

new_key_type! {
    /// Identifies one entity instance for as long as it is in the grid.
    pub struct EntityKey;
}

/// A cell coordinate. Signed so that cells just past an edge can be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub col: i32,
    pub row: i32,
}

impl Location {
    /// Where the robot starts and must end.
    pub const ORIGIN: Location = Location { col: 0, row: 0 };

    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Grid error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The key does not name an entity in this grid, e.g. it was already cleaned.
    #[error("no such entity in the grid: {0:?}")]
    UnknownEntity(EntityKey),
}

/// Bounded grid. Bounds are answered by [`Grid::contains`] but not enforced on placement; callers
/// decide what to do at the edge.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    entities: SlotMap<EntityKey, Entity>,
    cells: HashMap<Location, Vec<EntityKey>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            entities: SlotMap::with_key(),
            cells: HashMap::default(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `location` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, location: Location) -> bool {
        (0..self.width).contains(&location.col) && (0..self.height).contains(&location.row)
    }

    /// Store a new entity on top of whatever is already at `location`. Every call mints a fresh
    /// key, so no instance can be filed under a cell twice.
    pub fn spawn(&mut self, kind: EntityKind, location: Location) -> EntityKey {
        let key = self.entities.insert(Entity { kind, location });
        self.cells.entry(location).or_default().push(key);
        key
    }

    /// Take an entity out of the grid.
    pub fn remove(&mut self, key: EntityKey) -> Result<Entity, GridError> {
        let entity = self
            .entities
            .remove(key)
            .ok_or(GridError::UnknownEntity(key))?;
        if let Some(bucket) = self.cells.get_mut(&entity.location) {
            bucket.retain(|k| *k != key);
            if bucket.is_empty() {
                self.cells.remove(&entity.location);
            }
        }
        Ok(entity)
    }

    /// Kinds at `location`, bottom first. Empty for cells outside the grid.
    pub fn occupants(&self, location: Location) -> Vec<EntityKind> {
        self.keys_at(location)
            .iter()
            .filter_map(|key| self.entities.get(*key))
            .map(|entity| entity.kind)
            .collect()
    }

    /// Keys at `location`, bottom first.
    pub fn keys_at(&self, location: Location) -> &[EntityKey] {
        self.cells.get(&location).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bottom-most entity at `location` that can be cleaned, with its kind.
    pub fn first_target_at(&self, location: Location) -> Option<(EntityKey, EntityKind)> {
        self.keys_at(location)
            .iter()
            .filter_map(|key| self.entities.get(*key).map(|entity| (*key, entity.kind)))
            .find(|(_, kind)| kind.is_target())
    }

    /// Number of entities still waiting to be cleaned.
    pub fn targets_remaining(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.kind.is_target())
            .count()
    }

    /// Row-major table of occupant kinds, `height` rows of `width` cells.
    pub fn occupancy(&self) -> Vec<Vec<Vec<EntityKind>>> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.occupants(Location::new(col, row)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(4, 3);
        assert!(grid.entities.is_empty());
        for row in 0..3 {
            for col in 0..4 {
                assert!(grid.occupants(Location::new(col, row)).is_empty());
            }
        }
    }

    #[test]
    fn test_contains_is_half_open() {
        let grid = Grid::new(4, 3);
        assert!(grid.contains(Location::new(0, 0)));
        assert!(grid.contains(Location::new(3, 2)));
        assert!(!grid.contains(Location::new(4, 2)));
        assert!(!grid.contains(Location::new(3, 3)));
        assert!(!grid.contains(Location::new(-1, 0)));
        assert!(!grid.contains(Location::new(0, -1)));
    }

    #[test]
    fn test_occupants_keep_insertion_order() {
        let mut grid = Grid::new(3, 3);
        let here = Location::new(1, 1);
        grid.spawn(EntityKind::Person, here);
        grid.spawn(EntityKind::Stain, here);
        assert_eq!(
            grid.occupants(here),
            vec![EntityKind::Person, EntityKind::Stain]
        );
    }

    #[test]
    fn test_remove_twice_is_an_error() {
        let mut grid = Grid::new(3, 3);
        let key = grid.spawn(EntityKind::Spill, Location::new(2, 0));
        let removed = grid.remove(key).expect("remove failed");
        assert_eq!(removed.location, Location::new(2, 0));
        assert!(grid.occupants(Location::new(2, 0)).is_empty());
        assert_eq!(grid.remove(key), Err(GridError::UnknownEntity(key)));
    }

    #[test]
    fn test_spawn_mints_distinct_instances() {
        let mut grid = Grid::new(3, 3);
        let here = Location::new(1, 2);
        let first = grid.spawn(EntityKind::Stain, here);
        let second = grid.spawn(EntityKind::Stain, here);
        assert_ne!(first, second);
        assert_eq!(grid.keys_at(here), &[first, second]);
        assert_eq!(grid.entities.get(second).map(|e| e.location), Some(here));
    }

    #[test]
    fn test_first_target_and_targets_remaining() {
        let mut grid = Grid::new(5, 5);
        let here = Location::new(3, 4);
        grid.spawn(EntityKind::Person, Location::new(1, 1));
        let spill = grid.spawn(EntityKind::Spill, here);
        grid.spawn(EntityKind::Stain, Location::new(0, 4));
        assert_eq!(grid.targets_remaining(), 2);
        assert_eq!(grid.first_target_at(here), Some((spill, EntityKind::Spill)));
        assert_eq!(grid.first_target_at(Location::new(1, 1)), None);
    }

    #[test]
    fn test_occupancy_table_is_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.spawn(EntityKind::Stain, Location::new(2, 1));
        let table = grid.occupancy();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].len(), 3);
        assert_eq!(table[1][2], vec![EntityKind::Stain]);
    }
}
