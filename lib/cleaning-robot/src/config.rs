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

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::planner::Mode;
use crate::scenario::ScenarioConfig;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("max_ticks must be positive, got {0}")]
    NoTicks(i32),
}

/// Settings for one simulation run. Every field has a default, so a config file only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Hard ceiling on ticks before the run is stopped.
    pub max_ticks: i32,

    pub mode: Mode,

    /// Seeds both the scenario and the planner.
    pub seed: u64,

    /// Liquid to start with. `None` means exactly one unit per target.
    pub liquid: Option<u32>,

    pub scenario: ScenarioConfig,
}

impl SimulationConfig {
    fn new(
        max_ticks: i32,
        mode: Mode,
        seed: u64,
        liquid: Option<u32>,
        scenario: ScenarioConfig,
    ) -> Self {
        Self {
            max_ticks,
            mode,
            seed,
            liquid,
            scenario,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ticks <= 0 {
            return Err(ConfigError::NoTicks(self.max_ticks));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(5000, Mode::Optimal, 42, None, ScenarioConfig::default())
    }
}
