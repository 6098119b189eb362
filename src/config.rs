//! Settings read from a YAML file
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::info;
use serde::{Deserialize, Serialize};
use crate::chess::ZobristKeys;
use crate::chess::position::zobrist::DEFAULT_SEED;
use crate::engine::{CacheConfig, MoveOrderingHistory, ResultCache};

/// Name of the directory, under the home directory, holding the default configuration
pub const APP_DIR: &str = ".chesscore";

/// Name of the default configuration file
pub const CONFIG_FILE: &str = "config.yaml";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type for reading a configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file couldn't be read
    Io(PathBuf, io::Error),
    /// The file isn't valid configuration YAML
    Yaml(PathBuf, serde_yaml::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, err) => write!(f, "{}: {}", path.display(), err),
            ConfigError::Yaml(path, err) => write!(f, "{}: {}", path.display(), err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, err) => Some(err),
            ConfigError::Yaml(_, err) => Some(err),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings for the hashing, caching and ordering structures. Missing fields take their default
/// values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for the Zobrist keys. Cached results are only meaningful between runs with the same
    /// seed.
    pub zobrist_seed: u64,
    /// Number of plies a search looks ahead
    pub search_depth: usize,
    /// Result cache settings
    pub cache: CacheConfig,
    /// An opening book in YAML, if any
    pub book: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            zobrist_seed: DEFAULT_SEED,
            search_depth: CacheConfig::default().max_depth,
            cache: CacheConfig::default(),
            book: None,
        }
    }
}

impl Config {
    /// Returns the path of the default configuration file, `~/.chesscore/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Reads the configuration from `path`
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let s = read_to_string(path).map_err(|err| ConfigError::Io(path.to_owned(), err))?;
        let config = Config::from_yaml(&s).map_err(|err| ConfigError::Yaml(path.to_owned(), err))?;
        info!("configuration read from {}", path.display());
        Ok(config)
    }

    /// Reads the configuration from `path` if given. Otherwise reads the default file if it
    /// exists, or uses the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Config::load(path),
            None => match Config::default_path() {
                Some(path) if path.is_file() => Config::load(&path),
                _ => Ok(Config::default()),
            },
        }
    }

    /// Parses configuration YAML
    pub fn from_yaml(s: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Draws the Zobrist keys for the configured seed
    pub fn zobrist_keys(&self) -> Arc<ZobristKeys> {
        Arc::new(ZobristKeys::new(self.zobrist_seed))
    }

    /// Creates an empty result cache with the configured settings
    pub fn result_cache(&self) -> ResultCache {
        ResultCache::new(self.cache)
    }

    /// Creates an empty move-ordering history sized for the search depth
    pub fn move_ordering_history(&self) -> MoveOrderingHistory {
        MoveOrderingHistory::new(self.search_depth)
    }
}
