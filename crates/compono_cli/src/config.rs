//! Configuration file support.
//!
//! Settings are layered: command-line flags (and their environment
//! variables) win over `compono.toml`, which wins over built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use compono_diagram::{RankDir, RenderOptions};
use compono_input::DEFAULT_EXTENSIONS;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::args::Cli;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "compono.toml";

/// Input directory used when neither the CLI nor the config names one.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of `compono.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: InputConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Directory containing the architecture documents
    pub dir: Option<PathBuf>,
    /// File extensions to collect, without the leading dot
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub team_legend: Option<bool>,
    pub style_by_team: Option<bool>,
    pub rank_dir: Option<RankDir>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// read from the working directory if present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::read(default)
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub extensions: Vec<String>,
    pub options: RenderOptions,
}

impl Settings {
    /// Merge command-line arguments over the config file.
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let input_dir = cli
            .input
            .clone()
            .or(config.input.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let extensions = config
            .input
            .extensions
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect());

        let defaults = RenderOptions::default();
        let options = RenderOptions {
            include_team_legend: !cli.no_legend
                && config.render.team_legend.unwrap_or(defaults.include_team_legend),
            style_by_team: !cli.no_team_style
                && config.render.style_by_team.unwrap_or(defaults.style_by_team),
            rank_dir: cli
                .rank_dir
                .or(config.render.rank_dir)
                .unwrap_or(defaults.rank_dir),
        };

        Self {
            input_dir,
            extensions,
            options,
        }
    }
}
