// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration file (`tsexam.toml`) and settings used to check catalogs.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::args::CheckArgs;

pub const CONFIG_FILE_NAME: &str = "tsexam.toml";

pub const DEFAULT_DIR: &str = "src/translation";
pub const DEFAULT_EXTENSION: &str = "ts";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config file {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default)]
    pub github: GithubConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    pub dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub select: Option<Vec<String>>,
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub skip_obsolete: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubConfig {
    pub api_url: Option<String>,
    /// Timeout for each request, in seconds.
    pub timeout: Option<u64>,
}

impl Config {
    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        if self
            .check
            .extension
            .as_deref()
            .is_some_and(|ext| ext.is_empty() || ext.contains('.'))
        {
            return Err(invalid("check.extension must be a non-empty extension without dot"));
        }
        if self.github.timeout == Some(0) {
            return Err(invalid("github.timeout must be greater than 0"));
        }
        Ok(())
    }
}

/// Load the config file given on command line, or `tsexam.toml` in the current
/// directory if it exists, otherwise return the default config.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return Config::from_file(path);
    }
    let default_path = Path::new(CONFIG_FILE_NAME);
    if default_path.is_file() {
        Config::from_file(default_path)
    } else {
        Ok(Config::default())
    }
}

/// Split a comma-separated list of names.
fn split_names(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Settings used to check catalogs: command-line arguments, then config file, then
/// default values.
#[derive(Debug, Default)]
pub struct Settings {
    pub dir: PathBuf,
    pub extension: String,
    pub select: Option<Vec<String>>,
    pub ignore: Vec<String>,
    pub skip_obsolete: bool,
    pub api_url: String,
    pub timeout: Duration,
}

impl Settings {
    pub fn new(args: &CheckArgs, config: Config) -> Self {
        let Config { check, github } = config;
        Self {
            dir: args
                .dir
                .clone()
                .or(check.dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR)),
            extension: check
                .extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            select: args.select.as_deref().map(split_names).or(check.select),
            ignore: args
                .ignore
                .as_deref()
                .map_or(check.ignore, split_names),
            skip_obsolete: args.skip_obsolete || check.skip_obsolete,
            api_url: args
                .github_api_url
                .clone()
                .or(github.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(github.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
