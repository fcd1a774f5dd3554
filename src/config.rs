//! `daoml.toml`: defaults for reverse parsing and logging.
//!
//! ```toml
//! [parse]
//! stripWhitespace = true
//! trim = true
//!
//! [log]
//! level = "debug"
//! ```

use crate::error::CliError;
use dao::Flags;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "daoml.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parse: Flags,
    pub log: LogConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: Option<String>,
}

impl Config {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `explicit` when given, otherwise `daoml.toml` in the working
    /// directory if there is one.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Config::default());
                }
                default
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text, &path)
    }

    pub fn level(&self) -> Result<Option<LevelFilter>, CliError> {
        self.log
            .level
            .as_deref()
            .map(|level| {
                level
                    .parse()
                    .map_err(|_| CliError::LogLevel(level.to_string()))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Config, CliError> {
        Config::from_toml(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn parse_table_uses_flag_option_names() {
        let config = parse("[parse]\nstripWhitespace = true\njQueryLive = true\n").unwrap();
        assert_eq!(config.parse.bits(), Flags::STRIP_WHITESPACE | Flags::RETAIN_LIVE);
    }

    #[test]
    fn parse_accepts_a_bitmask() {
        let config = parse("parse = 3\n").unwrap();
        assert_eq!(config.parse, Flags::from_bits(3));
    }

    #[test]
    fn log_level_is_validated() {
        let config = parse("[log]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.level().unwrap(), Some(LevelFilter::Debug));
        let bad = parse("[log]\nlevel = \"loud\"\n").unwrap();
        assert!(matches!(bad.level(), Err(CliError::LogLevel(_))));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(matches!(parse("[render]\nfast = true\n"), Err(CliError::Config { .. })));
    }
}
