//! Optional `snake.toml` in the working directory. Every key is optional and
//! a missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::TermInt;
use crate::error::{Error, Result};
use crate::snake::DEFAULT_STEP;

pub const CONFIG_FILE: &str = "snake.toml";

pub const DEFAULT_MARGIN: TermInt = 20;
pub const DEFAULT_LOG_FILE: &str = "snake.log";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    step: Option<usize>,
    margin: Option<TermInt>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Body slots are added `2 * step` at a time.
    pub step: usize,
    pub margin: TermInt,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Fixed RNG seed, OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            step: DEFAULT_STEP,
            margin: DEFAULT_MARGIN,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!("{}: {}", path.display(), e))),
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let file: FileConfig = toml::from_str(contents)
            .map_err(|e| Error::Config(e.to_string()))?;
        let defaults = Self::default();

        let step = match file.step {
            Some(0) => return Err(Error::Config("step must be at least 1".into())),
            Some(step) => step,
            None => defaults.step,
        };

        let log_level = match file.log_level {
            Some(level) => level.parse::<LevelFilter>()
                .map_err(|_| Error::Config(format!("unknown log level '{}'", level)))?,
            None => defaults.log_level,
        };

        Ok(Config {
            step,
            margin: file.margin.unwrap_or(defaults.margin),
            log_file: file.log_file.unwrap_or(defaults.log_file),
            log_level,
            seed: file.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("definitely/not/here/snake.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn all_keys_are_read() {
        let config = Config::parse(r#"
            step = 3
            margin = 4
            log_file = "/tmp/s.log"
            log_level = "debug"
            seed = 42
        "#).unwrap();

        assert_eq!(config.step, 3);
        assert_eq!(config.margin, 4);
        assert_eq!(config.log_file, PathBuf::from("/tmp/s.log"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(Config::parse("step = 0"), Err(Error::Config(_))));
        assert!(matches!(Config::parse("log_level = \"loud\""), Err(Error::Config(_))));
        assert!(matches!(Config::parse("speed = 2"), Err(Error::Config(_))));
        assert!(matches!(Config::parse("step = "), Err(Error::Config(_))));
    }
}
