use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::reservations::SWEEP_INTERVAL;

const DEFAULT_DATA_DIR: &str = ".findmyspot";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding persisted reservations, user id and login state.
    pub data_dir: PathBuf,
    /// Lot definitions to load instead of the built-in set.
    pub lots_file: Option<PathBuf>,
    pub sweep_interval: Duration,
    pub require_login: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            lots_file: None,
            sweep_interval: SWEEP_INTERVAL,
            require_login: true,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let data_dir = lookup("FINDMYSPOT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let lots_file = lookup("FINDMYSPOT_LOTS_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let sweep_interval = match lookup("FINDMYSPOT_SWEEP_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .context("Invalid FINDMYSPOT_SWEEP_SECS")?;
                if secs == 0 {
                    bail!("FINDMYSPOT_SWEEP_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => defaults.sweep_interval,
        };

        let require_login = match lookup("FINDMYSPOT_REQUIRE_LOGIN") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .context("Invalid FINDMYSPOT_REQUIRE_LOGIN")?,
            None => defaults.require_login,
        };

        Ok(Self {
            data_dir,
            lots_file,
            sweep_interval,
            require_login,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".findmyspot"));
        assert_eq!(config.lots_file, None);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert!(config.require_login);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("FINDMYSPOT_DATA_DIR", "/tmp/fms"),
            ("FINDMYSPOT_LOTS_FILE", "lots.json"),
            ("FINDMYSPOT_SWEEP_SECS", " 5 "),
            ("FINDMYSPOT_REQUIRE_LOGIN", "false"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/fms"));
        assert_eq!(config.lots_file, Some(PathBuf::from("lots.json")));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert!(!config.require_login);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config(&[("FINDMYSPOT_SWEEP_SECS", "soon")]).is_err());
        assert!(config(&[("FINDMYSPOT_SWEEP_SECS", "0")]).is_err());
        assert!(config(&[("FINDMYSPOT_REQUIRE_LOGIN", "maybe")]).is_err());
    }
}
