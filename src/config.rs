use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATA_PATH: &str = "data/hotel_reviews.csv";
pub const DEFAULT_NUMBER_ROWS: usize = 100_000;

/// Slider ranges of the dashboard controls.
pub const REVIEW_COUNT_RANGE: (usize, usize) = (0, 1000);
pub const AVG_SCORE_RANGE: (f64, f64) = (0.0, 10.0);
pub const REVIEW_SCORE_RANGE: (u8, u8) = (0, 10);

/// Initial map camera, centred on Milan.
pub const MAP_CENTER: (f64, f64) = (45.4642, 9.1900);
pub const MAP_ZOOM: f64 = 12.0;
pub const MAP_PITCH: f64 = 45.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub number_rows: usize,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            number_rows: DEFAULT_NUMBER_ROWS,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read `HOTEL_REVIEWS_PATH`, `HOTEL_REVIEWS_ROWS` and
    /// `HOTEL_REVIEWS_EXPORT_DIR`; a first positional argument replaces the
    /// data path.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok(), std::env::args().nth(1))
    }

    pub fn from_lookup<F>(lookup: F, path_arg: Option<String>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();
        if let Some(p) = lookup("HOTEL_REVIEWS_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.data_path = PathBuf::from(p);
        }
        if let Some(v) = lookup("HOTEL_REVIEWS_ROWS") {
            cfg.number_rows = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                var: "HOTEL_REVIEWS_ROWS",
                value: v.clone(),
            })?;
        }
        if let Some(d) = lookup("HOTEL_REVIEWS_EXPORT_DIR").filter(|d| !d.trim().is_empty()) {
            cfg.export_dir = PathBuf::from(d);
        }
        if let Some(p) = path_arg {
            cfg.data_path = PathBuf::from(p);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = Config::from_lookup(lookup(&[]), None).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.number_rows, 100_000);
    }

    #[test]
    fn env_and_argument_override() {
        let cfg = Config::from_lookup(
            lookup(&[
                ("HOTEL_REVIEWS_PATH", "env.csv"),
                ("HOTEL_REVIEWS_ROWS", " 500 "),
                ("HOTEL_REVIEWS_EXPORT_DIR", "out"),
            ]),
            Some("arg.csv".to_string()),
        )
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("arg.csv"));
        assert_eq!(cfg.number_rows, 500);
        assert_eq!(cfg.export_dir, PathBuf::from("out"));
    }

    #[test]
    fn rejects_bad_row_limit() {
        let err =
            Config::from_lookup(lookup(&[("HOTEL_REVIEWS_ROWS", "lots")]), None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: "HOTEL_REVIEWS_ROWS",
                value: "lots".to_string()
            }
        );
    }
}
