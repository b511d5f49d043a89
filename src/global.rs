//! Process-wide evaluation settings.
//!
//! Settings are read from a TOML document of the form
//! ```toml
//! radical_denominator_cutoff = 12
//! pairwise_table = true
//! memoize_series = true
//! log_level = "info"
//! ```
//! Missing keys keep their defaults. The settings are installed once with `set_config`
//! and read by the evaluators through `config()`; defaults apply if nothing was installed.

use crate::symbolic::symbolic_traits::SymbolicError;
use log::{LevelFilter, info};
use std::path::Path;
use std::sync::{LazyLock, RwLock};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrigConfig {
    /// Largest denominator `q` for which `cos(p*pi/q)` is put in radicals at construction.
    pub radical_denominator_cutoff: u64,
    /// Use `cos(a - b)` splits for `q` in 12, 15, 20, 24, 30, 40, 60, 120.
    pub pairwise_table: bool,
    /// Cache Taylor coefficients.
    pub memoize_series: bool,
    /// One of "off", "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

impl Default for TrigConfig {
    fn default() -> Self {
        TrigConfig {
            radical_denominator_cutoff: 12,
            pairwise_table: true,
            memoize_series: true,
            log_level: "info".to_string(),
        }
    }
}

impl TrigConfig {
    pub fn from_toml_str(text: &str) -> Result<TrigConfig, SymbolicError> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| SymbolicError::Config(e.to_string()))?;
        let mut config = TrigConfig::default();
        for (key, value) in table.iter() {
            match key.as_str() {
                "radical_denominator_cutoff" => {
                    let n = value
                        .as_integer()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid(key, "a positive integer"))?;
                    config.radical_denominator_cutoff = n as u64;
                }
                "pairwise_table" => {
                    config.pairwise_table = value.as_bool().ok_or_else(|| invalid(key, "a boolean"))?;
                }
                "memoize_series" => {
                    config.memoize_series = value.as_bool().ok_or_else(|| invalid(key, "a boolean"))?;
                }
                "log_level" => {
                    let level = value.as_str().ok_or_else(|| invalid(key, "a string"))?;
                    parse_level(level)?;
                    config.log_level = level.to_string();
                }
                other => {
                    return Err(SymbolicError::Config(format!("unknown key {}", other)));
                }
            }
        }
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<TrigConfig, SymbolicError> {
        let text = std::fs::read_to_string(path)?;
        TrigConfig::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> String {
        let mut table = toml::Table::new();
        table.insert(
            "radical_denominator_cutoff".to_string(),
            toml::Value::Integer(self.radical_denominator_cutoff as i64),
        );
        table.insert("pairwise_table".to_string(), toml::Value::Boolean(self.pairwise_table));
        table.insert("memoize_series".to_string(), toml::Value::Boolean(self.memoize_series));
        table.insert("log_level".to_string(), toml::Value::String(self.log_level.clone()));
        table.to_string()
    }

    pub fn level_filter(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn invalid(key: &str, expected: &str) -> SymbolicError {
    SymbolicError::Config(format!("{} must be {}", key, expected))
}

fn parse_level(level: &str) -> Result<LevelFilter, SymbolicError> {
    match level {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(SymbolicError::Config(format!(
            "log_level must be off, error, warn, info, debug or trace, got {}",
            other
        ))),
    }
}

static CONFIG: LazyLock<RwLock<TrigConfig>> = LazyLock::new(|| RwLock::new(TrigConfig::default()));

/// Settings currently in force.
pub fn config() -> TrigConfig {
    match CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_config(new: TrigConfig) {
    info!("installing trig config: {:?}", new);
    match CONFIG.write() {
        Ok(mut guard) => *guard = new,
        Err(poisoned) => *poisoned.into_inner() = new,
    }
}

/// Reads `path` and installs it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrigConfig, SymbolicError> {
    let loaded = TrigConfig::from_file(path)?;
    set_config(loaded.clone());
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let c = TrigConfig::default();
        assert_eq!(c.radical_denominator_cutoff, 12);
        assert!(c.pairwise_table);
        assert!(c.memoize_series);
        assert_eq!(c.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_document() {
        let c = TrigConfig::from_toml_str("radical_denominator_cutoff = 17\n").unwrap();
        assert_eq!(c.radical_denominator_cutoff, 17);
        assert!(c.pairwise_table);
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(
            TrigConfig::from_toml_str("radical_denominator_cutoff = -1"),
            Err(SymbolicError::Config(_))
        ));
        assert!(matches!(TrigConfig::from_toml_str("pairwise_table = 3"), Err(SymbolicError::Config(_))));
        assert!(matches!(TrigConfig::from_toml_str("colour = \"red\""), Err(SymbolicError::Config(_))));
        assert!(matches!(TrigConfig::from_toml_str("log_level = \"loud\""), Err(SymbolicError::Config(_))));
        assert!(matches!(TrigConfig::from_toml_str("= ="), Err(SymbolicError::Config(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let c = TrigConfig {
            radical_denominator_cutoff: 20,
            pairwise_table: false,
            memoize_series: false,
            log_level: "debug".to_string(),
        };
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", c.to_toml_string()).unwrap();
        let loaded = TrigConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, c);
        assert_eq!(loaded.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(TrigConfig::from_file(missing), Err(SymbolicError::Io(_))));
    }
}
