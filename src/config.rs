use std::path::{Path, PathBuf};

use crate::ai::QLearningConfig;
use crate::error::ConfigError;
use crate::training::trainer::TrainerConfig;

/// Search depths for the two tree-search agents.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub minimax_depth: usize,
    pub alphabeta_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            minimax_depth: 3,
            alphabeta_depth: 4,
        }
    }
}

/// Where the learned Q table lives.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub path: PathBuf,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            path: PathBuf::from("q_table.json"),
        }
    }
}

/// Search depths exercised by the `bench` subcommand.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub levels: Vec<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            levels: vec![2, 3, 4],
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub qlearning: QLearningConfig,
    pub training: TrainerConfig,
    pub table: TableConfig,
    pub bench: BenchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.minimax_depth == 0 {
            return Err(ConfigError::Validation(
                "search.minimax_depth must be >= 1".into(),
            ));
        }
        if self.search.alphabeta_depth == 0 {
            return Err(ConfigError::Validation(
                "search.alphabeta_depth must be >= 1".into(),
            ));
        }

        let q = &self.qlearning;
        if !(q.learning_rate > 0.0 && q.learning_rate <= 1.0) {
            return Err(ConfigError::Validation(
                "qlearning.learning_rate must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&q.discount) {
            return Err(ConfigError::Validation(
                "qlearning.discount must be in [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&q.exploration) {
            return Err(ConfigError::Validation(
                "qlearning.exploration must be in [0, 1]".into(),
            ));
        }

        if self.training.num_episodes == 0 {
            return Err(ConfigError::Validation(
                "training.num_episodes must be > 0".into(),
            ));
        }
        if self.training.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }
        if self.training.eval_interval == 0 {
            return Err(ConfigError::Validation(
                "training.eval_interval must be > 0".into(),
            ));
        }

        if self.bench.levels.iter().any(|&d| d == 0) {
            return Err(ConfigError::Validation(
                "bench.levels must all be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.table.path, PathBuf::from("q_table.json"));
        assert_eq!(config.bench.levels, vec![2, 3, 4]);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[qlearning]
learning_rate = 0.5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.qlearning.learning_rate - 0.5).abs() < 1e-9);
        assert!((config.qlearning.discount - 0.9).abs() < 1e-9);
        assert_eq!(config.training.num_episodes, 500);
        assert_eq!(config.training.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let default = AppConfig::default();
        assert_eq!(config.search.minimax_depth, default.search.minimax_depth);
        assert_eq!(config.qlearning, default.qlearning);
        assert_eq!(config.training.num_episodes, default.training.num_episodes);
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.alphabeta_depth = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.bench.levels = vec![2, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_learning_rate_out_of_range() {
        let mut config = AppConfig::default();
        config.qlearning.learning_rate = 0.0;
        assert!(config.validate().is_err());
        config.qlearning.learning_rate = 1.0;
        assert!(config.validate().is_ok());
        config.qlearning.learning_rate = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_discount_and_exploration() {
        let mut config = AppConfig::default();
        config.qlearning.discount = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.qlearning.exploration = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_episodes_and_intervals() {
        let mut config = AppConfig::default();
        config.training.num_episodes = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.training.log_interval = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.training.eval_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.training.num_episodes, 500);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[training]
num_episodes = 50
seed = 7

[table]
path = "tables/dark.json"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.training.num_episodes, 50);
        assert_eq!(config.training.seed, Some(7));
        assert_eq!(config.table.path, PathBuf::from("tables/dark.json"));
        assert_eq!(config.search.alphabeta_depth, 4);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\nminimax_depth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[search\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
