//! Startup configuration loader.
//!
//! ```toml
//! [round]
//! history_capacity = 3
//! skills_per_player = 1
//! seed = 42
//!
//! [weights.events]
//! NoEvent = 100
//! LowGravity = 10
//!
//! [weights.skills]
//! Medic = 5
//!
//! [slots]
//! Welfare = false
//! ```
//!
//! Every section is optional. Missing round settings fall back to
//! [`RoundConfig`] defaults; modifiers missing from a weight table keep their
//! compiled-in weight.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use game_core::RoundConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Initial weight tables, keyed by modifier name.
///
/// Values are signed so negative entries reach the registry, which rejects
/// them and keeps the prior weight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTables {
    pub events: BTreeMap<String, i64>,
    pub skills: BTreeMap<String, i64>,
}

/// Everything read from a config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub round: RoundConfig,
    pub weights: WeightTables,
    /// Reserved slot enable flags.
    pub slots: BTreeMap<String, bool>,
}

/// Loader for startup configuration from TOML or JSON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> LoadResult<ContentConfig> {
        let content = read_file(path)?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config = match extension.as_deref() {
            Some("toml") => Self::parse_toml(&content),
            Some("json") => Self::parse_json(&content),
            _ => bail!(
                "Unsupported config format for {} (expected .toml or .json)",
                path.display()
            ),
        }
        .with_context(|| format!("Failed to load config {}", path.display()))?;

        debug!(
            target: "content::loaders",
            path = %path.display(),
            events = config.weights.events.len(),
            skills = config.weights.skills.len(),
            slots = config.slots.len(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn parse_toml(content: &str) -> LoadResult<ContentConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    pub fn parse_json(content: &str) -> LoadResult<ContentConfig> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = ConfigLoader::parse_toml("").unwrap();
        assert_eq!(config, ContentConfig::default());
        assert_eq!(config.round.history_capacity, 3);
    }

    #[test]
    fn oversized_history_capacity_parses() {
        let config =
            ConfigLoader::parse_toml("[round]\nhistory_capacity = 9223372036854775807").unwrap();
        assert_eq!(config.round.history_capacity as u64, i64::MAX as u64);

        let mut history = game_core::HistoryWindow::new(config.round.history_capacity);
        history.record("NoEvent");
        assert!(history.contains("NoEvent"));
    }

    #[test]
    fn toml_and_json_agree() {
        let from_toml = ConfigLoader::parse_toml(
            r#"
            [round]
            skills_per_player = 2
            seed = 9

            [weights.events]
            NoEvent = 100
            Ghost = -4

            [slots]
            Welfare = false
            "#,
        )
        .unwrap();

        let from_json = ConfigLoader::parse_json(
            r#"{
                "round": { "skills_per_player": 2, "seed": 9 },
                "weights": { "events": { "NoEvent": 100, "Ghost": -4 } },
                "slots": { "Welfare": false }
            }"#,
        )
        .unwrap();

        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.round.skills_per_player, 2);
        assert_eq!(from_toml.round.seed, Some(9));
        assert_eq!(from_toml.round.history_capacity, 3);
        assert_eq!(from_toml.weights.events["Ghost"], -4);
        assert!(from_toml.weights.skills.is_empty());
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("roulette.toml");
        std::fs::File::create(&toml_path)
            .unwrap()
            .write_all(b"[weights.skills]\nMedic = 3\n")
            .unwrap();
        let config = ConfigLoader::load(&toml_path).unwrap();
        assert_eq!(config.weights.skills["Medic"], 3);

        let json_path = dir.path().join("roulette.json");
        std::fs::write(&json_path, r#"{ "slots": { "HeavyArmor": true } }"#).unwrap();
        let config = ConfigLoader::load(&json_path).unwrap();
        assert_eq!(config.slots["HeavyArmor"], true);
    }

    #[test]
    fn unknown_extension_and_bad_syntax_are_errors() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("roulette.yaml");
        std::fs::write(&yaml, "round: {}").unwrap();
        assert!(ConfigLoader::load(&yaml).is_err());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[weights.events\nNoEvent = ").unwrap();
        let err = ConfigLoader::load(&broken).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));

        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
