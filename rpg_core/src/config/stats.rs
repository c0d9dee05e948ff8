//! Stat template configuration

use super::ConfigError;
use crate::types::StatType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One stat's starting value and bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    #[serde(rename = "type")]
    pub stat_type: StatType,
    pub base: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_max() -> f64 {
    f64::MAX
}

/// Starting stats for an archetype (player, npc, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatTemplate {
    pub id: String,
    pub stats: Vec<StatEntry>,
}

impl StatTemplate {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::new();
        for entry in &self.stats {
            if !entry.base.is_finite() || entry.min.is_nan() || entry.max.is_nan() {
                return Err(ConfigError::ValidationError(format!(
                    "template '{}': {:?} has a non-finite value",
                    self.id, entry.stat_type
                )));
            }
            if entry.min > entry.max {
                return Err(ConfigError::ValidationError(format!(
                    "template '{}': {:?} has min {} above max {}",
                    self.id, entry.stat_type, entry.min, entry.max
                )));
            }
            if seen.contains(&entry.stat_type) {
                return Err(ConfigError::ValidationError(format!(
                    "template '{}': {:?} listed twice",
                    self.id, entry.stat_type
                )));
            }
            seen.push(entry.stat_type);
        }
        Ok(())
    }
}

/// Container for stat templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    pub templates: Vec<StatTemplate>,
}

fn into_map(config: StatsConfig) -> Result<HashMap<String, StatTemplate>, ConfigError> {
    let mut map = HashMap::new();
    for template in config.templates {
        template.validate()?;
        map.insert(template.id.clone(), template);
    }
    Ok(map)
}

/// Load stat templates from a TOML file
pub fn load_stat_templates(path: &Path) -> Result<HashMap<String, StatTemplate>, ConfigError> {
    into_map(super::load_toml(path)?)
}

/// Load stat templates from a TOML string
pub fn parse_stat_templates(content: &str) -> Result<HashMap<String, StatTemplate>, ConfigError> {
    into_map(super::parse_toml(content)?)
}

/// Get the built-in stat templates
pub fn default_stat_templates() -> HashMap<String, StatTemplate> {
    let toml = include_str!("../../config/stats.toml");
    parse_stat_templates(toml).unwrap_or_else(|e| {
        tracing::error!("Built-in stat templates failed to load: {}", e);
        HashMap::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatSystem;

    #[test]
    fn test_parse_templates() {
        let toml = r#"
[[templates]]
id = "slime"

[[templates.stats]]
type = "current_health"
base = 20
min = 0
max = 20

[[templates.stats]]
type = "damage"
base = 2
"#;

        let templates = parse_stat_templates(toml).unwrap();
        let slime = &templates["slime"];
        assert_eq!(slime.stats.len(), 2);
        assert_eq!(slime.stats[1].max, f64::MAX);

        let stats = StatSystem::from_template(slime);
        assert!((stats.get_current_value(StatType::CurrentHealth) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let toml = r#"
[[templates]]
id = "broken"

[[templates.stats]]
type = "damage"
base = 2
min = 5
max = 1
"#;
        let err = parse_stat_templates(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_default_templates_load() {
        let templates = default_stat_templates();
        assert!(templates.contains_key("player"));
        assert!(templates.contains_key("npc"));

        let player = StatSystem::from_template(&templates["player"]);
        for stat_type in StatType::all() {
            assert!(player.contains(*stat_type), "player missing {:?}", stat_type);
        }
    }
}
