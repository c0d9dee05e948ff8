//! Quest configuration

use super::ConfigError;
use crate::item::ItemCatalog;
use crate::quest::{QuestDefinition, QuestObjective};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Container for quest definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestsConfig {
    pub quests: Vec<QuestDefinition>,
}

fn validate(quest: &QuestDefinition, catalog: &ItemCatalog) -> Result<(), ConfigError> {
    if quest.objective.amount() == 0 {
        return Err(ConfigError::ValidationError(format!(
            "quest '{}': objective amount must be at least 1",
            quest.id
        )));
    }
    if let QuestObjective::Collect { item_id, .. } = &quest.objective {
        if !catalog.contains(item_id) {
            return Err(ConfigError::ValidationError(format!(
                "quest '{}': unknown item '{}' in objective",
                quest.id, item_id
            )));
        }
    }
    for item in &quest.reward.items {
        if !catalog.contains(&item.item_id) {
            return Err(ConfigError::ValidationError(format!(
                "quest '{}': unknown reward item '{}'",
                quest.id, item.item_id
            )));
        }
        if item.quantity == 0 {
            return Err(ConfigError::ValidationError(format!(
                "quest '{}': reward '{}' has zero quantity",
                quest.id, item.item_id
            )));
        }
    }
    if let Some(m) = quest.reward.modifiers.iter().find(|m| !m.kind.is_permanent()) {
        return Err(ConfigError::ValidationError(format!(
            "quest '{}': reward modifier on {:?} must be permanent",
            quest.id, m.stat_type
        )));
    }
    Ok(())
}

fn into_map(
    config: QuestsConfig,
    catalog: &ItemCatalog,
) -> Result<HashMap<String, Arc<QuestDefinition>>, ConfigError> {
    let mut map = HashMap::new();
    for quest in config.quests {
        validate(&quest, catalog)?;
        if map.contains_key(&quest.id) {
            return Err(ConfigError::ValidationError(format!(
                "quest '{}' defined twice",
                quest.id
            )));
        }
        map.insert(quest.id.clone(), Arc::new(quest));
    }
    Ok(map)
}

/// Load quests from a TOML file, checking item ids against `catalog`
pub fn load_quests(
    path: &Path,
    catalog: &ItemCatalog,
) -> Result<HashMap<String, Arc<QuestDefinition>>, ConfigError> {
    into_map(super::load_toml(path)?, catalog)
}

/// Load quests from a TOML string, checking item ids against `catalog`
pub fn parse_quests(
    content: &str,
    catalog: &ItemCatalog,
) -> Result<HashMap<String, Arc<QuestDefinition>>, ConfigError> {
    into_map(super::parse_toml(content)?, catalog)
}

/// Get the built-in quests
pub fn default_quests(catalog: &ItemCatalog) -> HashMap<String, Arc<QuestDefinition>> {
    let toml = include_str!("../../config/quests.toml");
    parse_quests(toml, catalog).unwrap_or_else(|e| {
        tracing::error!("Built-in quests failed to load: {}", e);
        HashMap::new()
    })
}
