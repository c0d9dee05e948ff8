//! Item catalog configuration

use super::ConfigError;
use crate::item::{ItemCatalog, ItemDefinition, ItemKind, ItemVariant};
use crate::stats::{ModifierKind, StatModifier};
use crate::types::StatType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Item definition as written in config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub mesh: String,
    #[serde(default = "default_max_stack_size")]
    pub max_stack_size: u32,
    /// Flags on top of those implied by the variant, e.g. `"CONSUMABLE"`
    #[serde(default)]
    pub extra_kind: ItemKind,
    pub variant: ItemVariant,
    /// Must all be `attached`
    #[serde(default)]
    pub equip_modifiers: Vec<StatModifier>,
    /// Must all be permanent
    #[serde(default)]
    pub consume_modifiers: Vec<StatModifier>,
}

fn default_max_stack_size() -> u32 {
    1
}

impl ItemConfig {
    /// Validate and build the definition
    pub fn into_definition(self) -> Result<ItemDefinition, ConfigError> {
        if self.max_stack_size == 0 {
            return Err(ConfigError::ValidationError(format!(
                "item '{}': max_stack_size must be at least 1",
                self.id
            )));
        }
        if let Some(m) = self
            .equip_modifiers
            .iter()
            .find(|m| m.kind != ModifierKind::Attached)
        {
            return Err(ConfigError::ValidationError(format!(
                "item '{}': equip modifier on {:?} must be attached",
                self.id, m.stat_type
            )));
        }
        if self
            .equip_modifiers
            .iter()
            .any(|m| m.stat_type == StatType::CurrentHealth)
        {
            return Err(ConfigError::ValidationError(format!(
                "item '{}': current_health can't be an equip bonus, raise its max instead",
                self.id
            )));
        }
        if let Some(m) = self.consume_modifiers.iter().find(|m| !m.kind.is_permanent()) {
            return Err(ConfigError::ValidationError(format!(
                "item '{}': consume modifier on {:?} must be permanent",
                self.id, m.stat_type
            )));
        }

        let mut definition = ItemDefinition::new(self.id, self.name, self.variant)
            .with_icon(self.icon)
            .with_mesh(self.mesh)
            .with_max_stack(self.max_stack_size)
            .with_kind(self.extra_kind);
        for modifier in self.equip_modifiers {
            definition = definition.with_equip_bonus(modifier.stat_type, modifier.value);
        }
        for modifier in self.consume_modifiers {
            definition = definition.with_consume_modifier(modifier);
        }
        Ok(definition)
    }
}

/// Container for item configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub items: Vec<ItemConfig>,
}

fn into_catalog(config: ItemsConfig) -> Result<ItemCatalog, ConfigError> {
    let mut catalog = ItemCatalog::new();
    for item in config.items {
        if catalog.contains(&item.id) {
            return Err(ConfigError::ValidationError(format!(
                "item '{}' defined twice",
                item.id
            )));
        }
        catalog.register(item.into_definition()?);
    }
    Ok(catalog)
}

/// Load an item catalog from a TOML file
pub fn load_item_catalog(path: &Path) -> Result<ItemCatalog, ConfigError> {
    into_catalog(super::load_toml(path)?)
}

/// Load an item catalog from a TOML string
pub fn parse_item_catalog(content: &str) -> Result<ItemCatalog, ConfigError> {
    into_catalog(super::parse_toml(content)?)
}

/// Get the built-in item catalog
pub fn default_catalog() -> ItemCatalog {
    let toml = include_str!("../../config/items.toml");
    parse_item_catalog(toml).unwrap_or_else(|e| {
        tracing::error!("Built-in item catalog failed to load: {}", e);
        ItemCatalog::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EquipmentSlot;

    #[test]
    fn test_parse_items() {
        let toml = r#"
[[items]]
id = "iron_sword"
name = "Iron Sword"
icon = "icons/iron_sword"

[items.variant]
type = "weapon"
range = 1.0
damage = 10.0

[[items.equip_modifiers]]
stat = "movement_speed"
kind = "attached"
value = -0.5

[[items]]
id = "ration"
name = "Ration"
max_stack_size = 20

[items.variant]
type = "consumable"

[[items.consume_modifiers]]
stat = "current_health"
kind = "increase_base_value"
value = 5.0
"#;

        let catalog = parse_item_catalog(toml).unwrap();
        assert_eq!(catalog.len(), 2);

        let sword = catalog.get("iron_sword").unwrap();
        assert_eq!(sword.equipment_slot(), Some(EquipmentSlot::Weapon));
        assert_eq!(sword.icon, "icons/iron_sword");
        assert_eq!(sword.equip_modifiers().len(), 3);

        let ration = catalog.get("ration").unwrap();
        assert_eq!(ration.max_stack_size(), 20);
        assert!(ration.is_consumable());
        assert_eq!(
            ration.consume_modifiers(),
            &[StatModifier::base(StatType::CurrentHealth, 5.0)]
        );
    }

    #[test]
    fn test_extra_kind_flags() {
        let toml = r#"
[[items]]
id = "mushroom_cap"
name = "Mushroom Cap"
extra_kind = "CONSUMABLE"

[items.variant]
type = "armor"
slot = "head"
"#;
        let catalog = parse_item_catalog(toml).unwrap();
        let cap = catalog.get("mushroom_cap").unwrap();
        assert!(cap.kind().contains(ItemKind::ARMOR | ItemKind::CONSUMABLE));
    }

    #[test]
    fn test_rejects_permanent_equip_modifier() {
        let toml = r#"
[[items]]
id = "cursed_ring"
name = "Cursed Ring"

[items.variant]
type = "armor"
slot = "arms"

[[items.equip_modifiers]]
stat = "damage"
kind = "increase_base_value"
value = 1.0
"#;
        let err = parse_item_catalog(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_current_health_equip_bonus() {
        let toml = r#"
[[items]]
id = "troll_cap"
name = "Troll Cap"

[items.variant]
type = "armor"
slot = "head"

[[items.equip_modifiers]]
stat = "current_health"
kind = "attached"
value = 20.0
"#;
        let err = parse_item_catalog(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_zero_stack() {
        let toml = r#"
[[items]]
id = "void"
name = "Void"
max_stack_size = 0

[items.variant]
type = "material"
"#;
        assert!(parse_item_catalog(toml).is_err());
    }

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog();
        assert!(catalog.get("iron_sword").is_some());
        assert!(catalog.get("health_potion").is_some());
        assert!(catalog.get("wolf_pelt").is_some());
        for slot in EquipmentSlot::all() {
            assert!(
                catalog.sorted().iter().any(|d| d.equipment_slot() == Some(*slot)),
                "no default item for {:?}",
                slot
            );
        }
    }
}
