//! ItemDefinition - Immutable catalog entry for an item type

use crate::stats::{ModifierKind, StatModifier};
use crate::types::{ArmorSlot, EquipmentSlot, StatType};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Broad item categories; an item may belong to several.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ItemKind: u8 {
        const ARMOR      = 1 << 0;
        const WEAPON     = 1 << 1;
        const CONSUMABLE = 1 << 2;
    }
}

/// Variant-specific data of an item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemVariant {
    Armor {
        slot: ArmorSlot,
    },
    Weapon {
        #[serde(default)]
        range: f64,
        #[serde(default)]
        damage: f64,
        #[serde(default)]
        critical_chance: f64,
        #[serde(default)]
        critical_damage_multiplier: f64,
    },
    Consumable,
    Healing {
        amount: f64,
    },
    /// Crafting/quest material with no effect of its own
    Material,
}

impl ItemVariant {
    /// Kind flags implied by the variant
    pub fn base_kind(&self) -> ItemKind {
        match self {
            ItemVariant::Armor { .. } => ItemKind::ARMOR,
            ItemVariant::Weapon { .. } => ItemKind::WEAPON,
            ItemVariant::Consumable | ItemVariant::Healing { .. } => ItemKind::CONSUMABLE,
            ItemVariant::Material => ItemKind::empty(),
        }
    }
}

/// Shared, immutable description of an item type
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    /// Icon asset key
    pub icon: String,
    /// Mesh asset key
    pub mesh: String,
    max_stack_size: u32,
    kind: ItemKind,
    variant: ItemVariant,
    /// Attached while equipped
    equip_modifiers: Vec<StatModifier>,
    /// Applied permanently when consumed
    consume_modifiers: Vec<StatModifier>,
}

impl ItemDefinition {
    /// Create a definition, folding variant fields into its modifier lists
    pub fn new(id: impl Into<String>, name: impl Into<String>, variant: ItemVariant) -> Self {
        let mut equip_modifiers = Vec::new();
        let mut consume_modifiers = Vec::new();

        match &variant {
            ItemVariant::Weapon {
                range,
                damage,
                critical_chance,
                critical_damage_multiplier,
            } => {
                let folded = [
                    (StatType::AttackRange, *range),
                    (StatType::Damage, *damage),
                    (StatType::CriticalChance, *critical_chance),
                    (StatType::CriticalDamageMultiplier, *critical_damage_multiplier),
                ];
                equip_modifiers.extend(
                    folded
                        .into_iter()
                        .filter(|(_, value)| *value != 0.0)
                        .map(|(stat, value)| StatModifier::attached(stat, value)),
                );
            }
            ItemVariant::Healing { amount } => {
                consume_modifiers.push(StatModifier::base(StatType::CurrentHealth, *amount));
            }
            _ => {}
        }

        ItemDefinition {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            mesh: String::new(),
            max_stack_size: 1,
            kind: variant.base_kind(),
            variant,
            equip_modifiers,
            consume_modifiers,
        }
    }

    /// Set the stack limit (at least 1)
    pub fn with_max_stack(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = max_stack_size.max(1);
        self
    }

    /// Add kind flags on top of the variant's own
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind |= kind;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = mesh.into();
        self
    }

    /// Add a bonus that is attached while the item is equipped
    pub fn with_equip_bonus(mut self, stat_type: StatType, value: f64) -> Self {
        self.equip_modifiers.push(StatModifier::attached(stat_type, value));
        self
    }

    /// Add a permanent modifier applied on consumption.
    ///
    /// Attached modifiers are ignored here, nothing would ever detach them.
    pub fn with_consume_modifier(mut self, modifier: StatModifier) -> Self {
        if modifier.kind == ModifierKind::Attached {
            tracing::warn!(
                "Item {} ignores attached consume modifier on {:?}",
                self.id,
                modifier.stat_type
            );
            return self;
        }
        self.consume_modifiers.push(modifier);
        self
    }

    pub fn max_stack_size(&self) -> u32 {
        self.max_stack_size
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn variant(&self) -> &ItemVariant {
        &self.variant
    }

    pub fn equip_modifiers(&self) -> &[StatModifier] {
        &self.equip_modifiers
    }

    pub fn consume_modifiers(&self) -> &[StatModifier] {
        &self.consume_modifiers
    }

    /// Slot this item goes into when equipped
    pub fn equipment_slot(&self) -> Option<EquipmentSlot> {
        match self.variant {
            ItemVariant::Armor { slot } => Some(slot.into()),
            ItemVariant::Weapon { .. } => Some(EquipmentSlot::Weapon),
            _ => None,
        }
    }

    pub fn is_consumable(&self) -> bool {
        self.kind.contains(ItemKind::CONSUMABLE)
    }

    pub fn is_stackable(&self) -> bool {
        self.max_stack_size > 1
    }
}
