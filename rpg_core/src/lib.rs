//! rpg_core - Gameplay state for a third-person action RPG
//!
//! This library provides:
//! - StatSystem: Clamped character stats with permanent and attached modifiers
//! - Inventory: Equipment slots and a stacking backpack wired into stats
//! - QuestLog: Collect and destroy quests with stat and item rewards
//! - NpcBrain: Idle/alerted chase-and-attack state machine
//! - WeatherSystem: Polled weather mapped onto attached stat effects
//!
//! The host drives everything by calling `tick` with the frame delta.

pub mod character;
pub mod config;
pub mod cooldown;
pub mod inventory;
pub mod item;
pub mod npc;
pub mod prelude;
pub mod quest;
pub mod stats;
pub mod types;
pub mod weather;

// Re-export core types for convenience
pub use character::{AttackRoll, Character};
pub use cooldown::Cooldown;
pub use inventory::{Inventory, InventoryError, InventoryEvent};
pub use item::{ItemCatalog, ItemDefinition, ItemInstance, ItemKind, ItemVariant};
pub use npc::{Navigator, NpcAction, NpcBrain, NpcPose, NpcState};
pub use quest::{QuestDefinition, QuestError, QuestLog, QuestObjective, QuestProgress, QuestReward, RewardItem};
pub use stats::{ModifierHandle, ModifierKind, Stat, StatModifier, StatSystem};
pub use types::{ArmorSlot, EquipmentSlot, StatType};
pub use weather::{parse_weather, WeatherEffect, WeatherEffects, WeatherError, WeatherKind, WeatherProvider, WeatherSystem};
pub use config::{default_catalog, default_quests, default_stat_templates, default_weather_effects, StatTemplate};

// Vector type used by the NPC API
pub use glam::Vec3;
