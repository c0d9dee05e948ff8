//! Prelude module for convenient imports
//!
//! ```rust
//! use rpg_core::prelude::*;
//! ```

// Stats
pub use crate::stats::{ModifierHandle, ModifierKind, StatModifier, StatSystem};
pub use crate::types::{ArmorSlot, EquipmentSlot, StatType};

// Items and inventory
pub use crate::item::{ItemCatalog, ItemDefinition, ItemInstance, ItemVariant};
pub use crate::inventory::{Inventory, InventoryError, InventoryEvent};

// Characters
pub use crate::character::Character;
pub use crate::cooldown::Cooldown;

// Quests
pub use crate::quest::{QuestDefinition, QuestLog, QuestObjective};

// World
pub use crate::npc::{Navigator, NpcAction, NpcBrain, NpcPose, NpcState};
pub use crate::weather::{WeatherKind, WeatherProvider, WeatherSystem};

// Config
pub use crate::config::{default_catalog, default_quests, default_stat_templates, default_weather_effects};

pub use glam::Vec3;
