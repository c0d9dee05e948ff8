//! Core types shared across the character systems

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named numeric character attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    MovementSpeed,
    DashSpeedMultiplier,
    CurrentHealth,
    DamageResistance,
    Damage,
    CriticalChance,
    CriticalDamageMultiplier,
    AttackRange,
    PushingForce,
    TelekinesisForce,
    TelekinesisDistance,
    DetectionRadius,
    EvasionRadius,
    AttackDelay,
}

impl StatType {
    /// Get all stat types
    pub fn all() -> &'static [StatType] {
        &[
            StatType::MovementSpeed,
            StatType::DashSpeedMultiplier,
            StatType::CurrentHealth,
            StatType::DamageResistance,
            StatType::Damage,
            StatType::CriticalChance,
            StatType::CriticalDamageMultiplier,
            StatType::AttackRange,
            StatType::PushingForce,
            StatType::TelekinesisForce,
            StatType::TelekinesisDistance,
            StatType::DetectionRadius,
            StatType::EvasionRadius,
            StatType::AttackDelay,
        ]
    }

    /// Human readable name
    pub fn name(&self) -> &'static str {
        match self {
            StatType::MovementSpeed => "Movement Speed",
            StatType::DashSpeedMultiplier => "Dash Multiplier",
            StatType::CurrentHealth => "Health",
            StatType::DamageResistance => "Damage Resistance",
            StatType::Damage => "Damage",
            StatType::CriticalChance => "Crit Chance",
            StatType::CriticalDamageMultiplier => "Crit Multiplier",
            StatType::AttackRange => "Attack Range",
            StatType::PushingForce => "Pushing Force",
            StatType::TelekinesisForce => "Telekinesis Force",
            StatType::TelekinesisDistance => "Telekinesis Distance",
            StatType::DetectionRadius => "Detection Radius",
            StatType::EvasionRadius => "Evasion Radius",
            StatType::AttackDelay => "Attack Delay",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Equipment slot holding at most one item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Body,
    Arms,
    Legs,
    Weapon,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Arms,
            EquipmentSlot::Legs,
            EquipmentSlot::Weapon,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Body => "Body",
            EquipmentSlot::Arms => "Arms",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Weapon => "Weapon",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Body location an armor piece occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSlot {
    Head,
    Body,
    Arms,
    Legs,
}

impl From<ArmorSlot> for EquipmentSlot {
    fn from(slot: ArmorSlot) -> Self {
        match slot {
            ArmorSlot::Head => EquipmentSlot::Head,
            ArmorSlot::Body => EquipmentSlot::Body,
            ArmorSlot::Arms => EquipmentSlot::Arms,
            ArmorSlot::Legs => EquipmentSlot::Legs,
        }
    }
}
