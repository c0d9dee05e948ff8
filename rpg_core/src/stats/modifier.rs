//! StatModifier - Permanent and attached changes to a stat

use crate::types::StatType;
use serde::{Deserialize, Serialize};

/// How a modifier changes its stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Folds into the base value permanently
    IncreaseBaseValue,
    /// Raises (or lowers) the lower clamp bound permanently
    IncreaseMinBaseValue,
    /// Raises (or lowers) the upper clamp bound permanently
    IncreaseMaxBaseValue,
    /// Added on top of the base value until removed through its handle
    Attached,
}

impl ModifierKind {
    pub fn is_permanent(&self) -> bool {
        !matches!(self, ModifierKind::Attached)
    }
}

/// A single change to one stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    #[serde(rename = "stat")]
    pub stat_type: StatType,
    pub kind: ModifierKind,
    pub value: f64,
}

impl StatModifier {
    pub fn new(stat_type: StatType, kind: ModifierKind, value: f64) -> Self {
        StatModifier {
            stat_type,
            kind,
            value,
        }
    }

    /// Permanent change to the base value
    pub fn base(stat_type: StatType, value: f64) -> Self {
        Self::new(stat_type, ModifierKind::IncreaseBaseValue, value)
    }

    /// Permanent change to the lower bound
    pub fn min(stat_type: StatType, value: f64) -> Self {
        Self::new(stat_type, ModifierKind::IncreaseMinBaseValue, value)
    }

    /// Permanent change to the upper bound
    pub fn max(stat_type: StatType, value: f64) -> Self {
        Self::new(stat_type, ModifierKind::IncreaseMaxBaseValue, value)
    }

    /// Removable bonus layered over the base value
    pub fn attached(stat_type: StatType, value: f64) -> Self {
        Self::new(stat_type, ModifierKind::Attached, value)
    }
}

/// Token identifying one attached modifier.
///
/// Returned by [`StatSystem::add_modifier`](crate::stats::StatSystem::add_modifier)
/// and required to remove the modifier again. Two structurally identical
/// modifiers added by different sources get different handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModifierHandle {
    pub(crate) stat_type: StatType,
    pub(crate) id: u64,
}

impl ModifierHandle {
    /// Stat the modifier is attached to
    pub fn stat_type(&self) -> StatType {
        self.stat_type
    }
}
