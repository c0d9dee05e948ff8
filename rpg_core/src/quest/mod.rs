//! Quest tracking - accepted quests and their progress

use crate::character::Character;
use crate::inventory::{Inventory, InventoryError, InventoryEvent};
use crate::item::ItemCatalog;
use crate::stats::StatModifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// What a quest asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestObjective {
    /// Hold `amount` of an item in the backpack
    Collect { item_id: String, amount: u32 },
    /// Destroy `amount` targets carrying a tag
    Destroy { target_tag: String, amount: u32 },
}

impl QuestObjective {
    pub fn amount(&self) -> u32 {
        match self {
            QuestObjective::Collect { amount, .. } | QuestObjective::Destroy { amount, .. } => *amount,
        }
    }
}

/// Item granted on completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardItem {
    pub item_id: String,
    pub quantity: u32,
}

/// What completing a quest grants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestReward {
    /// Permanent stat changes
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
    #[serde(default)]
    pub items: Vec<RewardItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub objective: QuestObjective,
    #[serde(default)]
    pub reward: QuestReward,
}

/// An accepted quest and how far along it is
#[derive(Debug, Clone)]
pub struct QuestProgress {
    pub quest: Arc<QuestDefinition>,
    pub progress: u32,
}

impl QuestProgress {
    pub fn required(&self) -> u32 {
        self.quest.objective.amount()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= self.required()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuestError {
    #[error("Quest '{0}' is already active")]
    AlreadyActive(String),
    #[error("Quest '{0}' is not active")]
    NotActive(String),
    #[error("Quest '{quest_id}' is at {progress}/{required}")]
    NotComplete {
        quest_id: String,
        progress: u32,
        required: u32,
    },
    #[error("Reward item '{0}' is not in the catalog")]
    UnknownItem(String),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

/// Active quests of one character
#[derive(Debug, Clone, Default)]
pub struct QuestLog {
    active: Vec<QuestProgress>,
}

impl QuestLog {
    pub fn new() -> Self {
        QuestLog { active: Vec::new() }
    }

    pub fn active(&self) -> &[QuestProgress] {
        &self.active
    }

    pub fn get(&self, quest_id: &str) -> Option<&QuestProgress> {
        self.active.iter().find(|p| p.quest.id == quest_id)
    }

    pub fn progress(&self, quest_id: &str) -> Option<u32> {
        self.get(quest_id).map(|p| p.progress)
    }

    pub fn is_complete(&self, quest_id: &str) -> bool {
        self.get(quest_id).is_some_and(QuestProgress::is_complete)
    }

    /// Start tracking a quest; collect quests count what is already held
    pub fn accept(&mut self, quest: Arc<QuestDefinition>, inventory: &Inventory) -> Result<(), QuestError> {
        if self.get(&quest.id).is_some() {
            return Err(QuestError::AlreadyActive(quest.id.clone()));
        }
        let progress = match &quest.objective {
            QuestObjective::Collect { item_id, amount } => inventory.count_of(item_id).min(*amount),
            QuestObjective::Destroy { .. } => 0,
        };
        tracing::debug!("Accepted quest {} ({}/{})", quest.id, progress, quest.objective.amount());
        self.active.push(QuestProgress { quest, progress });
        Ok(())
    }

    /// Stop tracking a quest without rewards
    pub fn abandon(&mut self, quest_id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|p| p.quest.id != quest_id);
        self.active.len() != before
    }

    /// Update collect quests after a backpack change.
    ///
    /// Returns ids of quests that became completable.
    pub fn on_inventory_event(&mut self, event: &InventoryEvent, inventory: &Inventory) -> Vec<String> {
        if *event != InventoryEvent::BackpackChanged {
            return Vec::new();
        }
        self.update(|objective| match objective {
            QuestObjective::Collect { item_id, .. } => Some(inventory.count_of(item_id)),
            QuestObjective::Destroy { .. } => None,
        })
    }

    /// Count a destroyed target towards matching destroy quests.
    ///
    /// Returns ids of quests that became completable.
    pub fn on_target_destroyed(&mut self, tag: &str) -> Vec<String> {
        let mut newly_complete = Vec::new();
        for entry in &mut self.active {
            if let QuestObjective::Destroy { target_tag, amount } = &entry.quest.objective {
                if target_tag == tag && entry.progress < *amount {
                    entry.progress += 1;
                    if entry.progress >= *amount {
                        newly_complete.push(entry.quest.id.clone());
                    }
                }
            }
        }
        newly_complete
    }

    /// Turn in a completed quest: take collected items, grant rewards and
    /// stop tracking it.
    pub fn complete(
        &mut self,
        quest_id: &str,
        character: &mut Character,
        catalog: &ItemCatalog,
    ) -> Result<(), QuestError> {
        let index = self
            .active
            .iter()
            .position(|p| p.quest.id == quest_id)
            .ok_or_else(|| QuestError::NotActive(quest_id.to_string()))?;
        let entry = &self.active[index];
        if !entry.is_complete() {
            return Err(QuestError::NotComplete {
                quest_id: quest_id.to_string(),
                progress: entry.progress,
                required: entry.required(),
            });
        }
        let quest = Arc::clone(&entry.quest);

        let mut reward_items = Vec::with_capacity(quest.reward.items.len());
        for reward in &quest.reward.items {
            let definition = catalog
                .get(&reward.item_id)
                .ok_or_else(|| QuestError::UnknownItem(reward.item_id.clone()))?;
            reward_items.push((definition, reward.quantity));
        }

        if let QuestObjective::Collect { item_id, amount } = &quest.objective {
            character.inventory_mut().remove_by_id(item_id, *amount)?;
        }

        for modifier in &quest.reward.modifiers {
            if modifier.kind.is_permanent() {
                character.stats_mut().add_modifier(modifier);
            } else {
                tracing::warn!("Quest {} skips attached reward on {:?}", quest.id, modifier.stat_type);
            }
        }
        for (definition, quantity) in reward_items {
            character.add_to_backpack(definition, quantity);
        }

        self.active.remove(index);
        tracing::debug!("Completed quest {}", quest.id);
        Ok(())
    }

    /// Apply new progress values from `measure`, capped at each requirement
    fn update(&mut self, measure: impl Fn(&QuestObjective) -> Option<u32>) -> Vec<String> {
        let mut newly_complete = Vec::new();
        for entry in &mut self.active {
            if let Some(value) = measure(&entry.quest.objective) {
                let was_complete = entry.is_complete();
                entry.progress = value.min(entry.required());
                if !was_complete && entry.is_complete() {
                    newly_complete.push(entry.quest.id.clone());
                }
            }
        }
        newly_complete
    }
}
