//! Inventory - Equipment slots plus a stacking backpack

mod event;

pub use event::InventoryEvent;

use crate::item::{ItemDefinition, ItemInstance};
use crate::stats::{ModifierHandle, StatSystem};
use crate::types::EquipmentSlot;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Why an inventory operation had no effect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("No backpack entry at index {0}")]
    InvalidIndex(usize),
    #[error("Invalid quantity {0}")]
    InvalidQuantity(u32),
    #[error("Item '{0}' cannot be equipped")]
    NotEquippable(String),
    #[error("Item '{0}' cannot be consumed")]
    NotConsumable(String),
    #[error("Slot {0} is already occupied")]
    SlotOccupied(EquipmentSlot),
    #[error("Slot {0} is empty")]
    EmptySlot(EquipmentSlot),
    #[error("Need {needed} of '{item_id}' but only {available} in backpack")]
    NotEnough {
        item_id: String,
        needed: u32,
        available: u32,
    },
}

/// An equipped item and the stat modifiers it attached
#[derive(Debug, Clone)]
struct EquippedItem {
    item: ItemInstance,
    handles: Vec<ModifierHandle>,
}

/// A character's equipment and backpack
///
/// Every operation either fully applies or leaves the inventory (and the
/// stat system passed in) untouched.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    slots: HashMap<EquipmentSlot, EquippedItem>,
    backpack: Vec<ItemInstance>,
    events: Vec<InventoryEvent>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory {
            slots: HashMap::new(),
            backpack: Vec::new(),
            events: Vec::new(),
        }
    }

    // === Queries ===

    pub fn backpack(&self) -> &[ItemInstance] {
        &self.backpack
    }

    /// Item in a slot, if any
    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&ItemInstance> {
        self.slots.get(&slot).map(|e| &e.item)
    }

    /// Total count of an item across backpack stacks
    pub fn count_of(&self, item_id: &str) -> u32 {
        self.backpack
            .iter()
            .filter(|s| s.id() == item_id)
            .map(ItemInstance::stack_size)
            .sum()
    }

    /// Drain pending notifications
    pub fn take_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    // === Backpack ===

    /// Add items, topping up existing stacks front-to-back before opening new ones
    pub fn add_to_backpack(&mut self, definition: Arc<ItemDefinition>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let item_id = definition.id.clone();
        self.insert_stack(definition, quantity);
        self.events.push(InventoryEvent::ItemAdded { item_id, quantity });
        self.events.push(InventoryEvent::BackpackChanged);
    }

    /// Remove items from a stack and hand them back for the world to spawn.
    ///
    /// `None` drops the whole stack; a quantity above the stack size is capped.
    pub fn drop_item_in_backpack(
        &mut self,
        index: usize,
        quantity: Option<u32>,
    ) -> Result<ItemInstance, InventoryError> {
        if quantity == Some(0) {
            return Err(InventoryError::InvalidQuantity(0));
        }
        let dropped = self
            .take_from(index, quantity.unwrap_or(u32::MAX))
            .ok_or(InventoryError::InvalidIndex(index))?;

        self.events.push(InventoryEvent::Dropped {
            item_id: dropped.id().to_string(),
            quantity: dropped.stack_size(),
        });
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(dropped)
    }

    /// Move part of a stack into a new entry at the end of the backpack.
    ///
    /// Returns the index of the new entry.
    pub fn split_stack(&mut self, index: usize, quantity: u32) -> Result<usize, InventoryError> {
        let entry = self
            .backpack
            .get_mut(index)
            .ok_or(InventoryError::InvalidIndex(index))?;
        if quantity >= entry.stack_size() {
            return Err(InventoryError::InvalidQuantity(quantity));
        }
        let split = entry
            .split(quantity)
            .ok_or(InventoryError::InvalidQuantity(quantity))?;
        self.backpack.push(split);
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(self.backpack.len() - 1)
    }

    /// Re-merge stacks of the same item
    pub fn compact(&mut self) {
        let mut ids: Vec<String> = Vec::new();
        for stack in &self.backpack {
            if !ids.iter().any(|id| id == stack.id()) {
                ids.push(stack.id().to_string());
            }
        }
        let before = self.backpack.len();
        for id in &ids {
            self.settle(id);
        }
        if self.backpack.len() != before {
            self.events.push(InventoryEvent::BackpackChanged);
        }
    }

    pub fn swap_backpack(&mut self, a: usize, b: usize) -> Result<(), InventoryError> {
        let len = self.backpack.len();
        if a >= len {
            return Err(InventoryError::InvalidIndex(a));
        }
        if b >= len {
            return Err(InventoryError::InvalidIndex(b));
        }
        if a != b {
            self.backpack.swap(a, b);
            self.events.push(InventoryEvent::BackpackChanged);
        }
        Ok(())
    }

    /// Remove `quantity` of an item, emptying the last stacks first
    pub fn remove_by_id(&mut self, item_id: &str, quantity: u32) -> Result<(), InventoryError> {
        let available = self.count_of(item_id);
        if available < quantity {
            return Err(InventoryError::NotEnough {
                item_id: item_id.to_string(),
                needed: quantity,
                available,
            });
        }
        if quantity == 0 {
            return Ok(());
        }

        let mut remaining = quantity;
        for stack in self.backpack.iter_mut().rev().filter(|s| s.id() == item_id) {
            remaining -= stack.take(remaining);
            if remaining == 0 {
                break;
            }
        }
        self.settle(item_id);

        self.events.push(InventoryEvent::ItemRemoved {
            item_id: item_id.to_string(),
            quantity,
        });
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(())
    }

    // === Equipment ===

    /// Equip one unit of a backpack entry.
    ///
    /// Any item already in the destination slot goes back to the backpack
    /// first, unless `only_if_empty` is set, in which case nothing happens.
    pub fn equip(
        &mut self,
        stats: &mut StatSystem,
        backpack_index: usize,
        only_if_empty: bool,
    ) -> Result<EquipmentSlot, InventoryError> {
        let definition = self
            .backpack
            .get(backpack_index)
            .map(|s| Arc::clone(s.definition()))
            .ok_or(InventoryError::InvalidIndex(backpack_index))?;
        let slot = definition
            .equipment_slot()
            .ok_or_else(|| InventoryError::NotEquippable(definition.id.clone()))?;
        let occupied = self.slots.contains_key(&slot);
        if occupied && only_if_empty {
            return Err(InventoryError::SlotOccupied(slot));
        }

        let item = self
            .take_from(backpack_index, 1)
            .ok_or(InventoryError::InvalidIndex(backpack_index))?;
        if occupied {
            self.unequip(stats, slot)?;
        }

        let handles = stats.add_modifiers(definition.equip_modifiers());
        tracing::debug!("Equipped {} in {:?} ({} modifiers)", definition.id, slot, handles.len());
        self.slots.insert(slot, EquippedItem { item, handles });

        self.events.push(InventoryEvent::Equipped {
            slot,
            item_id: definition.id.clone(),
        });
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(slot)
    }

    /// Take an item off, detach its modifiers and put it back in the backpack
    pub fn unequip(&mut self, stats: &mut StatSystem, slot: EquipmentSlot) -> Result<(), InventoryError> {
        let equipped = self
            .slots
            .remove(&slot)
            .ok_or(InventoryError::EmptySlot(slot))?;
        stats.remove_attached_modifiers(&equipped.handles);

        let definition = Arc::clone(equipped.item.definition());
        tracing::debug!("Unequipped {} from {:?}", definition.id, slot);
        self.insert_stack(Arc::clone(&definition), equipped.item.stack_size());

        self.events.push(InventoryEvent::Unequipped {
            slot,
            item_id: definition.id.clone(),
        });
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(())
    }

    /// Use one unit of a consumable, applying its permanent effects
    pub fn consume(&mut self, stats: &mut StatSystem, backpack_index: usize) -> Result<(), InventoryError> {
        let definition = self
            .backpack
            .get(backpack_index)
            .map(|s| Arc::clone(s.definition()))
            .ok_or(InventoryError::InvalidIndex(backpack_index))?;
        if !definition.is_consumable() {
            return Err(InventoryError::NotConsumable(definition.id.clone()));
        }

        for modifier in definition.consume_modifiers() {
            stats.add_modifier(modifier);
        }
        self.take_from(backpack_index, 1);

        self.events.push(InventoryEvent::Consumed {
            item_id: definition.id.clone(),
        });
        self.events.push(InventoryEvent::BackpackChanged);
        Ok(())
    }

    // === Internals ===

    /// First-fit merge, overflow into new stacks
    fn insert_stack(&mut self, definition: Arc<ItemDefinition>, quantity: u32) {
        let mut remaining = quantity;
        for stack in self
            .backpack
            .iter_mut()
            .filter(|s| s.same_definition(&definition))
        {
            remaining = stack.add(remaining);
            if remaining == 0 {
                return;
            }
        }

        let max = definition.max_stack_size();
        while remaining > 0 {
            let size = remaining.min(max);
            self.backpack.push(ItemInstance::new(Arc::clone(&definition), size));
            remaining -= size;
        }
    }

    /// Remove up to `quantity` items from one entry
    fn take_from(&mut self, index: usize, quantity: u32) -> Option<ItemInstance> {
        let entry = self.backpack.get_mut(index)?;
        let taken = entry.take(quantity);
        let definition = Arc::clone(entry.definition());
        self.settle(&definition.id);
        Some(ItemInstance::new(definition, taken))
    }

    /// Pour later stacks of an item into earlier ones and drop empty entries
    fn settle(&mut self, item_id: &str) {
        let positions: Vec<usize> = self
            .backpack
            .iter()
            .enumerate()
            .filter(|(_, s)| s.id() == item_id)
            .map(|(i, _)| i)
            .collect();

        for (a, &into) in positions.iter().enumerate() {
            for &from in &positions[a + 1..] {
                let room = self.backpack[into].room();
                if room == 0 {
                    break;
                }
                let moved = self.backpack[from].take(room);
                self.backpack[into].add(moved);
            }
        }
        self.backpack.retain(ItemInstance::is_present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemVariant;
    use crate::stats::StatModifier;
    use crate::types::{ArmorSlot, StatType};
    use proptest::prelude::*;

    fn stats() -> StatSystem {
        StatSystem::new()
            .with_stat(StatType::Damage, 5.0, 0.0, 1000.0)
            .with_stat(StatType::CurrentHealth, 50.0, 0.0, 100.0)
            .with_stat(StatType::DamageResistance, 0.0, 0.0, 1.0)
            .with_stat(StatType::AttackRange, 1.0, 0.0, 50.0)
    }

    fn sword() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new(
            "iron_sword",
            "Iron Sword",
            ItemVariant::Weapon {
                range: 1.0,
                damage: 10.0,
                critical_chance: 0.0,
                critical_damage_multiplier: 0.0,
            },
        ))
    }

    fn axe() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new(
            "axe",
            "Axe",
            ItemVariant::Weapon {
                range: 0.5,
                damage: 14.0,
                critical_chance: 0.0,
                critical_damage_multiplier: 0.0,
            },
        ))
    }

    fn helmet() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("helmet", "Helmet", ItemVariant::Armor { slot: ArmorSlot::Head })
                .with_equip_bonus(StatType::DamageResistance, 0.1),
        )
    }

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(
            ItemDefinition::new("potion", "Potion", ItemVariant::Healing { amount: 25.0 })
                .with_max_stack(10),
        )
    }

    fn pelt() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("pelt", "Pelt", ItemVariant::Material).with_max_stack(10))
    }

    fn sizes(inventory: &Inventory) -> Vec<u32> {
        inventory.backpack().iter().map(|s| s.stack_size()).collect()
    }

    #[test]
    fn test_add_spills_into_new_stacks() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 25);
        assert_eq!(sizes(&inventory), vec![10, 10, 5]);
    }

    #[test]
    fn test_add_tops_up_first_stack_with_room() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 7);
        inventory.add_to_backpack(pelt(), 1);
        inventory.add_to_backpack(potion(), 5);
        assert_eq!(sizes(&inventory), vec![10, 1, 2]);
        assert_eq!(inventory.count_of("potion"), 12);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 0);
        assert!(inventory.backpack().is_empty());
        assert!(inventory.take_events().is_empty());
    }

    #[test]
    fn test_equip_then_unequip_restores_stats() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(sword(), 1);

        let slot = inventory.equip(&mut stats, 0, false).unwrap();
        assert_eq!(slot, EquipmentSlot::Weapon);
        assert!((stats.get_current_value(StatType::Damage) - 15.0).abs() < f64::EPSILON);
        assert!((stats.get_current_value(StatType::AttackRange) - 2.0).abs() < f64::EPSILON);
        assert!(inventory.backpack().is_empty());

        inventory.unequip(&mut stats, EquipmentSlot::Weapon).unwrap();
        assert!((stats.get_current_value(StatType::Damage) - 5.0).abs() < f64::EPSILON);
        assert!((stats.get_current_value(StatType::AttackRange) - 1.0).abs() < f64::EPSILON);
        assert_eq!(inventory.count_of("iron_sword"), 1);
        assert!(inventory.equipped(EquipmentSlot::Weapon).is_none());
    }

    #[test]
    fn test_equip_swaps_occupant() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(sword(), 1);
        inventory.add_to_backpack(axe(), 1);

        inventory.equip(&mut stats, 0, false).unwrap();
        // Axe is now at index 0
        inventory.equip(&mut stats, 0, false).unwrap();

        assert_eq!(inventory.equipped(EquipmentSlot::Weapon).unwrap().id(), "axe");
        assert_eq!(inventory.count_of("iron_sword"), 1);
        assert!((stats.get_current_value(StatType::Damage) - 19.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_equip_only_if_empty() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(sword(), 1);
        inventory.add_to_backpack(axe(), 1);
        inventory.equip(&mut stats, 0, false).unwrap();
        inventory.take_events();

        let result = inventory.equip(&mut stats, 0, true);
        assert_eq!(result, Err(InventoryError::SlotOccupied(EquipmentSlot::Weapon)));
        assert_eq!(inventory.equipped(EquipmentSlot::Weapon).unwrap().id(), "iron_sword");
        assert_eq!(inventory.count_of("axe"), 1);
        assert!(inventory.take_events().is_empty());
    }

    #[test]
    fn test_equip_takes_one_from_stack() {
        let stackable_helm = Arc::new(
            ItemDefinition::new("cap", "Cap", ItemVariant::Armor { slot: ArmorSlot::Head })
                .with_max_stack(5),
        );
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(stackable_helm, 3);

        inventory.equip(&mut stats, 0, false).unwrap();
        assert_eq!(sizes(&inventory), vec![2]);
        assert_eq!(inventory.equipped(EquipmentSlot::Head).unwrap().stack_size(), 1);
    }

    #[test]
    fn test_equip_guards() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 1);

        assert_eq!(
            inventory.equip(&mut stats, 0, false),
            Err(InventoryError::NotEquippable("potion".to_string()))
        );
        assert_eq!(
            inventory.equip(&mut stats, 4, false),
            Err(InventoryError::InvalidIndex(4))
        );
        assert_eq!(
            inventory.unequip(&mut stats, EquipmentSlot::Legs),
            Err(InventoryError::EmptySlot(EquipmentSlot::Legs))
        );
    }

    #[test]
    fn test_identical_armor_pieces_tracked_separately() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(helmet(), 1);
        inventory.equip(&mut stats, 0, false).unwrap();

        // An unrelated source attaching the same bonus must survive the unequip
        let other = stats
            .add_modifier(&StatModifier::attached(StatType::DamageResistance, 0.1))
            .unwrap();
        inventory.unequip(&mut stats, EquipmentSlot::Head).unwrap();

        assert!((stats.get_current_value(StatType::DamageResistance) - 0.1).abs() < 1e-9);
        assert!(stats.remove_attached_modifier(other));
    }

    #[test]
    fn test_consume_decrements_then_removes() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 2);

        inventory.consume(&mut stats, 0).unwrap();
        assert_eq!(sizes(&inventory), vec![1]);
        assert!((stats.get_current_value(StatType::CurrentHealth) - 75.0).abs() < f64::EPSILON);

        inventory.consume(&mut stats, 0).unwrap();
        assert!(inventory.backpack().is_empty());
        // Health is clamped to its max
        assert!((stats.get_current_value(StatType::CurrentHealth) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consume_rejects_non_consumable() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(pelt(), 1);
        assert_eq!(
            inventory.consume(&mut stats, 0),
            Err(InventoryError::NotConsumable("pelt".to_string()))
        );
        assert_eq!(inventory.count_of("pelt"), 1);
    }

    #[test]
    fn test_consume_resettles_stacks() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(potion(), 19);
        assert_eq!(sizes(&inventory), vec![10, 9]);

        inventory.consume(&mut stats, 0).unwrap();
        assert_eq!(sizes(&inventory), vec![10, 8]);
    }

    #[test]
    fn test_drop() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(pelt(), 8);

        let dropped = inventory.drop_item_in_backpack(0, Some(3)).unwrap();
        assert_eq!(dropped.stack_size(), 3);
        assert_eq!(sizes(&inventory), vec![5]);

        let dropped = inventory.drop_item_in_backpack(0, None).unwrap();
        assert_eq!(dropped.stack_size(), 5);
        assert!(inventory.backpack().is_empty());

        assert_eq!(
            inventory.drop_item_in_backpack(0, None).unwrap_err(),
            InventoryError::InvalidIndex(0)
        );
    }

    #[test]
    fn test_drop_caps_quantity() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(pelt(), 4);
        let dropped = inventory.drop_item_in_backpack(0, Some(40)).unwrap();
        assert_eq!(dropped.stack_size(), 4);
        assert!(inventory.backpack().is_empty());
    }

    #[test]
    fn test_split_and_compact() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(pelt(), 6);

        let index = inventory.split_stack(0, 2).unwrap();
        assert_eq!(index, 1);
        assert_eq!(sizes(&inventory), vec![4, 2]);

        assert_eq!(
            inventory.split_stack(0, 4),
            Err(InventoryError::InvalidQuantity(4))
        );

        inventory.compact();
        assert_eq!(sizes(&inventory), vec![6]);
    }

    #[test]
    fn test_swap_backpack() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(sword(), 1);
        inventory.add_to_backpack(pelt(), 3);
        inventory.take_events();

        inventory.swap_backpack(0, 1).unwrap();
        assert_eq!(inventory.backpack()[0].id(), "pelt");
        assert_eq!(inventory.backpack()[1].id(), "iron_sword");
        assert_eq!(inventory.take_events(), vec![InventoryEvent::BackpackChanged]);

        // Same index is accepted but changes nothing
        inventory.swap_backpack(1, 1).unwrap();
        assert!(inventory.take_events().is_empty());

        assert_eq!(inventory.swap_backpack(2, 0), Err(InventoryError::InvalidIndex(2)));
        assert_eq!(inventory.swap_backpack(0, 5), Err(InventoryError::InvalidIndex(5)));
        assert!(inventory.take_events().is_empty());
        assert_eq!(inventory.backpack()[0].id(), "pelt");
    }

    #[test]
    fn test_remove_by_id() {
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(pelt(), 15);

        inventory.remove_by_id("pelt", 7).unwrap();
        assert_eq!(sizes(&inventory), vec![8]);

        let err = inventory.remove_by_id("pelt", 9).unwrap_err();
        assert_eq!(
            err,
            InventoryError::NotEnough {
                item_id: "pelt".to_string(),
                needed: 9,
                available: 8,
            }
        );
    }

    #[test]
    fn test_events() {
        let mut stats = stats();
        let mut inventory = Inventory::new();
        inventory.add_to_backpack(sword(), 1);
        inventory.equip(&mut stats, 0, false).unwrap();

        let events = inventory.take_events();
        assert_eq!(
            events,
            vec![
                InventoryEvent::ItemAdded {
                    item_id: "iron_sword".to_string(),
                    quantity: 1,
                },
                InventoryEvent::BackpackChanged,
                InventoryEvent::Equipped {
                    slot: EquipmentSlot::Weapon,
                    item_id: "iron_sword".to_string(),
                },
                InventoryEvent::BackpackChanged,
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_stacks_never_overfill(
            max_stack in 1u32..16,
            adds in proptest::collection::vec(0u32..60, 1..10),
        ) {
            let definition = Arc::new(
                ItemDefinition::new("ore", "Ore", ItemVariant::Material).with_max_stack(max_stack),
            );
            let mut inventory = Inventory::new();
            let mut total = 0;
            for quantity in adds {
                inventory.add_to_backpack(Arc::clone(&definition), quantity);
                total += quantity;
            }

            prop_assert_eq!(inventory.count_of("ore"), total);
            // Exactly enough stacks to hold everything
            prop_assert_eq!(inventory.backpack().len() as u32, total.div_ceil(max_stack));
            let with_room = inventory.backpack().iter().filter(|s| !s.is_full()).count();
            prop_assert!(with_room <= 1);
            prop_assert!(inventory.backpack().iter().all(|s| s.is_present()));
        }

        #[test]
        fn prop_removals_keep_single_partial_stack(
            start in 1u32..80,
            drops in proptest::collection::vec((0usize..8, 1u32..12), 0..10),
        ) {
            let definition = Arc::new(
                ItemDefinition::new("ore", "Ore", ItemVariant::Material).with_max_stack(10),
            );
            let mut inventory = Inventory::new();
            inventory.add_to_backpack(Arc::clone(&definition), start);
            for (index, quantity) in drops {
                let _ = inventory.drop_item_in_backpack(index, Some(quantity));
                let with_room = inventory.backpack().iter().filter(|s| !s.is_full()).count();
                prop_assert!(with_room <= 1);
            }
        }
    }
}
