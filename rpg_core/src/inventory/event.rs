//! Notifications emitted by inventory operations

use crate::types::EquipmentSlot;

/// Something observable changed in an inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// New items entered the backpack from outside (pickup, reward)
    ItemAdded { item_id: String, quantity: u32 },
    /// Items left the backpack without being used or dropped
    ItemRemoved { item_id: String, quantity: u32 },
    Equipped { slot: EquipmentSlot, item_id: String },
    Unequipped { slot: EquipmentSlot, item_id: String },
    Consumed { item_id: String },
    Dropped { item_id: String, quantity: u32 },
    /// Backpack contents or ordering changed
    BackpackChanged,
}
