//! ItemInstance - A stack of identical items

use crate::item::ItemDefinition;
use std::sync::Arc;

/// One inventory slot's worth of a single item type
///
/// The stack size is kept within `[0, max_stack_size]`. A zero-size stack
/// counts as absent.
#[derive(Debug, Clone)]
pub struct ItemInstance {
    definition: Arc<ItemDefinition>,
    stack_size: u32,
}

impl ItemInstance {
    /// Create a stack, clamped to the definition's limit
    pub fn new(definition: Arc<ItemDefinition>, stack_size: u32) -> Self {
        let stack_size = stack_size.min(definition.max_stack_size());
        ItemInstance {
            definition,
            stack_size,
        }
    }

    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    pub fn is_present(&self) -> bool {
        self.stack_size > 0
    }

    pub fn is_full(&self) -> bool {
        self.stack_size >= self.definition.max_stack_size()
    }

    /// Free space left in the stack
    pub fn room(&self) -> u32 {
        self.definition.max_stack_size().saturating_sub(self.stack_size)
    }

    /// Whether both stacks hold the same item type
    pub fn same_definition(&self, definition: &ItemDefinition) -> bool {
        self.definition.id == definition.id
    }

    /// Add up to `quantity` items, returning what didn't fit
    pub fn add(&mut self, quantity: u32) -> u32 {
        let added = quantity.min(self.room());
        self.stack_size += added;
        quantity - added
    }

    /// Remove up to `quantity` items, returning how many were removed
    pub fn take(&mut self, quantity: u32) -> u32 {
        let taken = quantity.min(self.stack_size);
        self.stack_size -= taken;
        taken
    }

    /// Split `quantity` items off into a new stack
    pub fn split(&mut self, quantity: u32) -> Option<ItemInstance> {
        if quantity == 0 || quantity > self.stack_size {
            return None;
        }
        self.stack_size -= quantity;
        Some(ItemInstance {
            definition: Arc::clone(&self.definition),
            stack_size: quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemVariant;

    fn arrows() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("arrow", "Arrow", ItemVariant::Material).with_max_stack(20))
    }

    #[test]
    fn test_new_clamps_stack() {
        let stack = ItemInstance::new(arrows(), 50);
        assert_eq!(stack.stack_size(), 20);
        assert!(stack.is_full());
    }

    #[test]
    fn test_add_returns_overflow() {
        let mut stack = ItemInstance::new(arrows(), 15);
        assert_eq!(stack.add(8), 3);
        assert_eq!(stack.stack_size(), 20);
        assert_eq!(stack.room(), 0);
    }

    #[test]
    fn test_take_until_absent() {
        let mut stack = ItemInstance::new(arrows(), 3);
        assert_eq!(stack.take(5), 3);
        assert!(!stack.is_present());
    }

    #[test]
    fn test_split() {
        let mut stack = ItemInstance::new(arrows(), 10);
        let half = stack.split(4).unwrap();
        assert_eq!(stack.stack_size(), 6);
        assert_eq!(half.stack_size(), 4);
        assert!(half.same_definition(stack.definition()));

        assert!(stack.split(0).is_none());
        assert!(stack.split(7).is_none());
    }
}
