//! Item types and the catalog they are looked up in

mod definition;
mod instance;

pub use definition::{ItemDefinition, ItemKind, ItemVariant};
pub use instance::ItemInstance;

use std::collections::HashMap;
use std::sync::Arc;

/// Item definitions by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<ItemDefinition>>,
}

impl ItemCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
        }
    }

    /// Register an item definition
    pub fn register(&mut self, definition: ItemDefinition) -> Arc<ItemDefinition> {
        let definition = Arc::new(definition);
        self.items.insert(definition.id.clone(), Arc::clone(&definition));
        definition
    }

    /// Get an item definition by id
    pub fn get(&self, id: &str) -> Option<Arc<ItemDefinition>> {
        self.items.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// All definitions, sorted by id
    pub fn sorted(&self) -> Vec<Arc<ItemDefinition>> {
        let mut items: Vec<_> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
