//! StatSystem - Registry of a character's stats

mod modifier;
mod stat;

pub use modifier::{ModifierHandle, ModifierKind, StatModifier};
pub use stat::Stat;

use crate::config::StatTemplate;
use crate::types::StatType;
use std::collections::HashMap;

/// All stats of one entity, keyed by type
#[derive(Debug, Clone, Default)]
pub struct StatSystem {
    stats: HashMap<StatType, Stat>,
    /// Stats changed since the last `take_changes`
    changes: Vec<StatType>,
}

impl StatSystem {
    /// Create an empty system
    pub fn new() -> Self {
        StatSystem {
            stats: HashMap::new(),
            changes: Vec::new(),
        }
    }

    /// Build a system from a configured template
    pub fn from_template(template: &StatTemplate) -> Self {
        let mut system = Self::new();
        for entry in &template.stats {
            system.register(Stat::new(entry.stat_type, entry.base, entry.min, entry.max));
        }
        system
    }

    /// Register (or replace) a stat.
    ///
    /// Handles of the replaced stat's modifiers go stale and are never
    /// handed out again.
    pub fn register(&mut self, mut stat: Stat) {
        let stat_type = stat.stat_type();
        if let Some(previous) = self.stats.get(&stat_type) {
            stat.inherit_handles(previous);
        }
        self.stats.insert(stat_type, stat);
        self.changes.push(stat_type);
    }

    /// Builder-style registration
    pub fn with_stat(mut self, stat_type: StatType, base: f64, min: f64, max: f64) -> Self {
        self.register(Stat::new(stat_type, base, min, max));
        self
    }

    pub fn contains(&self, stat_type: StatType) -> bool {
        self.stats.contains_key(&stat_type)
    }

    pub fn stat(&self, stat_type: StatType) -> Option<&Stat> {
        self.stats.get(&stat_type)
    }

    /// Registered stats in [`StatType::all`] order
    pub fn iter(&self) -> impl Iterator<Item = &Stat> {
        StatType::all().iter().filter_map(|t| self.stats.get(t))
    }

    /// Derived value of a stat; 0 if it isn't registered
    pub fn get_current_value(&self, stat_type: StatType) -> f64 {
        match self.stats.get(&stat_type) {
            Some(stat) => stat.current_value(),
            None => {
                tracing::warn!("Stat {:?} is not registered", stat_type);
                0.0
            }
        }
    }

    /// Base value of a stat; 0 if it isn't registered
    pub fn get_base_value(&self, stat_type: StatType) -> f64 {
        match self.stats.get(&stat_type) {
            Some(stat) => stat.base_value(),
            None => {
                tracing::warn!("Stat {:?} is not registered", stat_type);
                0.0
            }
        }
    }

    /// Route a modifier to its stat.
    ///
    /// Permanent kinds fold in immediately and return `None`; attached
    /// modifiers return the handle needed to remove them.
    pub fn add_modifier(&mut self, modifier: &StatModifier) -> Option<ModifierHandle> {
        let Some(stat) = self.stats.get_mut(&modifier.stat_type) else {
            tracing::warn!(
                "Dropping {:?} modifier for unregistered stat {:?}",
                modifier.kind,
                modifier.stat_type
            );
            return None;
        };
        let handle = stat.add_modifier(modifier);
        self.changes.push(modifier.stat_type);
        handle
    }

    /// Apply several modifiers, collecting handles of the attached ones
    pub fn add_modifiers<'a>(
        &mut self,
        modifiers: impl IntoIterator<Item = &'a StatModifier>,
    ) -> Vec<ModifierHandle> {
        modifiers
            .into_iter()
            .filter_map(|m| self.add_modifier(m))
            .collect()
    }

    /// Remove an attached modifier; no-op if it is already gone
    pub fn remove_attached_modifier(&mut self, handle: ModifierHandle) -> bool {
        let removed = self
            .stats
            .get_mut(&handle.stat_type)
            .map(|stat| stat.remove_attached_modifier(handle))
            .unwrap_or(false);
        if removed {
            self.changes.push(handle.stat_type);
        }
        removed
    }

    pub fn remove_attached_modifiers(&mut self, handles: &[ModifierHandle]) {
        for handle in handles {
            self.remove_attached_modifier(*handle);
        }
    }

    /// Restore a stat's initial base and clear its attached modifiers
    pub fn reset(&mut self, stat_type: StatType) {
        if let Some(stat) = self.stats.get_mut(&stat_type) {
            stat.reset();
            self.changes.push(stat_type);
        }
    }

    pub fn reset_all(&mut self) {
        for stat in self.stats.values_mut() {
            stat.reset();
        }
        self.changes.extend(self.stats.keys().copied());
    }

    /// Drain change notifications, each stat at most once
    pub fn take_changes(&mut self) -> Vec<StatType> {
        let mut changes = std::mem::take(&mut self.changes);
        let mut seen = Vec::with_capacity(changes.len());
        changes.retain(|t| {
            if seen.contains(t) {
                false
            } else {
                seen.push(*t);
                true
            }
        });
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> StatSystem {
        StatSystem::new()
            .with_stat(StatType::Damage, 5.0, 0.0, 1000.0)
            .with_stat(StatType::CurrentHealth, 100.0, 0.0, 100.0)
    }

    #[test]
    fn test_unregistered_stat_reads_zero() {
        let stats = system();
        assert!((stats.get_current_value(StatType::PushingForce) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unregistered_modifier_dropped() {
        let mut stats = system();
        let handle = stats.add_modifier(&StatModifier::attached(StatType::PushingForce, 3.0));
        assert!(handle.is_none());
        assert!(!stats.contains(StatType::PushingForce));
    }

    #[test]
    fn test_add_and_remove_attached() {
        let mut stats = system();
        let handle = stats
            .add_modifier(&StatModifier::attached(StatType::Damage, 10.0))
            .unwrap();
        assert!((stats.get_current_value(StatType::Damage) - 15.0).abs() < f64::EPSILON);

        assert!(stats.remove_attached_modifier(handle));
        assert!((stats.get_current_value(StatType::Damage) - 5.0).abs() < f64::EPSILON);
        assert!(!stats.remove_attached_modifier(handle));
    }

    #[test]
    fn test_permanent_modifier_returns_no_handle() {
        let mut stats = system();
        let handle = stats.add_modifier(&StatModifier::base(StatType::CurrentHealth, -30.0));
        assert!(handle.is_none());
        assert!((stats.get_current_value(StatType::CurrentHealth) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handles_distinct_across_stats() {
        let mut stats = system();
        let a = stats
            .add_modifier(&StatModifier::attached(StatType::Damage, 1.0))
            .unwrap();
        let b = stats
            .add_modifier(&StatModifier::attached(StatType::CurrentHealth, 1.0))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(a.stat_type(), StatType::Damage);
    }

    #[test]
    fn test_replaced_stat_never_reuses_handles() {
        let mut stats = system();
        let stale = stats
            .add_modifier(&StatModifier::attached(StatType::Damage, 1.0))
            .unwrap();

        stats.register(Stat::new(StatType::Damage, 5.0, 0.0, 1000.0));
        let fresh = stats
            .add_modifier(&StatModifier::attached(StatType::Damage, 10.0))
            .unwrap();
        assert_ne!(stale, fresh);

        assert!(!stats.remove_attached_modifier(stale));
        assert!((stats.get_current_value(StatType::Damage) - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_all() {
        let mut stats = system();
        stats.add_modifier(&StatModifier::base(StatType::Damage, 7.0));
        stats.add_modifier(&StatModifier::attached(StatType::Damage, 3.0));
        stats.add_modifier(&StatModifier::base(StatType::CurrentHealth, -40.0));
        stats.add_modifier(&StatModifier::attached(StatType::CurrentHealth, 5.0));
        stats.take_changes();

        stats.reset_all();
        assert!((stats.get_current_value(StatType::Damage) - 5.0).abs() < f64::EPSILON);
        assert!((stats.get_current_value(StatType::CurrentHealth) - 100.0).abs() < f64::EPSILON);
        for stat in stats.iter() {
            assert_eq!(stat.attached_count(), 0);
        }
        assert_eq!(stats.take_changes().len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut stats = system();
        stats.add_modifier(&StatModifier::base(StatType::Damage, 7.0));
        stats.add_modifier(&StatModifier::attached(StatType::Damage, 7.0));
        stats.reset(StatType::Damage);
        assert!((stats.get_current_value(StatType::Damage) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_changes_dedups() {
        let mut stats = system();
        stats.take_changes();

        stats.add_modifier(&StatModifier::base(StatType::Damage, 1.0));
        stats.add_modifier(&StatModifier::base(StatType::Damage, 1.0));
        stats.add_modifier(&StatModifier::base(StatType::CurrentHealth, -1.0));

        assert_eq!(
            stats.take_changes(),
            vec![StatType::Damage, StatType::CurrentHealth]
        );
        assert!(stats.take_changes().is_empty());
    }
}
