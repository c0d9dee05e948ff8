//! Character - Stats and inventory of one entity, plus its combat helpers

use crate::config::StatTemplate;
use crate::cooldown::Cooldown;
use crate::inventory::{Inventory, InventoryError};
use crate::item::{ItemDefinition, ItemInstance};
use crate::stats::{StatModifier, StatSystem};
use crate::types::{EquipmentSlot, StatType};
use rand::Rng;
use std::sync::Arc;

/// Outcome of one attack roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub damage: f64,
    pub critical: bool,
}

/// A player or NPC
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    stats: StatSystem,
    inventory: Inventory,
    attack_cooldown: Cooldown,
}

impl Character {
    pub fn new(name: impl Into<String>, stats: StatSystem) -> Self {
        Character {
            name: name.into(),
            stats,
            inventory: Inventory::new(),
            attack_cooldown: Cooldown::new(),
        }
    }

    pub fn from_template(name: impl Into<String>, template: &StatTemplate) -> Self {
        Self::new(name, StatSystem::from_template(template))
    }

    pub fn stats(&self) -> &StatSystem {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatSystem {
        &mut self.stats
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    // === Health ===

    /// Remaining health pool; attached bonuses on `CurrentHealth` don't count
    pub fn health(&self) -> f64 {
        self.stats.get_base_value(StatType::CurrentHealth)
    }

    pub fn max_health(&self) -> f64 {
        self.stats
            .stat(StatType::CurrentHealth)
            .map(|s| s.max_base_value())
            .unwrap_or(0.0)
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Apply incoming damage reduced by resistance; returns health lost
    pub fn take_damage(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 || !self.is_alive() {
            return 0.0;
        }
        let resistance = self
            .stats
            .get_current_value(StatType::DamageResistance)
            .clamp(0.0, 1.0);
        let before = self.stats.get_base_value(StatType::CurrentHealth);
        self.stats
            .add_modifier(&StatModifier::base(StatType::CurrentHealth, -amount * (1.0 - resistance)));
        let lost = before - self.stats.get_base_value(StatType::CurrentHealth);

        if !self.is_alive() {
            tracing::debug!("{} died", self.name);
        }
        lost
    }

    /// Restore health up to its max; returns health gained
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.stats.get_base_value(StatType::CurrentHealth);
        self.stats
            .add_modifier(&StatModifier::base(StatType::CurrentHealth, amount));
        self.stats.get_base_value(StatType::CurrentHealth) - before
    }

    // === Combat ===

    /// Roll damage, applying the crit multiplier on a critical hit
    pub fn roll_attack(&self, rng: &mut impl Rng) -> AttackRoll {
        let damage = self.stats.get_current_value(StatType::Damage);
        let crit_chance = self.stats.get_current_value(StatType::CriticalChance);
        let critical = rng.gen::<f64>() < crit_chance;
        let damage = if critical {
            damage * self.stats.get_current_value(StatType::CriticalDamageMultiplier)
        } else {
            damage
        };
        AttackRoll { damage, critical }
    }

    /// Attack if the attack delay has elapsed since the previous one
    pub fn try_attack(&mut self, rng: &mut impl Rng) -> Option<AttackRoll> {
        if !self.attack_cooldown.is_ready() || !self.is_alive() {
            return None;
        }
        self.attack_cooldown
            .start(self.stats.get_current_value(StatType::AttackDelay));
        Some(self.roll_attack(rng))
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_cooldown.is_ready()
    }

    pub fn attack_cooldown_remaining(&self) -> f64 {
        self.attack_cooldown.remaining()
    }

    /// Movement speed while dashing
    pub fn dash_speed(&self) -> f64 {
        self.stats.get_current_value(StatType::MovementSpeed)
            * self.stats.get_current_value(StatType::DashSpeedMultiplier)
    }

    /// Advance timers
    pub fn tick(&mut self, delta: f64) {
        self.attack_cooldown.tick(delta);
    }

    // === Inventory ===

    pub fn add_to_backpack(&mut self, definition: Arc<ItemDefinition>, quantity: u32) {
        self.inventory.add_to_backpack(definition, quantity);
    }

    pub fn equip(&mut self, backpack_index: usize, only_if_empty: bool) -> Result<EquipmentSlot, InventoryError> {
        self.inventory.equip(&mut self.stats, backpack_index, only_if_empty)
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<(), InventoryError> {
        self.inventory.unequip(&mut self.stats, slot)
    }

    pub fn consume(&mut self, backpack_index: usize) -> Result<(), InventoryError> {
        self.inventory.consume(&mut self.stats, backpack_index)
    }

    pub fn drop_item(&mut self, backpack_index: usize, quantity: Option<u32>) -> Result<ItemInstance, InventoryError> {
        self.inventory.drop_item_in_backpack(backpack_index, quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemVariant;
    use crate::types::ArmorSlot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hero() -> Character {
        let stats = StatSystem::new()
            .with_stat(StatType::CurrentHealth, 100.0, 0.0, 100.0)
            .with_stat(StatType::DamageResistance, 0.25, 0.0, 0.9)
            .with_stat(StatType::Damage, 10.0, 0.0, 1000.0)
            .with_stat(StatType::CriticalChance, 0.0, 0.0, 1.0)
            .with_stat(StatType::CriticalDamageMultiplier, 2.0, 1.0, 10.0)
            .with_stat(StatType::AttackDelay, 1.0, 0.1, 10.0)
            .with_stat(StatType::MovementSpeed, 5.0, 0.0, 20.0)
            .with_stat(StatType::DashSpeedMultiplier, 2.0, 1.0, 5.0);
        Character::new("Hero", stats)
    }

    #[test]
    fn test_take_damage_applies_resistance() {
        let mut hero = hero();
        let lost = hero.take_damage(40.0);
        assert!((lost - 30.0).abs() < 1e-9);
        assert!((hero.health() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut hero = hero();
        let lost = hero.take_damage(1000.0);
        assert!((lost - 100.0).abs() < 1e-9);
        assert!(!hero.is_alive());
        // Dead characters take no further damage
        assert!((hero.take_damage(10.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heal_capped_at_max() {
        let mut hero = hero();
        hero.take_damage(20.0);
        let healed = hero.heal(50.0);
        assert!((healed - 15.0).abs() < 1e-9);
        assert!((hero.health() - hero.max_health()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_critical_roll() {
        let mut hero = hero();
        let mut rng = StdRng::seed_from_u64(7);
        let roll = hero.roll_attack(&mut rng);
        assert!(!roll.critical);
        assert!((roll.damage - 10.0).abs() < f64::EPSILON);

        hero.stats_mut()
            .add_modifier(&StatModifier::base(StatType::CriticalChance, 1.0));
        let roll = hero.roll_attack(&mut rng);
        assert!(roll.critical);
        assert!((roll.damage - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attack_gated_by_delay() {
        let mut hero = hero();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(hero.try_attack(&mut rng).is_some());
        assert!(hero.try_attack(&mut rng).is_none());

        hero.tick(0.5);
        assert!(hero.try_attack(&mut rng).is_none());
        hero.tick(0.5);
        assert!(hero.try_attack(&mut rng).is_some());
    }

    #[test]
    fn test_attached_health_bonus_does_not_prevent_death() {
        let mut hero = hero();
        let cap = Arc::new(
            ItemDefinition::new("troll_cap", "Troll Cap", ItemVariant::Armor { slot: ArmorSlot::Head })
                .with_equip_bonus(StatType::CurrentHealth, 20.0),
        );
        hero.add_to_backpack(cap, 1);
        hero.equip(0, false).unwrap();

        let mut lost = 0.0;
        for _ in 0..10 {
            lost += hero.take_damage(1000.0);
        }
        assert!(!hero.is_alive());
        assert!((lost - 100.0).abs() < 1e-9);
        assert!((hero.health() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dash_speed() {
        let hero = hero();
        assert!((hero.dash_speed() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_equip_through_character() {
        let mut hero = hero();
        let sword = Arc::new(ItemDefinition::new(
            "sword",
            "Sword",
            ItemVariant::Weapon {
                range: 0.0,
                damage: 5.0,
                critical_chance: 0.0,
                critical_damage_multiplier: 0.0,
            },
        ));
        hero.add_to_backpack(sword, 1);
        hero.equip(0, false).unwrap();
        assert!((hero.stats().get_current_value(StatType::Damage) - 15.0).abs() < f64::EPSILON);

        hero.unequip(EquipmentSlot::Weapon).unwrap();
        assert!((hero.stats().get_current_value(StatType::Damage) - 10.0).abs() < f64::EPSILON);
    }
}
