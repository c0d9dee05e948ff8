//! Application state

use crate::world::{CannedWeather, Encounter, StepReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rpg_core::config::{
    load_item_catalog, load_quests, load_stat_templates, load_weather_effects, StatTemplate,
};
use rpg_core::{
    default_catalog, default_quests, default_stat_templates, default_weather_effects, Character,
    EquipmentSlot, InventoryEvent, ItemCatalog, QuestDefinition, QuestLog, StatType, Vec3,
    WeatherKind, WeatherSystem,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Poll rate for the canned weather feed
const DEMO_POLL_SECS: f64 = 20.0;
const LOG_LIMIT: usize = 200;
const SPAWN_DISTANCE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Stats,
    Inventory,
    Quests,
    World,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Stats, Tab::Inventory, Tab::Quests, Tab::World, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Stats => "Stats",
            Tab::Inventory => "Inventory",
            Tab::Quests => "Quests",
            Tab::World => "World",
            Tab::Help => "Help",
        }
    }
}

/// Inventory panel focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryFocus {
    Slots,
    Backpack,
}

/// Config loaded from disk, or the built-in defaults
struct LoadedConfig {
    templates: HashMap<String, StatTemplate>,
    catalog: ItemCatalog,
    quests: HashMap<String, Arc<QuestDefinition>>,
    weather: rpg_core::WeatherEffects,
}

impl LoadedConfig {
    fn load() -> Self {
        let dirs = ["config", "rpg_core/config", "../rpg_core/config"];
        let Some(dir) = dirs.iter().map(Path::new).find(|d| d.join("items.toml").exists()) else {
            tracing::info!("No config directory found, using built-in config");
            let catalog = default_catalog();
            return LoadedConfig {
                templates: default_stat_templates(),
                quests: default_quests(&catalog),
                catalog,
                weather: default_weather_effects(),
            };
        };

        tracing::info!("Loading config from {}", dir.display());
        let catalog = load_item_catalog(&dir.join("items.toml")).unwrap_or_else(|e| {
            tracing::error!("items.toml: {}", e);
            default_catalog()
        });
        let templates = load_stat_templates(&dir.join("stats.toml")).unwrap_or_else(|e| {
            tracing::error!("stats.toml: {}", e);
            default_stat_templates()
        });
        let quests = load_quests(&dir.join("quests.toml"), &catalog).unwrap_or_else(|e| {
            tracing::error!("quests.toml: {}", e);
            default_quests(&catalog)
        });
        let weather = load_weather_effects(&dir.join("weather.toml")).unwrap_or_else(|e| {
            tracing::error!("weather.toml: {}", e);
            default_weather_effects()
        });
        LoadedConfig {
            templates,
            catalog,
            quests,
            weather,
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub player: Character,
    pub player_position: Vec3,
    pub encounter: Encounter,
    pub catalog: ItemCatalog,
    pub quests: Vec<Arc<QuestDefinition>>,
    pub quest_log: QuestLog,
    pub weather: WeatherSystem,
    npc_weather: WeatherSystem,
    weather_feed: CannedWeather,
    npc_template: StatTemplate,
    pub log: Vec<String>,
    /// Stats that changed on the last tick
    pub recent_changes: Vec<StatType>,
    pub rng: StdRng,
    pub show_help: bool,
    pub stats_scroll: usize,
    pub log_scroll: usize,
    pub time_elapsed: f64,
    // Inventory UI state
    pub inventory_focus: InventoryFocus,
    pub selected_slot: usize,
    pub selected_backpack: usize,
    pub selected_quest: usize,
}

impl App {
    pub fn new() -> Self {
        Self::from_config(LoadedConfig::load())
    }

    /// App built from the built-in config only
    pub fn with_defaults() -> Self {
        let catalog = default_catalog();
        Self::from_config(LoadedConfig {
            templates: default_stat_templates(),
            quests: default_quests(&catalog),
            catalog,
            weather: default_weather_effects(),
        })
    }

    fn from_config(config: LoadedConfig) -> Self {
        let player_template = config.templates.get("player").cloned().unwrap_or_else(|| {
            tracing::error!("No 'player' stat template");
            empty_template("player")
        });
        let npc_template = config.templates.get("npc").cloned().unwrap_or_else(|| {
            tracing::error!("No 'npc' stat template");
            empty_template("npc")
        });

        let mut player = Character::from_template("Hero", &player_template);
        for (item_id, quantity) in [("iron_sword", 1), ("leather_cap", 1), ("health_potion", 3)] {
            if let Some(definition) = config.catalog.get(item_id) {
                player.add_to_backpack(definition, quantity);
            }
        }
        player.inventory_mut().take_events();

        let mut quests: Vec<_> = config.quests.into_values().collect();
        quests.sort_by(|a, b| a.name.cmp(&b.name));

        let effects = rpg_core::WeatherEffects {
            poll_interval_secs: DEMO_POLL_SECS,
            ..config.weather
        };

        App {
            current_tab: Tab::Stats,
            player,
            player_position: Vec3::ZERO,
            encounter: Encounter::spawn(&npc_template, "wolf", SPAWN_DISTANCE),
            catalog: config.catalog,
            quests,
            quest_log: QuestLog::new(),
            weather: WeatherSystem::new(effects.clone()),
            npc_weather: WeatherSystem::new(effects),
            weather_feed: CannedWeather::new(),
            npc_template,
            log: vec!["You wake up on the road.".to_string()],
            recent_changes: Vec::new(),
            rng: StdRng::seed_from_u64(42),
            show_help: false,
            stats_scroll: 0,
            log_scroll: 0,
            time_elapsed: 0.0,
            inventory_focus: InventoryFocus::Backpack,
            selected_slot: 0,
            selected_backpack: 0,
            selected_quest: 0,
        }
    }

    // === Navigation ===

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        self.current_tab = tabs[(current_idx + 1) % tabs.len()];
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.current_tab = if self.show_help { Tab::Help } else { Tab::Stats };
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Stats => self.stats_scroll = self.stats_scroll.saturating_sub(1),
            Tab::Inventory => match self.inventory_focus {
                InventoryFocus::Slots => self.selected_slot = self.selected_slot.saturating_sub(1),
                InventoryFocus::Backpack => {
                    self.selected_backpack = self.selected_backpack.saturating_sub(1)
                }
            },
            Tab::Quests => self.selected_quest = self.selected_quest.saturating_sub(1),
            Tab::World => self.log_scroll = self.log_scroll.saturating_sub(1),
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Stats => self.stats_scroll += 1,
            Tab::Inventory => match self.inventory_focus {
                InventoryFocus::Slots => {
                    if self.selected_slot + 1 < EquipmentSlot::all().len() {
                        self.selected_slot += 1;
                    }
                }
                InventoryFocus::Backpack => {
                    if self.selected_backpack + 1 < self.player.inventory().backpack().len() {
                        self.selected_backpack += 1;
                    }
                }
            },
            Tab::Quests => {
                if self.selected_quest + 1 < self.quests.len() {
                    self.selected_quest += 1;
                }
            }
            Tab::World => self.log_scroll += 1,
            Tab::Help => {}
        }
    }

    pub fn on_left(&mut self) {
        match self.current_tab {
            Tab::Inventory => self.inventory_focus = InventoryFocus::Slots,
            Tab::World => self.move_player(-1.0),
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.current_tab {
            Tab::Inventory => self.inventory_focus = InventoryFocus::Backpack,
            Tab::World => self.move_player(1.0),
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        match self.current_tab {
            Tab::Inventory => match self.inventory_focus {
                InventoryFocus::Slots => self.unequip_selected(),
                InventoryFocus::Backpack => self.equip_selected(),
            },
            Tab::Quests => self.accept_or_turn_in(),
            Tab::World => self.attack(),
            _ => {}
        }
    }

    // === Inventory ===

    pub fn current_slot(&self) -> EquipmentSlot {
        EquipmentSlot::all()[self.selected_slot.min(EquipmentSlot::all().len() - 1)]
    }

    pub fn equip_selected(&mut self) {
        let index = self.selected_backpack;
        match self.player.equip(index, false) {
            Ok(slot) => self.push_log(format!("Equipped {}", slot)),
            Err(e) => self.push_log(format!("Cannot equip: {}", e)),
        }
        self.after_inventory_change();
    }

    pub fn unequip_selected(&mut self) {
        let slot = self.current_slot();
        match self.player.unequip(slot) {
            Ok(()) => self.push_log(format!("Unequipped {}", slot)),
            Err(e) => self.push_log(format!("Cannot unequip: {}", e)),
        }
        self.after_inventory_change();
    }

    pub fn consume_selected(&mut self) {
        let index = self.selected_backpack;
        if let Err(e) = self.player.consume(index) {
            self.push_log(format!("Cannot use: {}", e));
        }
        self.after_inventory_change();
    }

    /// Drop one unit of the selected stack
    pub fn drop_selected(&mut self) {
        let index = self.selected_backpack;
        match self.player.drop_item(index, Some(1)) {
            Ok(dropped) => self.push_log(format!("Dropped {}", dropped.definition().name)),
            Err(e) => self.push_log(format!("Cannot drop: {}", e)),
        }
        self.after_inventory_change();
    }

    /// Split the selected stack in half
    pub fn split_selected(&mut self) {
        let index = self.selected_backpack;
        let half = self
            .player
            .inventory()
            .backpack()
            .get(index)
            .map(|s| s.stack_size() / 2)
            .unwrap_or(0);
        if let Err(e) = self.player.inventory_mut().split_stack(index, half) {
            self.push_log(format!("Cannot split: {}", e));
        }
        self.after_inventory_change();
    }

    pub fn compact_backpack(&mut self) {
        self.player.inventory_mut().compact();
        self.after_inventory_change();
    }

    // === Quests ===

    pub fn accept_or_turn_in(&mut self) {
        let Some(quest) = self.quests.get(self.selected_quest).cloned() else {
            return;
        };
        if self.quest_log.get(&quest.id).is_none() {
            match self.quest_log.accept(Arc::clone(&quest), self.player.inventory()) {
                Ok(()) => self.push_log(format!("Accepted \"{}\"", quest.name)),
                Err(e) => self.push_log(e.to_string()),
            }
            return;
        }
        match self.quest_log.complete(&quest.id, &mut self.player, &self.catalog) {
            Ok(()) => self.push_log(format!("Completed \"{}\"", quest.name)),
            Err(e) => self.push_log(e.to_string()),
        }
        self.after_inventory_change();
    }

    pub fn abandon_selected(&mut self) {
        let Some(quest) = self.quests.get(self.selected_quest).cloned() else {
            return;
        };
        if self.quest_log.abandon(&quest.id) {
            self.push_log(format!("Abandoned \"{}\"", quest.name));
        }
    }

    // === World ===

    fn move_player(&mut self, direction: f32) {
        let speed = self.player.stats().get_current_value(StatType::MovementSpeed) as f32;
        // One key press covers a fifth of a second of movement
        self.player_position.x += direction * speed * 0.2;
    }

    /// Dash away from the NPC
    pub fn dash(&mut self) {
        let away = (self.player_position - self.encounter.pose.position)
            .normalize_or_zero()
            .x
            .signum();
        self.player_position.x += away * self.player.dash_speed() as f32 * 0.2;
    }

    pub fn attack(&mut self) {
        let report = self
            .encounter
            .receive_attack(&mut self.player, self.player_position, &mut self.rng);
        self.apply_report(report);
    }

    /// Switch to the next weather by hand
    pub fn cycle_weather(&mut self) {
        let kinds = WeatherKind::all();
        let next = self
            .weather
            .current()
            .and_then(|c| kinds.iter().position(|k| *k == c))
            .map(|i| kinds[(i + 1) % kinds.len()])
            .unwrap_or(WeatherKind::Clear);
        self.weather.set_weather(next, self.player.stats_mut());
        self.npc_weather
            .set_weather(next, self.encounter.npc.stats_mut());
        self.push_log(format!("The weather turns to {}", next));
    }

    pub fn respawn_npc(&mut self) {
        let tag = if self.rng.gen_bool(0.5) { "wolf" } else { "slime" };
        let x = self.player_position.x + SPAWN_DISTANCE;
        self.encounter = Encounter::spawn(&self.npc_template, tag, x);
        self.npc_weather = WeatherSystem::new(self.weather.effects().clone());
        if let Some(kind) = self.weather.current() {
            self.npc_weather
                .set_weather(kind, self.encounter.npc.stats_mut());
        }
        self.push_log(format!("A {} appears", tag));
    }

    /// Advance the simulation
    pub fn tick(&mut self, delta: f64) {
        self.time_elapsed += delta;
        self.player.tick(delta);

        if let Some(kind) = self
            .weather
            .tick(delta, &mut self.weather_feed, self.player.stats_mut())
        {
            self.npc_weather
                .set_weather(kind, self.encounter.npc.stats_mut());
            self.push_log(format!("The weather turns to {}", kind));
        }

        let report = self
            .encounter
            .step(delta, &mut self.player, self.player_position, &mut self.rng);
        self.apply_report(report);

        if !self.player.is_alive() {
            let max = self.player.max_health();
            self.player.heal(max);
            self.player_position = Vec3::ZERO;
            self.respawn_npc();
            self.push_log("You black out and wake up back on the road.".to_string());
        }

        self.after_inventory_change();
        let changes = self.player.stats_mut().take_changes();
        if !changes.is_empty() {
            self.recent_changes = changes;
        }
    }

    fn apply_report(&mut self, report: StepReport) {
        for message in report.messages {
            self.push_log(message);
        }
        let Some(tag) = report.killed else {
            return;
        };
        for quest_id in self.quest_log.on_target_destroyed(&tag) {
            self.push_log(format!("Quest ready to turn in: {}", quest_id));
        }
        self.drop_loot(&tag);
    }

    fn drop_loot(&mut self, tag: &str) {
        let (item_id, quantity) = match tag {
            "wolf" => ("wolf_pelt", self.rng.gen_range(1..=2)),
            _ if self.rng.gen_bool(0.5) => ("health_potion", 1),
            _ => return,
        };
        if let Some(definition) = self.catalog.get(item_id) {
            self.push_log(format!("Looted {} x{}", definition.name, quantity));
            self.player.add_to_backpack(definition, quantity);
        }
        self.after_inventory_change();
    }

    /// Feed inventory events to the quest log and keep selections in range
    fn after_inventory_change(&mut self) {
        let events = self.player.inventory_mut().take_events();
        for event in &events {
            if let InventoryEvent::Consumed { item_id } = event {
                self.push_log(format!("Used {}", item_id));
            }
            for quest_id in self
                .quest_log
                .on_inventory_event(event, self.player.inventory())
            {
                self.push_log(format!("Quest ready to turn in: {}", quest_id));
            }
        }
        let len = self.player.inventory().backpack().len();
        self.selected_backpack = self.selected_backpack.min(len.saturating_sub(1));
    }

    fn push_log(&mut self, message: String) {
        self.log.push(message);
        while self.log.len() > LOG_LIMIT {
            self.log.remove(0);
        }
        self.log_scroll = self.log.len().saturating_sub(15);
    }
}

fn empty_template(id: &str) -> StatTemplate {
    StatTemplate {
        id: id.to_string(),
        stats: Vec::new(),
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_backpack() {
        let app = App::with_defaults();
        assert_eq!(app.player.inventory().count_of("health_potion"), 3);
        assert_eq!(app.player.inventory().backpack().len(), 3);
        assert!(!app.quests.is_empty());
    }

    #[test]
    fn test_equip_from_inventory_tab() {
        let mut app = App::with_defaults();
        app.current_tab = Tab::Inventory;
        app.selected_backpack = 0;
        let damage = app.player.stats().get_current_value(StatType::Damage);
        app.on_enter();
        assert!(app.player.inventory().equipped(EquipmentSlot::Weapon).is_some());
        assert!(app.player.stats().get_current_value(StatType::Damage) > damage);
    }

    #[test]
    fn test_weather_polls_on_first_tick() {
        let mut app = App::with_defaults();
        app.tick(0.1);
        assert_eq!(app.weather.current(), Some(WeatherKind::Clear));
        app.cycle_weather();
        assert_eq!(app.weather.current(), Some(WeatherKind::Clouds));
    }

    #[test]
    fn test_killing_wolf_advances_quest() {
        let mut app = App::with_defaults();
        let hunt = app
            .quests
            .iter()
            .position(|q| q.id == "wolf_hunt")
            .unwrap();
        app.selected_quest = hunt;
        app.accept_or_turn_in();
        assert_eq!(app.quest_log.progress("wolf_hunt"), Some(0));

        app.apply_report(StepReport {
            messages: vec![],
            killed: Some("wolf".to_string()),
        });
        assert_eq!(app.quest_log.progress("wolf_hunt"), Some(1));
        assert!(app.player.inventory().count_of("wolf_pelt") >= 1);
    }
}
