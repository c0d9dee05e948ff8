//! World simulation: a player and one hostile NPC on a line

use rand::Rng;
use rpg_core::{
    parse_weather, Character, Navigator, NpcAction, NpcBrain, NpcPose, StatTemplate, StatType, Vec3,
    WeatherError, WeatherKind, WeatherProvider,
};

/// Moves the NPC straight towards its destination
#[derive(Debug, Default)]
pub struct StraightLineNavigator {
    pub destination: Option<Vec3>,
}

impl Navigator for StraightLineNavigator {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }

    fn stop(&mut self) {
        self.destination = None;
    }
}

/// Replays canned weather API payloads in a loop
pub struct CannedWeather {
    payloads: Vec<&'static str>,
    next: usize,
}

impl CannedWeather {
    pub fn new() -> Self {
        CannedWeather {
            payloads: vec![
                r#"{"weather":[{"id":800,"main":"Clear","description":"clear sky"}]}"#,
                r#"{"weather":[{"id":701,"main":"Mist","description":"mist"}]}"#,
                r#"{"weather":[{"id":500,"main":"Rain","description":"light rain"}]}"#,
                r#"{"weather":[]}"#,
                r#"{"weather":[{"id":601,"main":"Snow","description":"snow"}]}"#,
                "<html>502 Bad Gateway</html>",
                r#"{"weather":[{"id":211,"main":"Thunderstorm","description":"thunderstorm"}]}"#,
            ],
            next: 0,
        }
    }
}

impl Default for CannedWeather {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for CannedWeather {
    fn fetch(&mut self) -> Result<WeatherKind, WeatherError> {
        let payload = self
            .payloads
            .get(self.next)
            .ok_or_else(|| WeatherError::Provider("no payloads".to_string()))?;
        self.next = (self.next + 1) % self.payloads.len();
        parse_weather(payload)
    }
}

/// What happened during one world step
#[derive(Debug, Default)]
pub struct StepReport {
    pub messages: Vec<String>,
    /// Tag of the NPC if it died this step
    pub killed: Option<String>,
}

/// The hostile NPC and its surroundings
pub struct Encounter {
    pub npc: Character,
    pub tag: String,
    pub brain: NpcBrain,
    pub pose: NpcPose,
    pub navigator: StraightLineNavigator,
}

impl Encounter {
    /// Spawn an NPC at `x`, facing the origin
    pub fn spawn(template: &StatTemplate, tag: &str, x: f32) -> Self {
        let mut chars = tag.chars();
        let name: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => "Stranger".to_string(),
        };
        Encounter {
            npc: Character::from_template(name, template),
            tag: tag.to_string(),
            brain: NpcBrain::new(),
            pose: NpcPose::new(Vec3::new(x, 0.0, 0.0), Vec3::NEG_X),
            navigator: StraightLineNavigator::default(),
        }
    }

    pub fn distance_to(&self, position: Vec3) -> f32 {
        self.pose.position.distance(position)
    }

    /// Advance the NPC by `delta` seconds against the player
    pub fn step(&mut self, delta: f64, player: &mut Character, player_position: Vec3, rng: &mut impl Rng) -> StepReport {
        let mut report = StepReport::default();
        self.npc.tick(delta);
        if !self.npc.is_alive() {
            return report;
        }

        let target = player.is_alive().then_some(player_position);
        let action = self
            .brain
            .tick(delta, self.npc.stats(), self.pose, target, &mut self.navigator);

        match action {
            Some(NpcAction::Attack { .. }) => {
                let roll = self.npc.roll_attack(rng);
                let lost = player.take_damage(roll.damage);
                report.messages.push(format!(
                    "{} hits you for {:.1}{}",
                    self.npc.name,
                    lost,
                    if roll.critical { " (critical)" } else { "" }
                ));
            }
            Some(NpcAction::FaceTowards(target)) => {
                self.pose.forward = (target - self.pose.position).normalize_or_zero();
            }
            None => {}
        }

        self.move_towards_destination(delta);
        report
    }

    /// Player strikes the NPC if it is within the player's attack range
    pub fn receive_attack(
        &mut self,
        player: &mut Character,
        player_position: Vec3,
        rng: &mut impl Rng,
    ) -> StepReport {
        let mut report = StepReport::default();
        if !self.npc.is_alive() {
            report.messages.push(format!("The {} is already dead", self.tag));
            return report;
        }
        let range = player.stats().get_current_value(StatType::AttackRange);
        if f64::from(self.distance_to(player_position)) > range {
            report.messages.push("Out of range".to_string());
            return report;
        }
        let Some(roll) = player.try_attack(rng) else {
            report.messages.push(format!(
                "Recovering ({:.1}s)",
                player.attack_cooldown_remaining()
            ));
            return report;
        };

        let lost = self.npc.take_damage(roll.damage);
        report.messages.push(format!(
            "You hit {} for {:.1}{}",
            self.npc.name,
            lost,
            if roll.critical { " (critical)" } else { "" }
        ));
        if !self.npc.is_alive() {
            report.messages.push(format!("{} is defeated", self.npc.name));
            self.navigator.stop();
            self.brain.reset();
            report.killed = Some(self.tag.clone());
        }
        report
    }

    fn move_towards_destination(&mut self, delta: f64) {
        let Some(destination) = self.navigator.destination else {
            return;
        };
        let stats = self.npc.stats();
        // Stop a little inside attack range instead of on top of the target
        let keep_away = (stats.get_current_value(StatType::AttackRange) * 0.8) as f32;
        let offset = destination - self.pose.position;
        let distance = offset.length();
        if distance <= keep_away {
            return;
        }
        let speed = stats.get_current_value(StatType::MovementSpeed) as f32;
        let travel = (speed * delta as f32).min(distance - keep_away);
        let direction = offset / distance;
        self.pose.position += direction * travel;
        self.pose.forward = direction;
    }
}
