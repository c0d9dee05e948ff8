//! NPC AI - Two-state chase-and-attack brain
//!
//! The brain only decides. Movement goes through a host [`Navigator`] and
//! attacks come back as [`NpcAction`]s for the host to resolve.

use crate::cooldown::Cooldown;
use crate::stats::StatSystem;
use crate::types::StatType;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_1_SQRT_2;

/// Behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcState {
    #[default]
    Idle,
    Alerted,
}

impl NpcState {
    pub fn name(&self) -> &'static str {
        match self {
            NpcState::Idle => "Idle",
            NpcState::Alerted => "Alerted",
        }
    }
}

/// Where the NPC is and which way it looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcPose {
    pub position: Vec3,
    /// Need not be normalized
    pub forward: Vec3,
}

impl NpcPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        NpcPose { position, forward }
    }
}

/// Something the host should carry out this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NpcAction {
    /// Strike the target at this position
    Attack { target: Vec3 },
    /// In range but not facing; turn towards the position
    FaceTowards(Vec3),
}

/// Pathfinding collaborator
pub trait Navigator {
    fn set_destination(&mut self, destination: Vec3);
    fn stop(&mut self);
}

/// Decision state of one NPC
#[derive(Debug, Clone)]
pub struct NpcBrain {
    state: NpcState,
    attack_cooldown: Cooldown,
    /// Minimum cosine between forward and target direction to count as facing
    facing_threshold: f32,
}

impl Default for NpcBrain {
    fn default() -> Self {
        Self::new()
    }
}

impl NpcBrain {
    pub fn new() -> Self {
        NpcBrain {
            state: NpcState::Idle,
            attack_cooldown: Cooldown::new(),
            facing_threshold: FRAC_1_SQRT_2,
        }
    }

    pub fn with_facing_threshold(mut self, cosine: f32) -> Self {
        self.facing_threshold = cosine.clamp(-1.0, 1.0);
        self
    }

    pub fn state(&self) -> NpcState {
        self.state
    }

    pub fn attack_cooldown_remaining(&self) -> f64 {
        self.attack_cooldown.remaining()
    }

    /// Advance one frame.
    ///
    /// Radii and timings come from the NPC's own stats: `DetectionRadius`,
    /// `EvasionRadius`, `AttackRange` and `AttackDelay`.
    pub fn tick(
        &mut self,
        delta: f64,
        stats: &StatSystem,
        pose: NpcPose,
        target: Option<Vec3>,
        navigator: &mut dyn Navigator,
    ) -> Option<NpcAction> {
        self.attack_cooldown.tick(delta);

        let Some(target) = target else {
            if self.state == NpcState::Alerted {
                self.transition(NpcState::Idle);
                navigator.stop();
            }
            return None;
        };
        let distance = f64::from(pose.position.distance(target));

        match self.state {
            NpcState::Idle => {
                if distance <= stats.get_current_value(StatType::DetectionRadius) {
                    self.transition(NpcState::Alerted);
                } else {
                    return None;
                }
            }
            NpcState::Alerted => {
                if distance > stats.get_current_value(StatType::EvasionRadius) {
                    self.transition(NpcState::Idle);
                    navigator.stop();
                    return None;
                }
            }
        }

        navigator.set_destination(target);

        if distance > stats.get_current_value(StatType::AttackRange) {
            return None;
        }
        if !self.is_facing(pose, target) {
            return Some(NpcAction::FaceTowards(target));
        }
        if !self.attack_cooldown.is_ready() {
            return None;
        }
        self.attack_cooldown
            .start(stats.get_current_value(StatType::AttackDelay));
        Some(NpcAction::Attack { target })
    }

    /// Forget the target and stand down
    pub fn reset(&mut self) {
        self.state = NpcState::Idle;
        self.attack_cooldown.clear();
    }

    fn is_facing(&self, pose: NpcPose, target: Vec3) -> bool {
        let to_target = (target - pose.position).normalize_or_zero();
        // Standing on the target counts as facing it
        if to_target == Vec3::ZERO {
            return true;
        }
        pose.forward.normalize_or_zero().dot(to_target) >= self.facing_threshold
    }

    fn transition(&mut self, next: NpcState) {
        tracing::debug!("NPC {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
