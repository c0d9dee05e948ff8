//! Stat - Clamped base value with attached modifiers and a lazily computed total

use crate::stats::modifier::{ModifierHandle, ModifierKind, StatModifier};
use crate::types::StatType;
use std::cell::Cell;

/// A single character attribute
///
/// Current value is calculated as:
/// `base + Σ(attached)`
///
/// - `base`: clamped to `[min_base, max_base]` after every change
/// - `attached`: removable bonuses, each tracked by a [`ModifierHandle`]
///
/// The total is cached and only recomputed after a change.
#[derive(Debug, Clone)]
pub struct Stat {
    stat_type: StatType,
    base_value: f64,
    initial_base_value: f64,
    min_base_value: f64,
    max_base_value: f64,
    attached: Vec<(ModifierHandle, StatModifier)>,
    next_handle: u64,
    /// `None` while dirty
    cached: Cell<Option<f64>>,
}

impl Stat {
    /// Create a stat; `base` is clamped into `[min, max]`.
    ///
    /// A NaN `min` becomes 0, a NaN `max` is unbounded and a NaN `base`
    /// starts at `min`.
    pub fn new(stat_type: StatType, base: f64, min: f64, max: f64) -> Self {
        let min = if min.is_nan() { 0.0 } else { min };
        let max = if max.is_nan() { f64::MAX } else { max.max(min) };
        let base = if base.is_nan() { min } else { base.clamp(min, max) };
        Stat {
            stat_type,
            base_value: base,
            initial_base_value: base,
            min_base_value: min,
            max_base_value: max,
            attached: Vec::new(),
            next_handle: 0,
            cached: Cell::new(None),
        }
    }

    /// Create an unbounded (non-negative) stat
    pub fn with_base(stat_type: StatType, base: f64) -> Self {
        Self::new(stat_type, base, 0.0, f64::MAX)
    }

    pub fn stat_type(&self) -> StatType {
        self.stat_type
    }

    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    pub fn initial_base_value(&self) -> f64 {
        self.initial_base_value
    }

    pub fn min_base_value(&self) -> f64 {
        self.min_base_value
    }

    pub fn max_base_value(&self) -> f64 {
        self.max_base_value
    }

    /// Number of attached modifiers
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Sum of all attached modifier values
    pub fn attached_total(&self) -> f64 {
        self.attached.iter().map(|(_, m)| m.value).sum()
    }

    /// Base plus attached modifiers
    pub fn current_value(&self) -> f64 {
        if let Some(value) = self.cached.get() {
            return value;
        }
        let value = self.base_value + self.attached_total();
        self.cached.set(Some(value));
        value
    }

    /// Whether the next read recomputes
    pub fn is_dirty(&self) -> bool {
        self.cached.get().is_none()
    }

    /// Apply a modifier to this stat.
    ///
    /// Returns a handle for attached modifiers. A modifier for another stat
    /// type is ignored.
    pub fn add_modifier(&mut self, modifier: &StatModifier) -> Option<ModifierHandle> {
        if modifier.stat_type != self.stat_type {
            tracing::debug!(
                "Ignoring {:?} modifier routed to {:?}",
                modifier.stat_type,
                self.stat_type
            );
            return None;
        }
        if modifier.value.is_nan() {
            tracing::warn!("Ignoring NaN {:?} modifier on {:?}", modifier.kind, self.stat_type);
            return None;
        }

        let handle = match modifier.kind {
            ModifierKind::IncreaseBaseValue => {
                self.base_value += modifier.value;
                None
            }
            ModifierKind::IncreaseMinBaseValue => {
                self.min_base_value = (self.min_base_value + modifier.value).min(self.max_base_value);
                None
            }
            ModifierKind::IncreaseMaxBaseValue => {
                self.max_base_value = (self.max_base_value + modifier.value).max(self.min_base_value);
                None
            }
            ModifierKind::Attached => {
                let handle = ModifierHandle {
                    stat_type: self.stat_type,
                    id: self.next_handle,
                };
                self.next_handle += 1;
                self.attached.push((handle, *modifier));
                Some(handle)
            }
        };

        self.clamp_base();
        self.mark_dirty();
        handle
    }

    /// Remove an attached modifier. Returns false if the handle is unknown.
    pub fn remove_attached_modifier(&mut self, handle: ModifierHandle) -> bool {
        let Some(index) = self.attached.iter().position(|(h, _)| *h == handle) else {
            return false;
        };
        self.attached.remove(index);
        self.mark_dirty();
        true
    }

    /// Restore the initial base value and drop all attached modifiers.
    ///
    /// Bounds changed by min/max modifiers stay as they are.
    pub fn reset(&mut self) {
        self.base_value = self.initial_base_value;
        self.attached.clear();
        self.clamp_base();
        self.mark_dirty();
    }

    /// Continue handle numbering from a stat this one replaces
    pub(crate) fn inherit_handles(&mut self, previous: &Stat) {
        self.next_handle = self.next_handle.max(previous.next_handle);
    }

    fn clamp_base(&mut self) {
        self.base_value = self.base_value.clamp(self.min_base_value, self.max_base_value);
    }

    fn mark_dirty(&self) {
        self.cached.set(None);
    }
}
