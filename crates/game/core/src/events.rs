//! Outbound host boundary.
//!
//! The core never calls into the engine directly. Side effects aimed at the
//! host player object are appended to an [`EventQueue`] and drained by an
//! external pump once per frame, after the current frame's logic. Deferral
//! affects only when visual/physical effects become visible, never the
//! internal data-model state.

use std::collections::VecDeque;

use crate::ability::{AbilityId, UpgradeId};
use crate::power::ZirPowerId;

/// Aggregated passive stat modifiers, pushed to the host as one batch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifiers {
    pub damage_mult: f32,
    pub cooldown_mult: f32,
    pub armor_bonus: f32,
    pub max_hp_bonus: f32,
    pub regen_per_sec: f32,
    pub magnet_mult: f32,
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            damage_mult: 1.0,
            cooldown_mult: 1.0,
            armor_bonus: 0.0,
            max_hp_bonus: 0.0,
            regen_per_sec: 0.0,
            magnet_mult: 1.0,
        }
    }
}

/// Magnitudes of a fired auto-active effect, computed from the owning
/// instance's upgrade stacks at trigger time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoEffectParams {
    KnockbackPulse { radius: f32, power: f32 },
    Nova { radius: f32, damage: f32 },
    Phase { duration: f32 },
    Vacuum { radius: f32 },
    SlowZone {
        radius: f32,
        slow_strength: f32,
        duration: f32,
    },
}

/// One queued, fire-and-forget call to the host player object.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostEvent {
    /// Replace the host's aggregated stat modifiers with this batch.
    StatModifiersChanged(StatModifiers),

    /// Make sure the starting weapon's visual exists on the player.
    EnsureWeaponVisual { ability: AbilityId, visual: String },

    /// Attach a newly acquired weapon's visual to the player.
    AddWeaponVisual { ability: AbilityId, visual: String },

    /// Apply a weapon upgrade's visible effect at its new stack count.
    WeaponUpgradeApplied {
        ability: AbilityId,
        upgrade: UpgradeId,
        stacks: u32,
    },

    /// An auto-active ability fired.
    AutoActiveTriggered {
        ability: AbilityId,
        params: AutoEffectParams,
    },

    /// A zir power was activated; the host runs the effect keyed by this id.
    PowerActivated { power: ZirPowerId },

    /// An ultimate consumed the will gauge.
    WillConsumed { cost: u32 },

    /// The loadout composition changed (acquire, upgrade, or bootstrap).
    LoadoutChanged,
}

/// FIFO queue of pending host events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: VecDeque<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        self.events.push_back(event);
    }

    /// Removes and returns every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
