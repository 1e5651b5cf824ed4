//! Zir power runtime tracking.
//!
//! Structurally parallel to the loadout manager but simpler: powers have no
//! upgrade trees, only a per-power cooldown map. An absent cooldown entry
//! means the power is ready.

use std::collections::HashMap;
use std::sync::Arc;

use crate::character::CharacterId;
use crate::events::{EventQueue, HostEvent};
use crate::power::def::{ZirPowerDef, ZirPowerId, ZirPowerKind};
use crate::registry::{CharacterRegistry, RegistryError, ZirPowerRegistry};

/// Read-only view of the external will gauge, the resource that gates
/// ultimate powers. Implemented by the host.
pub trait WillOracle {
    fn is_will_full(&self) -> bool;
}

/// Tracks the selected character's zir powers: gating, cooldowns, and
/// activation events.
pub struct ZirPowerManager {
    characters: Arc<CharacterRegistry>,
    powers: Arc<ZirPowerRegistry>,

    current_character: Option<CharacterId>,
    /// Registered powers in display order.
    active: Vec<Arc<ZirPowerDef>>,
    /// Power id -> cooldown seconds remaining. Absent entry = ready.
    cooldowns: HashMap<ZirPowerId, f32>,

    events: EventQueue,
}

impl ZirPowerManager {
    pub fn new(characters: Arc<CharacterRegistry>, powers: Arc<ZirPowerRegistry>) -> Self {
        Self {
            characters,
            powers,
            current_character: None,
            active: Vec::new(),
            cooldowns: HashMap::new(),
            events: EventQueue::new(),
        }
    }

    pub fn current_character(&self) -> Option<&CharacterId> {
        self.current_character.as_ref()
    }

    /// Registered power defs in display order.
    pub fn powers(&self) -> impl Iterator<Item = &Arc<ZirPowerDef>> {
        self.active.iter()
    }

    pub fn power(&self, id: &str) -> Option<&Arc<ZirPowerDef>> {
        self.active.iter().find(|def| def.id.as_str() == id)
    }

    /// Removes and returns every pending host event, oldest first.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.events.drain()
    }

    /// Registers the character's active and ultimate powers, replacing any
    /// previous character's state.
    ///
    /// Power ids the character lists but the database lacks are skipped with
    /// a warning: absence of an optional feature, not a failure.
    ///
    /// # Errors
    ///
    /// Fails when the character id itself is unknown.
    pub fn initialize_for_character(&mut self, id: &str) -> Result<(), RegistryError> {
        let character = Arc::clone(self.characters.require(id)?);

        self.current_character = Some(character.id.clone());
        self.active.clear();
        self.cooldowns.clear();

        for power_id in character
            .active_powers
            .iter()
            .chain(character.ultimate_powers.iter())
        {
            match self.powers.get(power_id.as_str()) {
                Some(def) => {
                    if self.active.iter().all(|d| d.id != def.id) {
                        self.active.push(Arc::clone(def));
                    }
                }
                None => {
                    tracing::warn!(
                        character = %character.id,
                        power = %power_id,
                        "character references unknown zir power, skipping"
                    );
                }
            }
        }

        tracing::debug!(
            character = %character.id,
            powers = self.active.len(),
            "zir powers initialized"
        );
        Ok(())
    }

    /// Advances cooldowns by `delta` seconds. Entries reaching zero are
    /// removed, returning those powers to ready.
    pub fn tick(&mut self, delta: f32) {
        self.cooldowns.retain(|_, remaining| {
            *remaining -= delta;
            *remaining > 0.0
        });
    }

    /// True when `id` is a registered power whose gate is open: cooldown
    /// clear for actives, will gauge full for ultimates.
    pub fn can_activate(&self, id: &str, will: &dyn WillOracle) -> bool {
        let Some(def) = self.power(id) else {
            return false;
        };
        match def.kind {
            ZirPowerKind::Active { .. } => !self.cooldowns.contains_key(id),
            ZirPowerKind::Ultimate { .. } => will.is_will_full(),
        }
    }

    /// Activates `id` if possible, reporting `false` as a silent no-op when
    /// the power is unknown or gated; never an error.
    ///
    /// Active powers seed their cooldown entry; ultimates consume the will
    /// gauge through the host boundary. The effect itself runs on the host,
    /// keyed by the power id in [`HostEvent::PowerActivated`].
    pub fn activate(&mut self, id: &str, will: &dyn WillOracle) -> bool {
        let Some(def) = self.power(id).map(Arc::clone) else {
            tracing::debug!(power = id, "zir power not registered");
            return false;
        };

        match def.kind {
            ZirPowerKind::Active { cooldown } => {
                if self.cooldowns.contains_key(id) {
                    tracing::debug!(power = %def.id, "zir power still on cooldown");
                    return false;
                }
                self.cooldowns.insert(def.id.clone(), cooldown);
            }
            ZirPowerKind::Ultimate { will_cost } => {
                if !will.is_will_full() {
                    tracing::debug!(power = %def.id, "will gauge not full");
                    return false;
                }
                self.events.push(HostEvent::WillConsumed { cost: will_cost });
            }
        }

        tracing::debug!(power = %def.id, "zir power activated");
        self.events.push(HostEvent::PowerActivated {
            power: def.id.clone(),
        });
        true
    }

    /// Cooldown progress in `[0, 1]`; `1.0` means ready. Ultimates and
    /// unknown ids always read as ready, mirroring the gating model.
    pub fn cooldown_progress(&self, id: &str) -> f32 {
        let Some(def) = self.power(id) else {
            return 1.0;
        };
        let ZirPowerKind::Active { cooldown } = def.kind else {
            return 1.0;
        };
        if cooldown <= 0.0 {
            return 1.0;
        }
        match self.cooldowns.get(id) {
            Some(remaining) => 1.0 - remaining / cooldown,
            None => 1.0,
        }
    }
}
