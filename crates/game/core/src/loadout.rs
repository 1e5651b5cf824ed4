//! Loadout orchestration.
//!
//! [`LoadoutManager`] owns the player's acquired abilities. It applies offer
//! selections with the acquire/upgrade merge rules, aggregates passive stat
//! modifiers into one batch, and ticks auto-active cooldowns. Everything
//! aimed at the host goes through the outbound event queue; the host pump
//! drains it once per frame.

use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ability::{
    AbilityId, AbilityInstance, AbilityKind, AutoActiveEffect, PassiveEffect, SlotKind,
    SpecialKind, upgrade_keys,
};
use crate::config::LoadoutConfig;
use crate::events::{AutoEffectParams, EventQueue, HostEvent, StatModifiers};
use crate::offer::{Offer, OfferAction, OfferError, OfferGenerator, OfferView};
use crate::registry::{AbilityRegistry, RegistryError};

/// Read-only view of one owned ability for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySummary {
    pub id: AbilityId,
    pub name: String,
    pub level: u32,
    pub special_kind: Option<SpecialKind>,
    pub icon: Option<String>,
}

/// Read-only view of the whole loadout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutSummary {
    pub weapons: Vec<AbilitySummary>,
    pub specials: Vec<AbilitySummary>,
}

/// Tracks owned abilities for one player and drives the offer/upgrade loop.
///
/// # Invariants
///
/// - no two instances in the loadout share an ability id
/// - weapon and special lists never exceed their configured caps
/// - every auto-active special owns at most one cooldown entry
pub struct LoadoutManager {
    registry: Arc<AbilityRegistry>,
    config: LoadoutConfig,
    rng: ChaCha8Rng,

    weapons: Vec<AbilityInstance>,
    specials: Vec<AbilityInstance>,

    /// Offer key -> offer for the most recent batch.
    last_offers: HashMap<String, Offer>,

    /// Ability id -> cooldown seconds remaining (auto-actives only).
    auto_cooldowns: HashMap<AbilityId, f32>,

    events: EventQueue,
    paused: bool,
}

impl LoadoutManager {
    /// Builds a manager over an immutable ability registry.
    ///
    /// Bootstraps the configured starting weapon into an empty loadout and
    /// pushes the initial stat batch. The RNG is seeded explicitly so runs
    /// replay deterministically under test.
    ///
    /// # Errors
    ///
    /// Fails when the starting weapon or either fallback id is missing from
    /// the registry: a configuration mistake, not a runtime condition.
    pub fn new(
        registry: Arc<AbilityRegistry>,
        config: LoadoutConfig,
        seed: u64,
    ) -> Result<Self, RegistryError> {
        registry.require(config.fallback_weapon.as_str())?;
        registry.require(config.fallback_special.as_str())?;

        let mut manager = Self {
            registry,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            weapons: Vec::new(),
            specials: Vec::new(),
            last_offers: HashMap::new(),
            auto_cooldowns: HashMap::new(),
            events: EventQueue::new(),
            paused: false,
        };

        manager.ensure_starting_weapon()?;
        manager.recompute_passives();
        manager.events.push(HostEvent::LoadoutChanged);
        Ok(manager)
    }

    pub fn config(&self) -> &LoadoutConfig {
        &self.config
    }

    pub fn weapons(&self) -> &[AbilityInstance] {
        &self.weapons
    }

    pub fn specials(&self) -> &[AbilityInstance] {
        &self.specials
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Mirrors the host's global pause flag; ticking is skipped while set.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Removes and returns every pending host event, oldest first. Called by
    /// the host pump once per frame.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.events.drain()
    }

    /// Current aggregated passive modifiers (also pushed as an event after
    /// every acquire/upgrade).
    pub fn stat_modifiers(&self) -> StatModifiers {
        self.aggregate_passives()
    }

    /// Advances auto-active cooldowns by `delta` seconds, firing effects
    /// whose timer elapsed. No-op while paused.
    pub fn tick(&mut self, delta: f32) {
        if self.paused {
            return;
        }
        self.tick_auto_actives(delta);
    }

    /// Generates a fresh offer batch and returns its presentation views.
    /// The batch replaces the previous one; stale keys become no-ops.
    pub fn generate_offers(&mut self, count: usize) -> Result<Vec<OfferView>, OfferError> {
        let offers = OfferGenerator::new(&self.registry, &self.config).generate(
            &mut self.rng,
            &self.weapons,
            &self.specials,
            count,
        )?;

        self.last_offers.clear();
        let views = offers.iter().map(|offer| self.offer_view(offer)).collect();
        for offer in offers {
            self.last_offers.insert(offer.key(), offer);
        }
        Ok(views)
    }

    /// Applies the offer previously presented under `key`.
    ///
    /// Returns `Ok(false)` for keys not in the current batch (stale UI
    /// clicks are a steady-state condition, not an error). After a
    /// successful apply the passive batch is recomputed and
    /// [`HostEvent::LoadoutChanged`] is emitted.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError`] when the offer's target id is missing
    /// from the registry.
    pub fn apply_offer(&mut self, key: &str) -> Result<bool, RegistryError> {
        let Some(offer) = self.last_offers.get(key).cloned() else {
            tracing::debug!(key, "ignoring unknown offer key");
            return Ok(false);
        };

        match (offer.slot, offer.action) {
            (SlotKind::Weapon, OfferAction::Acquire) => self.acquire_weapon(&offer.target)?,
            (SlotKind::Weapon, OfferAction::Upgrade) => self.upgrade_weapon(&offer.target)?,
            (SlotKind::Special, OfferAction::Acquire) => self.acquire_special(&offer.target)?,
            (SlotKind::Special, OfferAction::Upgrade) => self.upgrade_special(&offer.target)?,
        }

        self.recompute_passives();
        self.events.push(HostEvent::LoadoutChanged);
        Ok(true)
    }

    /// Read-only weapon/special views for presentation.
    pub fn loadout_summary(&self) -> LoadoutSummary {
        let summarize = |inst: &AbilityInstance| AbilitySummary {
            id: inst.id().clone(),
            name: inst.def().name.clone(),
            level: inst.level(),
            special_kind: inst.def().special_kind(),
            icon: inst.def().icon.clone(),
        };

        LoadoutSummary {
            weapons: self.weapons.iter().map(summarize).collect(),
            specials: self.specials.iter().map(summarize).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Acquire / upgrade
    // ------------------------------------------------------------------

    fn ensure_starting_weapon(&mut self) -> Result<(), RegistryError> {
        if !self.weapons.is_empty() {
            return Ok(());
        }
        let Some(id) = self.config.starting_weapon.clone() else {
            return Ok(());
        };

        let def = Arc::clone(self.registry.require(id.as_str())?);
        if let AbilityKind::Weapon { visual: Some(visual) } = &def.kind {
            self.events.push(HostEvent::EnsureWeaponVisual {
                ability: id.clone(),
                visual: visual.clone(),
            });
        }
        tracing::debug!(ability = %id, "starting weapon registered");
        self.weapons.push(AbilityInstance::new(def));
        Ok(())
    }

    fn acquire_weapon(&mut self, id: &AbilityId) -> Result<(), RegistryError> {
        if let Some(idx) = self.weapons.iter().position(|inst| inst.id() == id) {
            // Already owned: degrade to upgrade.
            self.upgrade_weapon_at(idx);
            return Ok(());
        }
        if self.weapons.len() >= self.config.max_weapons {
            // At capacity and not owned: nothing sensible to upgrade.
            tracing::warn!(ability = %id, "weapon slots full, dropping acquire");
            return Ok(());
        }

        let def = Arc::clone(self.registry.require(id.as_str())?);
        if let AbilityKind::Weapon { visual: Some(visual) } = &def.kind {
            self.events.push(HostEvent::AddWeaponVisual {
                ability: id.clone(),
                visual: visual.clone(),
            });
        }
        tracing::debug!(ability = %id, "weapon acquired");
        self.weapons.push(AbilityInstance::new(def));
        Ok(())
    }

    fn upgrade_weapon(&mut self, id: &AbilityId) -> Result<(), RegistryError> {
        match self.weapons.iter().position(|inst| inst.id() == id) {
            Some(idx) => {
                self.upgrade_weapon_at(idx);
                Ok(())
            }
            // Not owned: degrade to acquire.
            None => self.acquire_weapon(id),
        }
    }

    fn upgrade_weapon_at(&mut self, idx: usize) {
        let inst = &mut self.weapons[idx];
        inst.level_up();

        if let Some(upgrade) = inst.apply_random_upgrade(&mut self.rng) {
            let stacks = inst.stacks_of(upgrade.id.as_str());
            let ability = inst.id().clone();
            tracing::debug!(ability = %ability, upgrade = %upgrade.id, stacks, "weapon upgraded");
            self.events.push(HostEvent::WeaponUpgradeApplied {
                ability,
                upgrade: upgrade.id,
                stacks,
            });
        }
    }

    fn acquire_special(&mut self, id: &AbilityId) -> Result<(), RegistryError> {
        if let Some(idx) = self.specials.iter().position(|inst| inst.id() == id) {
            self.upgrade_special_at(idx);
            return Ok(());
        }
        if self.specials.len() >= self.config.max_specials {
            tracing::warn!(ability = %id, "special slots full, dropping acquire");
            return Ok(());
        }

        let def = Arc::clone(self.registry.require(id.as_str())?);
        tracing::debug!(ability = %id, "special acquired");
        let inst = AbilityInstance::new(def);
        if inst.def().is_auto_active() {
            let cooldown = self.effective_cooldown(&inst);
            self.auto_cooldowns.insert(id.clone(), cooldown);
        }
        self.specials.push(inst);
        Ok(())
    }

    fn upgrade_special(&mut self, id: &AbilityId) -> Result<(), RegistryError> {
        match self.specials.iter().position(|inst| inst.id() == id) {
            Some(idx) => {
                self.upgrade_special_at(idx);
                Ok(())
            }
            None => self.acquire_special(id),
        }
    }

    fn upgrade_special_at(&mut self, idx: usize) {
        {
            let inst = &mut self.specials[idx];
            inst.level_up();
            inst.apply_random_upgrade(&mut self.rng);
        }

        // Reseed the timer so cd_down stacks take effect immediately.
        let inst = &self.specials[idx];
        if inst.def().is_auto_active() {
            let cooldown = self.effective_cooldown(inst);
            self.auto_cooldowns.insert(inst.id().clone(), cooldown);
        }
    }

    // ------------------------------------------------------------------
    // Passive aggregation
    // ------------------------------------------------------------------

    fn recompute_passives(&mut self) {
        let modifiers = self.aggregate_passives();
        self.events.push(HostEvent::StatModifiersChanged(modifiers));
    }

    fn aggregate_passives(&self) -> StatModifiers {
        let mut mods = StatModifiers::default();

        for inst in &self.specials {
            let AbilityKind::Passive { effect } = &inst.def().kind else {
                continue;
            };
            let stacks = inst.total_stacks() as f32;
            match *effect {
                PassiveEffect::DamageMult { per_stack } => {
                    mods.damage_mult *= 1.0 + per_stack * stacks;
                }
                PassiveEffect::CooldownMult { per_stack } => {
                    mods.cooldown_mult *= 1.0 - per_stack * stacks;
                }
                PassiveEffect::ArmorBonus { per_stack } => {
                    mods.armor_bonus += per_stack * stacks;
                }
                PassiveEffect::MaxHpBonus { per_stack } => {
                    mods.max_hp_bonus += per_stack * stacks;
                }
                PassiveEffect::RegenPerSec { per_stack } => {
                    mods.regen_per_sec += per_stack * stacks;
                }
                PassiveEffect::MagnetMult { per_stack } => {
                    mods.magnet_mult *= 1.0 + per_stack * stacks;
                }
            }
        }

        if mods.cooldown_mult < LoadoutConfig::MIN_COOLDOWN_MULT {
            mods.cooldown_mult = LoadoutConfig::MIN_COOLDOWN_MULT;
        }
        mods
    }

    // ------------------------------------------------------------------
    // Auto-active cooldowns
    // ------------------------------------------------------------------

    /// Aggregated cooldown multiplier from haste-type passives, floored.
    fn cooldown_mult(&self) -> f32 {
        self.aggregate_passives().cooldown_mult
    }

    /// Seed value for an auto-active's timer:
    /// `max(3, base * 0.92^cd_down) * cooldown_mult`.
    fn effective_cooldown(&self, inst: &AbilityInstance) -> f32 {
        let base = inst.def().base_cooldown().unwrap_or(0.0);
        let cd_down = inst.stacks_of(upgrade_keys::CD_DOWN);
        let decayed = base * LoadoutConfig::COOLDOWN_DECAY_PER_STACK.powi(cd_down as i32);
        decayed.max(LoadoutConfig::MIN_AUTO_COOLDOWN_SEC) * self.cooldown_mult()
    }

    fn tick_auto_actives(&mut self, delta: f32) {
        for idx in 0..self.specials.len() {
            let (id, effect, seeded) = {
                let inst = &self.specials[idx];
                let AbilityKind::AutoActive { effect, .. } = &inst.def().kind else {
                    continue;
                };
                (inst.id().clone(), *effect, self.effective_cooldown(inst))
            };

            let remaining = self.auto_cooldowns.entry(id.clone()).or_insert(seeded);
            *remaining -= delta;
            if *remaining > 0.0 {
                continue;
            }

            self.auto_cooldowns.insert(id.clone(), seeded);
            let params = auto_effect_params(&self.specials[idx], effect);
            tracing::debug!(ability = %id, cooldown = seeded, "auto-active fired");
            self.events.push(HostEvent::AutoActiveTriggered {
                ability: id,
                params,
            });
        }
    }

    // ------------------------------------------------------------------
    // Offer views
    // ------------------------------------------------------------------

    fn offer_view(&self, offer: &Offer) -> OfferView {
        let is_upgrade = offer.is_upgrade();
        match self.registry.get(offer.target.as_str()) {
            Some(def) => OfferView {
                key: offer.key(),
                slot: offer.slot,
                action: offer.action,
                target: offer.target.clone(),
                name: def.name.clone(),
                description: if is_upgrade {
                    format!("Upgrade (random): {}", def.description)
                } else {
                    def.description.clone()
                },
                is_upgrade,
                special_kind: def.special_kind(),
                icon: def.icon.clone(),
            },
            None => {
                tracing::warn!(target = %offer.target, "offered ability missing from registry");
                OfferView {
                    key: offer.key(),
                    slot: offer.slot,
                    action: offer.action,
                    target: offer.target.clone(),
                    name: offer.target.to_string(),
                    description: String::new(),
                    is_upgrade,
                    special_kind: None,
                    icon: None,
                }
            }
        }
    }
}

/// Trigger magnitudes for an auto-active fire, computed from the owning
/// instance's upgrade stacks.
fn auto_effect_params(inst: &AbilityInstance, effect: AutoActiveEffect) -> AutoEffectParams {
    let stacks = |key: &str| inst.stacks_of(key) as f32;

    let radius = 120.0 + 25.0 * stacks(upgrade_keys::RADIUS_UP);
    let power = 1.0 + 0.35 * stacks(upgrade_keys::POWER_UP);
    let damage = 12.0 * (1.0 + 0.25 * stacks(upgrade_keys::DMG_UP));
    let duration = 1.2 + 0.35 * stacks(upgrade_keys::DURATION_UP);

    match effect {
        AutoActiveEffect::KnockbackPulse => AutoEffectParams::KnockbackPulse { radius, power },
        AutoActiveEffect::Nova => AutoEffectParams::Nova { radius, damage },
        AutoActiveEffect::Phase => AutoEffectParams::Phase { duration },
        AutoActiveEffect::Vacuum => AutoEffectParams::Vacuum { radius },
        AutoActiveEffect::SlowZone => AutoEffectParams::SlowZone {
            radius,
            slow_strength: 0.25 + 0.1 * stacks(upgrade_keys::POWER_UP),
            duration: 3.0 + 0.5 * stacks(upgrade_keys::DURATION_UP),
        },
    }
}
