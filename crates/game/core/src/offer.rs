//! Upgrade-offer generation.
//!
//! When the player levels up they are shown a batch of offers: acquire a new
//! ability or upgrade an owned one. Generation is weighted random selection
//! over the ability database, constrained by slot capacity and in-batch
//! deduplication, with a two-tier fallback so the player is never shown a
//! useless batch.

use rand::Rng;

use crate::ability::{AbilityId, AbilityInstance, SlotKind, SpecialKind};
use crate::config::LoadoutConfig;
use crate::registry::AbilityRegistry;

/// What accepting an offer does.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum OfferAction {
    Acquire,
    Upgrade,
}

/// One presented choice. Ephemeral: batches are regenerated every time the
/// player is asked to choose.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offer {
    pub action: OfferAction,
    pub slot: SlotKind,
    pub target: AbilityId,
}

impl Offer {
    pub fn acquire(slot: SlotKind, target: AbilityId) -> Self {
        Self {
            action: OfferAction::Acquire,
            slot,
            target,
        }
    }

    pub fn upgrade(slot: SlotKind, target: AbilityId) -> Self {
        Self {
            action: OfferAction::Upgrade,
            slot,
            target,
        }
    }

    pub fn is_upgrade(&self) -> bool {
        self.action == OfferAction::Upgrade
    }

    /// Stable key (`slot:action:target`) that maps a UI selection back to
    /// the originating offer.
    pub fn key(&self) -> String {
        format!("{}:{}:{}", self.slot, self.action, self.target)
    }
}

/// Presentation view of one offer, resolved against the database.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OfferView {
    pub key: String,
    pub slot: SlotKind,
    pub action: OfferAction,
    pub target: AbilityId,
    pub name: String,
    pub description: String,
    pub is_upgrade: bool,
    pub special_kind: Option<SpecialKind>,
    pub icon: Option<String>,
}

/// Offer generation was called with invalid arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OfferError {
    #[error("offer count must be at least {min}, got {requested}", min = LoadoutConfig::MIN_OFFER_COUNT)]
    CountTooSmall { requested: usize },
}

/// Generates offer batches from the ability database and the current loadout.
///
/// Borrows the registry and configuration; the algorithm itself is pure given
/// the RNG, so tests drive it with seeded generators.
pub struct OfferGenerator<'a> {
    registry: &'a AbilityRegistry,
    config: &'a LoadoutConfig,
}

impl<'a> OfferGenerator<'a> {
    pub fn new(registry: &'a AbilityRegistry, config: &'a LoadoutConfig) -> Self {
        Self { registry, config }
    }

    /// Produces `count` offers (best effort: fewer only when the ability
    /// universe is exhausted).
    ///
    /// The first two entries are always one weapon and one special offer.
    /// Remaining slots are filled by a 50/50 kind choice while both pools
    /// have fresh candidates, then padded with upgrades of owned instances.
    /// No two offers in a batch share the same `(slot, target)` pair.
    ///
    /// # Errors
    ///
    /// `count < 2` is a usage error.
    pub fn generate(
        &self,
        rng: &mut impl Rng,
        weapons: &[AbilityInstance],
        specials: &[AbilityInstance],
        count: usize,
    ) -> Result<Vec<Offer>, OfferError> {
        if count < LoadoutConfig::MIN_OFFER_COUNT {
            return Err(OfferError::CountTooSmall { requested: count });
        }

        let mut offers = Vec::with_capacity(count);

        // Must include at least one weapon and one special.
        let pool = self.build_pool(SlotKind::Weapon, weapons);
        offers.push(self.pick_one(rng, SlotKind::Weapon, &pool, weapons));
        let pool = self.build_pool(SlotKind::Special, specials);
        offers.push(self.pick_one(rng, SlotKind::Special, &pool, specials));

        while offers.len() < count {
            // Rebuild pools each round, dropping targets already offered so a
            // batch never repeats a (slot, target) pair.
            let weapon_pool = self.fresh_pool(SlotKind::Weapon, weapons, &offers);
            let special_pool = self.fresh_pool(SlotKind::Special, specials, &offers);

            let kind = match (!weapon_pool.is_empty(), !special_pool.is_empty()) {
                (true, true) => {
                    if rng.gen_bool(0.5) {
                        SlotKind::Weapon
                    } else {
                        SlotKind::Special
                    }
                }
                (true, false) => SlotKind::Weapon,
                (false, true) => SlotKind::Special,
                (false, false) => break,
            };

            let (pool, owned) = match kind {
                SlotKind::Weapon => (&weapon_pool, weapons),
                SlotKind::Special => (&special_pool, specials),
            };
            offers.push(self.pick_one(rng, kind, pool, owned));
        }

        // Degraded padding: upgrades of any owned instance, either kind.
        while offers.len() < count {
            match Self::pick_upgrade_only(rng, weapons, specials, &offers) {
                Some(offer) => offers.push(offer),
                None => {
                    tracing::debug!(
                        produced = offers.len(),
                        requested = count,
                        "offer universe exhausted"
                    );
                    break;
                }
            }
        }

        Ok(offers)
    }

    /// Candidate ids for one slot kind: unowned abilities while a slot is
    /// free, plus owned abilities that can still upgrade. Owned-and-maxed and
    /// unowned-without-a-slot are excluded.
    fn build_pool(&self, kind: SlotKind, owned: &[AbilityInstance]) -> Vec<AbilityId> {
        let max_slots = match kind {
            SlotKind::Weapon => self.config.max_weapons,
            SlotKind::Special => self.config.max_specials,
        };
        let has_slot = owned.len() < max_slots;

        self.registry
            .of_kind(kind)
            .filter_map(|def| {
                match owned.iter().find(|inst| inst.id() == &def.id) {
                    Some(inst) => inst.has_upgrade_available().then(|| def.id.clone()),
                    None => has_slot.then(|| def.id.clone()),
                }
            })
            .collect()
    }

    /// `build_pool` minus targets already present in the batch.
    fn fresh_pool(
        &self,
        kind: SlotKind,
        owned: &[AbilityInstance],
        offers: &[Offer],
    ) -> Vec<AbilityId> {
        let mut pool = self.build_pool(kind, owned);
        pool.retain(|id| !offers.iter().any(|o| o.slot == kind && &o.target == id));
        pool
    }

    /// Weighted draw from a pool, classified as acquire or upgrade by
    /// ownership. An empty pool falls back to any owned upgradable instance,
    /// then to the configured default id, so the batch is never left short
    /// here.
    fn pick_one(
        &self,
        rng: &mut impl Rng,
        kind: SlotKind,
        pool: &[AbilityId],
        owned: &[AbilityInstance],
    ) -> Offer {
        if pool.is_empty() {
            if let Some(inst) = owned.iter().find(|inst| inst.has_upgrade_available()) {
                return Offer::upgrade(kind, inst.id().clone());
            }

            let fallback = match kind {
                SlotKind::Weapon => &self.config.fallback_weapon,
                SlotKind::Special => &self.config.fallback_special,
            };
            tracing::warn!(
                kind = %kind,
                fallback = %fallback,
                "offer pool empty, using fallback acquire"
            );
            return Offer::acquire(kind, fallback.clone());
        }

        let chosen = self.weighted_pick(rng, pool).clone();
        if owned.iter().any(|inst| inst.id() == &chosen) {
            Offer::upgrade(kind, chosen)
        } else {
            Offer::acquire(kind, chosen)
        }
    }

    /// Cumulative-weight selection: draw in `[0, total)` and subtract pool
    /// weights in order until the remainder goes negative.
    fn weighted_pick<'p>(&self, rng: &mut impl Rng, pool: &'p [AbilityId]) -> &'p AbilityId {
        let weight_of = |id: &AbilityId| -> u32 {
            self.registry
                .get(id.as_str())
                .map(|def| def.effective_weight())
                .unwrap_or(1)
        };

        let total: u32 = pool.iter().map(weight_of).sum();
        let mut roll = rng.gen_range(0..total) as i64;
        for id in pool {
            roll -= weight_of(id) as i64;
            if roll < 0 {
                return id;
            }
        }
        &pool[0]
    }

    /// Uniform pick among owned instances (either kind) that can still
    /// upgrade and aren't already offered. `None` when exhausted.
    fn pick_upgrade_only(
        rng: &mut impl Rng,
        weapons: &[AbilityInstance],
        specials: &[AbilityInstance],
        offers: &[Offer],
    ) -> Option<Offer> {
        let candidates: Vec<(SlotKind, &AbilityInstance)> = weapons
            .iter()
            .map(|inst| (SlotKind::Weapon, inst))
            .chain(specials.iter().map(|inst| (SlotKind::Special, inst)))
            .filter(|(kind, inst)| {
                inst.has_upgrade_available()
                    && !offers
                        .iter()
                        .any(|o| o.slot == *kind && &o.target == inst.id())
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }
        let (kind, inst) = candidates[rng.gen_range(0..candidates.len())];
        Some(Offer::upgrade(kind, inst.id().clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::ability::{AbilityDef, PassiveEffect, UpgradeDef};

    fn small_registry() -> AbilityRegistry {
        let mut registry = AbilityRegistry::new();
        registry.register(
            AbilityDef::weapon("weapon_magic_wand", "Magic Wand", "")
                .with_upgrade(UpgradeDef::new("dmg_up", "Damage Up", "", 10)),
        );
        registry.register(
            AbilityDef::weapon("weapon_holy_aura", "Holy Aura", "")
                .with_upgrade(UpgradeDef::new("radius_up", "Bigger Aura", "", 8)),
        );
        registry.register(
            AbilityDef::weapon("weapon_twin_claw", "Twin Claw", "")
                .with_weight(8)
                .with_upgrade(UpgradeDef::new("dmg_up", "Stronger Claws", "", 10)),
        );
        registry.register(
            AbilityDef::passive(
                "passive_might",
                "Might",
                "",
                PassiveEffect::DamageMult { per_stack: 0.07 },
            )
            .with_upgrade(UpgradeDef::new("might_up", "More Might", "", 10)),
        );
        registry.register(
            AbilityDef::passive(
                "passive_armor",
                "Armor",
                "",
                PassiveEffect::ArmorBonus { per_stack: 1.5 },
            )
            .with_upgrade(UpgradeDef::new("armor_up", "More Armor", "", 10)),
        );
        registry
    }

    fn instance(registry: &AbilityRegistry, id: &str) -> AbilityInstance {
        AbilityInstance::new(Arc::clone(registry.get(id).unwrap()))
    }

    /// Applies upgrades until the instance is maxed out.
    fn max_out(inst: &mut AbilityInstance) {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        while inst.apply_random_upgrade(&mut rng).is_some() {}
    }

    #[test]
    fn first_two_offers_cover_both_slot_kinds() {
        let registry = small_registry();
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);

        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offers = generator.generate(&mut rng, &[], &[], 4).unwrap();
            assert!(offers.len() >= 2);

            let head: Vec<SlotKind> = offers[..2].iter().map(|o| o.slot).collect();
            assert!(head.contains(&SlotKind::Weapon), "seed {seed}: {head:?}");
            assert!(head.contains(&SlotKind::Special), "seed {seed}: {head:?}");
        }
    }

    #[test]
    fn batches_never_repeat_a_slot_target_pair() {
        let registry = small_registry();
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);

        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offers = generator.generate(&mut rng, &[], &[], 5).unwrap();
            for (i, a) in offers.iter().enumerate() {
                for b in &offers[i + 1..] {
                    assert!(
                        !(a.slot == b.slot && a.target == b.target),
                        "seed {seed}: duplicate {a:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn count_below_two_is_a_usage_error() {
        let registry = small_registry();
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(
            generator.generate(&mut rng, &[], &[], 1),
            Err(OfferError::CountTooSmall { requested: 1 })
        );
    }

    #[test]
    fn no_acquire_when_the_slot_kind_is_at_capacity() {
        let registry = small_registry();
        let mut config = LoadoutConfig::default();
        config.max_weapons = 1;
        let generator = OfferGenerator::new(&registry, &config);

        let weapons = vec![instance(&registry, "weapon_magic_wand")];
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offers = generator.generate(&mut rng, &weapons, &[], 4).unwrap();
            for offer in offers.iter().filter(|o| o.slot == SlotKind::Weapon) {
                assert_eq!(offer.action, OfferAction::Upgrade, "seed {seed}: {offer:?}");
                assert_eq!(offer.target.as_str(), "weapon_magic_wand");
            }
        }
    }

    #[test]
    fn owned_targets_are_classified_as_upgrades() {
        let registry = small_registry();
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);

        let weapons = vec![instance(&registry, "weapon_magic_wand")];
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offers = generator.generate(&mut rng, &weapons, &[], 4).unwrap();
            for offer in &offers {
                if offer.target.as_str() == "weapon_magic_wand" {
                    assert_eq!(offer.action, OfferAction::Upgrade);
                } else {
                    assert_eq!(offer.action, OfferAction::Acquire);
                }
            }
        }
    }

    #[test]
    fn maxed_owned_abilities_leave_the_pool() {
        let registry = small_registry();
        let mut config = LoadoutConfig::default();
        config.max_weapons = 1;
        let generator = OfferGenerator::new(&registry, &config);

        // Owned, at capacity, and fully upgraded: the weapon pool is empty
        // and no owned weapon can upgrade, so the weapon head entry must be
        // the fallback acquire.
        let mut wand = instance(&registry, "weapon_magic_wand");
        max_out(&mut wand);
        let weapons = vec![wand];

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let offers = generator.generate(&mut rng, &weapons, &[], 4).unwrap();
        let weapon_head = offers[..2]
            .iter()
            .find(|o| o.slot == SlotKind::Weapon)
            .unwrap();
        assert_eq!(weapon_head.action, OfferAction::Acquire);
        assert_eq!(weapon_head.target, config.fallback_weapon);
    }

    #[test]
    fn full_slots_still_offer_the_owned_upgradable_weapon() {
        let registry = small_registry();
        let mut config = LoadoutConfig::default();
        config.max_weapons = 1;
        let generator = OfferGenerator::new(&registry, &config);

        let weapons = vec![instance(&registry, "weapon_magic_wand")];
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let offers = generator.generate(&mut rng, &weapons, &[], 2).unwrap();
        let weapon_head = offers
            .iter()
            .find(|o| o.slot == SlotKind::Weapon)
            .unwrap();
        assert_eq!(weapon_head.action, OfferAction::Upgrade);
        assert_eq!(weapon_head.target.as_str(), "weapon_magic_wand");
    }

    #[test]
    fn weighted_pick_degenerate_pool_of_one() {
        let mut registry = AbilityRegistry::new();
        registry.register(
            AbilityDef::weapon("weapon_only", "Only", "")
                .with_upgrade(UpgradeDef::new("dmg_up", "Damage Up", "", 10)),
        );
        registry.register(
            AbilityDef::passive(
                "passive_only",
                "Only",
                "",
                PassiveEffect::DamageMult { per_stack: 0.07 },
            )
            .with_upgrade(UpgradeDef::new("might_up", "More Might", "", 10)),
        );
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offers = generator.generate(&mut rng, &[], &[], 2).unwrap();
            let weapon = offers.iter().find(|o| o.slot == SlotKind::Weapon).unwrap();
            assert_eq!(weapon.target.as_str(), "weapon_only");
        }
    }

    #[test]
    fn padding_uses_upgradable_instances_of_either_kind() {
        // Universe of exactly one weapon and one passive, both owned: after
        // the two head entries the pools are empty, so padding must stop and
        // the batch legitimately comes up short.
        let mut registry = AbilityRegistry::new();
        registry.register(
            AbilityDef::weapon("weapon_only", "Only", "")
                .with_upgrade(UpgradeDef::new("dmg_up", "Damage Up", "", 10)),
        );
        registry.register(
            AbilityDef::passive(
                "passive_only",
                "Only",
                "",
                PassiveEffect::DamageMult { per_stack: 0.07 },
            )
            .with_upgrade(UpgradeDef::new("might_up", "More Might", "", 10)),
        );
        let config = LoadoutConfig::default();
        let generator = OfferGenerator::new(&registry, &config);

        let weapons = vec![instance(&registry, "weapon_only")];
        let specials = vec![instance(&registry, "passive_only")];

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let offers = generator.generate(&mut rng, &weapons, &specials, 6).unwrap();

        // Head covers both kinds as upgrades; everything else is exhausted.
        assert_eq!(offers.len(), 2);
        assert!(offers.iter().all(|o| o.action == OfferAction::Upgrade));
    }

    #[test]
    fn offer_keys_are_stable_and_distinct() {
        let offer = Offer::acquire(SlotKind::Weapon, AbilityId::from("weapon_magic_wand"));
        assert_eq!(offer.key(), "weapon:acquire:weapon_magic_wand");

        let upgrade = Offer::upgrade(SlotKind::Special, AbilityId::from("passive_might"));
        assert_eq!(upgrade.key(), "special:upgrade:passive_might");
    }
}
