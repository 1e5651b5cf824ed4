//! Runtime state of an acquired ability.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;

use crate::ability::def::{AbilityDef, AbilityId, UpgradeDef, UpgradeId};

/// Mutable per-loadout state bound to one shared [`AbilityDef`].
///
/// Created when an ability is first acquired; never removed mid-run. The
/// level counts every acquire/upgrade event, the stack map counts how often
/// each upgrade was applied.
///
/// # Invariants
///
/// - `stacks_of(u) <= u.max_stacks` for every upgrade `u` of the def
/// - stacks only change through [`AbilityInstance::apply_random_upgrade`]
#[derive(Clone, Debug)]
pub struct AbilityInstance {
    def: Arc<AbilityDef>,
    level: u32,
    stacks: HashMap<UpgradeId, u32>,
}

impl AbilityInstance {
    pub fn new(def: Arc<AbilityDef>) -> Self {
        Self {
            def,
            level: 1,
            stacks: HashMap::new(),
        }
    }

    pub fn def(&self) -> &AbilityDef {
        &self.def
    }

    pub fn id(&self) -> &AbilityId {
        &self.def.id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Increments the level. No upper bound is enforced.
    pub fn level_up(&mut self) {
        self.level += 1;
    }

    /// Stacks applied for `upgrade_id`; 0 when never applied.
    pub fn stacks_of(&self, upgrade_id: &str) -> u32 {
        self.stacks.get(upgrade_id).copied().unwrap_or(0)
    }

    /// Total stacks across all upgrades. Drives passive-stat aggregation.
    pub fn total_stacks(&self) -> u32 {
        self.stacks.values().sum()
    }

    /// True while at least one upgrade has stacks left below its cap.
    /// False when the def has no upgrades at all.
    pub fn has_upgrade_available(&self) -> bool {
        self.def
            .upgrades
            .iter()
            .any(|u| self.stacks_of(u.id.as_str()) < u.max_stacks)
    }

    /// Applies one stack of a uniformly random non-capped upgrade and returns
    /// the chosen def. Returns `None` without touching state when every
    /// upgrade is at its cap (or the def has none).
    ///
    /// The choice is uniform, unlike the weighted draw used for ability-level
    /// offers.
    pub fn apply_random_upgrade(&mut self, rng: &mut impl Rng) -> Option<UpgradeDef> {
        let def = Arc::clone(&self.def);
        let candidates: Vec<&UpgradeDef> = def
            .upgrades
            .iter()
            .filter(|u| self.stacks_of(u.id.as_str()) < u.max_stacks)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let chosen = candidates[rng.gen_range(0..candidates.len())];
        *self.stacks.entry(chosen.id.clone()).or_insert(0) += 1;
        Some(chosen.clone())
    }
}
