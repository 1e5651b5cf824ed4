//! Loadout configuration constants and tunable parameters.

use crate::ability::AbilityId;

/// Runtime-tunable loadout parameters plus the fixed tuning constants of the
/// cooldown model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutConfig {
    /// Capacity of the weapon slot list.
    pub max_weapons: usize,
    /// Capacity of the special slot list.
    pub max_specials: usize,
    /// Offers presented per level-up choice.
    pub offer_count: usize,

    /// Weapon granted to an empty loadout on startup. `None` starts empty.
    pub starting_weapon: Option<AbilityId>,
    /// Acquire offered when the weapon pool is exhausted, regardless of
    /// ownership state, the "never return an empty offer" safety valve.
    pub fallback_weapon: AbilityId,
    /// Acquire offered when the special pool is exhausted.
    pub fallback_special: AbilityId,
}

impl LoadoutConfig {
    // ===== fixed tuning constants =====
    /// Offer batches below this size are a usage error.
    pub const MIN_OFFER_COUNT: usize = 2;
    /// Auto-active cooldowns never decay below this many seconds.
    pub const MIN_AUTO_COOLDOWN_SEC: f32 = 3.0;
    /// Multiplicative cooldown decay per `cd_down` stack.
    pub const COOLDOWN_DECAY_PER_STACK: f32 = 0.92;
    /// Floor for the aggregated cooldown multiplier (haste cap).
    pub const MIN_COOLDOWN_MULT: f32 = 0.2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_WEAPONS: usize = 4;
    pub const DEFAULT_MAX_SPECIALS: usize = 4;
    pub const DEFAULT_OFFER_COUNT: usize = 4;
    pub const DEFAULT_STARTING_WEAPON: &str = "weapon_magic_wand";
    pub const DEFAULT_FALLBACK_WEAPON: &str = "weapon_magic_wand";
    pub const DEFAULT_FALLBACK_SPECIAL: &str = "passive_might";

    pub fn new() -> Self {
        Self {
            max_weapons: Self::DEFAULT_MAX_WEAPONS,
            max_specials: Self::DEFAULT_MAX_SPECIALS,
            offer_count: Self::DEFAULT_OFFER_COUNT,
            starting_weapon: Some(AbilityId::from(Self::DEFAULT_STARTING_WEAPON)),
            fallback_weapon: AbilityId::from(Self::DEFAULT_FALLBACK_WEAPON),
            fallback_special: AbilityId::from(Self::DEFAULT_FALLBACK_SPECIAL),
        }
    }

    /// Configuration without a starting weapon, for loadouts that begin
    /// empty (tests, sandbox modes).
    pub fn without_starting_weapon() -> Self {
        Self {
            starting_weapon: None,
            ..Self::new()
        }
    }
}

impl Default for LoadoutConfig {
    fn default() -> Self {
        Self::new()
    }
}
