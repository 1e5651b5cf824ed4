//! Playable character definitions.
//!
//! Characters are static records: there is no runtime character instance.
//! A character selects a starting weapon for the loadout and the zir powers
//! registered by [`ZirPowerManager`](crate::power::ZirPowerManager).

use std::borrow::Borrow;
use std::fmt;

use crate::ability::AbilityId;
use crate::power::ZirPowerId;

/// Unique identifier for a playable character.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Borrow<str> for CharacterId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Immutable description of one playable character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    /// Portrait image path for selection screens.
    pub portrait: Option<String>,

    // Base stat adjustments applied by the host on spawn.
    pub base_speed: f32,
    pub base_max_hp: f32,
    pub base_armor: f32,

    /// Cooldown-gated zir powers, in display order.
    pub active_powers: Vec<ZirPowerId>,
    /// Will-gated zir powers, in display order.
    pub ultimate_powers: Vec<ZirPowerId>,

    /// Weapon the loadout starts with when this character is picked.
    pub starting_weapon: Option<AbilityId>,
}

impl CharacterDef {
    pub const DEFAULT_BASE_SPEED: f32 = 200.0;
    pub const DEFAULT_BASE_MAX_HP: f32 = 100.0;

    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: CharacterId::from(id),
            name: name.to_owned(),
            description: description.to_owned(),
            portrait: None,
            base_speed: Self::DEFAULT_BASE_SPEED,
            base_max_hp: Self::DEFAULT_BASE_MAX_HP,
            base_armor: 0.0,
            active_powers: Vec::new(),
            ultimate_powers: Vec::new(),
            starting_weapon: None,
        }
    }

    #[must_use]
    pub fn with_portrait(mut self, portrait: &str) -> Self {
        self.portrait = Some(portrait.to_owned());
        self
    }

    #[must_use]
    pub fn with_base_stats(mut self, speed: f32, max_hp: f32, armor: f32) -> Self {
        self.base_speed = speed;
        self.base_max_hp = max_hp;
        self.base_armor = armor;
        self
    }

    #[must_use]
    pub fn with_active_power(mut self, power: &str) -> Self {
        self.active_powers.push(ZirPowerId::from(power));
        self
    }

    #[must_use]
    pub fn with_ultimate_power(mut self, power: &str) -> Self {
        self.ultimate_powers.push(ZirPowerId::from(power));
        self
    }

    #[must_use]
    pub fn with_starting_weapon(mut self, weapon: &str) -> Self {
        self.starting_weapon = Some(AbilityId::from(weapon));
        self
    }
}
