//! Static ability definitions.
//!
//! An [`AbilityDef`] describes one weapon or special ability and its upgrade
//! tree. Definitions are immutable once built and live for the whole process;
//! runtime state (level, stacks) is tracked separately by
//! [`AbilityInstance`](crate::ability::AbilityInstance).
//!
//! # Design: Base + Kind Pattern
//!
//! - The base struct holds fields common to every ability (id, display data,
//!   selection weight, upgrades)
//! - [`AbilityKind`] holds kind-specific data (weapon visual, passive effect
//!   descriptor, auto-active cooldown + effect)
//!
//! Effect routing is data: each passive carries a [`PassiveEffect`] and each
//! auto-active an [`AutoActiveEffect`], so adding an ability never touches a
//! central switch.

use std::borrow::Borrow;
use std::fmt;

/// Unique identifier for an ability in the database.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(String);

impl AbilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AbilityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Borrow<str> for AbilityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier for an upgrade, unique within its parent [`AbilityDef`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UpgradeId(String);

impl UpgradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UpgradeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Borrow<str> for UpgradeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Well-known upgrade ids shared between content data and the formulas that
/// read them (cooldown decay, auto-active trigger magnitudes).
pub mod upgrade_keys {
    /// Reduces an auto-active's cooldown multiplicatively per stack.
    pub const CD_DOWN: &str = "cd_down";
    /// Scales damage-type trigger magnitudes.
    pub const DMG_UP: &str = "dmg_up";
    /// Scales radius-type trigger magnitudes.
    pub const RADIUS_UP: &str = "radius_up";
    /// Scales strength-type trigger magnitudes.
    pub const POWER_UP: &str = "power_up";
    /// Scales duration-type trigger magnitudes.
    pub const DURATION_UP: &str = "duration_up";
}

/// Which loadout list an ability occupies.
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
pub enum SlotKind {
    Weapon,
    Special,
}

/// How a special ability acts. Only meaningful for [`SlotKind::Special`].
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
pub enum SpecialKind {
    /// Always-on stat modifier.
    Passive,
    /// Fires automatically on a timer.
    AutoActive,
}

/// Stat contribution of a passive ability, scaled by the instance's upgrade
/// stacks during aggregation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveEffect {
    /// Multiplies weapon damage by `1 + per_stack * stacks`.
    DamageMult { per_stack: f32 },
    /// Multiplies cooldowns by `1 - per_stack * stacks` (a global floor is
    /// applied once during aggregation).
    CooldownMult { per_stack: f32 },
    /// Adds `per_stack * stacks` flat armor.
    ArmorBonus { per_stack: f32 },
    /// Adds `per_stack * stacks` max HP.
    MaxHpBonus { per_stack: f32 },
    /// Adds `per_stack * stacks` HP regeneration per second.
    RegenPerSec { per_stack: f32 },
    /// Multiplies pickup range by `1 + per_stack * stacks`.
    MagnetMult { per_stack: f32 },
}

/// Effect fired when an auto-active ability's cooldown elapses.
///
/// Trigger magnitudes are computed from the owning instance's upgrade stacks
/// at fire time; see [`AutoEffectParams`](crate::events::AutoEffectParams).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoActiveEffect {
    /// Pushes nearby enemies away.
    KnockbackPulse,
    /// Damages everything in a radius.
    Nova,
    /// Brief invulnerability.
    Phase,
    /// Pulls in loot from far away.
    Vacuum,
    /// Leaves a field that slows enemies.
    SlowZone,
}

/// Kind-specific ability data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Equippable weapon. `visual` is the host-side scene attached to the
    /// player when the weapon is acquired.
    Weapon { visual: Option<String> },
    /// Always-on stat modifier.
    Passive { effect: PassiveEffect },
    /// Fires automatically every `base_cooldown` seconds (before upgrade and
    /// haste scaling).
    AutoActive {
        base_cooldown: f32,
        effect: AutoActiveEffect,
    },
}

/// Immutable description of one weapon or special ability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    pub description: String,
    pub kind: AbilityKind,
    /// Optional icon image path. If absent, presentation shows text only.
    pub icon: Option<String>,
    /// Relative weight for random offer selection.
    pub weight: u32,
    /// Upgrade tree, in display order.
    pub upgrades: Vec<UpgradeDef>,
}

impl AbilityDef {
    pub const DEFAULT_WEIGHT: u32 = 10;

    fn new(id: &str, name: &str, description: &str, kind: AbilityKind) -> Self {
        Self {
            id: AbilityId::from(id),
            name: name.to_owned(),
            description: description.to_owned(),
            kind,
            icon: None,
            weight: Self::DEFAULT_WEIGHT,
            upgrades: Vec::new(),
        }
    }

    /// Starts a weapon definition.
    pub fn weapon(id: &str, name: &str, description: &str) -> Self {
        Self::new(id, name, description, AbilityKind::Weapon { visual: None })
    }

    /// Starts a passive special definition.
    pub fn passive(id: &str, name: &str, description: &str, effect: PassiveEffect) -> Self {
        Self::new(id, name, description, AbilityKind::Passive { effect })
    }

    /// Starts an auto-active special definition.
    pub fn auto_active(
        id: &str,
        name: &str,
        description: &str,
        base_cooldown: f32,
        effect: AutoActiveEffect,
    ) -> Self {
        Self::new(
            id,
            name,
            description,
            AbilityKind::AutoActive {
                base_cooldown,
                effect,
            },
        )
    }

    /// Sets the host-side visual scene (weapons only).
    #[must_use]
    pub fn with_visual(mut self, visual: &str) -> Self {
        match &mut self.kind {
            AbilityKind::Weapon { visual: slot } => *slot = Some(visual.to_owned()),
            _ => debug_assert!(false, "visual is only meaningful for weapons"),
        }
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_owned());
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Appends an upgrade to the tree.
    #[must_use]
    pub fn with_upgrade(mut self, upgrade: UpgradeDef) -> Self {
        self.upgrades.push(upgrade);
        self
    }

    pub fn slot_kind(&self) -> SlotKind {
        match self.kind {
            AbilityKind::Weapon { .. } => SlotKind::Weapon,
            AbilityKind::Passive { .. } | AbilityKind::AutoActive { .. } => SlotKind::Special,
        }
    }

    pub fn special_kind(&self) -> Option<SpecialKind> {
        match self.kind {
            AbilityKind::Weapon { .. } => None,
            AbilityKind::Passive { .. } => Some(SpecialKind::Passive),
            AbilityKind::AutoActive { .. } => Some(SpecialKind::AutoActive),
        }
    }

    pub fn is_auto_active(&self) -> bool {
        matches!(self.kind, AbilityKind::AutoActive { .. })
    }

    /// Base cooldown in seconds, auto-actives only.
    pub fn base_cooldown(&self) -> Option<f32> {
        match self.kind {
            AbilityKind::AutoActive { base_cooldown, .. } => Some(base_cooldown),
            _ => None,
        }
    }

    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDef> {
        self.upgrades.iter().find(|u| u.id.as_str() == id)
    }

    /// Weight used by the offer draw. Guards against zero-weight definitions
    /// so every pool candidate stays reachable.
    pub fn effective_weight(&self) -> u32 {
        self.weight.max(1)
    }
}

/// One node of an ability's upgrade tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeDef {
    pub id: UpgradeId,
    pub name: String,
    pub description: String,
    /// Maximum times this upgrade can be applied.
    /// Use [`UpgradeDef::UNLIMITED_STACKS`] for effectively unbounded.
    pub max_stacks: u32,
}

impl UpgradeDef {
    pub const UNLIMITED_STACKS: u32 = u32::MAX;

    pub fn new(id: &str, name: &str, description: &str, max_stacks: u32) -> Self {
        Self {
            id: UpgradeId::from(id),
            name: name.to_owned(),
            description: description.to_owned(),
            max_stacks,
        }
    }
}
