//! Ability definitions and their runtime instances.
mod def;
mod instance;

pub use def::{
    AbilityDef, AbilityId, AbilityKind, AutoActiveEffect, PassiveEffect, SlotKind, SpecialKind,
    UpgradeDef, UpgradeId, upgrade_keys,
};
pub use instance::AbilityInstance;
