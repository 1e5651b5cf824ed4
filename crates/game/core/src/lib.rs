//! Ability and loadout data layer for Zircon Survivors.
//!
//! `survivors-core` defines the static ability/character/power data model,
//! the registries that hold it, and the runtime managers that track owned
//! abilities, generate weighted upgrade offers, and tick cooldowns. The host
//! engine is reached only through the outbound [`events::HostEvent`] queue
//! and the read-only [`power::WillOracle`] trait, so the whole layer runs and
//! tests without an engine.
pub mod ability;
pub mod character;
pub mod config;
pub mod events;
pub mod loadout;
pub mod offer;
pub mod power;
pub mod registry;

pub use ability::{
    AbilityDef, AbilityId, AbilityInstance, AbilityKind, AutoActiveEffect, PassiveEffect,
    SlotKind, SpecialKind, UpgradeDef, UpgradeId, upgrade_keys,
};
pub use character::{CharacterDef, CharacterId};
pub use config::LoadoutConfig;
pub use events::{AutoEffectParams, EventQueue, HostEvent, StatModifiers};
pub use loadout::{AbilitySummary, LoadoutManager, LoadoutSummary};
pub use offer::{Offer, OfferAction, OfferError, OfferGenerator, OfferView};
pub use power::{WillOracle, ZirPowerDef, ZirPowerId, ZirPowerKind, ZirPowerManager};
pub use registry::{AbilityRegistry, CharacterRegistry, RegistryError, ZirPowerRegistry};
