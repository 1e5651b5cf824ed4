//! Immutable definition registries.
//!
//! Registries are built once at startup (normally by `survivors-content`) and
//! handed to the managers by `Arc`; there is no global state, so tests build
//! their own small registries and stay hermetic.
//!
//! # Lookup policy
//!
//! Every registry exposes the same two lookups:
//!
//! - `get` returns `Option`: absence is data, for call sites that treat a
//!   missing id as "no such optional feature"
//! - `require` returns `Result`, for call sites where a missing id is a
//!   configuration bug that should fail loudly
//!
//! Iteration follows insertion order, which is also display order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ability::{AbilityDef, AbilityId, SlotKind};
use crate::character::{CharacterDef, CharacterId};
use crate::power::{ZirPowerDef, ZirPowerId};

/// A definition lookup failed for an id that should have existed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown ability id: {0}")]
    UnknownAbility(AbilityId),

    #[error("unknown character id: {0}")]
    UnknownCharacter(CharacterId),

    #[error("unknown zir power id: {0}")]
    UnknownZirPower(ZirPowerId),
}

/// Registry of every weapon and special ability.
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    defs: HashMap<AbilityId, Arc<AbilityDef>>,
    order: Vec<AbilityId>,
}

impl AbilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, returning the shared handle. Registering an id a
    /// second time replaces the definition but keeps its display position.
    pub fn register(&mut self, def: AbilityDef) -> Arc<AbilityDef> {
        let id = def.id.clone();
        let def = Arc::new(def);
        if self.defs.insert(id.clone(), Arc::clone(&def)).is_none() {
            self.order.push(id);
        }
        def
    }

    pub fn get(&self, id: &str) -> Option<&Arc<AbilityDef>> {
        self.defs.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Arc<AbilityDef>, RegistryError> {
        self.defs
            .get(id)
            .ok_or_else(|| RegistryError::UnknownAbility(AbilityId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defs.contains_key(id)
    }

    /// All definitions in insertion (display) order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AbilityDef>> {
        self.order.iter().filter_map(|id| self.defs.get(id.as_str()))
    }

    /// Definitions of one slot kind, in insertion order.
    pub fn of_kind(&self, kind: SlotKind) -> impl Iterator<Item = &Arc<AbilityDef>> {
        self.iter().filter(move |def| def.slot_kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Registry of every playable character.
#[derive(Clone, Debug, Default)]
pub struct CharacterRegistry {
    defs: HashMap<CharacterId, Arc<CharacterDef>>,
    order: Vec<CharacterId>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: CharacterDef) -> Arc<CharacterDef> {
        let id = def.id.clone();
        let def = Arc::new(def);
        if self.defs.insert(id.clone(), Arc::clone(&def)).is_none() {
            self.order.push(id);
        }
        def
    }

    pub fn get(&self, id: &str) -> Option<&Arc<CharacterDef>> {
        self.defs.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Arc<CharacterDef>, RegistryError> {
        self.defs
            .get(id)
            .ok_or_else(|| RegistryError::UnknownCharacter(CharacterId::from(id)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CharacterDef>> {
        self.order.iter().filter_map(|id| self.defs.get(id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Registry of every zir power.
#[derive(Clone, Debug, Default)]
pub struct ZirPowerRegistry {
    defs: HashMap<ZirPowerId, Arc<ZirPowerDef>>,
    order: Vec<ZirPowerId>,
}

impl ZirPowerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, def: ZirPowerDef) -> Arc<ZirPowerDef> {
        let id = def.id.clone();
        let def = Arc::new(def);
        if self.defs.insert(id.clone(), Arc::clone(&def)).is_none() {
            self.order.push(id);
        }
        def
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ZirPowerDef>> {
        self.defs.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Arc<ZirPowerDef>, RegistryError> {
        self.defs
            .get(id)
            .ok_or_else(|| RegistryError::UnknownZirPower(ZirPowerId::from(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.defs.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ZirPowerDef>> {
        self.order.iter().filter_map(|id| self.defs.get(id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::PassiveEffect;

    #[test]
    fn lookup_distinguishes_absence_from_presence() {
        let mut registry = AbilityRegistry::new();
        registry.register(AbilityDef::weapon("weapon_wand", "Wand", ""));

        assert!(registry.get("weapon_wand").is_some());
        assert!(registry.get("weapon_missing").is_none());
        assert!(registry.require("weapon_wand").is_ok());
        assert_eq!(
            registry.require("weapon_missing"),
            Err(RegistryError::UnknownAbility(AbilityId::from(
                "weapon_missing"
            )))
        );
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut registry = AbilityRegistry::new();
        registry.register(AbilityDef::weapon("weapon_b", "B", ""));
        registry.register(AbilityDef::passive(
            "passive_a",
            "A",
            "",
            PassiveEffect::ArmorBonus { per_stack: 1.5 },
        ));
        registry.register(AbilityDef::weapon("weapon_c", "C", ""));

        let ids: Vec<&str> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["weapon_b", "passive_a", "weapon_c"]);

        let weapons: Vec<&str> = registry
            .of_kind(SlotKind::Weapon)
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(weapons, ["weapon_b", "weapon_c"]);
    }

    #[test]
    fn re_registering_replaces_but_keeps_position() {
        let mut registry = AbilityRegistry::new();
        registry.register(AbilityDef::weapon("weapon_a", "Old", ""));
        registry.register(AbilityDef::weapon("weapon_b", "B", ""));
        registry.register(AbilityDef::weapon("weapon_a", "New", ""));

        assert_eq!(registry.len(), 2);
        let ids: Vec<&str> = registry.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["weapon_a", "weapon_b"]);
        assert_eq!(registry.get("weapon_a").unwrap().name, "New");
    }
}
