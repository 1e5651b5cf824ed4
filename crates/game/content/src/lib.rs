//! Static game content for Zircon Survivors.
//!
//! This crate holds the shipped databases (every weapon, special ability,
//! playable character, and zir power), expressed through `survivors-core`
//! builders. Content is consumed by the runtime managers and never appears
//! in mutable game state.
//!
//! Each `*_registry()` function builds a fresh immutable registry; callers
//! wrap it in an `Arc` and hand it to the managers at startup.
pub mod abilities;
pub mod characters;
pub mod powers;

pub use abilities::ability_registry;
pub use characters::character_registry;
pub use powers::zir_power_registry;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use survivors_core::{
        LoadoutConfig, LoadoutManager, OfferAction, SlotKind, WillOracle, ZirPowerManager,
    };

    use super::*;

    struct Will(bool);

    impl WillOracle for Will {
        fn is_will_full(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn shipped_config_defaults_resolve_against_the_database() {
        let registry = ability_registry();
        let config = LoadoutConfig::default();

        assert!(registry.contains(config.fallback_weapon.as_str()));
        assert!(registry.contains(config.fallback_special.as_str()));
        let starting = config.starting_weapon.as_ref().unwrap();
        assert!(registry.contains(starting.as_str()));
    }

    #[test]
    fn character_references_resolve_across_databases() {
        let abilities = ability_registry();
        let characters = character_registry();
        let powers = zir_power_registry();

        for character in characters.iter() {
            for power in character
                .active_powers
                .iter()
                .chain(character.ultimate_powers.iter())
            {
                assert!(
                    powers.contains(power.as_str()),
                    "{} lists unknown power {power}",
                    character.id
                );
            }
            if let Some(weapon) = &character.starting_weapon {
                assert!(
                    abilities.contains(weapon.as_str()),
                    "{} lists unknown weapon {weapon}",
                    character.id
                );
            }
        }
    }

    #[test]
    fn empty_loadout_offer_applies_end_to_end() {
        let registry = Arc::new(ability_registry());
        let mut manager = LoadoutManager::new(
            Arc::clone(&registry),
            LoadoutConfig::without_starting_weapon(),
            7,
        )
        .unwrap();

        let views = manager.generate_offers(4).unwrap();
        assert_eq!(views.len(), 4);

        let weapon_acquire = views
            .iter()
            .find(|v| v.slot == SlotKind::Weapon && v.action == OfferAction::Acquire)
            .expect("empty loadout always gets a weapon acquire");
        assert!(manager.apply_offer(&weapon_acquire.key).unwrap());

        assert_eq!(manager.weapons().len(), 1);
        assert_eq!(manager.weapons()[0].level(), 1);
        assert_eq!(manager.weapons()[0].total_stacks(), 0);

        // A second identical acquire merges into an upgrade.
        assert!(manager.apply_offer(&weapon_acquire.key).unwrap());
        assert_eq!(manager.weapons().len(), 1);
        assert_eq!(manager.weapons()[0].level(), 2);
        assert_eq!(manager.weapons()[0].total_stacks(), 1);
    }

    #[test]
    fn izumi_runs_the_shipped_power_loop() {
        let mut manager = ZirPowerManager::new(
            Arc::new(character_registry()),
            Arc::new(zir_power_registry()),
        );
        manager.initialize_for_character("izumi").unwrap();

        assert!(manager.activate("zirpower_dash", &Will(false)));
        assert!(!manager.activate("zirpower_dash", &Will(false)));
        manager.tick(10.0);
        assert!(manager.activate("zirpower_dash", &Will(false)));

        assert!(!manager.activate("zirpower_meteor_strike", &Will(false)));
        assert!(manager.activate("zirpower_meteor_strike", &Will(true)));
    }
}
