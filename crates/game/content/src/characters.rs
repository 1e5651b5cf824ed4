//! The shipped character roster.

use survivors_core::{CharacterDef, CharacterRegistry};

/// Builds the registry of playable characters.
pub fn character_registry() -> CharacterRegistry {
    let mut registry = CharacterRegistry::new();

    registry.register(
        CharacterDef::new(
            "izumi",
            "Izumi",
            "Balanced character with agile movement and powerful area attacks.",
        )
        .with_portrait("res://assets/characters/izumi_portrait.png")
        .with_base_stats(200.0, 100.0, 0.0)
        .with_active_power("zirpower_dash")
        .with_ultimate_power("zirpower_meteor_strike")
        .with_starting_weapon("weapon_magic_wand"),
    );

    registry
}
