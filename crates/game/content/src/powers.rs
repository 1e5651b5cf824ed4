//! The shipped zir power database.

use survivors_core::{ZirPowerDef, ZirPowerRegistry};

/// Builds the registry of character-bound zir powers.
pub fn zir_power_registry() -> ZirPowerRegistry {
    let mut registry = ZirPowerRegistry::new();

    registry.register(
        ZirPowerDef::active(
            "zirpower_dash",
            "Dash",
            "Instantly teleport forward and become invincible briefly.",
            10.0,
        )
        .with_icon("res://assets/zirpowers/Active/dash_icon.png"),
    );

    registry.register(
        ZirPowerDef::ultimate(
            "zirpower_meteor_strike",
            "Meteor Strike",
            "Rain down meteors across the screen dealing massive damage.",
            200,
        )
        .with_icon("res://assets/zirpowers/Ultimate/meteor_strike_icon.png"),
    );

    registry
}
