//! The shipped ability database: weapons, passives, and auto-actives.

use survivors_core::{
    AbilityDef, AbilityRegistry, AutoActiveEffect, PassiveEffect, UpgradeDef,
};

fn up(id: &str, name: &str, description: &str, max_stacks: u32) -> UpgradeDef {
    UpgradeDef::new(id, name, description, max_stacks)
}

/// Builds the registry of every acquirable ability.
pub fn ability_registry() -> AbilityRegistry {
    let mut registry = AbilityRegistry::new();

    // ------------------------------------------------------------------
    // Weapons
    // ------------------------------------------------------------------

    registry.register(
        AbilityDef::weapon(
            "weapon_magic_wand",
            "Magic Wand",
            "Nearest enemy targeting shots.",
        )
        .with_visual("res://scenes/weapons/MagicWand.tscn")
        .with_icon("res://assets/weapons/magic_wand.png")
        .with_upgrade(up("dmg_up", "Damage Up", "Projectile damage increases.", 10))
        .with_upgrade(up("cd_down", "Haste", "Shoots more frequently.", 10))
        .with_upgrade(up("count_up", "Extra Shot", "Shoots +1 projectile.", 5))
        .with_upgrade(up("size_up", "Bigger Shots", "Projectiles become larger.", 6))
        .with_upgrade(up("pierce_up", "Piercing", "Projectiles pierce +1.", 4))
        .with_upgrade(up("explosion", "Explosive", "Projectiles explode on hit.", 1)),
    );

    registry.register(
        AbilityDef::weapon("weapon_holy_aura", "Holy Aura", "Damages enemies around you.")
            .with_visual("res://scenes/weapons/HolyAura.tscn")
            .with_icon("res://assets/weapons/holy_aura.png")
            .with_upgrade(up("radius_up", "Bigger Aura", "Aura radius increases.", 8)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_targeted_strike",
            "Targeted Strike",
            "Creates a damaging zone at a nearby enemy.",
        )
        .with_visual("res://scenes/weapons/TargetedStrike.tscn")
        .with_icon("res://assets/weapons/targeted_strike.png")
        .with_upgrade(up("dmg_up", "Damage Up", "Strike damage increases.", 10))
        .with_upgrade(up("cd_down", "Haste", "Strikes more frequently.", 10))
        .with_upgrade(up("radius_up", "Bigger Strike", "Strike radius increases.", 8))
        .with_upgrade(up("count_up", "Extra Target", "Targets +1 additional enemy.", 5)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_nova_burst",
            "Nova Burst",
            "Detonates a huge blast around you at long intervals.",
        )
        .with_visual("res://scenes/weapons/NovaBurst.tscn")
        .with_icon("res://assets/weapons/nova_burst.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "Stronger Nova", "Explosion damage increases.", 10))
        .with_upgrade(up("radius_up", "Bigger Nova", "Explosion radius increases.", 8))
        .with_upgrade(up("cd_down", "Faster Nova", "Triggers more often.", 10)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_shockwave",
            "Shockwave",
            "Chain lightning jumps between nearby enemies.",
        )
        .with_visual("res://scenes/weapons/Shockwave.tscn")
        .with_icon("res://assets/weapons/shockwave.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "More Voltage", "Lightning damage increases.", 10))
        .with_upgrade(up("cd_down", "Faster Sparks", "Triggers more often.", 10))
        .with_upgrade(up("range_up", "Longer Chain", "Chain range increases.", 8))
        .with_upgrade(up("jumps_up", "Extra Jumps", "Hits +1 additional enemy.", 6))
        .with_upgrade(up("fork", "Fork", "Adds an extra chain.", 3)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_orbit_boomerang",
            "Comet Boomerang",
            "Boomerangs orbit around you on a comet-like path. More boomerangs \
             also add new angled orbits.",
        )
        .with_visual("res://scenes/weapons/OrbitBoomerang.tscn")
        .with_icon("res://assets/weapons/orbit_boomerang.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "Sharper Edge", "Orbit hit damage increases.", 10))
        .with_upgrade(up(
            "count_up",
            "More Boomerangs",
            "Adds +1 orbiting boomerang (may create a new orbit).",
            7,
        ))
        .with_upgrade(up("radius_up", "Wider Orbit", "Orbit size increases.", 8))
        .with_upgrade(up("speed_up", "Faster Orbit", "Orbit speed increases.", 8))
        .with_upgrade(up("tick_up", "More Hits", "Hits more frequently.", 7)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_piercing_beam",
            "Piercing Beam",
            "Fires a beam towards the nearest enemy, reaching the screen edge.",
        )
        .with_visual("res://scenes/weapons/PiercingBeam.tscn")
        .with_icon("res://assets/weapons/piercing_beam.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "More Power", "Beam damage increases.", 10))
        .with_upgrade(up("cd_down", "Faster Beam", "Fires more often.", 10))
        .with_upgrade(up("width_up", "Wider Beam", "Beam width increases.", 7))
        .with_upgrade(up("bounce_up", "Ricochet", "Beam bounces +1 time off walls.", 6))
        .with_upgrade(up("count_up", "Extra Beam", "Fires +1 beam.", 5)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_fire_bottle",
            "Fire Bottle",
            "Throws a bottle that leaves a burning area.",
        )
        .with_visual("res://scenes/weapons/FireBottle.tscn")
        .with_icon("res://assets/weapons/fire_bottle.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "Hotter Flames", "Burn damage increases.", 10))
        .with_upgrade(up("cd_down", "Faster Throws", "Throws more often.", 10))
        .with_upgrade(up("radius_up", "Bigger Fire", "Burning area radius increases.", 8))
        .with_upgrade(up("duration_up", "Longer Burn", "Burning lasts longer.", 7))
        .with_upgrade(up("tick_up", "Faster Burn", "Burn hits more frequently.", 7))
        .with_upgrade(up("count_up", "Extra Bottle", "Throws +1 bottle.", 5)),
    );

    registry.register(
        AbilityDef::weapon(
            "weapon_twin_claw",
            "Twin Claw",
            "Slashes forward and backward at the same time.",
        )
        .with_visual("res://scenes/weapons/TwinClaw.tscn")
        .with_icon("res://assets/weapons/twin_claw.png")
        .with_weight(8)
        .with_upgrade(up("dmg_up", "Stronger Claws", "Slash damage increases.", 10))
        .with_upgrade(up("cd_down", "Faster Slashes", "Slashes more often.", 10))
        .with_upgrade(up("radius_up", "Wider Slash", "Slash size increases.", 8))
        .with_upgrade(up("count_up", "Extra Slash", "Adds +1 slash per trigger.", 5)),
    );

    // ------------------------------------------------------------------
    // Specials (passive)
    // ------------------------------------------------------------------

    registry.register(
        AbilityDef::passive(
            "passive_might",
            "Might",
            "Increases all weapon damage.",
            PassiveEffect::DamageMult { per_stack: 0.07 },
        )
        .with_icon("res://assets/abilities/might.png")
        .with_upgrade(up("might_up", "More Might", "Damage bonus increases.", 10)),
    );

    registry.register(
        AbilityDef::passive(
            "passive_armor",
            "Armor",
            "Reduces contact damage.",
            PassiveEffect::ArmorBonus { per_stack: 1.5 },
        )
        .with_icon("res://assets/abilities/armor.png")
        .with_upgrade(up("armor_up", "More Armor", "Damage reduction increases.", 10)),
    );

    registry.register(
        AbilityDef::passive(
            "passive_vitality",
            "Vitality",
            "Increases max HP.",
            PassiveEffect::MaxHpBonus { per_stack: 10.0 },
        )
        .with_icon("res://assets/abilities/vitality.png")
        .with_upgrade(up("hp_up", "More HP", "Max HP increases.", 10)),
    );

    registry.register(
        AbilityDef::passive(
            "passive_regen",
            "Regeneration",
            "Regenerates HP over time.",
            PassiveEffect::RegenPerSec { per_stack: 0.35 },
        )
        .with_icon("res://assets/abilities/regeneration.png")
        .with_weight(8)
        .with_upgrade(up("regen_up", "Faster Regen", "Regeneration increases.", 10)),
    );

    registry.register(
        AbilityDef::passive(
            "passive_haste",
            "Haste Matrix",
            "All weapons attack faster.",
            PassiveEffect::CooldownMult { per_stack: 0.05 },
        )
        .with_icon("res://assets/abilities/auto_haste.png")
        .with_weight(8)
        .with_upgrade(up("haste_up", "More Haste", "Cooldown reduction increases.", 10)),
    );

    // Icon not provided.
    registry.register(
        AbilityDef::passive(
            "passive_magnet",
            "Magnet",
            "Increases pickup range.",
            PassiveEffect::MagnetMult { per_stack: 0.2 },
        )
        .with_weight(8)
        .with_upgrade(up("magnet_up", "Stronger Magnet", "Pickup range increases.", 10)),
    );

    // ------------------------------------------------------------------
    // Specials (auto-active)
    // ------------------------------------------------------------------

    registry.register(
        AbilityDef::auto_active(
            "auto_phase",
            "Phase Cloak",
            "Periodically becomes untouchable for a short time.",
            24.0,
            AutoActiveEffect::Phase,
        )
        .with_icon("res://assets/abilities/phase_cloak.png")
        .with_weight(6)
        .with_upgrade(up("duration_up", "Longer Phase", "Invincibility lasts longer.", 4))
        .with_upgrade(up("cd_down", "Faster Phase", "Triggers more often.", 6)),
    );

    // Icon not provided.
    registry.register(
        AbilityDef::auto_active(
            "auto_vacuum",
            "Vacuum",
            "Periodically pulls in loot from far away.",
            18.0,
            AutoActiveEffect::Vacuum,
        )
        .with_weight(6)
        .with_upgrade(up("radius_up", "Wider Vacuum", "Vacuum radius increases.", 6))
        .with_upgrade(up("cd_down", "Faster Vacuum", "Triggers more often.", 6)),
    );

    registry.register(
        AbilityDef::auto_active(
            "auto_slow_zone",
            "Frost Zone",
            "Periodically creates a slow field for enemies.",
            16.0,
            AutoActiveEffect::SlowZone,
        )
        .with_icon("res://assets/abilities/frozen_zone.png")
        .with_weight(6)
        .with_upgrade(up("radius_up", "Wider Zone", "Zone radius increases.", 6))
        .with_upgrade(up("duration_up", "Longer Zone", "Zone lasts longer.", 4))
        .with_upgrade(up("power_up", "Stronger Slow", "Slow effect increases.", 4))
        .with_upgrade(up("cd_down", "Faster Zone", "Triggers more often.", 6)),
    );

    registry
}
