//! Spell catalog and cast engine
//!
//! Spell definitions are a static table keyed by [`SpellKind`]. The catalog
//! owns only the mutable part: one cooldown counter per spell, the unlocked
//! set and the current selection.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Tint;
use crate::{angle_of, heading_from_angle};

/// Spell identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellKind {
    /// Slow, high-damage bolt
    Fireball,
    /// Fast, medium-damage bolt with a very short lifetime
    Lightning,
    /// Medium-speed, low-damage bolt with a short lifetime
    IceShard,
    /// Low-damage bolt with a tiny cooldown
    MagicMissile,
    /// Stationary ring of 12 projectiles around the caster
    FireNova,
    /// Reserved homing variant; currently flies as a plain bolt
    LightningChain,
    /// Five-projectile cone toward the aim point
    IceStorm,
    /// Instant relocation, no projectile
    Teleport,
}

/// How a cast turns into projectiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastPattern {
    Single,
    /// `count` projectiles at fixed angular steps, ignoring the aim point
    Ring { count: u32, step_deg: f32 },
    /// `count` projectiles fanned around the aim direction
    Cone { count: u32, step_deg: f32 },
    /// No projectile; handled by the caster
    Relocate,
}

/// Static spell definition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellDef {
    pub kind: SpellKind,
    pub damage: i32,
    pub speed: f32,
    /// Cooldown in ticks
    pub cooldown: u32,
    pub mana_cost: u32,
    pub tint: Tint,
    pub radius: f32,
    /// Projectile lifetime in ticks
    pub lifetime: u32,
    pub pattern: CastPattern,
}

impl fmt::Display for SpellDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} damage, {} mana, {} cooldown",
            self.kind, self.damage, self.mana_cost, self.cooldown
        )
    }
}

/// Distance from the caster used to build pattern aim points
const PATTERN_REACH: f32 = 100.0;

const SPELLS: [SpellDef; SpellKind::COUNT] = [
    SpellDef {
        kind: SpellKind::Fireball,
        damage: 30,
        speed: 8.0,
        cooldown: 20,
        mana_cost: 15,
        tint: Tint::Orange,
        radius: 8.0,
        lifetime: 120,
        pattern: CastPattern::Single,
    },
    SpellDef {
        kind: SpellKind::Lightning,
        damage: 25,
        speed: 12.0,
        cooldown: 15,
        mana_cost: 12,
        tint: Tint::Yellow,
        radius: 8.0,
        lifetime: 30,
        pattern: CastPattern::Single,
    },
    SpellDef {
        kind: SpellKind::IceShard,
        damage: 20,
        speed: 10.0,
        cooldown: 10,
        mana_cost: 10,
        tint: Tint::Cyan,
        radius: 8.0,
        lifetime: 60,
        pattern: CastPattern::Single,
    },
    SpellDef {
        kind: SpellKind::MagicMissile,
        damage: 15,
        speed: 6.0,
        cooldown: 5,
        mana_cost: 8,
        tint: Tint::Purple,
        radius: 8.0,
        lifetime: 120,
        pattern: CastPattern::Single,
    },
    SpellDef {
        kind: SpellKind::FireNova,
        damage: 40,
        speed: 0.0,
        cooldown: 60,
        mana_cost: 25,
        tint: Tint::Red,
        radius: 50.0,
        lifetime: 120,
        pattern: CastPattern::Ring { count: 12, step_deg: 30.0 },
    },
    SpellDef {
        kind: SpellKind::LightningChain,
        damage: 20,
        speed: 10.0,
        cooldown: 30,
        mana_cost: 20,
        tint: Tint::Yellow,
        radius: 8.0,
        lifetime: 120,
        pattern: CastPattern::Single,
    },
    SpellDef {
        kind: SpellKind::IceStorm,
        damage: 15,
        speed: 5.0,
        cooldown: 45,
        mana_cost: 30,
        tint: Tint::Cyan,
        radius: 8.0,
        lifetime: 120,
        pattern: CastPattern::Cone { count: 5, step_deg: 15.0 },
    },
    SpellDef {
        kind: SpellKind::Teleport,
        damage: 0,
        speed: 0.0,
        cooldown: 90,
        mana_cost: 35,
        tint: Tint::Pink,
        radius: 8.0,
        lifetime: 0,
        pattern: CastPattern::Relocate,
    },
];

impl SpellKind {
    pub const COUNT: usize = 8;

    pub const ALL: [SpellKind; SpellKind::COUNT] = [
        SpellKind::Fireball,
        SpellKind::Lightning,
        SpellKind::IceShard,
        SpellKind::MagicMissile,
        SpellKind::FireNova,
        SpellKind::LightningChain,
        SpellKind::IceStorm,
        SpellKind::Teleport,
    ];

    /// Spells available at the start of a run
    pub const STARTERS: [SpellKind; 2] = [SpellKind::Fireball, SpellKind::MagicMissile];

    pub fn def(self) -> &'static SpellDef {
        &SPELLS[self.index()]
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpellKind::Fireball => "fireball",
            SpellKind::Lightning => "lightning",
            SpellKind::IceShard => "ice_shard",
            SpellKind::MagicMissile => "magic_missile",
            SpellKind::FireNova => "fire_nova",
            SpellKind::LightningChain => "lightning_chain",
            SpellKind::IceStorm => "ice_storm",
            SpellKind::Teleport => "teleport",
        }
    }

    /// Number-row binding (1-6)
    pub fn from_hotkey(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(SpellKind::Fireball),
            2 => Some(SpellKind::Lightning),
            3 => Some(SpellKind::IceShard),
            4 => Some(SpellKind::MagicMissile),
            5 => Some(SpellKind::FireNova),
            6 => Some(SpellKind::Teleport),
            _ => None,
        }
    }
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpellKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpellKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or(())
    }
}

/// Instruction to create one projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnDirective {
    pub spell: SpellKind,
    pub origin: Vec2,
    /// Point the projectile is aimed at
    pub target: Vec2,
}

/// Live spell state for one caster
#[derive(Debug, Clone)]
pub struct SpellCatalog {
    cooldowns: [u32; SpellKind::COUNT],
    unlocked: Vec<SpellKind>,
    current: SpellKind,
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellCatalog {
    pub fn new() -> Self {
        Self {
            cooldowns: [0; SpellKind::COUNT],
            unlocked: SpellKind::STARTERS.to_vec(),
            current: SpellKind::STARTERS[0],
        }
    }

    pub fn current(&self) -> SpellKind {
        self.current
    }

    pub fn current_def(&self) -> &'static SpellDef {
        self.current.def()
    }

    /// Unlocked spells in unlock order
    pub fn unlocked(&self) -> &[SpellKind] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, kind: SpellKind) -> bool {
        self.unlocked.contains(&kind)
    }

    pub fn cooldown(&self, kind: SpellKind) -> u32 {
        self.cooldowns[kind.index()]
    }

    /// Adds to the unlocked set; returns false if it was already there
    pub fn unlock(&mut self, kind: SpellKind) -> bool {
        if self.is_unlocked(kind) {
            return false;
        }
        self.unlocked.push(kind);
        true
    }

    /// Switch the current spell; ignored unless `kind` is unlocked
    pub fn select(&mut self, kind: SpellKind) -> bool {
        if !self.is_unlocked(kind) {
            return false;
        }
        self.current = kind;
        true
    }

    /// Whether `kind` is off cooldown and affordable with `mana`
    pub fn ready(&self, kind: SpellKind, mana: f32) -> bool {
        self.cooldown(kind) == 0 && mana >= kind.def().mana_cost as f32
    }

    /// Start the cooldown for `kind`
    pub fn trigger_cooldown(&mut self, kind: SpellKind) {
        self.cooldowns[kind.index()] = kind.def().cooldown;
    }

    /// Resolve a cast of the current spell into spawn directives
    ///
    /// Returns an empty list without touching any state when the spell is on
    /// cooldown or unaffordable. On success the spell's cooldown restarts.
    /// Relocation succeeds with an empty list; the caller moves itself.
    /// Mana is never debited here.
    pub fn cast(&mut self, caster: Vec2, aim: Vec2, mana: f32) -> Vec<SpawnDirective> {
        let kind = self.current;
        if !self.ready(kind, mana) {
            return Vec::new();
        }
        let def = kind.def();
        let directives = match def.pattern {
            CastPattern::Single => vec![SpawnDirective {
                spell: kind,
                origin: caster,
                target: aim,
            }],
            CastPattern::Ring { count, step_deg } => (0..count)
                .map(|i| {
                    let theta = (i as f32 * step_deg).to_radians();
                    directive_at_angle(kind, caster, theta)
                })
                .collect(),
            CastPattern::Cone { count, step_deg } => {
                let base = angle_of(aim - caster);
                let half = (count as i32 - 1) / 2;
                (-half..=half)
                    .map(|i| {
                        let theta = base + (i as f32 * step_deg).to_radians();
                        directive_at_angle(kind, caster, theta)
                    })
                    .collect()
            }
            CastPattern::Relocate => Vec::new(),
        };
        self.trigger_cooldown(kind);
        directives
    }

    /// Count every running cooldown down by one tick
    pub fn tick_cooldowns(&mut self) {
        for cd in &mut self.cooldowns {
            *cd = cd.saturating_sub(1);
        }
    }
}

fn directive_at_angle(spell: SpellKind, origin: Vec2, theta: f32) -> SpawnDirective {
    SpawnDirective {
        spell,
        origin,
        target: origin + heading_from_angle(theta) * PATTERN_REACH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog_with(kind: SpellKind) -> SpellCatalog {
        let mut catalog = SpellCatalog::new();
        catalog.unlock(kind);
        assert!(catalog.select(kind));
        catalog
    }

    fn directive_angle_deg(d: &SpawnDirective) -> f32 {
        angle_of(d.target - d.origin).to_degrees()
    }

    fn angle_diff_deg(a: f32, b: f32) -> f32 {
        let mut d = (a - b) % 360.0;
        if d > 180.0 {
            d -= 360.0;
        } else if d < -180.0 {
            d += 360.0;
        }
        d.abs()
    }

    #[test]
    fn test_table_matches_kinds() {
        for kind in SpellKind::ALL {
            assert_eq!(kind.def().kind, kind);
        }
    }

    #[test]
    fn test_starting_catalog() {
        let catalog = SpellCatalog::new();
        assert_eq!(catalog.current(), SpellKind::Fireball);
        assert_eq!(catalog.unlocked(), &[SpellKind::Fireball, SpellKind::MagicMissile]);
        assert!(SpellKind::ALL.iter().all(|k| catalog.cooldown(*k) == 0));
    }

    #[test]
    fn test_single_cast_sets_cooldown() {
        let mut catalog = SpellCatalog::new();
        let out = catalog.cast(Vec2::ZERO, Vec2::new(10.0, 0.0), 100.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, Vec2::new(10.0, 0.0));
        assert_eq!(catalog.cooldown(SpellKind::Fireball), 20);
    }

    #[test]
    fn test_cast_on_cooldown_is_refused() {
        let mut catalog = SpellCatalog::new();
        assert_eq!(catalog.cast(Vec2::ZERO, Vec2::X, 100.0).len(), 1);
        catalog.tick_cooldowns();
        assert!(catalog.cast(Vec2::ZERO, Vec2::X, 100.0).is_empty());
        assert_eq!(catalog.cooldown(SpellKind::Fireball), 19);
    }

    #[test]
    fn test_cast_without_mana_is_refused() {
        let mut catalog = SpellCatalog::new();
        assert!(catalog.cast(Vec2::ZERO, Vec2::X, 14.9).is_empty());
        assert_eq!(catalog.cooldown(SpellKind::Fireball), 0);
    }

    #[test]
    fn test_fire_nova_ring() {
        let mut catalog = catalog_with(SpellKind::FireNova);
        let out = catalog.cast(Vec2::new(300.0, 300.0), Vec2::new(301.0, 900.0), 100.0);
        assert_eq!(out.len(), 12);
        for (i, d) in out.iter().enumerate() {
            let expected = i as f32 * 30.0;
            assert!(angle_diff_deg(directive_angle_deg(d), expected) < 1e-3);
            assert_eq!(d.origin, Vec2::new(300.0, 300.0));
        }
    }

    #[test]
    fn test_ice_storm_cone() {
        let mut catalog = catalog_with(SpellKind::IceStorm);
        let caster = Vec2::new(100.0, 100.0);
        let aim = Vec2::new(100.0, 200.0);
        let out = catalog.cast(caster, aim, 100.0);
        assert_eq!(out.len(), 5);
        let base = 90.0;
        for (d, offset) in out.iter().zip([-30.0, -15.0, 0.0, 15.0, 30.0]) {
            assert!(angle_diff_deg(directive_angle_deg(d), base + offset) < 1e-3);
        }
    }

    #[test]
    fn test_teleport_cast_is_empty_but_consumes_cooldown() {
        let mut catalog = catalog_with(SpellKind::Teleport);
        assert!(catalog.cast(Vec2::ZERO, Vec2::ONE, 100.0).is_empty());
        assert_eq!(catalog.cooldown(SpellKind::Teleport), 90);
    }

    #[test]
    fn test_select_requires_unlock() {
        let mut catalog = SpellCatalog::new();
        assert!(!catalog.select(SpellKind::Teleport));
        assert_eq!(catalog.current(), SpellKind::Fireball);
        assert!(catalog.unlock(SpellKind::Teleport));
        assert!(catalog.select(SpellKind::Teleport));
        assert_eq!(catalog.current(), SpellKind::Teleport);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut catalog = SpellCatalog::new();
        assert!(catalog.unlock(SpellKind::Lightning));
        assert!(!catalog.unlock(SpellKind::Lightning));
        assert_eq!(catalog.unlocked().len(), 3);
    }

    #[test]
    fn test_cooldowns_tick_independently() {
        let mut catalog = SpellCatalog::new();
        catalog.cast(Vec2::ZERO, Vec2::X, 100.0);
        catalog.select(SpellKind::MagicMissile);
        catalog.cast(Vec2::ZERO, Vec2::X, 100.0);
        for _ in 0..5 {
            catalog.tick_cooldowns();
        }
        assert_eq!(catalog.cooldown(SpellKind::MagicMissile), 0);
        assert_eq!(catalog.cooldown(SpellKind::Fireball), 15);
    }

    #[test]
    fn test_spell_names_roundtrip() {
        for kind in SpellKind::ALL {
            assert_eq!(kind.as_str().parse::<SpellKind>(), Ok(kind));
        }
        assert!("polymorph".parse::<SpellKind>().is_err());
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(SpellKind::from_hotkey(1), Some(SpellKind::Fireball));
        assert_eq!(SpellKind::from_hotkey(6), Some(SpellKind::Teleport));
        assert_eq!(SpellKind::from_hotkey(0), None);
        assert_eq!(SpellKind::from_hotkey(7), None);
    }

    #[test]
    fn test_spell_info_line() {
        assert_eq!(
            SpellKind::Fireball.def().to_string(),
            "fireball: 30 damage, 15 mana, 20 cooldown"
        );
    }

    proptest! {
        #[test]
        fn prop_fire_nova_ignores_aim(
            cx in 0.0f32..1200.0, cy in 0.0f32..800.0,
            ax in -5000.0f32..5000.0, ay in -5000.0f32..5000.0,
        ) {
            let mut catalog = catalog_with(SpellKind::FireNova);
            let out = catalog.cast(Vec2::new(cx, cy), Vec2::new(ax, ay), 100.0);
            prop_assert_eq!(out.len(), 12);
            for (i, d) in out.iter().enumerate() {
                prop_assert!(angle_diff_deg(directive_angle_deg(d), i as f32 * 30.0) < 1e-2);
            }
        }

        #[test]
        fn prop_cooldowns_never_underflow(casts in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut catalog = SpellCatalog::new();
            for cast in casts {
                if cast {
                    catalog.cast(Vec2::ZERO, Vec2::X, 100.0);
                }
                catalog.tick_cooldowns();
                prop_assert!(catalog.cooldown(SpellKind::Fireball) <= SpellKind::Fireball.def().cooldown);
            }
        }
    }
}
