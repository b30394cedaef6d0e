//! The player-controlled wizard
//!
//! Owns its stats, its projectiles and its own particle pool. Spell
//! cooldowns and costs are always queried through the [`SpellCatalog`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::point_in_any;
use super::entities::{EffectPool, Obstacle, Particle, Projectile, Tint};
use super::spells::{CastPattern, SpellCatalog, SpellKind};
use crate::consts::*;

/// Directional input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

#[derive(Debug, Clone)]
pub struct Avatar {
    pub pos: Vec2,
    pub radius: f32,
    pub base_speed: f32,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub mana: f32,
    pub max_mana: f32,
    pub experience: u32,
    pub level: u32,
    pub experience_to_next: u32,
    pub invulnerable: bool,
    pub invulnerability_ticks: u32,
    /// Ticks left on the speed pickup; speed reverts to base at zero
    pub speed_boost_ticks: u32,
    pub projectiles: Vec<Projectile>,
    pub effects: EffectPool,
    spells: SpellCatalog,
}

impl Avatar {
    pub fn new(pos: Vec2, effects: EffectPool) -> Self {
        Self {
            pos,
            radius: AVATAR_RADIUS,
            base_speed: AVATAR_BASE_SPEED,
            speed: AVATAR_BASE_SPEED,
            health: AVATAR_START_HEALTH,
            max_health: AVATAR_START_HEALTH,
            mana: AVATAR_START_MANA,
            max_mana: AVATAR_START_MANA,
            experience: 0,
            level: 1,
            experience_to_next: START_EXPERIENCE_TO_NEXT,
            invulnerable: false,
            invulnerability_ticks: 0,
            speed_boost_ticks: 0,
            projectiles: Vec::new(),
            effects,
            spells: SpellCatalog::new(),
        }
    }

    pub fn spells(&self) -> &SpellCatalog {
        &self.spells
    }

    pub fn current_spell(&self) -> SpellKind {
        self.spells.current()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Switch spells; ignored for spells that are not unlocked
    pub fn select_spell(&mut self, kind: SpellKind) -> bool {
        self.spells.select(kind)
    }

    pub fn unlock_spell(&mut self, kind: SpellKind) -> bool {
        let added = self.spells.unlock(kind);
        if added {
            log::info!("Unlocked spell: {}", kind.def());
        }
        added
    }

    /// Apply one tick of movement
    ///
    /// Each held direction moves a full `speed` step (diagonals are not
    /// normalized). The candidate is clamped to the arena, and the whole move
    /// is dropped if it lands inside a wall.
    pub fn move_by(&mut self, intent: MoveIntent, obstacles: &[Obstacle], bounds: Vec2) {
        if intent.is_idle() {
            return;
        }
        let mut next = self.pos;
        if intent.up {
            next.y -= self.speed;
        }
        if intent.down {
            next.y += self.speed;
        }
        if intent.left {
            next.x -= self.speed;
        }
        if intent.right {
            next.x += self.speed;
        }
        let lo = Vec2::splat(self.radius);
        let hi = (bounds - Vec2::splat(self.radius)).max(lo);
        next = next.clamp(lo, hi);

        if point_in_any(next, obstacles.iter().map(|o| o.rect)) {
            return;
        }
        self.pos = next;
    }

    /// Cast the current spell toward `aim`
    pub fn cast(&mut self, aim: Vec2) {
        let kind = self.spells.current();
        let def = kind.def();
        if def.pattern == CastPattern::Relocate {
            self.teleport(aim);
            return;
        }

        let directives = self.spells.cast(self.pos, aim, self.mana);
        if directives.is_empty() {
            return;
        }
        log::debug!("Cast {} ({} projectiles)", kind, directives.len());
        self.projectiles
            .extend(directives.iter().map(Projectile::from_directive));
        self.mana -= def.mana_cost as f32;
        self.effects.radial(self.pos, 10, 1.0, 3.0, def.tint, 20);
    }

    fn teleport(&mut self, target: Vec2) {
        let kind = SpellKind::Teleport;
        if !self.spells.ready(kind, self.mana) {
            return;
        }
        self.effects.scatter(self.pos, 20, 3.0, Tint::Cyan, 30);
        log::debug!("Teleport {:?} -> {:?}", self.pos, target);
        self.pos = target;
        self.effects.scatter(self.pos, 20, 3.0, Tint::Cyan, 30);
        self.spells.trigger_cooldown(kind);
        self.mana -= kind.def().mana_cost as f32;
    }

    /// Take a hit unless currently invulnerable
    ///
    /// Health is not clamped; callers check for death.
    pub fn take_damage(&mut self, amount: i32) {
        if self.invulnerable {
            return;
        }
        self.health -= amount;
        self.invulnerable = true;
        self.invulnerability_ticks = INVULNERABILITY_TICKS;
        self.effects.scatter(self.pos, 15, 2.0, Tint::Red, 30);
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn restore_mana(&mut self, amount: f32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// Start (or refresh) the speed boost window
    pub fn boost_speed(&mut self) {
        self.speed = self.base_speed * SPEED_BOOST_FACTOR;
        self.speed_boost_ticks = SPEED_BOOST_TICKS;
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
        while self.experience >= self.experience_to_next {
            self.level_up();
        }
    }

    pub fn level_up(&mut self) {
        self.level += 1;
        self.experience = self.experience.saturating_sub(self.experience_to_next);
        // x1.5, truncated
        self.experience_to_next = self
            .experience_to_next
            .saturating_add(self.experience_to_next / 2);

        self.max_health += LEVEL_HEALTH_BONUS;
        self.health = self.max_health;
        self.max_mana += LEVEL_MANA_BONUS;
        self.mana = self.max_mana;

        log::debug!("Level up: {} (next at {})", self.level, self.experience_to_next);
        self.effects.radial(self.pos, 30, 2.0, 5.0, Tint::Yellow, 45);
    }

    /// Advance timers, projectiles and particles by one tick
    pub fn tick(&mut self, bounds: Vec2) {
        self.spells.tick_cooldowns();

        for projectile in &mut self.projectiles {
            projectile.update(bounds);
        }
        self.projectiles.retain(|p| p.active);

        self.effects.update();

        if self.invulnerable {
            self.invulnerability_ticks = self.invulnerability_ticks.saturating_sub(1);
            if self.invulnerability_ticks == 0 {
                self.invulnerable = false;
            }
        }

        if self.speed_boost_ticks > 0 {
            self.speed_boost_ticks -= 1;
            if self.speed_boost_ticks == 0 {
                self.speed = self.base_speed;
            }
        }

        self.mana = (self.mana + MANA_REGEN).min(self.max_mana);
    }

    pub fn experience_fraction(&self) -> f32 {
        self.experience as f32 / self.experience_to_next.max(1) as f32
    }

    /// Blink while invulnerable: hidden for 5 of every 10 ticks
    pub fn is_flashing(&self) -> bool {
        self.invulnerable && self.invulnerability_ticks % 10 < 5
    }

    pub fn particles(&self) -> &[Particle] {
        self.effects.particles()
    }
}
