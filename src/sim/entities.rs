//! World entity types
//!
//! Plain data plus the per-type update and decay rules. Nothing here knows
//! about the avatar or the world as a whole.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spells::{SpawnDirective, SpellKind};
use crate::consts::*;
use crate::direction_to;

/// Colour tag for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    Cyan,
    Pink,
    Gray,
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Point test, inclusive of the top/left edges and exclusive of the
    /// bottom/right edges
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x < max.x && p.y >= self.min.y && p.y < max.y
    }
}

/// A wall blocking avatar movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// A door; touching it advances to the next wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    pub rect: Rect,
}

/// Enemy variants, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    Skeleton,
    Orc,
    Demon,
}

/// Per-variant stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: i32,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    pub tint: Tint,
}

impl EnemyKind {
    /// All variants ordered from weakest to strongest
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Goblin,
        EnemyKind::Skeleton,
        EnemyKind::Orc,
        EnemyKind::Demon,
    ];

    pub fn stats(self) -> &'static EnemyStats {
        const TABLE: [EnemyStats; 4] = [
            EnemyStats { health: 30, speed: 2.0, radius: 15.0, damage: 5, tint: Tint::Green },
            EnemyStats { health: 40, speed: 2.5, radius: 18.0, damage: 8, tint: Tint::Gray },
            EnemyStats { health: 60, speed: 1.5, radius: 25.0, damage: 10, tint: Tint::Orange },
            EnemyStats { health: 100, speed: 1.0, radius: 30.0, damage: 15, tint: Tint::Red },
        ];
        &TABLE[self as usize]
    }
}

/// An enemy homing in on the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub damage: i32,
    pub active: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            radius: stats.radius,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            damage: stats.damage,
            active: true,
        }
    }

    /// Step toward `target` at this enemy's speed
    pub fn update(&mut self, target: Vec2) {
        if !self.active {
            return;
        }
        self.pos += direction_to(self.pos, target) * self.speed;
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.active = false;
        }
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn tint(&self) -> Tint {
        self.kind.stats().tint
    }
}

/// A spell projectile owned by the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub spell: SpellKind,
    pub pos: Vec2,
    /// Unit direction the projectile was launched along (zero if aimless)
    pub heading: Vec2,
    pub vel: Vec2,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub active: bool,
}

impl Projectile {
    pub fn from_directive(directive: &SpawnDirective) -> Self {
        let def = directive.spell.def();
        let heading = direction_to(directive.origin, directive.target);
        Self {
            spell: directive.spell,
            pos: directive.origin,
            heading,
            vel: heading * def.speed,
            lifetime: def.lifetime,
            max_lifetime: def.lifetime,
            active: true,
        }
    }

    pub fn damage(&self) -> i32 {
        self.spell.def().damage
    }

    pub fn radius(&self) -> f32 {
        self.spell.def().radius
    }

    /// Advance one tick; expires on lifetime or leaving `bounds`
    pub fn update(&mut self, bounds: Vec2) {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.active = false;
        }
        if self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.active = false;
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Mana,
    Speed,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Health, PickupKind::Mana, PickupKind::Speed];

    pub fn tint(self) -> Tint {
        match self {
            PickupKind::Health => Tint::Green,
            PickupKind::Mana => Tint::Cyan,
            PickupKind::Speed => Tint::Yellow,
        }
    }
}

/// A pickup lying in the arena until collected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
}

impl Pickup {
    pub fn new(id: u32, kind: PickupKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            radius: PICKUP_RADIUS,
            active: true,
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub active: bool,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, tint: Tint, lifetime: u32) -> Self {
        Self {
            pos,
            vel,
            tint,
            lifetime,
            max_lifetime: lifetime,
            active: lifetime > 0,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.active = false;
        }
    }

    /// Fade factor, 1.0 when fresh and 0.0 when expired
    pub fn alpha(&self) -> f32 {
        if self.max_lifetime == 0 {
            return 0.0;
        }
        self.lifetime as f32 / self.max_lifetime as f32
    }
}

/// A capped particle collection with its own cosmetic RNG
///
/// When full, the oldest particle is evicted to make room.
#[derive(Debug, Clone)]
pub struct EffectPool {
    particles: Vec<Particle>,
    cap: usize,
    rng: Pcg32,
}

impl EffectPool {
    pub fn new(cap: usize, seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            cap,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: Particle) {
        if self.cap == 0 {
            return;
        }
        if self.particles.len() >= self.cap {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Burst with each velocity axis drawn from `[-spread, spread]`
    pub fn scatter(&mut self, pos: Vec2, count: usize, spread: f32, tint: Tint, lifetime: u32) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-spread..=spread),
                self.rng.random_range(-spread..=spread),
            );
            self.push(Particle::new(pos, vel, tint, lifetime));
        }
    }

    /// Burst in random directions with speed drawn from `[min_speed, max_speed]`
    pub fn radial(
        &mut self,
        pos: Vec2,
        count: usize,
        min_speed: f32,
        max_speed: f32,
        tint: Tint,
        lifetime: u32,
    ) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(min_speed..=max_speed);
            let vel = crate::heading_from_angle(angle) * speed;
            self.push(Particle::new(pos, vel, tint, lifetime));
        }
    }

    /// Advance all particles and drop the expired ones
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| p.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_point_edges() {
        let rect = Rect::new(200.0, 200.0, 100.0, 20.0);
        assert!(rect.contains_point(Vec2::new(200.0, 200.0)));
        assert!(rect.contains_point(Vec2::new(299.0, 219.0)));
        assert!(!rect.contains_point(Vec2::new(300.0, 210.0)));
        assert!(!rect.contains_point(Vec2::new(250.0, 220.0)));
    }

    #[test]
    fn test_enemy_stats_follow_kind() {
        let orc = Enemy::new(1, EnemyKind::Orc, Vec2::ZERO);
        assert_eq!(orc.health, 60);
        assert_eq!(orc.max_health, 60);
        assert_eq!(orc.damage, 10);
        assert_eq!(orc.radius, 25.0);
        assert_eq!(orc.tint(), Tint::Orange);
    }

    #[test]
    fn test_enemy_homes_toward_target() {
        let mut goblin = Enemy::new(1, EnemyKind::Goblin, Vec2::new(100.0, 0.0));
        goblin.update(Vec2::ZERO);
        assert!((goblin.pos.x - 98.0).abs() < 1e-5);
        assert_eq!(goblin.pos.y, 0.0);
    }

    #[test]
    fn test_enemy_dies_at_zero_health() {
        let mut goblin = Enemy::new(1, EnemyKind::Goblin, Vec2::ZERO);
        goblin.take_damage(20);
        assert!(goblin.active);
        goblin.take_damage(10);
        assert!(!goblin.active);
        assert_eq!(goblin.health_fraction(), 0.0);
    }

    #[test]
    fn test_projectile_leaves_arena() {
        let directive = SpawnDirective {
            spell: SpellKind::Fireball,
            origin: Vec2::new(5.0, 50.0),
            target: Vec2::new(0.0, 50.0),
        };
        let mut projectile = Projectile::from_directive(&directive);
        assert!(projectile.active);
        projectile.update(crate::arena_bounds());
        assert!(!projectile.active);
    }

    #[test]
    fn test_projectile_aimless_is_stationary() {
        let p = Vec2::new(50.0, 50.0);
        let directive = SpawnDirective {
            spell: SpellKind::Fireball,
            origin: p,
            target: p,
        };
        let projectile = Projectile::from_directive(&directive);
        assert_eq!(projectile.vel, Vec2::ZERO);
    }

    #[test]
    fn test_particle_fades_out() {
        let mut particle = Particle::new(Vec2::ZERO, Vec2::X, Tint::Red, 4);
        particle.update();
        assert!((particle.alpha() - 0.75).abs() < 1e-6);
        for _ in 0..3 {
            particle.update();
        }
        assert!(!particle.active);
        assert_eq!(particle.pos, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_effect_pool_evicts_oldest() {
        let mut pool = EffectPool::new(3, 7);
        pool.scatter(Vec2::ZERO, 2, 1.0, Tint::Red, 10);
        pool.scatter(Vec2::ONE, 2, 1.0, Tint::Blue, 10);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.particles()[0].tint, Tint::Red);
        assert_eq!(pool.particles()[2].tint, Tint::Blue);
    }

    #[test]
    fn test_effect_pool_disabled() {
        let mut pool = EffectPool::new(0, 7);
        pool.radial(Vec2::ZERO, 10, 1.0, 3.0, Tint::Yellow, 20);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_effect_pool_prunes_expired() {
        let mut pool = EffectPool::new(100, 1);
        pool.scatter(Vec2::ZERO, 5, 2.0, Tint::Cyan, 2);
        pool.radial(Vec2::ZERO, 5, 1.0, 3.0, Tint::Cyan, 3);
        pool.update();
        pool.update();
        assert_eq!(pool.len(), 5);
        pool.update();
        assert!(pool.is_empty());
    }
}
