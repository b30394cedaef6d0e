//! World state and spawning
//!
//! The world owns every collection except the avatar's projectiles and
//! particles, which live on the [`Avatar`].

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::entities::{EffectPool, Enemy, EnemyKind, Exit, Obstacle, Pickup, PickupKind};
use super::waves;
use crate::consts::*;
use crate::{arena_bounds, arena_center};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Avatar died; waiting for a restart
    GameOver,
}

/// Stream offsets so cosmetic RNGs never share state with gameplay draws
const AVATAR_FX_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;
const AMBIENT_FX_STREAM: u64 = 0xc2b2_ae3d_27d4_eb4f;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub obstacles: Vec<Obstacle>,
    pub exits: Vec<Exit>,
    /// Ambient particles (hits, pickups)
    pub effects: EffectPool,
    pub enemy_spawn_timer: u32,
    pub enemy_spawn_interval: u32,
    pub pickup_spawn_timer: u32,
    pub pickup_spawn_interval: u32,
    /// Exit fires on entry and re-arms once the avatar has left it
    pub exit_armed: bool,
    next_id: u32,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64, max_particles: usize) -> Self {
        let avatar = Avatar::new(
            arena_center(),
            EffectPool::new(max_particles, seed ^ AVATAR_FX_STREAM),
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wave: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            avatar,
            enemies: Vec::new(),
            pickups: Vec::new(),
            obstacles: Vec::new(),
            exits: Vec::new(),
            effects: EffectPool::new(max_particles, seed ^ AMBIENT_FX_STREAM),
            enemy_spawn_timer: 0,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL,
            pickup_spawn_timer: 0,
            pickup_spawn_interval: PICKUP_SPAWN_INTERVAL,
            exit_armed: true,
            next_id: 1,
        };
        state.setup_level();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Clear wave-scoped entities and rebuild the fixed walls and door
    pub fn setup_level(&mut self) {
        self.enemies.clear();
        self.pickups.clear();
        self.obstacles = waves::layout_obstacles();
        self.exits = waves::layout_exits();
    }

    /// Spawn a wave-appropriate enemy just outside a random arena edge
    pub fn spawn_enemy(&mut self) {
        let pos = match self.rng.random_range(0..4) {
            0 => Vec2::new(self.rng.random_range(0.0..=ARENA_WIDTH), -SPAWN_EDGE_OFFSET),
            1 => Vec2::new(
                self.rng.random_range(0.0..=ARENA_WIDTH),
                ARENA_HEIGHT + SPAWN_EDGE_OFFSET,
            ),
            2 => Vec2::new(-SPAWN_EDGE_OFFSET, self.rng.random_range(0.0..=ARENA_HEIGHT)),
            _ => Vec2::new(
                ARENA_WIDTH + SPAWN_EDGE_OFFSET,
                self.rng.random_range(0.0..=ARENA_HEIGHT),
            ),
        };
        let kind = waves::pick_enemy_kind(self.wave, &mut self.rng);
        self.spawn_enemy_at(kind, pos);
    }

    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        log::debug!("Spawn {:?} #{} at {:?}", kind, id, pos);
        self.enemies.push(Enemy::new(id, kind, pos));
        id
    }

    /// Spawn a random pickup somewhere inside the arena
    pub fn spawn_pickup(&mut self) {
        let pos = Vec2::new(
            self.rng
                .random_range(PICKUP_MARGIN..=ARENA_WIDTH - PICKUP_MARGIN),
            self.rng
                .random_range(PICKUP_MARGIN..=ARENA_HEIGHT - PICKUP_MARGIN),
        );
        self.spawn_random_pickup_at(pos);
    }

    /// Spawn a pickup of random kind at `pos`
    pub fn spawn_random_pickup_at(&mut self, pos: Vec2) {
        let kind = PickupKind::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PickupKind::Health);
        self.spawn_pickup_at(kind, pos);
    }

    pub fn spawn_pickup_at(&mut self, kind: PickupKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        log::debug!("Pickup {:?} #{} at {:?}", kind, id, pos);
        self.pickups.push(Pickup::new(id, kind, pos));
        id
    }

    /// Move to the next wave: faster spawns, fresh layout, milestone unlocks
    pub fn advance_wave(&mut self) {
        self.wave += 1;
        self.enemy_spawn_interval = waves::next_spawn_interval(self.enemy_spawn_interval);
        self.setup_level();
        if let Some(kind) = waves::spell_unlock_for_wave(self.wave) {
            self.avatar.unlock_spell(kind);
        }
        log::info!(
            "Wave {} (spawn every {} ticks)",
            self.wave,
            self.enemy_spawn_interval
        );
    }

    pub fn bounds(&self) -> Vec2 {
        arena_bounds()
    }
}
