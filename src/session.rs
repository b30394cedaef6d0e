//! Session driver for a presentation layer
//!
//! Buffers input between frames, advances the simulation one tick at a time
//! and hands out read-only snapshots for rendering.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{
    Enemy, Exit, GamePhase, GameState, MoveIntent, Obstacle, Particle, Pickup, Projectile,
    SpellKind, TickInput, tick,
};

pub use crate::sim::TickOutcome;

/// Avatar stats as seen by a renderer
#[derive(Debug, Clone, Serialize)]
pub struct AvatarView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    pub mana: f32,
    pub max_mana: f32,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub current_spell: SpellKind,
    pub unlocked_spells: Vec<SpellKind>,
    pub invulnerable: bool,
    /// Hidden this frame by the invulnerability blink
    pub flashing: bool,
}

/// Read-only view of everything a renderer needs
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub wave: u32,
    pub score: u64,
    pub time_ticks: u64,
    pub avatar: AvatarView,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Avatar and ambient particles together
    pub effects: Vec<Particle>,
    pub obstacles: Vec<Obstacle>,
    pub exits: Vec<Exit>,
}

/// One play session
pub struct Session {
    settings: Settings,
    state: GameState,
    pending: TickInput,
}

impl Session {
    /// Start a fresh run
    pub fn start(settings: Settings) -> Self {
        let state = Self::fresh_state(&settings);
        Self {
            settings,
            state,
            pending: TickInput::default(),
        }
    }

    fn fresh_state(settings: &Settings) -> GameState {
        let seed = settings.resolve_seed();
        log::info!("Starting session with seed: {}", seed);
        GameState::new(seed, settings.max_particles())
    }

    /// Discard everything and start over from the initial configuration
    pub fn restart(&mut self) {
        log::info!(
            "Restarting session (was wave {}, score {})",
            self.state.wave,
            self.state.score
        );
        self.state = Self::fresh_state(&self.settings);
        self.pending = TickInput::default();
    }

    /// Buffer input for the next tick
    ///
    /// Movement is held until replaced; the cast request is one-shot.
    pub fn submit_input(&mut self, movement: MoveIntent, cast_at: Option<Vec2>) {
        self.pending.movement = movement;
        if cast_at.is_some() {
            self.pending.cast_at = cast_at;
        }
    }

    /// Request a spell switch on the next tick
    pub fn select_spell(&mut self, kind: SpellKind) {
        self.pending.select_spell = Some(kind);
    }

    /// Request a spell switch by number key
    pub fn select_hotkey(&mut self, slot: u8) {
        if let Some(kind) = SpellKind::from_hotkey(slot) {
            self.select_spell(kind);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.pending.pause = true;
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.pending.idle_mode = idle;
    }

    /// Run one simulation step with the buffered input
    pub fn advance_tick(&mut self) -> TickOutcome {
        let outcome = tick(&mut self.state, &self.pending);
        // Clear one-shot inputs after processing
        self.pending.cast_at = None;
        self.pending.select_spell = None;
        self.pending.pause = false;
        outcome
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Direct access to the world, for tests and tooling
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let avatar = &state.avatar;
        let spells = avatar.spells();
        Snapshot {
            phase: state.phase,
            wave: state.wave,
            score: state.score,
            time_ticks: state.time_ticks,
            avatar: AvatarView {
                pos: avatar.pos,
                radius: avatar.radius,
                health: avatar.health,
                max_health: avatar.max_health,
                mana: avatar.mana,
                max_mana: avatar.max_mana,
                level: avatar.level,
                experience: avatar.experience,
                experience_to_next: avatar.experience_to_next,
                current_spell: spells.current(),
                unlocked_spells: spells.unlocked().to_vec(),
                invulnerable: avatar.invulnerable,
                flashing: avatar.is_flashing(),
            },
            enemies: state.enemies.iter().filter(|e| e.active).cloned().collect(),
            projectiles: avatar
                .projectiles
                .iter()
                .filter(|p| p.active)
                .cloned()
                .collect(),
            pickups: state.pickups.iter().filter(|p| p.active).cloned().collect(),
            effects: avatar
                .particles()
                .iter()
                .chain(state.effects.particles())
                .filter(|p| p.active)
                .cloned()
                .collect(),
            obstacles: state.obstacles.clone(),
            exits: state.exits.clone(),
        }
    }
}
