//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - One call to `tick` per frame
//! - Seeded RNG only
//! - Entities are marked inactive during a pass and compacted afterwards

pub mod avatar;
pub mod collision;
pub mod entities;
pub mod spells;
pub mod state;
pub mod tick;
pub mod waves;

pub use avatar::{Avatar, MoveIntent};
pub use collision::{circles_overlap, point_in_any};
pub use entities::{
    EffectPool, Enemy, EnemyKind, Exit, Obstacle, Particle, Pickup, PickupKind, Projectile, Rect,
    Tint,
};
pub use spells::{CastPattern, SpawnDirective, SpellCatalog, SpellDef, SpellKind};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, TickOutcome, resolve_collisions, tick};
