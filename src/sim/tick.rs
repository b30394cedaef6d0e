//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world one frame at a time.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::avatar::MoveIntent;
use super::collision::{circles_overlap, point_in_any};
use super::entities::PickupKind;
use super::spells::{CastPattern, SpellKind};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// Cast the current spell at this point (click)
    pub cast_at: Option<Vec2>,
    /// Switch spells before casting
    pub select_spell: Option<SpellKind>,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the simulation steers the avatar
    pub idle_mode: bool,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    Defeat,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return TickOutcome::Continue;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return TickOutcome::Continue,
        GamePhase::GameOver => return TickOutcome::Defeat,
        GamePhase::Playing => {}
    }

    let input = if input.idle_mode {
        idle_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    let bounds = state.bounds();

    // Avatar: spell switch, cast, movement, then its own timers
    if let Some(kind) = input.select_spell {
        state.avatar.select_spell(kind);
    }
    if let Some(aim) = input.cast_at {
        state.avatar.cast(aim);
    }
    state.avatar.move_by(input.movement, &state.obstacles, bounds);
    state.avatar.tick(bounds);

    let target = state.avatar.pos;
    for enemy in &mut state.enemies {
        enemy.update(target);
    }
    state.enemies.retain(|e| e.active);

    state.effects.update();

    state.enemy_spawn_timer += 1;
    if state.enemy_spawn_timer >= state.enemy_spawn_interval {
        state.spawn_enemy();
        state.enemy_spawn_timer = 0;
    }
    state.pickup_spawn_timer += 1;
    if state.pickup_spawn_timer >= state.pickup_spawn_interval {
        state.spawn_pickup();
        state.pickup_spawn_timer = 0;
    }

    if resolve_collisions(state) {
        TickOutcome::Continue
    } else {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Defeated on wave {} with score {} (level {})",
            state.wave,
            state.score,
            state.avatar.level
        );
        TickOutcome::Defeat
    }
}

/// Run the per-tick collision pass; returns whether the avatar survived
pub fn resolve_collisions(state: &mut GameState) -> bool {
    // Projectiles vs enemies: one hit per projectile
    let mut kills = Vec::new();
    for projectile in state.avatar.projectiles.iter_mut().filter(|p| p.active) {
        for enemy in state.enemies.iter_mut().filter(|e| e.active) {
            if !circles_overlap(projectile.pos, projectile.radius(), enemy.pos, enemy.radius) {
                continue;
            }
            enemy.take_damage(projectile.damage());
            projectile.active = false;
            state
                .effects
                .scatter(enemy.pos, 10, 2.0, projectile.spell.def().tint, 20);
            if !enemy.active {
                kills.push(enemy.pos);
            }
            break;
        }
    }
    for pos in kills {
        state.score += KILL_SCORE;
        state.avatar.gain_experience(KILL_EXPERIENCE);
        if state.rng().random_bool(PICKUP_DROP_CHANCE) {
            state.spawn_random_pickup_at(pos);
        }
    }
    state.enemies.retain(|e| e.active);
    state.avatar.projectiles.retain(|p| p.active);

    // Enemy contact
    for enemy in &state.enemies {
        if circles_overlap(state.avatar.pos, state.avatar.radius, enemy.pos, enemy.radius) {
            state.avatar.take_damage(enemy.damage);
            if !state.avatar.is_alive() {
                return false;
            }
        }
    }

    // Pickups
    for pickup in state.pickups.iter_mut().filter(|p| p.active) {
        if !circles_overlap(state.avatar.pos, state.avatar.radius, pickup.pos, pickup.radius) {
            continue;
        }
        match pickup.kind {
            PickupKind::Health => state.avatar.heal(HEALTH_PICKUP_AMOUNT),
            PickupKind::Mana => state.avatar.restore_mana(MANA_PICKUP_AMOUNT),
            PickupKind::Speed => state.avatar.boost_speed(),
        }
        log::debug!("Collected {:?}", pickup.kind);
        pickup.active = false;
        state
            .effects
            .scatter(pickup.pos, 15, 1.0, pickup.kind.tint(), 30);
    }
    state.pickups.retain(|p| p.active);

    // Exit
    let on_exit = point_in_any(state.avatar.pos, state.exits.iter().map(|e| e.rect));
    if on_exit && state.exit_armed {
        state.exit_armed = false;
        state.advance_wave();
    } else if !on_exit {
        state.exit_armed = true;
    }

    state.avatar.is_alive()
}

/// Distance under which idle mode backs away from an enemy
const IDLE_FLEE_RADIUS: f32 = 160.0;

/// Build input for idle/demo mode: shoot the nearest enemy with the hardest
/// hitting ready spell, back away from threats, otherwise collect pickups
fn idle_input(state: &GameState) -> TickInput {
    let mut out = TickInput::default();
    let avatar = &state.avatar;

    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(avatar.pos)
            .partial_cmp(&b.pos.distance_squared(avatar.pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(enemy) = nearest {
        let spells = avatar.spells();
        let best = spells
            .unlocked()
            .iter()
            .copied()
            .filter(|k| k.def().pattern != CastPattern::Relocate)
            .filter(|k| spells.ready(*k, avatar.mana))
            .max_by_key(|k| k.def().damage);
        if let Some(kind) = best {
            out.select_spell = Some(kind);
            out.cast_at = Some(enemy.pos);
        }

        let away = avatar.pos - enemy.pos;
        if away.length() < IDLE_FLEE_RADIUS {
            out.movement = steer(away);
        }
    } else if let Some(pickup) = state.pickups.first() {
        out.movement = steer(pickup.pos - avatar.pos);
    }
    out
}

/// Convert a direction into held keys
fn steer(dir: Vec2) -> MoveIntent {
    const DEADZONE: f32 = 1.0;
    MoveIntent {
        up: dir.y < -DEADZONE,
        down: dir.y > DEADZONE,
        left: dir.x < -DEADZONE,
        right: dir.x > DEADZONE,
    }
}
