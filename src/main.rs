//! Spell Siege entry point
//!
//! Headless launcher: loads settings, runs a session at the fixed tick rate
//! without real-time pacing and prints a summary when it ends.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use spell_siege::consts::TICK_RATE;
    use spell_siege::{Session, Settings, TickOutcome};

    env_logger::init();
    log::info!("Spell Siege (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    log::info!(
        "Quality {}, particles {}, autopilot {}",
        settings.quality.as_str(),
        settings.particles,
        settings.autopilot
    );

    let max_ticks = settings.max_ticks;
    let mut session = Session::start(settings.clone());
    session.set_idle_mode(settings.autopilot);

    let mut outcome = TickOutcome::Continue;
    let mut last_wave = 1;
    for t in 1..=max_ticks {
        outcome = session.advance_tick();
        let snap = session.snapshot();
        if snap.wave != last_wave {
            last_wave = snap.wave;
            log::info!("Reached wave {} at {}s", snap.wave, t / TICK_RATE as u64);
        }
        if t % TICK_RATE as u64 == 0 {
            log::info!(
                "t={}s hp={}/{} mana={:.0} enemies={} score={}",
                t / TICK_RATE as u64,
                snap.avatar.health,
                snap.avatar.max_health,
                snap.avatar.mana,
                snap.enemies.len(),
                snap.score
            );
        }
        if outcome == TickOutcome::Defeat {
            break;
        }
    }

    let snap = session.snapshot();
    let seconds = snap.time_ticks as f32 / TICK_RATE as f32;
    match outcome {
        TickOutcome::Defeat => println!("Defeated after {:.1}s", seconds),
        TickOutcome::Continue => println!("Survived {:.1}s", seconds),
    }
    println!(
        "Wave {} | Score {} | Level {} | Spells {}",
        snap.wave,
        snap.score,
        snap.avatar.level,
        snap.avatar
            .unlocked_spells
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web front end; the library is the embeddable surface
}
