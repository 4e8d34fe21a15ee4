//! Per-tick collision rules.
//!
//! The three rules run in a fixed order because each one sees the state left
//! by the previous one: projectiles against enemies, then the player against
//! enemies, then the player against power-ups. Every test is a plain
//! bounding-box overlap.

use rand::Rng;

use crate::compute::GameState;
use crate::consts::*;
use crate::entities::{EnemyId, Entity, GameEvent, GamePhase, Particle, ProjectileId, PowerUpId, Rgb};
use crate::spawn::{burst, roll_power_up};

pub const IMPACT_COLOR: Rgb = Rgb(255, 220, 120);
pub const KILL_COLOR: Rgb = Rgb(255, 140, 220);
pub const PLAYER_HIT_COLOR: Rgb = Rgb(120, 200, 255);

/// Run all three rules in order. A ship lost to rule 2 collects nothing.
pub fn resolve(state: &mut GameState, rng: &mut impl Rng) {
    projectiles_vs_enemies(state, rng);
    player_vs_enemies(state, rng);
    if state.phase == GamePhase::GameOver {
        return;
    }
    player_vs_power_ups(state);
}

/// Rule 1: every projectile touching an enemy is consumed and deals one hit.
///
/// Hits on the same enemy are applied in sequence, so several projectiles in
/// one tick can finish off a tougher enemy. The kill (score, drop roll, big
/// burst) happens once, on the hit that empties its hit points.
pub fn projectiles_vs_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let enemy_ids: Vec<EnemyId> = state.enemies.keys().collect();

    for id in enemy_ids {
        let hull = state.enemies[id].bounds();
        let hits: Vec<ProjectileId> = state
            .projectiles
            .iter()
            .filter(|(_, p)| p.bounds().intersects(&hull))
            .map(|(pid, _)| pid)
            .collect();
        if hits.is_empty() {
            continue;
        }

        let mut killed = false;
        for pid in hits {
            state.projectiles.remove(pid);

            let enemy = &mut state.enemies[id];
            let dead = enemy.hit();
            let (x, y, score) = (enemy.x, enemy.y, enemy.score);
            emit(state, burst(rng, x, y, IMPACT_COLOR, IMPACT_BURST));

            if dead && !killed {
                killed = true;
                state.score += score;
                state.events.push(GameEvent::EnemyDestroyed { score });
                log::debug!("enemy destroyed at ({:.0}, {:.0}) for {}", x, y, score);

                if let Some(power_up) = roll_power_up(rng, x, y) {
                    log::debug!("dropped {:?}", power_up.kind);
                    state.power_ups.insert(power_up);
                }
                emit(state, burst(rng, x, y, KILL_COLOR, KILL_BURST));
            }
        }

        if killed {
            state.enemies.remove(id);
        }
    }
}

/// Rule 2: enemies that ram the ship die without scoring and cost a shield
/// charge, or a point of health when the shield is down.
pub fn player_vs_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let hull = state.player.bounds();
    let rammed: Vec<EnemyId> = state
        .enemies
        .iter()
        .filter(|(_, e)| e.bounds().intersects(&hull))
        .map(|(id, _)| id)
        .collect();

    for id in rammed {
        state.enemies.remove(id);
        state.player.take_hit();
        state.events.push(GameEvent::PlayerHit {
            health: state.player.health,
            shield: state.player.shield,
        });

        let (x, y) = (state.player.x, state.player.y);
        emit(state, burst(rng, x, y, PLAYER_HIT_COLOR, PLAYER_HIT_BURST));

        if state.player.is_dead() {
            state.end_session();
        }
    }
}

/// Rule 3: touching a power-up collects it.
pub fn player_vs_power_ups(state: &mut GameState) {
    let hull = state.player.bounds();
    let collected: Vec<PowerUpId> = state
        .power_ups
        .iter()
        .filter(|(_, p)| p.bounds().intersects(&hull))
        .map(|(id, _)| id)
        .collect();

    for id in collected {
        let Some(power_up) = state.power_ups.remove(id) else {
            continue;
        };
        if state.player.apply_power_up(power_up.kind) {
            state.flash_started_ms = Some(state.clock_ms);
        }
        state.events.push(GameEvent::PowerUpCollected(power_up.kind));
    }
}

fn emit(state: &mut GameState, particles: Vec<Particle>) {
    for particle in particles {
        state.particles.insert(particle);
    }
}
