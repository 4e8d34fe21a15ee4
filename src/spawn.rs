//! Wave timing, difficulty scaling and random drops.
//!
//! The director is driven by the simulation clock, not the frame count, so
//! the wave rhythm does not depend on how often `tick` is called. All
//! randomness comes through an injected `Rng`.

use std::f32::consts::TAU;

use rand::Rng;

use crate::consts::*;
use crate::entities::{Enemy, Particle, PowerUp, Rect, Rgb};

/// Stats shared by every enemy of one wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub count: u32,
    pub speed: f32,
    pub hp: u32,
    pub score: u32,
}

impl Wave {
    /// Wave composition for a difficulty `level`.
    pub fn for_level(level: u32) -> Self {
        Self {
            count: (2 + level / 2).clamp(MIN_WAVE_SIZE, MAX_WAVE_SIZE),
            speed: 2.0 + level as f32 * 0.15,
            hp: 1 + level / 4,
            score: 10 + 2 * level,
        }
    }

    /// Roll the enemies of this wave, each jittered sideways.
    pub fn spawn(&self, rng: &mut impl Rng, field: &Rect) -> Vec<Enemy> {
        (0..self.count)
            .map(|_| {
                let mut enemy = Enemy::random(rng, field, self.speed, self.hp, self.score);
                enemy.x += rng.gen_range(-ENEMY_SPAWN_JITTER..=ENEMY_SPAWN_JITTER) as f32;
                enemy
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnDirector {
    /// Clock time of the last wave.
    pub spawn_timer: u64,
    /// Current gap between waves in ms.
    pub spawn_delay: u64,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            spawn_timer: 0,
            spawn_delay: INITIAL_SPAWN_DELAY_MS,
        }
    }
}

impl SpawnDirector {
    /// True once more than `spawn_delay` ms have passed since the last wave.
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.spawn_timer) > self.spawn_delay
    }

    /// Trigger a wave if one is due.
    ///
    /// On trigger the enemies for the current `level` are returned, `level`
    /// is bumped by one and the delay decays toward its floor.
    pub fn poll(
        &mut self,
        now_ms: u64,
        level: &mut u32,
        rng: &mut impl Rng,
        field: &Rect,
    ) -> Option<Vec<Enemy>> {
        if !self.is_due(now_ms) {
            return None;
        }

        let enemies = Wave::for_level(*level).spawn(rng, field);
        log::debug!(
            "wave at {}ms: level {} -> {} enemies, next delay {}ms",
            now_ms,
            *level,
            enemies.len(),
            next_delay(self.spawn_delay)
        );

        *level += 1;
        self.spawn_delay = next_delay(self.spawn_delay);
        self.spawn_timer = now_ms;
        Some(enemies)
    }
}

/// Geometric decay with a hard floor.
pub fn next_delay(delay: u64) -> u64 {
    (delay * SPAWN_DELAY_DECAY_NUM / SPAWN_DELAY_DECAY_DEN).max(MIN_SPAWN_DELAY_MS)
}

// ── Drops & effects ──────────────────────────────────────────────────────────

/// One drop roll for an enemy killed at (x, y).
pub fn roll_power_up(rng: &mut impl Rng, x: f32, y: f32) -> Option<PowerUp> {
    if rng.gen_bool(POWER_UP_DROP_CHANCE) {
        Some(PowerUp::new(x, y, rng.gen()))
    } else {
        None
    }
}

/// `amount` particles flying out of (x, y) in random directions.
pub fn burst(rng: &mut impl Rng, x: f32, y: f32, color: Rgb, amount: usize) -> Vec<Particle> {
    (0..amount)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(1.0..=4.0_f32);
            Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life: rng.gen_range(20..=40),
                color,
            }
        })
        .collect()
}
