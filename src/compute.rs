//! Game-state machine and the per-tick pipeline.
//!
//! `tick` takes an immutable reference to the current `GameState`, the
//! decoded input for this tick, the elapsed simulation time and an RNG
//! handle, and returns a brand-new `GameState`. Side effects are limited to
//! the injected RNG.

use rand::Rng;
use slotmap::SlotMap;

use crate::collision;
use crate::consts::*;
use crate::entities::{
    Enemy, EnemyId, Entity, GameEvent, GamePhase, InputState, Particle, ParticleId, Player,
    PowerUp, PowerUpId, Projectile, ProjectileId, Rect, Removal, TickContext,
};
use crate::spawn::SpawnDirector;

/// The entire game session. Cloneable so `tick` can return a new copy
/// without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    pub power_ups: SlotMap<PowerUpId, PowerUp>,
    /// Cosmetic only.
    pub particles: SlotMap<ParticleId, Particle>,
    pub score: u32,
    /// Difficulty tier and wave counter in one: +1 per wave.
    pub level: u32,
    pub spawner: SpawnDirector,
    /// Best score seen; only ever raised.
    pub high_score: u32,
    pub phase: GamePhase,
    /// Simulation clock in ms. Advances only while playing.
    pub clock_ms: u64,
    /// Clock time of the last rapid-fire pickup.
    pub flash_started_ms: Option<u64>,
    /// Set once a quit was requested; the caller should stop ticking.
    pub exit_requested: bool,
    /// What happened during the last tick.
    pub events: Vec<GameEvent>,
    pub field: Rect,
}

impl GameState {
    pub fn ctx(&self) -> TickContext {
        TickContext { field: self.field }
    }

    /// Milliseconds left on the rapid-fire flash, if it is showing.
    pub fn flash_remaining_ms(&self) -> Option<u64> {
        let started = self.flash_started_ms?;
        let elapsed = self.clock_ms.saturating_sub(started);
        (elapsed < FLASH_DURATION_MS).then(|| FLASH_DURATION_MS - elapsed)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    /// Enter game over and commit the high score. Does nothing when already
    /// over, so the commit happens once per session. The commit event is only
    /// raised for a new best.
    pub(crate) fn end_session(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.set_phase(GamePhase::GameOver);
        self.flash_started_ms = None;
        let new_best = self.score > self.high_score;
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "game over: score {} level {} (best {})",
            self.score,
            self.level,
            self.high_score
        );
        if new_best {
            self.events.push(GameEvent::HighScoreCommitted(self.high_score));
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Initial state shown at the menu, for a `width`×`height` field.
pub fn init_state(width: f32, height: f32, high_score: u32) -> GameState {
    let field = Rect::new(0.0, 0.0, width, height);
    GameState {
        player: Player::new(&field),
        enemies: SlotMap::with_key(),
        projectiles: SlotMap::with_key(),
        power_ups: SlotMap::with_key(),
        particles: SlotMap::with_key(),
        score: 0,
        level: 1,
        spawner: SpawnDirector::default(),
        high_score,
        phase: GamePhase::Menu,
        clock_ms: 0,
        flash_started_ms: None,
        exit_requested: false,
        events: Vec::new(),
        field,
    }
}

/// Fresh session straight into play. Keeps the field and the high score.
pub fn reset(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::Playing,
        ..init_state(state.field.w, state.field.h, state.high_score)
    }
}

// ── Per-tick pipeline ────────────────────────────────────────────────────────

/// Advance the game by one tick of `dt_ms` simulation time.
///
/// Phase handling comes first; only a `Playing` tick runs the full pipeline:
/// player move, fire, spawn check, entity updates, collisions, phase check.
pub fn tick(
    state: &GameState,
    input: &InputState,
    dt_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    next.events.clear();

    if input.quit {
        log::debug!("quit requested in {:?}", next.phase);
        next.exit_requested = true;
        return next;
    }

    match next.phase {
        GamePhase::Menu => {
            if input.start {
                next.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::Paused => {
            if input.pause {
                next.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::GameOver => {
            if input.restart {
                let events = std::mem::take(&mut next.events);
                next = reset(&next);
                next.events = events;
                next.events.push(GameEvent::PhaseChanged(GamePhase::Playing));
            }
        }
        GamePhase::Playing => {
            if input.pause {
                next.set_phase(GamePhase::Paused);
            } else {
                run_playing_tick(&mut next, input, dt_ms, rng);
            }
        }
    }

    next
}

fn run_playing_tick(state: &mut GameState, input: &InputState, dt_ms: u64, rng: &mut impl Rng) {
    state.clock_ms += dt_ms;
    let now = state.clock_ms;
    let field = state.field;

    // ── 1. Player movement ───────────────────────────────────────────────────
    state.player.steer(input, &field);

    // ── 2. Fire ──────────────────────────────────────────────────────────────
    if input.fire && state.player.can_shoot(now) {
        for projectile in state.player.shoot(now) {
            state.projectiles.insert(projectile);
        }
    }

    // ── 3. Spawn check ───────────────────────────────────────────────────────
    let wave_level = state.level;
    if let Some(enemies) = state.spawner.poll(now, &mut state.level, rng, &field) {
        state.events.push(GameEvent::WaveSpawned {
            level: wave_level,
            count: enemies.len() as u32,
        });
        for enemy in enemies {
            state.enemies.insert(enemy);
        }
    }

    // ── 4. Entity updates ────────────────────────────────────────────────────
    let ctx = state.ctx();
    advance_all(&mut state.enemies, &ctx);
    advance_all(&mut state.projectiles, &ctx);
    advance_all(&mut state.power_ups, &ctx);
    advance_all(&mut state.particles, &ctx);

    // ── 5. Collisions (also performs the phase check) ────────────────────────
    collision::resolve(state, rng);
}

/// Advance every entity of one arena and drop those that asked to go.
pub fn advance_all<K: slotmap::Key, E: Entity>(arena: &mut SlotMap<K, E>, ctx: &TickContext) {
    arena.retain(|_, entity| entity.advance(ctx) == Removal::Keep);
}
