//! Space Blaster - a vertical arcade shooter simulation.
//!
//! Core modules:
//! - `entities`: entity data and per-tick update rules
//! - `spawn`: wave timing, difficulty scaling and drop rolls
//! - `collision`: the per-tick collision rules
//! - `compute`: the game-state machine and tick pipeline
//! - `view`: render snapshot handed to a front-end
//! - `highscore`: max-only high score and its persistence boundary

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod highscore;
pub mod spawn;
pub mod view;

pub use compute::{init_state, reset, tick, GameState};
pub use config::GameConfig;
pub use entities::{GamePhase, InputState};

/// Gameplay tuning constants.
pub mod consts {
    /// Play-field size in pixels.
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Target simulation rate.
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 46.0;
    /// Distance from the bottom edge to the ship's spawn center.
    pub const PLAYER_SPAWN_OFFSET: f32 = 70.0;
    pub const PLAYER_SPEED_X: f32 = 6.0;
    pub const PLAYER_SPEED_Y: f32 = 4.0;
    pub const PLAYER_START_HEALTH: u8 = 3;
    pub const PLAYER_MAX_HEALTH: u8 = 5;
    pub const PLAYER_MAX_SHIELD: u8 = 6;
    pub const SHOOT_COOLDOWN_MS: u64 = 240;
    pub const MIN_SHOOT_COOLDOWN_MS: u64 = 90;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 11.0;
    /// Horizontal offset of each barrel from the ship's center line.
    pub const BARREL_OFFSET: f32 = 8.0;

    /// Enemies
    pub const ENEMY_MIN_SIZE: u32 = 24;
    pub const ENEMY_MAX_SIZE: u32 = 40;
    pub const ENEMY_SWAY_RATE: f32 = 0.05;
    pub const ENEMY_SWAY_AMPLITUDE: f32 = 2.0;
    /// Enemies are culled once their top edge is this far below the field.
    pub const ENEMY_EXIT_MARGIN: f32 = 40.0;
    pub const ENEMY_SPAWN_JITTER: i32 = 60;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 22.0;
    pub const POWER_UP_FALL_SPEED: f32 = 2.5;
    pub const POWER_UP_DROP_CHANCE: f64 = 0.18;
    /// Rapid fire scales the cooldown by 3/5 (0.6), floored.
    pub const RAPID_COOLDOWN_NUM: u64 = 3;
    pub const RAPID_COOLDOWN_DEN: u64 = 5;
    pub const FLASH_DURATION_MS: u64 = 300;

    /// Waves
    pub const INITIAL_SPAWN_DELAY_MS: u64 = 900;
    pub const MIN_SPAWN_DELAY_MS: u64 = 400;
    /// Each wave scales the delay by 24/25 (0.96), floored.
    pub const SPAWN_DELAY_DECAY_NUM: u64 = 24;
    pub const SPAWN_DELAY_DECAY_DEN: u64 = 25;
    pub const MIN_WAVE_SIZE: u32 = 2;
    pub const MAX_WAVE_SIZE: u32 = 8;

    /// Particle bursts
    pub const PARTICLE_SIZE: f32 = 3.0;
    pub const IMPACT_BURST: usize = 6;
    pub const KILL_BURST: usize = 18;
    pub const PLAYER_HIT_BURST: usize = 14;
}
