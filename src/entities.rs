//! Game entity types and their per-tick update rules.
//!
//! Every entity owns its own bounding box. Entities live in one homogeneous
//! arena per kind (see `compute::GameState`) and are addressed by the typed
//! handles declared here.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use slotmap::new_key_type;

use crate::consts::*;

new_key_type! {
    pub struct EnemyId;
    pub struct ProjectileId;
    pub struct PowerUpId;
    pub struct ParticleId;
}

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, stored by its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x: cx - w / 2.0,
            y: cy - h / 2.0,
            w,
            h,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Update contract ──────────────────────────────────────────────────────────

/// What an entity wants done with it after advancing one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    Keep,
    Remove,
}

/// Read-only data every entity may need while advancing.
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
    pub field: Rect,
}

/// Shared capability set of everything that lives in an arena.
pub trait Entity {
    fn bounds(&self) -> Rect;

    /// Move one tick and report whether the owning collection should drop it.
    fn advance(&mut self, ctx: &TickContext) -> Removal;
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Pixels per tick; negative travels up the screen.
    pub vy: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, vy: f32) -> Self {
        Self { x, y, vy }
    }
}

impl Entity for Projectile {
    fn bounds(&self) -> Rect {
        let d = PROJECTILE_RADIUS * 2.0;
        Rect::from_center(self.x, self.y, d, d)
    }

    fn advance(&mut self, ctx: &TickContext) -> Removal {
        self.y += self.vy;
        let b = self.bounds();
        if b.bottom() < ctx.field.top() || b.top() > ctx.field.bottom() {
            Removal::Remove
        } else {
            Removal::Keep
        }
    }
}

// ── Enemies ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// Edge length of the square hull.
    pub size: f32,
    pub hp: u32,
    pub score: u32,
    /// Fall speed in pixels per tick.
    pub speed: f32,
    /// Ticks lived; drives the lateral sway.
    pub sway_ticks: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, size: f32, speed: f32, hp: u32, score: u32) -> Self {
        Self {
            x,
            y,
            size,
            hp: hp.max(1),
            score,
            speed,
            sway_ticks: 0,
        }
    }

    /// Roll size and entry point above the field, the way a wave does.
    pub fn random(
        rng: &mut impl Rng,
        field: &Rect,
        speed: f32,
        hp: u32,
        score: u32,
    ) -> Self {
        let size = rng.gen_range(ENEMY_MIN_SIZE..=ENEMY_MAX_SIZE) as f32;
        // Fields narrower than 40 px pin every enemy to x = 20.
        let x = rng.gen_range(20..=(field.w as i32 - 20).max(20)) as f32;
        let y = -(rng.gen_range(40..=120) as f32);
        Self::new(field.left() + x, field.top() + y, size, speed, hp, score)
    }

    /// Apply one projectile hit. Returns `true` once the enemy is dead.
    pub fn hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }
}

impl Entity for Enemy {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.size, self.size)
    }

    fn advance(&mut self, ctx: &TickContext) -> Removal {
        self.sway_ticks += 1;
        let sway = (self.sway_ticks as f32 * ENEMY_SWAY_RATE).sin() * ENEMY_SWAY_AMPLITUDE;
        self.y += self.speed;
        self.x += sway;
        if self.bounds().top() > ctx.field.bottom() + ENEMY_EXIT_MARGIN {
            Removal::Remove
        } else {
            Removal::Keep
        }
    }
}

// ── Power-ups ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// +1 health, capped at the maximum.
    Heal,
    /// +2 shield charges, capped at the maximum.
    Shield,
    /// Shorter shoot cooldown (compounding, floored) plus a screen flash.
    Rapid,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Heal, PowerUpKind::Shield, PowerUpKind::Rapid];
}

impl Distribution<PowerUpKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PowerUpKind {
        PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self { x, y, kind }
    }
}

impl Entity for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }

    fn advance(&mut self, ctx: &TickContext) -> Removal {
        self.y += POWER_UP_FALL_SPEED;
        if self.bounds().top() > ctx.field.bottom() {
            Removal::Remove
        } else {
            Removal::Keep
        }
    }
}

// ── Particles ────────────────────────────────────────────────────────────────

/// 24-bit color, used only by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Cosmetic debris. Has no gameplay effect.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Ticks left to live.
    pub life: u32,
    pub color: Rgb,
}

impl Entity for Particle {
    fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, PARTICLE_SIZE, PARTICLE_SIZE)
    }

    fn advance(&mut self, _ctx: &TickContext) -> Removal {
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            Removal::Remove
        } else {
            Removal::Keep
        }
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Ship center.
    pub x: f32,
    pub y: f32,
    pub health: u8,
    pub shield: u8,
    /// Current shoot cooldown in ms. Only ever shrinks (rapid fire).
    pub cooldown_ms: u64,
    /// Clock time of the last shot; `None` until the first one.
    pub last_shot_ms: Option<u64>,
}

impl Player {
    /// Fresh ship near the bottom center of `field`.
    pub fn new(field: &Rect) -> Self {
        let (cx, _) = field.center();
        Self {
            x: cx,
            y: field.bottom() - PLAYER_SPAWN_OFFSET,
            health: PLAYER_START_HEALTH,
            shield: 0,
            cooldown_ms: SHOOT_COOLDOWN_MS,
            last_shot_ms: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Move by the decoded directions, then clamp fully inside `field`.
    pub fn steer(&mut self, input: &InputState, field: &Rect) {
        let dx = axis(input.left, input.right);
        let dy = axis(input.up, input.down);
        self.x += dx * PLAYER_SPEED_X;
        self.y += dy * PLAYER_SPEED_Y;

        let half_w = PLAYER_WIDTH / 2.0;
        let half_h = PLAYER_HEIGHT / 2.0;
        self.x = self.x.clamp(field.left() + half_w, field.right() - half_w);
        self.y = self.y.clamp(field.top() + half_h, field.bottom() - half_h);
    }

    pub fn can_shoot(&self, now_ms: u64) -> bool {
        match self.last_shot_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.cooldown_ms,
        }
    }

    /// Fire both barrels from the nose of the ship.
    pub fn shoot(&mut self, now_ms: u64) -> [Projectile; 2] {
        self.last_shot_ms = Some(now_ms);
        let nose = self.bounds().top();
        [
            Projectile::new(self.x - BARREL_OFFSET, nose, -PROJECTILE_SPEED),
            Projectile::new(self.x + BARREL_OFFSET, nose, -PROJECTILE_SPEED),
        ]
    }

    /// Absorb one ramming enemy: shield first, then hull.
    pub fn take_hit(&mut self) {
        if self.shield > 0 {
            self.shield -= 1;
        } else {
            self.health = self.health.saturating_sub(1);
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Apply a collected power-up. Returns `true` when it should start the
    /// rapid-fire flash.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::Heal => {
                self.health = (self.health + 1).min(PLAYER_MAX_HEALTH);
                false
            }
            PowerUpKind::Shield => {
                self.shield = (self.shield + 2).min(PLAYER_MAX_SHIELD);
                false
            }
            PowerUpKind::Rapid => {
                let reduced = self.cooldown_ms * RAPID_COOLDOWN_NUM / RAPID_COOLDOWN_DEN;
                self.cooldown_ms = reduced.max(MIN_SHOOT_COOLDOWN_MS);
                true
            }
        }
    }
}

/// -1, 0 or +1 from a pair of opposing keys.
fn axis(negative: bool, positive: bool) -> f32 {
    positive as i8 as f32 - negative as i8 as f32
}

// ── Input, phases and events ─────────────────────────────────────────────────

/// Decoded key snapshot for one tick.
///
/// Directions and `fire` are held states. `pause`, `restart`, `quit` and
/// `start` are edges: true only on the tick the key went down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
    pub start: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Things that happened during the last tick, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    WaveSpawned { level: u32, count: u32 },
    EnemyDestroyed { score: u32 },
    PlayerHit { health: u8, shield: u8 },
    PowerUpCollected(PowerUpKind),
    PhaseChanged(GamePhase),
    /// A game over set a new best; persist this value.
    HighScoreCommitted(u32),
}
