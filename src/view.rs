//! Render snapshot.
//!
//! A front-end draws exactly what `FrameView::capture` hands it; the core
//! does no drawing itself.

use crate::compute::GameState;
use crate::entities::{Entity, GamePhase, PowerUpKind, Rect, Rgb};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_PLAYER: Rgb = Rgb(120, 200, 255);
pub const C_ENEMY: Rgb = Rgb(200, 80, 200);
pub const C_PROJECTILE: Rgb = Rgb(255, 240, 200);
pub const C_HEAL: Rgb = Rgb(80, 220, 120);
pub const C_SHIELD: Rgb = Rgb(80, 180, 255);
pub const C_RAPID: Rgb = Rgb(255, 200, 80);

pub fn power_up_color(kind: PowerUpKind) -> Rgb {
    match kind {
        PowerUpKind::Heal => C_HEAL,
        PowerUpKind::Shield => C_SHIELD,
        PowerUpKind::Rapid => C_RAPID,
    }
}

/// How a sprite should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Upward-pointing triangle.
    Ship,
    /// Enemy hull.
    Diamond,
    /// Projectiles and power-ups.
    Circle(SpriteKind),
    /// Particles.
    Dot,
}

/// What a round sprite stands for, so a text front-end can pick a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Projectile,
    PowerUp(PowerUpKind),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub shape: Shape,
    pub rect: Rect,
    pub color: Rgb,
}

/// Values for the heads-up display.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub health: u8,
    pub shield: u8,
    pub high_score: u32,
    pub phase: GamePhase,
    /// Remaining ms of the rapid-fire flash.
    pub flash_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    /// Back to front: particles first, the ship last.
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    pub field: Rect,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let mut sprites = Vec::with_capacity(
            1 + state.enemies.len()
                + state.projectiles.len()
                + state.power_ups.len()
                + state.particles.len(),
        );

        sprites.extend(state.particles.values().map(|p| Sprite {
            shape: Shape::Dot,
            rect: p.bounds(),
            color: p.color,
        }));
        sprites.extend(state.power_ups.values().map(|p| Sprite {
            shape: Shape::Circle(SpriteKind::PowerUp(p.kind)),
            rect: p.bounds(),
            color: power_up_color(p.kind),
        }));
        sprites.extend(state.enemies.values().map(|e| Sprite {
            shape: Shape::Diamond,
            rect: e.bounds(),
            color: C_ENEMY,
        }));
        sprites.extend(state.projectiles.values().map(|p| Sprite {
            shape: Shape::Circle(SpriteKind::Projectile),
            rect: p.bounds(),
            color: C_PROJECTILE,
        }));
        sprites.push(Sprite {
            shape: Shape::Ship,
            rect: state.player.bounds(),
            color: C_PLAYER,
        });

        Self {
            sprites,
            hud: Hud {
                score: state.score,
                level: state.level,
                health: state.player.health,
                shield: state.player.shield,
                high_score: state.high_score,
                phase: state.phase,
                flash_ms: state.flash_remaining_ms(),
            },
            field: state.field,
        }
    }
}
