use space_blaster::compute::{init_state, GameState};
use space_blaster::entities::*;
use space_blaster::view::*;

fn make_state() -> GameState {
    let mut s = init_state(800.0, 600.0, 250);
    s.phase = GamePhase::Playing;
    s
}

#[test]
fn empty_field_shows_only_the_ship() {
    let view = FrameView::capture(&make_state());
    assert_eq!(view.sprites.len(), 1);
    let ship = view.sprites[0];
    assert_eq!(ship.shape, Shape::Ship);
    assert_eq!(ship.color, C_PLAYER);
    assert_eq!(ship.rect, Rect::new(380.0, 507.0, 40.0, 46.0));
    assert_eq!(view.field, Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn sprites_are_layered_back_to_front() {
    let mut s = make_state();
    s.enemies.insert(Enemy::new(100.0, 100.0, 30.0, 2.0, 1, 12));
    s.projectiles.insert(Projectile::new(200.0, 200.0, -11.0));
    s.power_ups.insert(PowerUp::new(300.0, 300.0, PowerUpKind::Shield));
    s.particles.insert(Particle {
        x: 50.0,
        y: 50.0,
        vx: 0.0,
        vy: 0.0,
        life: 10,
        color: Rgb(1, 2, 3),
    });

    let shapes: Vec<Shape> = FrameView::capture(&s).sprites.iter().map(|sp| sp.shape).collect();
    assert_eq!(
        shapes,
        vec![
            Shape::Dot,
            Shape::Circle(SpriteKind::PowerUp(PowerUpKind::Shield)),
            Shape::Diamond,
            Shape::Circle(SpriteKind::Projectile),
            Shape::Ship,
        ]
    );
}

#[test]
fn sprite_rects_and_colours_follow_entities() {
    let mut s = make_state();
    s.enemies.insert(Enemy::new(100.0, 100.0, 30.0, 2.0, 1, 12));
    s.power_ups.insert(PowerUp::new(300.0, 300.0, PowerUpKind::Rapid));

    let view = FrameView::capture(&s);
    let power_up = view.sprites[0];
    assert_eq!(power_up.rect, Rect::new(289.0, 289.0, 22.0, 22.0));
    assert_eq!(power_up.color, C_RAPID);
    let enemy = view.sprites[1];
    assert_eq!(enemy.rect, Rect::new(85.0, 85.0, 30.0, 30.0));
    assert_eq!(enemy.color, C_ENEMY);
}

#[test]
fn power_up_palette() {
    assert_eq!(power_up_color(PowerUpKind::Heal), C_HEAL);
    assert_eq!(power_up_color(PowerUpKind::Shield), C_SHIELD);
    assert_eq!(power_up_color(PowerUpKind::Rapid), C_RAPID);
}

#[test]
fn hud_mirrors_state() {
    let mut s = make_state();
    s.score = 42;
    s.level = 5;
    s.player.health = 2;
    s.player.shield = 3;

    let hud = FrameView::capture(&s).hud;
    assert_eq!(
        hud,
        Hud {
            score: 42,
            level: 5,
            health: 2,
            shield: 3,
            high_score: 250,
            phase: GamePhase::Playing,
            flash_ms: None,
        }
    );
}

#[test]
fn hud_counts_down_flash() {
    let mut s = make_state();
    s.flash_started_ms = Some(1000);
    s.clock_ms = 1100;
    assert_eq!(FrameView::capture(&s).hud.flash_ms, Some(200));
    s.clock_ms = 1300;
    assert_eq!(FrameView::capture(&s).hud.flash_ms, None);
}

#[test]
fn capture_reports_phase() {
    let s = init_state(800.0, 600.0, 0);
    assert_eq!(FrameView::capture(&s).hud.phase, GamePhase::Menu);
}
