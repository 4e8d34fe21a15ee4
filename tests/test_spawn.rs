use std::collections::HashSet;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_blaster::consts::*;
use space_blaster::entities::*;
use space_blaster::spawn::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn field() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

// ── Wave composition ──────────────────────────────────────────────────────────

#[test]
fn level_one_wave() {
    let w = Wave::for_level(1);
    assert_eq!(w.count, 2); // clamp(2 + 0, 2, 8)
    assert_relative_eq!(w.speed, 2.15, epsilon = 1e-5);
    assert_eq!(w.hp, 1);
    assert_eq!(w.score, 12);
}

#[test]
fn wave_scales_with_level() {
    let w = Wave::for_level(4);
    assert_eq!(w.count, 4);
    assert_relative_eq!(w.speed, 2.6, epsilon = 1e-5);
    assert_eq!(w.hp, 2);
    assert_eq!(w.score, 18);
}

#[test]
fn wave_size_capped_at_eight() {
    assert_eq!(Wave::for_level(12).count, 8);
    assert_eq!(Wave::for_level(100).count, 8);
}

#[test]
fn wave_spawns_enemies_above_field_with_jitter() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let enemies = Wave::for_level(3).spawn(&mut rng, &field());
        assert_eq!(enemies.len(), 3);
        for e in &enemies {
            assert!(e.y >= -120.0 && e.y <= -40.0, "y = {}", e.y);
            assert!(e.x >= 20.0 - 60.0 && e.x <= 780.0 + 60.0, "x = {}", e.x);
            assert!(e.size >= 24.0 && e.size <= 40.0);
            assert_eq!(e.hp, 1);
            assert_eq!(e.score, 16);
            assert_eq!(e.sway_ticks, 0);
        }
    }
}

// ── Director timing ───────────────────────────────────────────────────────────

#[test]
fn director_waits_strictly_longer_than_delay() {
    let mut director = SpawnDirector::default();
    let mut level = 1;
    assert!(director.poll(900, &mut level, &mut seeded_rng(), &field()).is_none());
    assert_eq!(level, 1);
}

#[test]
fn director_triggers_level_one_wave() {
    let mut director = SpawnDirector::default();
    let mut level = 1;
    let enemies = director
        .poll(901, &mut level, &mut seeded_rng(), &field())
        .expect("wave due");
    assert_eq!(enemies.len(), 2);
    for e in &enemies {
        assert_relative_eq!(e.speed, 2.15, epsilon = 1e-5);
        assert_eq!(e.hp, 1);
        assert_eq!(e.score, 12);
    }
    assert_eq!(level, 2);
    assert_eq!(director.spawn_timer, 901);
    assert_eq!(director.spawn_delay, 864);
}

#[test]
fn director_measures_from_last_wave() {
    let mut director = SpawnDirector::default();
    let mut level = 1;
    let mut rng = seeded_rng();
    director.poll(1000, &mut level, &mut rng, &field());
    assert!(!director.is_due(1864));
    assert!(director.is_due(1865));
}

#[test]
fn delay_decays_to_floor() {
    assert_eq!(next_delay(900), 864);
    assert_eq!(next_delay(864), 829);
    assert_eq!(next_delay(410), 400);
    assert_eq!(next_delay(400), 400);
}

#[test]
fn successive_waves_are_monotonic() {
    let mut director = SpawnDirector::default();
    let mut level = 1;
    let mut rng = seeded_rng();
    let mut now = 0;
    let mut last_delay = director.spawn_delay;

    for wave in 1..=100 {
        now += director.spawn_delay + 1;
        assert!(director.poll(now, &mut level, &mut rng, &field()).is_some());
        assert_eq!(level, 1 + wave);
        assert!(director.spawn_delay <= last_delay);
        assert!(director.spawn_delay >= MIN_SPAWN_DELAY_MS);
        last_delay = director.spawn_delay;
    }
    assert_eq!(director.spawn_delay, MIN_SPAWN_DELAY_MS);
}

// ── Drops ─────────────────────────────────────────────────────────────────────

#[test]
fn drop_lands_at_kill_point() {
    let mut rng = seeded_rng();
    let drop = (0..100)
        .find_map(|_| roll_power_up(&mut rng, 123.0, 45.0))
        .expect("some drop in 100 rolls");
    assert_eq!((drop.x, drop.y), (123.0, 45.0));
}

#[test]
fn drop_rate_is_about_eighteen_percent() {
    let mut rng = seeded_rng();
    let trials = 20_000;
    let drops = (0..trials)
        .filter(|_| roll_power_up(&mut rng, 0.0, 0.0).is_some())
        .count();
    let rate = drops as f64 / trials as f64;
    assert!((rate - 0.18).abs() < 0.015, "rate = {}", rate);
}

#[test]
fn drops_cover_every_kind() {
    let mut rng = seeded_rng();
    let kinds: HashSet<PowerUpKind> = (0..2000)
        .filter_map(|_| roll_power_up(&mut rng, 0.0, 0.0))
        .map(|p| p.kind)
        .collect();
    assert_eq!(kinds.len(), 3);
}

// ── Bursts ────────────────────────────────────────────────────────────────────

#[test]
fn burst_particles_start_at_origin() {
    let particles = burst(&mut seeded_rng(), 50.0, 60.0, Rgb(9, 9, 9), 18);
    assert_eq!(particles.len(), 18);
    for p in &particles {
        assert_eq!((p.x, p.y), (50.0, 60.0));
        assert!((20..=40).contains(&p.life));
        let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
        assert!((0.99..=4.01).contains(&speed), "speed = {}", speed);
        assert_eq!(p.color, Rgb(9, 9, 9));
    }
}
