//! End-to-end gameplay scenarios through the public API

use canvas_shooter::consts::*;
use canvas_shooter::renderer::{CommandList, DrawCommand};
use canvas_shooter::sim::{
    Circle, Color, Enemy, GameEvent, GamePhase, GameState, Particle, Projectile, Spawner,
    auto_fire, circles_touch, edge_gap, enemy_toward, frame,
};
use glam::Vec2;

fn running_state() -> GameState {
    let mut state = GameState::new(800.0, 600.0, 7);
    state.reset();
    state.drain_events();
    state
}

#[test]
fn left_edge_spawn_heads_for_player() {
    let state = running_state();
    assert_eq!(state.player.body.pos, Vec2::new(400.0, 300.0));
    assert_eq!(state.player.body.radius, 10.0);

    let enemy = enemy_toward(Vec2::new(-20.0, 300.0), 20.0, Color::WHITE, state.player.body.pos);
    assert!((enemy.vel.x - 1.0).abs() < 1e-5);
    assert!(enemy.vel.y.abs() < 1e-5);
}

#[test]
fn overlapping_projectile_and_enemy_collide() {
    let projectile = Circle::new(Vec2::new(100.0, 100.0), 5.0, Color::WHITE);
    let enemy = Circle::new(Vec2::new(103.0, 100.0), 3.0, Color::WHITE);
    assert_eq!(edge_gap(&projectile, &enemy), -5.0);
    assert!(circles_touch(&projectile, &enemy));
}

#[test]
fn radius_fourteen_is_killed_not_shrunk() {
    let mut state = running_state();
    state.enemies.push(Enemy::new(
        Vec2::new(100.0, 100.0),
        14.0,
        Color::rgb(255, 0, 0),
        Vec2::ZERO,
    ));
    state
        .projectiles
        .push(Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO));

    let mut commands = CommandList::new();
    let report = frame(&mut state, &mut commands);

    assert_eq!(report.kills, 1);
    assert_eq!(report.shrinks, 0);
    assert_eq!(state.score, SCORE_KILL);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert_eq!(state.particles.len(), PARTICLES_PER_HIT);
    assert!(state.particles.iter().all(|p| p.alpha == 1.0));
    assert_eq!(state.drain_events(), vec![GameEvent::ScoreChanged(250)]);
}

#[test]
fn large_enemy_shrinks_and_survives() {
    let mut state = running_state();
    state.animate_shrink = false;
    state.enemies.push(Enemy::new(
        Vec2::new(100.0, 100.0),
        25.0,
        Color::rgb(0, 255, 0),
        Vec2::ZERO,
    ));
    state
        .projectiles
        .push(Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO));

    let report = frame(&mut state, &mut CommandList::new());

    assert_eq!(report.shrinks, 1);
    assert_eq!(state.score, SCORE_SHRINK);
    assert_eq!(state.enemies.len(), 1);
    assert_eq!(state.enemies[0].body.radius, 15.0);
}

#[test]
fn particles_fade_out_and_leave() {
    let mut state = running_state();
    state
        .particles
        .push(Particle::new(Vec2::new(50.0, 50.0), 2.0, Color::WHITE, Vec2::ZERO));

    let mut commands = CommandList::new();
    for _ in 0..110 {
        commands.clear();
        frame(&mut state, &mut commands);
        let negative = commands.commands().iter().any(|c| match c {
            DrawCommand::Circle { alpha, .. } => *alpha < 0.0,
            DrawCommand::Fade { .. } => false,
        });
        assert!(!negative);
    }
    assert!(state.particles.is_empty());
}

#[test]
fn enemy_reaching_player_ends_the_run() {
    let mut state = running_state();
    let pos = Vec2::new(380.0, 300.0);
    state
        .enemies
        .push(enemy_toward(pos, 5.0, Color::WHITE, state.player.body.pos));

    let mut commands = CommandList::new();
    let mut frames = 0;
    while state.is_running() && frames < 100 {
        frame(&mut state, &mut commands);
        frames += 1;
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 0 }]);

    // Frames after game over do nothing
    commands.clear();
    let report = frame(&mut state, &mut commands);
    assert!(commands.commands().is_empty());
    assert!(!report.game_over);
}

#[test]
fn restart_resets_world_and_cadence() {
    let mut state = running_state();
    let mut spawner = Spawner::default();
    spawner.start(0.0);
    for _ in 0..spawner.poll(1000.0) {
        state.spawn_enemy();
    }
    state.fire_at(Vec2::new(0.0, 0.0));
    state.add_score(100);
    assert_eq!(state.enemies.len(), 1);

    state.reset();
    spawner.start(1500.0);

    assert_eq!(state.score, 0);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert!(state.particles.is_empty());
    assert_eq!(state.player.body.pos, Vec2::new(400.0, 300.0));
    // Only one cadence: nothing due before 2500 ms, exactly one at 2500 ms
    assert_eq!(spawner.poll(2000.0), 0);
    assert_eq!(spawner.poll(2500.0), 1);
}

#[test]
fn same_seed_autopilot_runs_match() {
    let run = |seed: u64| {
        let mut state = GameState::new(800.0, 600.0, seed);
        state.reset();
        let mut spawner = Spawner::default();
        spawner.start(0.0);
        let mut commands = CommandList::new();
        for n in 0..600u64 {
            for _ in 0..spawner.poll(n as f64 * 1000.0 / 60.0) {
                state.spawn_enemy();
            }
            auto_fire(&mut state);
            commands.clear();
            frame(&mut state, &mut commands);
        }
        (state.score, state.frame, state.enemies.len(), state.phase)
    };

    assert_eq!(run(42), run(42));
}
