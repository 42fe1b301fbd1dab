//! Game state and lifecycle
//!
//! One [`GameState`] owns every live entity, the score and the RNG. The
//! frame loop, the spawner and input handlers all work on it by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Particle, Player, Projectile};
use super::spawner;
use crate::consts::*;
use crate::{aim, direction_from_angle};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Frame loop running
    Running,
    /// Player was hit; terminal until restart
    GameOver,
}

/// Things the outside world (score display, modal) should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Running score changed (also sent with 0 on reset)
    ScoreChanged(u64),
    /// The run ended with this final score
    GameOver { score: u64 },
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub score: u64,
    pub phase: GamePhase,
    /// Frames simulated since the last reset
    pub frame: u64,
    /// Animate enemy shrinking instead of applying it at once
    pub animate_shrink: bool,
    /// Opacity of the per-frame black overlay (1.0 clears, no trails)
    pub fade_alpha: f32,
    /// Events produced since the last `drain_events`
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a world for a canvas of the given size, seeded for reproducibility
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            score: 0,
            phase: GamePhase::Ready,
            frame: 0,
            animate_shrink: true,
            fade_alpha: FADE_ALPHA,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Canvas center, where the player lives
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Start a fresh run: new player at the center, empty world, zero score
    pub fn reset(&mut self) {
        self.player = Player::new(self.center());
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.frame = 0;
        self.phase = GamePhase::Running;
        self.events.clear();
        self.events.push(GameEvent::ScoreChanged(0));
        log::info!("Game reset ({}x{})", self.width, self.height);
    }

    /// Resize the canvas; the player follows the center
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.player.body.pos = self.center();
    }

    /// Fire a projectile from the player toward `target` (canvas coordinates).
    /// Ignored unless a run is in progress.
    pub fn fire_at(&mut self, target: Vec2) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let origin = self.player.body.pos;
        let vel = direction_from_angle(aim(origin, target), PROJECTILE_SPEED);
        self.projectiles.push(Projectile::new(origin, vel));
        true
    }

    /// Spawn one random enemy aimed at the player
    pub fn spawn_enemy(&mut self) {
        let target = self.player.body.pos;
        let enemy = spawner::spawn_enemy(&mut self.rng, self.width, self.height, target);
        log::debug!(
            "Enemy spawned at ({:.0}, {:.0}) r={:.1} {}",
            enemy.body.pos.x,
            enemy.body.pos.y,
            enemy.body.radius,
            enemy.body.color
        );
        self.enemies.push(enemy);
    }

    /// Add to the score and report it
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Enter the terminal phase (reported once per run)
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over with score {}", self.score);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
