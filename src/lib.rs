//! Canvas Shooter - defend the center of the screen
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawner, per-frame step)
//! - `renderer`: Draw command recording and the WebGPU backend
//! - `settings`: Player preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Player defaults - stationary at the canvas center
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Projectile speed (pixels per frame)
    pub const PROJECTILE_SPEED: f32 = 5.0;

    /// Enemy radius range [min, max)
    pub const ENEMY_MIN_RADIUS: f32 = 4.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Enemy speed (pixels per frame)
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Radius lost per partial hit
    pub const ENEMY_SHRINK_STEP: f32 = 10.0;
    /// Enemies only shrink if the resulting radius stays above this
    pub const ENEMY_MIN_SHRUNK_RADIUS: f32 = 5.0;

    /// Wall-clock time between enemy spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1000.0;

    /// Particles emitted per projectile hit
    pub const PARTICLES_PER_HIT: usize = 8;
    /// Particle radius range [min, max)
    pub const PARTICLE_MIN_RADIUS: f32 = 1.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 3.0;
    /// Particle velocity spread per axis (velocity in [-spread/2, spread/2))
    pub const PARTICLE_SPREAD: f32 = 3.0;
    /// Alpha lost per particle update
    pub const PARTICLE_FADE_STEP: f32 = 0.01;

    /// Score for shrinking an enemy
    pub const SCORE_SHRINK: u64 = 100;
    /// Score for destroying an enemy
    pub const SCORE_KILL: u64 = 250;

    /// Opacity of the black overlay painted every frame (trail effect)
    pub const FADE_ALPHA: f32 = 0.1;

    /// Enemy shrink animation length in frames (0.5s at 60 Hz)
    pub const SHRINK_TWEEN_FRAMES: u32 = 30;

    /// Autopilot fires once every this many frames
    pub const AUTOPILOT_FIRE_INTERVAL: u64 = 10;
}

/// Angle of the vector pointing from `from` to `to`
///
/// Coincident points give 0 (IEEE `atan2(0, 0)`).
#[inline]
pub fn aim(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Vector of length `speed` pointing along `angle`
#[inline]
pub fn direction_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}
