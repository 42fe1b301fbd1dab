//! Entity types
//!
//! Every entity is a [`Circle`]; moving kinds add a per-frame velocity and
//! particles add a fading alpha. Behavior is shared through the [`Drawable`]
//! and [`Movable`] traits rather than a type hierarchy.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tween::RadiusTween;
use crate::consts::*;
use crate::renderer::{Renderer, scoped_alpha};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random color, each channel drawn from [0, 256)
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Position, size and color shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self { pos, radius, color }
    }
}

/// Something that can be drawn as a filled circle
pub trait Drawable {
    fn circle(&self) -> &Circle;

    fn draw(&self, renderer: &mut dyn Renderer) {
        let c = self.circle();
        renderer.fill_circle(c.pos, c.radius, c.color);
    }
}

/// A drawable that moves by a constant velocity every frame
///
/// `advance` draws first, then moves (the draw reflects the position the
/// entity had at the start of the frame).
pub trait Movable: Drawable {
    fn velocity(&self) -> Vec2;

    fn circle_mut(&mut self) -> &mut Circle;

    fn advance(&mut self, renderer: &mut dyn Renderer) {
        self.draw(renderer);
        let vel = self.velocity();
        self.circle_mut().pos += vel;
    }
}

/// The stationary player at the canvas center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Circle,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Circle::new(pos, PLAYER_RADIUS, Color::WHITE),
        }
    }
}

impl Drawable for Player {
    fn circle(&self) -> &Circle {
        &self.body
    }
}

/// A shot fired from the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Circle,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Circle::new(pos, PROJECTILE_RADIUS, Color::WHITE),
            vel,
        }
    }
}

impl Drawable for Projectile {
    fn circle(&self) -> &Circle {
        &self.body
    }
}

impl Movable for Projectile {
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn circle_mut(&mut self) -> &mut Circle {
        &mut self.body
    }
}

/// An enemy closing in on the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Circle,
    /// Fixed at spawn time, never retargets
    pub vel: Vec2,
    /// In-flight shrink animation
    #[serde(skip)]
    pub shrink: Option<RadiusTween>,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            body: Circle::new(pos, radius, color),
            vel,
            shrink: None,
        }
    }

    /// Radius the enemy is heading to (current radius when not shrinking)
    pub fn target_radius(&self) -> f32 {
        self.shrink.as_ref().map_or(self.body.radius, |t| t.to)
    }

    /// Shrink by one step, either animated or immediately
    pub fn shrink_by(&mut self, amount: f32, animate: bool) {
        let to = self.body.radius - amount;
        if animate {
            self.shrink = Some(RadiusTween::new(self.body.radius, to, SHRINK_TWEEN_FRAMES));
        } else {
            self.body.radius = to;
            self.shrink = None;
        }
    }

    /// Step the shrink animation by one frame
    pub fn step_tween(&mut self) {
        if let Some(tween) = self.shrink.as_mut() {
            self.body.radius = tween.step();
            if tween.is_finished() {
                self.shrink = None;
            }
        }
    }
}

impl Drawable for Enemy {
    fn circle(&self) -> &Circle {
        &self.body
    }
}

impl Movable for Enemy {
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn circle_mut(&mut self) -> &mut Circle {
        &mut self.body
    }
}

/// A fading spark emitted when a projectile hits an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub body: Circle,
    pub vel: Vec2,
    /// Opacity, starts at 1 and decays every advance
    pub alpha: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            body: Circle::new(pos, radius, color),
            vel,
            alpha: 1.0,
        }
    }

    /// Random spark at `pos` in the given color
    pub fn burst(pos: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            (rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
        );
        Self::new(pos, radius, color, vel)
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }
}

impl Drawable for Particle {
    fn circle(&self) -> &Circle {
        &self.body
    }

    fn draw(&self, renderer: &mut dyn Renderer) {
        let c = self.body;
        scoped_alpha(renderer, self.alpha, |r| r.fill_circle(c.pos, c.radius, c.color));
    }
}

impl Movable for Particle {
    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn circle_mut(&mut self) -> &mut Circle {
        &mut self.body
    }

    fn advance(&mut self, renderer: &mut dyn Renderer) {
        self.draw(renderer);
        self.body.pos += self.vel;
        self.alpha -= PARTICLE_FADE_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandList, DrawCommand};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_advance_draws_then_moves() {
        let mut list = CommandList::new();
        let mut p = Projectile::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 0.0));
        p.advance(&mut list);

        assert_eq!(p.body.pos, Vec2::new(15.0, 10.0));
        match list.commands()[0] {
            DrawCommand::Circle { center, .. } => assert_eq!(center, Vec2::new(10.0, 10.0)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_particle_fades_and_draws_with_alpha() {
        let mut list = CommandList::new();
        let mut p = Particle::new(Vec2::ZERO, 2.0, Color::rgb(255, 0, 0), Vec2::ONE);
        p.advance(&mut list);
        p.advance(&mut list);

        assert!((p.alpha - 0.98).abs() < 1e-6);
        let alphas: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), 2);
        assert_eq!(alphas[0], 1.0);
        assert!((alphas[1] - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_particle_burst_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::burst(Vec2::ZERO, Color::WHITE, &mut rng);
            assert!(p.body.radius >= PARTICLE_MIN_RADIUS && p.body.radius < PARTICLE_MAX_RADIUS);
            assert!(p.vel.x >= -1.5 && p.vel.x < 1.5);
            assert!(p.vel.y >= -1.5 && p.vel.y < 1.5);
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn test_enemy_shrink_immediate() {
        let mut e = Enemy::new(Vec2::ZERO, 25.0, Color::WHITE, Vec2::ZERO);
        e.shrink_by(10.0, false);
        assert_eq!(e.body.radius, 15.0);
        assert!(e.shrink.is_none());
    }

    #[test]
    fn test_enemy_shrink_animated_reaches_target() {
        let mut e = Enemy::new(Vec2::ZERO, 25.0, Color::WHITE, Vec2::ZERO);
        e.shrink_by(10.0, true);
        assert_eq!(e.body.radius, 25.0);
        assert_eq!(e.target_radius(), 15.0);

        for _ in 0..SHRINK_TWEEN_FRAMES {
            e.step_tween();
        }
        assert_eq!(e.body.radius, 15.0);
        assert!(e.shrink.is_none());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }
}
