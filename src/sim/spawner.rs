//! Enemy spawning
//!
//! [`spawn_enemy`] builds one enemy just outside a random canvas edge, aimed
//! at the player. [`Spawner`] decides when to call it, on a wall-clock
//! cadence that does not depend on frame rate.

use glam::Vec2;
use rand::Rng;

use super::entity::{Color, Enemy};
use crate::consts::*;
use crate::{aim, direction_from_angle};

/// Most spawns a single poll may release (a stalled tab would otherwise
/// flood the arena when it resumes)
pub const MAX_CATCH_UP_SPAWNS: u32 = 3;

/// Shortest cadence a spawner accepts
pub const MIN_SPAWN_INTERVAL_MS: f64 = 1.0;

/// Canvas edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Map a uniform draw in [0, 1) onto four equally likely edges
    pub fn from_unit(u: f32) -> Self {
        if u < 0.25 {
            Edge::Left
        } else if u < 0.5 {
            Edge::Right
        } else if u < 0.75 {
            Edge::Top
        } else {
            Edge::Bottom
        }
    }

    /// Point just outside this edge, `along` in [0, 1) picks the spot
    pub fn spawn_point(self, along: f32, radius: f32, width: f32, height: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-radius, along * height),
            Edge::Right => Vec2::new(width + radius, along * height),
            Edge::Top => Vec2::new(along * width, -radius),
            Edge::Bottom => Vec2::new(along * width, height + radius),
        }
    }
}

/// Enemy at `pos` heading straight for `target` at enemy speed
pub fn enemy_toward(pos: Vec2, radius: f32, color: Color, target: Vec2) -> Enemy {
    let vel = direction_from_angle(aim(pos, target), ENEMY_SPEED);
    Enemy::new(pos, radius, color, vel)
}

/// Roll a random enemy entering from a random edge, aimed at `target`
pub fn spawn_enemy(rng: &mut impl Rng, width: f32, height: f32, target: Vec2) -> Enemy {
    let radius = rng.random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);
    let color = Color::random(rng);
    let edge = Edge::from_unit(rng.random());
    let pos = edge.spawn_point(rng.random(), radius, width, height);
    enemy_toward(pos, radius, color, target)
}

/// Cancellable fixed-cadence clock for enemy spawns
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SPAWN_INTERVAL_MS)
    }
}

impl Spawner {
    /// Intervals below `MIN_SPAWN_INTERVAL_MS` (or NaN) are raised to it
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(MIN_SPAWN_INTERVAL_MS),
            next_due_ms: None,
        }
    }

    /// Start the cadence at `now_ms`, replacing any running one.
    /// The first spawn is due one interval later.
    pub fn start(&mut self, now_ms: f64) {
        if self.is_running() {
            log::debug!("Spawner restarted, previous cadence cancelled");
        }
        self.next_due_ms = Some(now_ms + self.interval_ms);
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Number of spawns due at `now_ms`; consumes them
    pub fn poll(&mut self, now_ms: f64) -> u32 {
        let Some(mut due) = self.next_due_ms else {
            return 0;
        };

        if now_ms.is_nan() || now_ms < due {
            return 0;
        }
        let elapsed = ((now_ms - due) / self.interval_ms).floor();
        due += (elapsed + 1.0) * self.interval_ms;
        let mut count = (elapsed as u64).saturating_add(1).min(u32::MAX as u64) as u32;

        if count > MAX_CATCH_UP_SPAWNS {
            log::debug!("Dropping {} overdue spawns", count - MAX_CATCH_UP_SPAWNS);
            count = MAX_CATCH_UP_SPAWNS;
        }

        self.next_due_ms = Some(due);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_left_edge_enemy_heads_right() {
        let enemy = enemy_toward(
            Vec2::new(-20.0, 300.0),
            20.0,
            Color::WHITE,
            Vec2::new(400.0, 300.0),
        );
        assert!((enemy.vel.x - 1.0).abs() < 1e-6);
        assert!(enemy.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_coincident_target_is_angle_zero() {
        let p = Vec2::new(50.0, 50.0);
        let enemy = enemy_toward(p, 10.0, Color::WHITE, p);
        assert_eq!(enemy.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_edge_partition() {
        assert_eq!(Edge::from_unit(0.0), Edge::Left);
        assert_eq!(Edge::from_unit(0.25), Edge::Right);
        assert_eq!(Edge::from_unit(0.5), Edge::Top);
        assert_eq!(Edge::from_unit(0.75), Edge::Bottom);
        assert_eq!(Edge::from_unit(0.999), Edge::Bottom);
    }

    #[test]
    fn test_spawned_enemies_start_outside_and_aim_at_target() {
        let mut rng = Pcg32::seed_from_u64(42);
        let target = Vec2::new(400.0, 300.0);
        for _ in 0..1000 {
            let e = spawn_enemy(&mut rng, 800.0, 600.0, target);
            let r = e.body.radius;
            assert!((ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS).contains(&r));

            let p = e.body.pos;
            let outside = p.x <= -r + 1e-3
                || p.x >= 800.0 + r - 1e-3
                || p.y <= -r + 1e-3
                || p.y >= 600.0 + r - 1e-3;
            assert!(outside, "spawned inside canvas at {:?}", p);

            assert!((e.vel.length() - ENEMY_SPEED).abs() < 1e-4);
            let to_target = (target - p).normalize();
            assert!(e.vel.dot(to_target) > 0.999);
        }
    }

    #[test]
    fn test_spawner_cadence() {
        let mut s = Spawner::default();
        assert_eq!(s.poll(5000.0), 0, "idle spawner never fires");

        s.start(0.0);
        assert_eq!(s.poll(999.0), 0);
        assert_eq!(s.poll(1000.0), 1);
        assert_eq!(s.poll(1500.0), 0);
        assert_eq!(s.poll(3000.0), 2);
    }

    #[test]
    fn test_spawner_restart_does_not_stack() {
        let mut s = Spawner::default();
        s.start(0.0);
        s.start(500.0);
        // Only the latest cadence is live
        assert_eq!(s.poll(1000.0), 0);
        assert_eq!(s.poll(1500.0), 1);
    }

    #[test]
    fn test_spawner_cancel_and_catch_up_cap() {
        let mut s = Spawner::default();
        s.start(0.0);
        s.cancel();
        assert!(!s.is_running());
        assert_eq!(s.poll(10_000.0), 0);

        s.start(0.0);
        assert_eq!(s.poll(60_000.0), MAX_CATCH_UP_SPAWNS);
        assert_eq!(s.poll(60_500.0), 0);
        assert_eq!(s.poll(61_000.0), 1);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut s = Spawner::new(0.0);
        s.start(0.0);
        assert_eq!(s.poll(0.0), 0);
        assert_eq!(s.poll(1.0), 1);
        assert_eq!(s.poll(1.0e12), MAX_CATCH_UP_SPAWNS);

        let mut negative = Spawner::new(-50.0);
        negative.start(0.0);
        assert_eq!(negative.poll(0.5), 0);
        assert_eq!(negative.poll(2.0), 2);
    }
}
