//! Attract/demo mode - the game plays itself
//!
//! Fires at the enemy closest to the player at a fixed rate. Depends only on
//! the state, so seeded runs stay reproducible.

use glam::Vec2;

use super::state::GameState;
use crate::consts::AUTOPILOT_FIRE_INTERVAL;

/// Center of the enemy nearest to the player, if any
pub fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let player = state.player.body.pos;
    state
        .enemies
        .iter()
        .min_by(|a, b| {
            a.body
                .pos
                .distance_squared(player)
                .partial_cmp(&b.body.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.body.pos)
}

/// Fire at the nearest enemy when the fire interval comes around.
/// Returns whether a shot was taken.
pub fn auto_fire(state: &mut GameState) -> bool {
    if !state.is_running() || state.frame % AUTOPILOT_FIRE_INTERVAL != 0 {
        return false;
    }
    match nearest_enemy(state) {
        Some(target) => state.fire_at(target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Color, Enemy};

    #[test]
    fn test_picks_nearest() {
        let mut state = GameState::new(800.0, 600.0, 3);
        state.reset();
        state
            .enemies
            .push(Enemy::new(Vec2::new(0.0, 0.0), 10.0, Color::WHITE, Vec2::ZERO));
        state
            .enemies
            .push(Enemy::new(Vec2::new(450.0, 300.0), 10.0, Color::WHITE, Vec2::ZERO));
        assert_eq!(nearest_enemy(&state), Some(Vec2::new(450.0, 300.0)));
    }

    #[test]
    fn test_fires_on_interval_only() {
        let mut state = GameState::new(800.0, 600.0, 3);
        state.reset();
        assert!(!auto_fire(&mut state), "nothing to shoot at");

        state
            .enemies
            .push(Enemy::new(Vec2::new(700.0, 300.0), 10.0, Color::WHITE, Vec2::ZERO));
        assert!(auto_fire(&mut state));
        state.frame = 1;
        assert!(!auto_fire(&mut state));
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].vel.x > 0.0);
    }
}
