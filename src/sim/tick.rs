//! Per-frame simulation and render step
//!
//! Runs once per display refresh while the game is running. Velocities are
//! per frame, so the game speed follows the refresh rate.

use super::collision::{circles_touch, crosses_canvas_edge, edge_gap};
use super::entity::{Drawable, Movable, Particle};
use super::state::GameState;
use crate::consts::*;
use crate::renderer::Renderer;

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Hits that shrank an enemy
    pub shrinks: u32,
    /// Hits on enemies too small to shrink (each removes the enemy)
    pub kills: u32,
    pub particles_spawned: usize,
    pub particles_expired: usize,
    /// Projectiles that left the canvas
    pub projectiles_expired: usize,
    /// The player was hit this frame
    pub game_over: bool,
}

/// Advance the world by one frame, drawing as it goes
///
/// Does nothing unless the game is running. The caller schedules the next
/// frame only while `state.is_running()` still holds afterwards; the frame
/// that ends the game is still completed and drawn.
pub fn frame(state: &mut GameState, renderer: &mut dyn Renderer) -> FrameReport {
    let mut report = FrameReport::default();
    if !state.is_running() {
        return report;
    }
    state.frame += 1;

    // Trail overlay, then the player
    renderer.fade(state.fade_alpha);
    state.player.draw(renderer);

    // Faded particles are dropped before they could draw with alpha <= 0
    let before = state.particles.len();
    state.particles.retain_mut(|p| {
        if p.is_faded() {
            false
        } else {
            p.advance(renderer);
            true
        }
    });
    report.particles_expired = before - state.particles.len();

    // A projectile leaving the canvas still gets its final draw and move
    let (width, height) = (state.width, state.height);
    let before = state.projectiles.len();
    state.projectiles.retain_mut(|p| {
        let gone = crosses_canvas_edge(&p.body, width, height);
        p.advance(renderer);
        !gone
    });
    report.projectiles_expired = before - state.projectiles.len();

    // Every overlapping pair counts as a hit. Marks only defer removal to the
    // end of the pass, so indices stay stable while iterating.
    let mut spent = vec![false; state.projectiles.len()];
    let mut killed = vec![false; state.enemies.len()];

    for ei in 0..state.enemies.len() {
        state.enemies[ei].step_tween();

        for pi in 0..state.projectiles.len() {
            let shot = state.projectiles[pi].body;
            let target = state.enemies[ei].body;
            if !circles_touch(&shot, &target) {
                continue;
            }

            for _ in 0..PARTICLES_PER_HIT {
                let particle = Particle::burst(shot.pos, target.color, state.rng());
                state.particles.push(particle);
            }
            report.particles_spawned += PARTICLES_PER_HIT;
            spent[pi] = true;

            if target.radius - ENEMY_SHRINK_STEP > ENEMY_MIN_SHRUNK_RADIUS {
                state.add_score(SCORE_SHRINK);
                let animate = state.animate_shrink;
                state.enemies[ei].shrink_by(ENEMY_SHRINK_STEP, animate);
                report.shrinks += 1;
                log::debug!(
                    "Enemy {} shrunk {:.1} -> {:.1}",
                    ei,
                    target.radius,
                    target.radius - ENEMY_SHRINK_STEP
                );
            } else {
                state.add_score(SCORE_KILL);
                killed[ei] = true;
                report.kills += 1;
                log::debug!("Enemy {} destroyed (r={:.1})", ei, target.radius);
            }
        }

        // The rest of the frame still runs after the player is hit
        if edge_gap(&state.enemies[ei].body, &state.player.body) <= 0.0 {
            state.end_game();
            report.game_over = true;
        }

        state.enemies[ei].advance(renderer);
    }

    let mut i = 0;
    state.enemies.retain(|_| {
        let keep = !killed[i];
        i += 1;
        keep
    });
    let mut i = 0;
    state.projectiles.retain(|_| {
        let keep = !spent[i];
        i += 1;
        keep
    });

    report
}
