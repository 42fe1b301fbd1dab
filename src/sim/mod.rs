//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Per-frame velocities, one `frame` call per display refresh
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Draws only through the `Renderer` trait

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod tween;

pub use autopilot::{auto_fire, nearest_enemy};
pub use collision::{circles_touch, crosses_canvas_edge, edge_gap};
pub use entity::{Circle, Color, Drawable, Enemy, Movable, Particle, Player, Projectile};
pub use spawner::{Edge, Spawner, enemy_toward, spawn_enemy};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{FrameReport, frame};
pub use tween::RadiusTween;
