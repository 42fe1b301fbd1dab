//! Rendering
//!
//! The simulation draws through the [`Renderer`] trait. [`CommandList`]
//! records a frame's draw calls; the WebGPU backend turns them into
//! triangles (see `shapes` and `pipeline`).

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;

use glam::Vec2;

use crate::sim::Color;

/// Drawing surface used by the simulation
pub trait Renderer {
    /// Paint a translucent black rectangle over the whole canvas
    fn fade(&mut self, alpha: f32);

    /// Fill a circle at the current global alpha
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Save state and set the global alpha
    fn push_alpha(&mut self, alpha: f32);

    /// Restore the alpha saved by the matching `push_alpha`
    fn pop_alpha(&mut self);
}

/// Run `draw` with the global alpha set to `alpha`, restoring it afterwards
pub fn scoped_alpha<R, F>(renderer: &mut R, alpha: f32, draw: F)
where
    R: Renderer + ?Sized,
    F: FnOnce(&mut R),
{
    renderer.push_alpha(alpha);
    draw(renderer);
    renderer.pop_alpha();
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Fade {
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
}

/// Records draw calls in order, resolving the alpha stack as it goes
#[derive(Debug, Clone)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    alpha_stack: Vec<f32>,
    alpha: f32,
}

impl Default for CommandList {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            alpha_stack: Vec::new(),
            alpha: 1.0,
        }
    }
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands (keeps capacity for the next frame)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.alpha_stack.clear();
        self.alpha = 1.0;
    }

    /// Number of circles drawn with exactly this color
    pub fn circles_with_color(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { color: drawn, .. } if *drawn == color))
            .count()
    }
}

impl Renderer for CommandList {
    fn fade(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Fade { alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn push_alpha(&mut self, alpha: f32) {
        self.alpha_stack.push(self.alpha);
        self.alpha = alpha;
    }

    fn pop_alpha(&mut self) {
        self.alpha = self.alpha_stack.pop().unwrap_or(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoped_alpha_restores() {
        let mut list = CommandList::new();
        scoped_alpha(&mut list, 0.25, |r| {
            r.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        });
        list.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);

        let alphas: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.25, 1.0]);
    }

    #[test]
    fn test_unbalanced_pop_resets_to_opaque() {
        let mut list = CommandList::new();
        list.pop_alpha();
        list.fill_circle(Vec2::ZERO, 1.0, Color::WHITE);
        assert!(matches!(
            list.commands()[0],
            DrawCommand::Circle { alpha, .. } if alpha == 1.0
        ));
    }
}
