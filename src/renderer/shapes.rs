//! Shape generation for 2D primitives
//!
//! All shapes are emitted in canvas pixel space (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::DrawCommand;
use super::vertex::{Vertex, rgba};
use crate::sim::Color;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate a translucent black quad covering the whole canvas
pub fn fade_quad(width: f32, height: f32, alpha: f32) -> [Vertex; 6] {
    let color = rgba(Color::BLACK, alpha);
    [
        Vertex::new(0.0, 0.0, color),
        Vertex::new(width, 0.0, color),
        Vertex::new(0.0, height, color),
        Vertex::new(0.0, height, color),
        Vertex::new(width, 0.0, color),
        Vertex::new(width, height, color),
    ]
}

/// Tessellate a frame's draw commands in order
pub fn tessellate(commands: &[DrawCommand], width: f32, height: f32, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(commands.len() * segments as usize * 3);

    for command in commands {
        match *command {
            DrawCommand::Fade { alpha } => {
                vertices.extend_from_slice(&fade_quad(width, height, alpha));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                // Nothing visible to draw
                if alpha <= 0.0 || radius <= 0.0 {
                    continue;
                }
                vertices.extend(circle(center, radius, rgba(color, alpha), segments));
            }
        }
    }

    vertices
}
