//! Zone shapes — geometric containment predicates in the agent frame.
//!
//! A shape is always defined relative to its owner: the local origin is
//! the agent's position (optionally displaced along the heading by a
//! `gap`), the local +y axis is the agent's heading. World-space
//! containment tests transform the candidate point into this local
//! frame first, so the same shape description serves every position and
//! orientation an agent takes over a run.

use crate::types::{local_to_world_rotation, Vector2D};
use serde::{Deserialize, Serialize};

/// Geometric form of a zone, in the owner's local frame (+y = forward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Egg-form ellipse: lateral semi-axis `radius`, forward semi-axis
    /// `radius * ratio`. The stress zone uses ratio 2.0 so pressure is
    /// felt further ahead/behind than to the sides.
    Ellipse { radius: f64, ratio: f64 },
    /// Circular sector of the given `angle` (radians), symmetric about
    /// the forward axis. A half-disc when `angle` is π.
    CircularSector { radius: f64, angle: f64 },
    /// Axis-aligned rectangle centered on the local origin. Legacy
    /// shape from early model iterations, kept for experiments that
    /// still configure rectangular stress fields.
    Rectangle { width: f64, height: f64 },
}

/// A zone shape plus the forward displacement of its local origin.
///
/// The `gap` convention is uniform across one agent's zones: positive
/// values push the shape ahead of the agent along the query heading.
/// A rear zone offsets backwards by querying with the negated heading,
/// not by a negative gap of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneShape {
    kind: ShapeKind,
    gap: f64,
}

impl ZoneShape {
    pub fn ellipse(radius: f64, ratio: f64) -> Self {
        Self {
            kind: ShapeKind::Ellipse { radius, ratio },
            gap: 0.0,
        }
    }

    pub fn circular_sector(radius: f64, angle: f64) -> Self {
        Self {
            kind: ShapeKind::CircularSector { radius, angle },
            gap: 0.0,
        }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Self {
            kind: ShapeKind::Rectangle { width, height },
            gap: 0.0,
        }
    }

    /// Displace the shape's local origin along the owner's heading.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Containment in the local frame (+y = forward, origin already
    /// displaced by the gap).
    pub fn contains_local(&self, point: Vector2D) -> bool {
        match self.kind {
            ShapeKind::Ellipse { radius, ratio } => {
                if radius <= 0.0 {
                    return false;
                }
                let nx = point.x / radius;
                let ny = point.y / (radius * ratio);
                nx * nx + ny * ny <= 1.0
            }
            ShapeKind::CircularSector { radius, angle } => {
                if point.magnitude() > radius {
                    return false;
                }
                if point == Vector2D::ZERO {
                    return true;
                }
                let forward = Vector2D::new(0.0, 1.0);
                forward.angle_between(&point) <= angle / 2.0
            }
            ShapeKind::Rectangle { width, height } => {
                point.x.abs() <= width / 2.0 && point.y.abs() <= height / 2.0
            }
        }
    }

    /// Containment of a world-space point for an owner at `origin` with
    /// the given query `heading`.
    pub fn contains(&self, point: Vector2D, origin: Vector2D, heading: Vector2D) -> bool {
        let center = origin + heading.normalized().scale(self.gap);
        let local = (point - center).rotated(-local_to_world_rotation(&heading));
        self.contains_local(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const NORTH: Vector2D = Vector2D { x: 0.0, y: 1.0 };
    const EAST: Vector2D = Vector2D { x: 1.0, y: 0.0 };

    #[test]
    fn ellipse_is_longer_along_heading() {
        let shape = ZoneShape::ellipse(2.0, 2.0);
        let origin = Vector2D::ZERO;
        assert!(shape.contains(Vector2D::new(0.0, 3.9), origin, NORTH));
        assert!(!shape.contains(Vector2D::new(3.9, 0.0), origin, NORTH));
        assert!(shape.contains(Vector2D::new(1.9, 0.0), origin, NORTH));
    }

    #[test]
    fn ellipse_follows_rotated_heading() {
        let shape = ZoneShape::ellipse(2.0, 2.0);
        let origin = Vector2D::ZERO;
        // Heading east: the long axis now lies along x.
        assert!(shape.contains(Vector2D::new(3.9, 0.0), origin, EAST));
        assert!(!shape.contains(Vector2D::new(0.0, 3.9), origin, EAST));
    }

    #[test]
    fn half_disc_sector_excludes_rear() {
        let shape = ZoneShape::circular_sector(10.0, PI);
        let origin = Vector2D::ZERO;
        assert!(shape.contains(Vector2D::new(0.0, 5.0), origin, NORTH));
        assert!(shape.contains(Vector2D::new(4.0, 0.1), origin, NORTH));
        assert!(!shape.contains(Vector2D::new(0.0, -5.0), origin, NORTH));
        assert!(!shape.contains(Vector2D::new(0.0, 10.5), origin, NORTH));
    }

    #[test]
    fn sector_with_negated_heading_faces_backwards() {
        let shape = ZoneShape::circular_sector(10.0, PI);
        let origin = Vector2D::ZERO;
        let south = -NORTH;
        assert!(shape.contains(Vector2D::new(0.0, -5.0), origin, south));
        assert!(!shape.contains(Vector2D::new(0.0, 5.0), origin, south));
    }

    #[test]
    fn rectangle_containment_respects_frame() {
        let shape = ZoneShape::rectangle(2.0, 6.0);
        let origin = Vector2D::new(10.0, 10.0);
        assert!(shape.contains(Vector2D::new(10.5, 12.9), origin, NORTH));
        assert!(!shape.contains(Vector2D::new(12.0, 10.0), origin, NORTH));
        // Heading east swaps the long axis into x.
        assert!(shape.contains(Vector2D::new(12.9, 10.5), origin, EAST));
    }

    #[test]
    fn gap_displaces_origin_along_heading() {
        let shape = ZoneShape::circular_sector(4.0, PI).with_gap(5.0);
        let origin = Vector2D::ZERO;
        // Shape now starts 5 units ahead.
        assert!(shape.contains(Vector2D::new(0.0, 7.0), origin, NORTH));
        assert!(!shape.contains(Vector2D::new(0.0, 1.0), origin, NORTH));
    }
}
