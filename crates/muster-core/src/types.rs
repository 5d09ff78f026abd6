//! Shared types used across all Muster crates.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::{Add, Neg, Sub};

/// Unique identifier for an agent, stable within a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

/// Identifier of the herd an agent belongs to.
///
/// Herds partition agents into independent flocks: zone detection can be
/// restricted to same-herd members, so two herds grazing through each
/// other never react to one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HerdId(pub u32);

/// The current tick of the simulation.
pub type Tick = u64;

/// A point or displacement in the 2D Euclidean plane.
///
/// Doubles as the representation of agent headings (unit vectors) and of
/// agent-local movements, where `x` is the lateral component and `y` the
/// forward component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians from the positive x axis.
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Vector2D) -> f64 {
        (*other - *self).magnitude()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector normalizes to itself. This is a deliberate
    /// degenerate-case policy: heading averages and gradient directions
    /// may legitimately cancel out, and a zero result means "no
    /// contribution", not an error.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / mag, self.y / mag)
        }
    }

    /// Angle of this vector from the positive x axis, in `(-π, π]`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unsigned angular difference to `other`, in `[0, π]`.
    pub fn angle_between(&self, other: &Vector2D) -> f64 {
        let raw = (other.angle() - self.angle()).abs();
        if raw > std::f64::consts::PI {
            TAU - raw
        } else {
            raw
        }
    }

    /// Standard 2D rotation by `angle` radians (counterclockwise).
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Relative velocity modifier: each component grows by its own
    /// fraction (`x + x·lateral`, `y + y·forward`).
    pub fn velocity_modified(&self, lateral_modifier: f64, forward_modifier: f64) -> Self {
        Self::new(
            self.x + self.x * lateral_modifier,
            self.y + self.y * forward_modifier,
        )
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D::new(-self.x, -self.y)
    }
}

/// Normalize a signed angle into `[0, 2π)` by adding `2π` when negative.
///
/// Sector boundaries are defined on `[0, 2π)` while `atan2`-derived
/// heading-relative angles are signed; every sector comparison must go
/// through this exact rule or classification near the ±π seam drifts.
pub fn normalize_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Rotation that maps an agent-local movement (x = lateral, y = forward)
/// into world space for an agent with the given heading.
pub fn local_to_world_rotation(heading: &Vector2D) -> f64 {
    heading.angle() - FRAC_PI_2
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn rotation_round_trip() {
        let vectors = [
            Vector2D::new(1.0, 0.0),
            Vector2D::new(-2.5, 3.75),
            Vector2D::new(0.0, -1.0),
        ];
        let angles = [0.1, FRAC_PI_4, FRAC_PI_2, PI, 2.5, -1.3];
        for v in &vectors {
            for &theta in &angles {
                let back = v.rotated(theta).rotated(-theta);
                assert!((back.x - v.x).abs() < EPSILON);
                assert!((back.y - v.y).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(Vector2D::ZERO.normalized(), Vector2D::ZERO);
    }

    #[test]
    fn normalized_has_unit_magnitude() {
        let v = Vector2D::new(3.0, -4.0).normalized();
        assert!((v.magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn angle_between_is_unsigned_and_bounded() {
        let north = Vector2D::new(0.0, 1.0);
        let south = Vector2D::new(0.0, -1.0);
        let north_east = Vector2D::new(1.0, 1.0);

        assert!((north.angle_between(&south) - PI).abs() < EPSILON);
        assert!((south.angle_between(&north) - PI).abs() < EPSILON);
        assert!((north.angle_between(&north_east) - FRAC_PI_4).abs() < EPSILON);
        assert!((north_east.angle_between(&north) - FRAC_PI_4).abs() < EPSILON);
    }

    #[test]
    fn normalize_angle_adds_full_turn_when_negative() {
        assert!((normalize_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < EPSILON);
        assert_eq!(normalize_angle(FRAC_PI_2), FRAC_PI_2);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn local_forward_rotates_onto_heading() {
        // An agent heading east should turn a forward movement into +x.
        let heading = Vector2D::new(1.0, 0.0);
        let forward = Vector2D::new(0.0, 2.0);
        let world = forward.rotated(local_to_world_rotation(&heading));
        assert!((world.x - 2.0).abs() < EPSILON);
        assert!(world.y.abs() < EPSILON);
    }
}
