//! Angular sector partitions used to classify neighbor directions.
//!
//! Both partitions are fixed on `[0, 2π)` with an explicit
//! normalization of signed heading-relative angles (see
//! [`crate::types::normalize_angle`]); boundaries never move with the
//! heading. Input angles are measured counterclockwise from the owner's
//! heading: `0` is dead ahead, `[0, π]` sweeps the left side, `[π, 2π)`
//! sweeps back around the right side.

use crate::types::{normalize_angle, Vector2D};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Fine five-sector partition used by the stress zone.
///
/// FORWARD is deliberately the *complement* of the rear spans: a
/// neighbor is FORWARD when its angle lies outside
/// `[BEHIND_LEFT.start, BEHIND_RIGHT.end]`, so the forward test is an
/// "outside the bounds" check, never a direct range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativePosition {
    Left,
    BehindLeft,
    BehindRight,
    Right,
    Forward,
}

impl RelativePosition {
    /// Start angle of the sector span on `[0, 2π)`.
    pub fn start_angle(&self) -> f64 {
        match self {
            RelativePosition::Left => 0.0,
            RelativePosition::BehindLeft => FRAC_PI_2,
            RelativePosition::BehindRight => PI,
            RelativePosition::Right => PI,
            RelativePosition::Forward => FRAC_PI_2,
        }
    }

    /// End angle of the sector span on `[0, 2π)`.
    pub fn end_angle(&self) -> f64 {
        match self {
            RelativePosition::Left => PI,
            RelativePosition::BehindLeft => PI,
            RelativePosition::BehindRight => PI + FRAC_PI_2,
            RelativePosition::Right => TAU,
            RelativePosition::Forward => PI + FRAC_PI_2,
        }
    }

    /// Whether a normalized angle in `[0, 2π)` falls in this sector.
    pub fn contains(&self, angle: f64) -> bool {
        match self {
            RelativePosition::Forward => {
                angle <= self.start_angle() || angle >= self.end_angle()
            }
            _ => self.start_angle() <= angle && angle <= self.end_angle(),
        }
    }
}

/// Which sectors of the fine partition hold at least one neighbor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectorHits {
    pub left: bool,
    pub behind_left: bool,
    pub behind_right: bool,
    pub right: bool,
    pub forward: bool,
}

impl SectorHits {
    /// Record one neighbor at the given normalized angle.
    pub fn observe(&mut self, angle: f64) {
        if RelativePosition::Left.contains(angle) {
            self.left = true;
        }
        if RelativePosition::BehindLeft.contains(angle) {
            self.behind_left = true;
        }
        if RelativePosition::BehindRight.contains(angle) {
            self.behind_right = true;
        }
        if RelativePosition::Right.contains(angle) {
            self.right = true;
        }
        if RelativePosition::Forward.contains(angle) {
            self.forward = true;
        }
    }

    pub fn left_side(&self) -> bool {
        self.left || self.behind_left
    }

    pub fn right_side(&self) -> bool {
        self.right || self.behind_right
    }
}

/// Coarse two-half partition used by the neutral and attraction zones:
/// LEFT half `[0, π]`, RIGHT half `[π, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LateralHits {
    pub left: bool,
    pub right: bool,
}

impl LateralHits {
    pub fn observe(&mut self, angle: f64) {
        if (0.0..=PI).contains(&angle) {
            self.left = true;
        }
        if (PI..TAU).contains(&angle) {
            self.right = true;
        }
    }

    pub fn only_left(&self) -> bool {
        self.left && !self.right
    }

    pub fn only_right(&self) -> bool {
        self.right && !self.left
    }
}

/// Angle from the owner's heading to a neighbor's bearing, normalized
/// into `[0, 2π)`. This is the single entry point feeding both sector
/// partitions.
pub fn heading_to_neighbor_angle(
    position: Vector2D,
    heading: Vector2D,
    neighbor_position: Vector2D,
) -> f64 {
    let bearing = (neighbor_position - position).angle();
    normalize_angle(bearing - heading.angle())
}
