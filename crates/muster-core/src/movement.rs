//! Weighted-random movement draws in the agent-local frame.
//!
//! Every zone and the engine itself fall back to a "movement draw": a
//! weighted choice among the three base movements (left, forward,
//! right), each a fixed vector in agent-local (lateral, forward)
//! coordinates. The draw order and the accumulation rule are part of
//! the reproducibility contract — for a fixed seed the sequence of
//! draws is bit-identical across runs.

use crate::error::{MusterError, Result};
use crate::types::Vector2D;
use rand::rngs::StdRng;
use rand::Rng;

/// Tolerance for the probability-mass sum check at construction.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-9;

/// Produces the three base local movements and weighted-random draws
/// from a private, seeded random stream.
///
/// Immutable configuration apart from the stream's internal cursor;
/// constructed once per zone (or per engine) when an agent's behavior is
/// initialized.
#[derive(Debug)]
pub struct MovementProvider {
    lateral_velocity: f64,
    forward_velocity: f64,
    p_left: f64,
    p_forward: f64,
    p_right: f64,
    rng: StdRng,
}

impl MovementProvider {
    /// Build a provider, failing fast when the probabilities are
    /// negative or do not sum to 1 within floating tolerance.
    pub fn new(
        lateral_velocity: f64,
        forward_velocity: f64,
        p_left: f64,
        p_forward: f64,
        p_right: f64,
        rng: StdRng,
    ) -> Result<Self> {
        for (name, p) in [("p_left", p_left), ("p_forward", p_forward), ("p_right", p_right)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(MusterError::out_of_range(name, 0.0, 1.0, p));
            }
        }
        let sum = p_left + p_forward + p_right;
        if (sum - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(MusterError::invalid_config(
                "movement_probabilities",
                format!("{} + {} + {}", p_left, p_forward, p_right),
                "probabilities must sum to 1.0",
            ));
        }
        Ok(Self {
            lateral_velocity,
            forward_velocity,
            p_left,
            p_forward,
            p_right,
            rng,
        })
    }

    /// Local movement one lateral step to the left.
    pub fn to_left(&self) -> Vector2D {
        Vector2D::new(-self.lateral_velocity, 0.0)
    }

    /// Local movement one forward step.
    pub fn forward(&self) -> Vector2D {
        Vector2D::new(0.0, self.forward_velocity)
    }

    /// Local movement one lateral step to the right.
    pub fn to_right(&self) -> Vector2D {
        Vector2D::new(self.lateral_velocity, 0.0)
    }

    /// Diagonal left-and-forward movement.
    pub fn to_left_forward(&self) -> Vector2D {
        self.to_left() + self.forward()
    }

    /// Diagonal right-and-forward movement.
    pub fn to_right_forward(&self) -> Vector2D {
        self.to_right() + self.forward()
    }

    /// Draw one movement among (left, forward, right), in that fixed
    /// order, by walking the cumulative probability mass against a
    /// single uniform sample in `[0, 1)`.
    pub fn random_movement(&mut self) -> Result<Vector2D> {
        let sample: f64 = self.rng.gen();
        let mut cumulative = 0.0;
        for (probability, movement) in [
            (self.p_left, self.to_left()),
            (self.p_forward, self.forward()),
            (self.p_right, self.to_right()),
        ] {
            cumulative += probability;
            if sample <= cumulative {
                return Ok(movement);
            }
        }
        Err(MusterError::ProbabilityWalkExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn provider(p_left: f64, p_forward: f64, p_right: f64, seed: u64) -> Result<MovementProvider> {
        MovementProvider::new(1.0, 2.0, p_left, p_forward, p_right, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn base_movements_are_axis_aligned() {
        let p = provider(0.25, 0.5, 0.25, 0).unwrap();
        assert_eq!(p.to_left(), Vector2D::new(-1.0, 0.0));
        assert_eq!(p.forward(), Vector2D::new(0.0, 2.0));
        assert_eq!(p.to_right(), Vector2D::new(1.0, 0.0));
        assert_eq!(p.to_left_forward(), Vector2D::new(-1.0, 2.0));
        assert_eq!(p.to_right_forward(), Vector2D::new(1.0, 2.0));
    }

    #[test]
    fn rejects_probabilities_not_summing_to_one() {
        assert!(provider(0.5, 0.5, 0.5, 0).is_err());
        assert!(provider(0.1, 0.1, 0.1, 0).is_err());
    }

    #[test]
    fn rejects_negative_probability() {
        assert!(provider(-0.1, 0.6, 0.5, 0).is_err());
    }

    #[test]
    fn degenerate_distribution_always_draws_forward() {
        let mut p = provider(0.0, 1.0, 0.0, 7).unwrap();
        for _ in 0..100 {
            assert_eq!(p.random_movement().unwrap(), Vector2D::new(0.0, 2.0));
        }
    }

    #[test]
    fn draws_are_reproducible_for_a_fixed_seed() {
        let mut a = provider(0.25, 0.5, 0.25, 42).unwrap();
        let mut b = provider(0.25, 0.5, 0.25, 42).unwrap();
        for _ in 0..1000 {
            assert_eq!(a.random_movement().unwrap(), b.random_movement().unwrap());
        }
    }

    #[test]
    fn draw_frequencies_converge_to_configured_masses() {
        let mut p = provider(0.25, 0.5, 0.25, 99).unwrap();
        let trials = 20_000;
        let mut left = 0u32;
        let mut forward = 0u32;
        let mut right = 0u32;
        for _ in 0..trials {
            let m = p.random_movement().unwrap();
            if m.x < 0.0 {
                left += 1;
            } else if m.x > 0.0 {
                right += 1;
            } else {
                forward += 1;
            }
        }
        let tolerance = 0.02;
        assert!((left as f64 / trials as f64 - 0.25).abs() < tolerance);
        assert!((forward as f64 / trials as f64 - 0.5).abs() < tolerance);
        assert!((right as f64 / trials as f64 - 0.25).abs() < tolerance);
    }
}
