//! Backward glance and trailing slow-down.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MusterError, Result};
use crate::movement::MovementProvider;
use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};
use crate::world::World;
use crate::zone::{Detection, Zone};

/// Looks over the agent's shoulder.
///
/// Detection runs against the negated heading, so the shape that would
/// normally fan out ahead of the agent fans out behind it instead. A
/// populated rear means the agent is not last in line; its decision is
/// a baseline draw, probabilistically damped so trailing herd mates get
/// a chance to close up.
pub struct RearZone {
    owner: AgentId,
    shape: ZoneShape,
    movement: MovementProvider,
    herd_filter: Option<HerdId>,
    slow_down_factor: f64,
    slow_down_probability: f64,
    rng: StdRng,
}

impl RearZone {
    pub fn new(
        owner: AgentId,
        shape: ZoneShape,
        movement: MovementProvider,
        herd_filter: Option<HerdId>,
        slow_down_factor: f64,
        slow_down_probability: f64,
        seed: u64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&slow_down_factor) {
            return Err(MusterError::out_of_range(
                "slow_down_factor",
                0.0,
                1.0,
                slow_down_factor,
            ));
        }
        if !(slow_down_probability > 0.0 && slow_down_probability <= 1.0) {
            return Err(MusterError::out_of_range(
                "slow_down_probability",
                0.0,
                1.0,
                slow_down_probability,
            ));
        }
        Ok(Self {
            owner,
            shape,
            movement,
            herd_filter,
            slow_down_factor,
            slow_down_probability,
            rng: StdRng::seed_from_u64(seed),
        })
    }
}

impl Zone for RearZone {
    fn shape(&self) -> &ZoneShape {
        &self.shape
    }

    fn owner(&self) -> AgentId {
        self.owner
    }

    fn herd_filter(&self) -> Option<HerdId> {
        self.herd_filter
    }

    fn query_heading(&self, heading: Vector2D) -> Vector2D {
        -heading
    }

    fn decide(
        &mut self,
        _detection: &Detection,
        _world: &dyn World,
        _position: Vector2D,
        _heading: Vector2D,
    ) -> Result<Vector2D> {
        let movement = self.movement.random_movement()?;
        if self.rng.gen::<f64>() < self.slow_down_probability {
            Ok(movement.scale(self.slow_down_factor))
        } else {
            Ok(movement)
        }
    }
}
