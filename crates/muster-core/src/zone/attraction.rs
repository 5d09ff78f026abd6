//! Long-range pull toward distant herd mates.

use crate::error::{MusterError, Result};
use crate::movement::MovementProvider;
use crate::sector::{heading_to_neighbor_angle, LateralHits};
use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};
use crate::world::World;
use crate::zone::{Detection, Zone};

/// Accelerated catch-up movement toward herd mates seen at long range.
///
/// Every path through [`decide`](Zone::decide) moves the agent faster
/// than its baseline stride: a one-sided sighting produces a scaled
/// diagonal, anything else a scaled forward step. Calling `decide` with
/// an empty detection violates the contract and fails rather than
/// silently standing still.
pub struct AttractionZone {
    owner: AgentId,
    shape: ZoneShape,
    movement: MovementProvider,
    herd_filter: Option<HerdId>,
    speed_up_factor: f64,
}

impl AttractionZone {
    pub fn new(
        owner: AgentId,
        shape: ZoneShape,
        movement: MovementProvider,
        herd_filter: Option<HerdId>,
        speed_up_factor: f64,
    ) -> Result<Self> {
        if !speed_up_factor.is_finite() || speed_up_factor < 1.0 {
            return Err(MusterError::invalid_config(
                "speed_up_factor",
                speed_up_factor.to_string(),
                "must be a finite value >= 1",
            ));
        }
        Ok(Self {
            owner,
            shape,
            movement,
            herd_filter,
            speed_up_factor,
        })
    }

    fn classify(
        &self,
        detection: &Detection,
        world: &dyn World,
        position: Vector2D,
        heading: Vector2D,
    ) -> LateralHits {
        let mut hits = LateralHits::default();
        for id in detection.neighbors() {
            if let Some(neighbor_position) = world.position_of(*id) {
                hits.observe(heading_to_neighbor_angle(position, heading, neighbor_position));
            }
        }
        hits
    }
}

impl Zone for AttractionZone {
    fn shape(&self) -> &ZoneShape {
        &self.shape
    }

    fn owner(&self) -> AgentId {
        self.owner
    }

    fn herd_filter(&self) -> Option<HerdId> {
        self.herd_filter
    }

    fn decide(
        &mut self,
        detection: &Detection,
        world: &dyn World,
        position: Vector2D,
        heading: Vector2D,
    ) -> Result<Vector2D> {
        if detection.is_empty() {
            return Err(MusterError::EmptyDetection {
                zone: "AttractionZone",
            });
        }
        let hits = self.classify(detection, world, position, heading);
        let movement = if hits.only_left() {
            self.movement.to_left() + self.movement.forward()
        } else if hits.only_right() {
            self.movement.to_right() + self.movement.forward()
        } else {
            self.movement.forward()
        };
        Ok(movement.scale(self.speed_up_factor))
    }
}
