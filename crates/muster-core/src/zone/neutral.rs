//! Mid-range cohesion with lateral drift.

use crate::error::Result;
use crate::movement::MovementProvider;
use crate::sector::{heading_to_neighbor_angle, LateralHits};
use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};
use crate::world::World;
use crate::zone::{Detection, Zone};

/// Keeps an agent loosely attached to company at intermediate range.
///
/// The classification is coarse: each neighbor lands in the left or
/// right half-plane (or both, when dead ahead or dead behind). A
/// strictly one-sided crowd pulls the agent diagonally toward it;
/// anything else falls back to the baseline random draw.
pub struct NeutralZone {
    owner: AgentId,
    shape: ZoneShape,
    movement: MovementProvider,
    herd_filter: Option<HerdId>,
}

impl NeutralZone {
    pub fn new(
        owner: AgentId,
        shape: ZoneShape,
        movement: MovementProvider,
        herd_filter: Option<HerdId>,
    ) -> Self {
        Self {
            owner,
            shape,
            movement,
            herd_filter,
        }
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

impl Zone for NeutralZone {
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
        let hits = self.classify(detection, world, position, heading);
        if hits.only_left() {
            Ok(self.movement.to_left_forward())
        } else if hits.only_right() {
            Ok(self.movement.to_right_forward())
        } else {
            self.movement.random_movement()
        }
    }
}
