//! Near-field repulsion.

use crate::error::Result;
use crate::movement::MovementProvider;
use crate::sector::{heading_to_neighbor_angle, SectorHits};
use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};
use crate::world::World;
use crate::zone::{Detection, Zone};

/// Collision avoidance in the immediate surroundings of an agent.
///
/// Neighbors are classified into the five-sector partition and the
/// decision table applies additive modifiers over a baseline random
/// draw: lateral pressure from one side adds a bias away from it, a
/// blocked front scales the forward component down by the repulsion
/// factor, a pincer from both rear quadrants scales it up. Lateral and
/// forward adjustments are independent and may both apply in one tick.
pub struct StressZone {
    owner: AgentId,
    shape: ZoneShape,
    movement: MovementProvider,
    herd_filter: Option<HerdId>,
    repulsion_factor: f64,
}

impl StressZone {
    pub fn new(
        owner: AgentId,
        shape: ZoneShape,
        movement: MovementProvider,
        herd_filter: Option<HerdId>,
        repulsion_factor: f64,
    ) -> Self {
        Self {
            owner,
            shape,
            movement,
            herd_filter,
            repulsion_factor,
        }
    }

    fn classify(
        &self,
        detection: &Detection,
        world: &dyn World,
        position: Vector2D,
        heading: Vector2D,
    ) -> SectorHits {
        let mut hits = SectorHits::default();
        for id in detection.neighbors() {
            if let Some(neighbor_position) = world.position_of(*id) {
                hits.observe(heading_to_neighbor_angle(position, heading, neighbor_position));
            }
        }
        hits
    }
}

impl Zone for StressZone {
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
        let mut movement = self.movement.random_movement()?;

        // Lateral push away from one-sided pressure.
        if hits.right_side() && !hits.left_side() {
            movement = movement + self.movement.to_left();
        } else if hits.left_side() && !hits.right_side() {
            movement = movement + self.movement.to_right();
        }

        // Forward adjustment: a blocked front dominates the rear pincer.
        if hits.forward {
            movement = movement.velocity_modified(0.0, -self.repulsion_factor);
        } else if hits.behind_left && hits.behind_right {
            movement = movement.velocity_modified(0.0, self.repulsion_factor);
        }

        Ok(movement)
    }
}
