//! Zones — the composable behavior units of the herd model.
//!
//! A zone binds a shape to an owning agent, a movement provider, and an
//! optional same-herd filter, and answers two questions each tick:
//! "is anything relevant inside me" (detection) and "what movement do I
//! propose" (decision). Zones are stateless across ticks: a detection is
//! computed fresh, handed to `decide` within the same tick, and
//! discarded. Nothing is cached between calls, so a zone's decision is a
//! pure function of the tick's inputs and its random stream.
//!
//! Four concrete zones compose the full behavior, evaluated by the
//! engine in priority order:
//! - [`StressZone`] — near-field collision avoidance and repulsion
//! - [`NeutralZone`] — mid-field lateral alignment nudge
//! - [`AttractionZone`] — far-field cohesion toward the group
//! - [`RearZone`] — backward-facing leader/trailer discriminator

mod attraction;
mod neutral;
mod rear;
mod stress;

pub use attraction::AttractionZone;
pub use neutral::NeutralZone;
pub use rear::RearZone;
pub use stress::StressZone;

use crate::error::Result;
use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};
use crate::world::World;

/// Agents detected inside a zone during one tick.
///
/// Valid only for the tick it was computed in; the query-then-decide
/// pattern hands it straight to [`Zone::decide`] and drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    neighbors: Vec<AgentId>,
}

impl Detection {
    pub fn new(neighbors: Vec<AgentId>) -> Self {
        Self { neighbors }
    }

    pub fn neighbors(&self) -> &[AgentId] {
        &self.neighbors
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }
}

/// Shared contract of all zones.
///
/// `detect` transforms the zone's shape into world space (origin at the
/// owner's position, rotation from the query heading), asks the world
/// for agents inside it, and filters out the owner and any agent failing
/// the herd filter. `decide` turns a detection into an agent-local
/// movement proposal; it takes `&mut self` only because proposals draw
/// from the zone's private random stream.
pub trait Zone {
    fn shape(&self) -> &ZoneShape;

    fn owner(&self) -> AgentId;

    /// Same-herd filter; `None` admits every herd.
    fn herd_filter(&self) -> Option<HerdId>;

    /// Heading used to orient the shape. The rear zone negates the
    /// owner's heading here; everyone else uses it as-is.
    fn query_heading(&self, heading: Vector2D) -> Vector2D {
        heading
    }

    fn detect(&self, world: &dyn World, position: Vector2D, heading: Vector2D) -> Detection {
        let query_heading = self.query_heading(heading);
        let mut neighbors: Vec<AgentId> = world
            .neighbors_within(self.shape(), position, query_heading)
            .into_iter()
            .filter(|id| *id != self.owner())
            .collect();
        if let Some(herd) = self.herd_filter() {
            neighbors.retain(|id| world.herd_of(*id) == Some(herd));
        }
        Detection::new(neighbors)
    }

    /// Agent-local movement proposal for this tick's detection.
    fn decide(
        &mut self,
        detection: &Detection,
        world: &dyn World,
        position: Vector2D,
        heading: Vector2D,
    ) -> Result<Vector2D>;
}
