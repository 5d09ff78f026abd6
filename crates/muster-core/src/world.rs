//! World — the narrow query surface the kernel needs from its host.
//!
//! The host simulation owns agents, scheduling, and storage; the kernel
//! only ever reads positions, headings, and herd keys, and asks which
//! agents fall inside a transformed zone shape. Implementations must
//! answer every query from a consistent snapshot of the current tick:
//! no agent may observe another agent's already-updated position within
//! the same tick.

use crate::shape::ZoneShape;
use crate::types::{AgentId, HerdId, Vector2D};

/// Read-only view of the simulation world for one tick.
pub trait World {
    /// World position of an agent, `None` if the agent is unknown.
    fn position_of(&self, id: AgentId) -> Option<Vector2D>;

    /// Heading (unit vector) of an agent.
    fn heading_of(&self, id: AgentId) -> Option<Vector2D>;

    /// Herd-membership key of an agent.
    fn herd_of(&self, id: AgentId) -> Option<HerdId>;

    /// All agents whose position falls inside `shape` transformed to
    /// world space (origin at `origin`, +y axis along `heading`).
    ///
    /// The result may include the querying agent itself; zone detection
    /// filters the owner out.
    fn neighbors_within(
        &self,
        shape: &ZoneShape,
        origin: Vector2D,
        heading: Vector2D,
    ) -> Vec<AgentId>;
}
