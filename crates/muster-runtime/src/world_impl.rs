//! Paddock — the flat in-memory world the engines read from.
//!
//! Stores every agent's position, heading, and herd in a plain vector
//! and answers zone queries by linear scan. During a tick the paddock
//! is only read; the simulation applies all decisions in a second pass,
//! so every engine sees the same consistent snapshot.

use muster_core::prelude::*;
use serde::{Deserialize, Serialize};

/// One agent's world state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: AgentId,
    pub herd: HerdId,
    pub position: Vector2D,
    pub heading: Vector2D,
}

/// The shared world: flat agent storage plus the tick counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paddock {
    agents: Vec<AgentState>,
    tick: Tick,
}

impl Paddock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an agent, assigning the next free id.
    ///
    /// Headings are normalized on write so downstream geometry can rely
    /// on unit headings; a zero heading is stored as-is and the agent
    /// simply has no facing until one is set.
    pub fn insert(&mut self, herd: HerdId, position: Vector2D, heading: Vector2D) -> AgentId {
        let id = AgentId(self.agents.len() as u64);
        self.agents.push(AgentState {
            id,
            herd,
            position,
            heading: heading.normalized(),
        });
        id
    }

    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub(crate) fn apply(&mut self, id: AgentId, position_delta: Vector2D, heading: Vector2D) {
        if let Some(agent) = self.agents.iter_mut().find(|agent| agent.id == id) {
            agent.position = agent.position + position_delta;
            agent.heading = heading.normalized();
        }
    }

    fn find(&self, id: AgentId) -> Option<&AgentState> {
        self.agents.get(id.0 as usize).filter(|agent| agent.id == id)
    }
}

impl World for Paddock {
    fn position_of(&self, id: AgentId) -> Option<Vector2D> {
        self.find(id).map(|agent| agent.position)
    }

    fn heading_of(&self, id: AgentId) -> Option<Vector2D> {
        self.find(id).map(|agent| agent.heading)
    }

    fn herd_of(&self, id: AgentId) -> Option<HerdId> {
        self.find(id).map(|agent| agent.herd)
    }

    fn neighbors_within(
        &self,
        shape: &ZoneShape,
        origin: Vector2D,
        heading: Vector2D,
    ) -> Vec<AgentId> {
        self.agents
            .iter()
            .filter(|agent| shape.contains(agent.position, origin, heading))
            .map(|agent| agent.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_assigns_sequential_ids_and_normalizes_headings() {
        let mut paddock = Paddock::new();
        let first = paddock.insert(HerdId(0), Vector2D::ZERO, Vector2D::new(0.0, 5.0));
        let second = paddock.insert(HerdId(1), Vector2D::new(1.0, 1.0), Vector2D::new(3.0, 0.0));

        assert_eq!(first, AgentId(0));
        assert_eq!(second, AgentId(1));
        assert_eq!(paddock.heading_of(first), Some(Vector2D::new(0.0, 1.0)));
        assert_eq!(paddock.heading_of(second), Some(Vector2D::new(1.0, 0.0)));
        assert_eq!(paddock.herd_of(second), Some(HerdId(1)));
    }

    #[test]
    fn neighbor_query_respects_shape_orientation() {
        let mut paddock = Paddock::new();
        let owner = paddock.insert(HerdId(0), Vector2D::ZERO, Vector2D::new(0.0, 1.0));
        let ahead = paddock.insert(HerdId(0), Vector2D::new(0.0, 2.0), Vector2D::new(0.0, 1.0));
        let behind = paddock.insert(HerdId(0), Vector2D::new(0.0, -2.0), Vector2D::new(0.0, 1.0));

        let shape = ZoneShape::circular_sector(5.0, std::f64::consts::PI);
        let north = Vector2D::new(0.0, 1.0);
        let forward = paddock.neighbors_within(&shape, Vector2D::ZERO, north);
        assert!(forward.contains(&owner), "raw query does not filter the owner");
        assert!(forward.contains(&ahead));
        assert!(!forward.contains(&behind));

        let backward = paddock.neighbors_within(&shape, Vector2D::ZERO, -north);
        assert!(backward.contains(&behind));
        assert!(!backward.contains(&ahead));
    }

    #[test]
    fn unknown_ids_answer_none() {
        let paddock = Paddock::new();
        assert_eq!(paddock.position_of(AgentId(3)), None);
        assert_eq!(paddock.heading_of(AgentId(3)), None);
        assert_eq!(paddock.herd_of(AgentId(3)), None);
    }
}
