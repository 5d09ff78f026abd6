//! Simulation — the two-phase tick loop over a paddock of herds.
//!
//! Each tick:
//! 1. Every agent's engine computes a decision against the immutable
//!    paddock snapshot
//! 2. All position deltas and headings are applied at once
//! 3. The tick counter advances and events are emitted
//!
//! The barrier between the phases is what makes runs deterministic: no
//! agent ever observes a same-tick update of another agent, so the
//! evaluation order of the engines cannot leak into the trajectories.

use muster_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deployment::{deploy, DeploymentConfig};
use crate::world_impl::{AgentState, Paddock};

/// Event emitted by the simulation.
#[derive(Debug, Clone, Serialize)]
pub enum SimulationEvent {
    /// An agent was placed into the paddock.
    Deployed {
        id: AgentId,
        herd: HerdId,
        position: Vector2D,
    },
    /// An agent moved to a new position.
    Moved { id: AgentId, to: Vector2D },
    /// A tick completed.
    TickComplete { tick: Tick, agents: usize },
}

/// Aggregate statistics over the paddock.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationStats {
    pub tick: Tick,
    pub agents: usize,
    pub herds: u32,
    pub mean_distance_from_origin: f64,
}

/// A complete serializable snapshot of the simulation at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSnapshot {
    pub tick: Tick,
    pub agents: Vec<AgentState>,
    pub stats: SimulationStats,
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    pub engine: EngineConfig,
    pub deployment: DeploymentConfig,
}

/// A paddock plus one behavior engine per agent.
pub struct Simulation {
    config: SimulationConfig,
    paddock: Paddock,
    engines: Vec<HerdEngine>,
}

impl Simulation {
    /// Deploy the herds and build every agent's engine.
    pub fn new(config: SimulationConfig) -> Result<(Self, Vec<SimulationEvent>)> {
        config.engine.validate()?;
        let mut paddock = Paddock::new();
        let mut rng = StdRng::seed_from_u64(config.engine.seed);
        let deployed = deploy(
            &mut paddock,
            config.engine.number_of_herds,
            &config.deployment,
            &mut rng,
        )?;

        let mut engines = Vec::with_capacity(deployed.len());
        let mut events = Vec::with_capacity(deployed.len());
        for id in deployed {
            let herd = paddock.herd_of(id).ok_or(MusterError::UnknownAgent(id))?;
            engines.push(HerdEngine::new(id, herd, &config.engine)?);
            let position = paddock.position_of(id).ok_or(MusterError::UnknownAgent(id))?;
            events.push(SimulationEvent::Deployed {
                id,
                herd,
                position,
            });
        }
        debug!(agents = engines.len(), herds = config.engine.number_of_herds, "deployed");

        Ok((
            Self {
                config,
                paddock,
                engines,
            },
            events,
        ))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn paddock(&self) -> &Paddock {
        &self.paddock
    }

    /// Run one tick: collect all decisions, then apply them.
    pub fn tick(&mut self) -> Result<Vec<SimulationEvent>> {
        let mut decisions = Vec::with_capacity(self.engines.len());
        for engine in &mut self.engines {
            decisions.push((engine.agent_id(), engine.step(&self.paddock)?));
        }

        let mut events = Vec::with_capacity(decisions.len() + 1);
        for (id, decision) in decisions {
            self.paddock.apply(id, decision.position_delta, decision.heading);
            if let Some(to) = self.paddock.position_of(id) {
                events.push(SimulationEvent::Moved { id, to });
            }
        }
        self.paddock.advance_tick();

        let tick = self.paddock.tick();
        debug!(tick, agents = self.engines.len(), "tick complete");
        events.push(SimulationEvent::TickComplete {
            tick,
            agents: self.engines.len(),
        });
        Ok(events)
    }

    /// Run a number of ticks, collecting each tick's events.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<Vec<SimulationEvent>>> {
        let mut all_events = Vec::with_capacity(ticks as usize);
        for _ in 0..ticks {
            all_events.push(self.tick()?);
        }
        Ok(all_events)
    }

    pub fn stats(&self) -> SimulationStats {
        let agents = self.paddock.len();
        let mean_distance_from_origin = if agents == 0 {
            0.0
        } else {
            let total: f64 = self
                .paddock
                .agents()
                .iter()
                .map(|agent| agent.position.magnitude())
                .sum();
            total / agents as f64
        };
        SimulationStats {
            tick: self.paddock.tick(),
            agents,
            herds: self.config.engine.number_of_herds,
            mean_distance_from_origin,
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            tick: self.paddock.tick(),
            agents: self.paddock.agents().to_vec(),
            stats: self.stats(),
        }
    }
}
