//! # Muster Runtime
//!
//! Hosts `muster-core` engines inside a runnable simulation: the
//! [`world_impl::Paddock`] world, grouped circular
//! [`deployment`], and the two-phase [`simulation::Simulation`] tick
//! loop with events, statistics, and serializable snapshots.
//!
//! ## Quick Start
//!
//! ```rust
//! use muster_runtime::prelude::*;
//!
//! let (mut sim, _) = Simulation::new(SimulationConfig::default()).unwrap();
//! sim.run(10).unwrap();
//! assert_eq!(sim.stats().tick, 10);
//! ```

pub mod deployment;
pub mod simulation;
pub mod world_impl;
pub mod prelude;
