//! # Muster Core
//!
//! Per-tick movement decisions for herd agents on a 2D plane.
//!
//! Each agent composes four concentric perception zones, evaluated in
//! fixed priority order every tick:
//!
//! - **StressZone** — near-field collision avoidance and repulsion
//! - **NeutralZone** — mid-field lateral alignment with the group
//! - **AttractionZone** — far-field cohesion toward distant herd mates
//! - **RearZone** — backward glance telling leaders from trailers
//!
//! The [`engine::HerdEngine`] binds the zones to an agent, blends its
//! heading with nearby herd mates, and turns the winning zone's
//! agent-local proposal into a world-space displacement. The host
//! simulation supplies positions and headings through the
//! [`world::World`] trait and applies the returned decisions itself,
//! which keeps the whole crate pure computation over an in-memory
//! snapshot.
//!
//! ## Quick Start
//!
//! ```rust
//! use muster_core::prelude::*;
//!
//! let config = EngineConfig::default();
//! let engine = HerdEngine::new(AgentId(0), HerdId(0), &config).unwrap();
//! assert_eq!(engine.agent_id(), AgentId(0));
//! ```

pub mod engine;
pub mod error;
pub mod movement;
pub mod sector;
pub mod shape;
pub mod types;
pub mod world;
pub mod zone;
pub mod prelude;
