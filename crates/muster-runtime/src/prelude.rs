//! Muster Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use muster_runtime::prelude::*;
//! ```

// Re-export the core surface alongside the runtime types
pub use muster_core::prelude::*;

pub use crate::deployment::{deploy, DeploymentConfig};
pub use crate::simulation::{
    Simulation, SimulationConfig, SimulationEvent, SimulationSnapshot, SimulationStats,
};
pub use crate::world_impl::{AgentState, Paddock};
