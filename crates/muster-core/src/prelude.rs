//! Muster Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use muster_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{AgentId, HerdId, Tick, Vector2D};

// Re-export the engine surface
pub use crate::engine::{Decision, EngineConfig, HerdEngine, ProbabilisticFactor};

// Re-export movement and geometry
pub use crate::movement::MovementProvider;
pub use crate::shape::{ShapeKind, ZoneShape};

// Re-export the World trait and the zones
pub use crate::world::World;
pub use crate::zone::{AttractionZone, Detection, NeutralZone, RearZone, StressZone, Zone};

// Re-export error types
pub use crate::error::{ConfigError, MusterError, Result};
