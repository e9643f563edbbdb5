//! # Steer Engine
//!
//! Autonomous-agent steering and spatial queries for game-style simulations.
//!
//! ## Features
//!
//! - **Steering Behaviours**: Seek, flee, arrive, pursuit, evade, wander,
//!   wall/obstacle avoidance and the flocking trio (separation, alignment,
//!   cohesion), combined under a shared per-tick force budget
//! - **2D and 3D**: One generic pipeline over both vector spaces
//! - **Spatial World**: Walls, obstacles and a generational agent arena
//!   with neighbour queries and non-penetration resolution
//! - **Diagnostics**: Tagged neighbours, feeler rays and budget saturation
//!   returned per call for debugging and visualization
//!
//! ## Quick Start
//!
//! ```rust
//! use steer_engine::prelude::*;
//!
//! let mut world: World<Vec2> = World::new();
//! world.add_boundary_walls(800.0, 600.0)?;
//!
//! let agent = MovingAgent::new(1.0, 4.0, 12.0, Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
//! let handle = world.spawn_agent(agent);
//! world.agent_mut(handle)?.steering_mut().seek_on(Vec2::new(400.0, 300.0));
//!
//! let output = world.steering_force(handle)?;
//! world.agent_mut(handle)?.integrate(output.force);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod agent;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod steering;
pub mod world;

/// Commonly used types
pub mod prelude {
    pub use crate::agent::MovingAgent;
    pub use crate::config::{AgentConfig, Config, ConfigError, SteeringConfig};
    pub use crate::foundation::math::{SteeringVector, Vec2, Vec3};
    pub use crate::geometry::GeometryError;
    pub use crate::steering::{
        Deceleration, SteeringBehaviour, SteeringDiagnostics, SteeringOutput,
    };
    pub use crate::world::{AgentHandle, Obstacle, Wall, World, WorldError};
}
