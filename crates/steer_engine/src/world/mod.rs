//! Simulation world
//!
//! The [`World`] owns the static geometry (walls and obstacles) and the
//! agent arena. Agents are addressed through generational [`AgentHandle`]s,
//! so a handle to a removed agent never aliases a later spawn.

pub mod obstacle;
pub mod wall;

pub use obstacle::Obstacle;
pub use wall::Wall;

use crate::agent::MovingAgent;
use crate::foundation::math::{SteeringVector, Vec2};
use crate::geometry::GeometryError;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Generational handle to an agent in a [`World`]
    pub struct AgentHandle;
}

/// Errors from world-level operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// The handle does not name a live agent in this world
    #[error("unknown agent handle")]
    UnknownAgent,
}

/// A simulation world: static geometry plus an agent arena
#[derive(Debug)]
pub struct World<V: SteeringVector> {
    walls: Vec<Wall<V>>,
    obstacles: Vec<Obstacle<V>>,
    agents: SlotMap<AgentHandle, MovingAgent<V>>,
    next_agent_id: u64,
}

impl<V: SteeringVector> Default for World<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SteeringVector> World<V> {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            walls: Vec::new(),
            obstacles: Vec::new(),
            agents: SlotMap::with_key(),
            next_agent_id: 0,
        }
    }

    /// Add a wall. Walls are append-only; behaviours see every wall added
    /// so far.
    pub fn add_wall(&mut self, wall: Wall<V>) {
        self.walls.push(wall);
    }

    /// Add an obstacle
    pub fn add_obstacle(&mut self, obstacle: Obstacle<V>) {
        self.obstacles.push(obstacle);
    }

    /// All walls, in insertion order
    pub fn walls(&self) -> &[Wall<V>] {
        &self.walls
    }

    /// All obstacles, in insertion order
    pub fn obstacles(&self) -> &[Obstacle<V>] {
        &self.obstacles
    }

    /// Spawn an agent into the arena, assigning it the next per-world id
    pub fn spawn_agent(&mut self, mut agent: MovingAgent<V>) -> AgentHandle {
        agent.id = self.next_agent_id;
        self.next_agent_id += 1;
        self.agents.insert(agent)
    }

    /// Remove an agent, returning it if the handle was live
    pub fn remove_agent(&mut self, handle: AgentHandle) -> Option<MovingAgent<V>> {
        self.agents.remove(handle)
    }

    /// Borrow an agent
    pub fn agent(&self, handle: AgentHandle) -> Result<&MovingAgent<V>, WorldError> {
        self.agents.get(handle).ok_or(WorldError::UnknownAgent)
    }

    /// Mutably borrow an agent
    pub fn agent_mut(&mut self, handle: AgentHandle) -> Result<&mut MovingAgent<V>, WorldError> {
        self.agents.get_mut(handle).ok_or(WorldError::UnknownAgent)
    }

    /// Number of live agents
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Iterate over all live agents
    pub fn agents(&self) -> impl Iterator<Item = (AgentHandle, &MovingAgent<V>)> {
        self.agents.iter()
    }

    /// Handles of agents whose bounding circle is within `range` of `position`
    pub fn agents_in_range(&self, position: V, range: f32) -> Vec<AgentHandle> {
        self.agents
            .iter()
            .filter(|(_, agent)| {
                let reach = range + agent.radius;
                (agent.position - position).magnitude_squared() < reach * reach
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Push `handle` out of every agent it overlaps. Only the named agent
    /// moves; overlapping neighbours stay put.
    pub fn enforce_non_penetration(&mut self, handle: AgentHandle) -> Result<(), WorldError> {
        let (position, radius, heading) = {
            let agent = self.agent(handle)?;
            (agent.position, agent.radius, agent.heading)
        };

        let mut corrected = position;
        for (other_handle, other) in &self.agents {
            if other_handle == handle {
                continue;
            }
            let to_agent = corrected - other.position;
            let distance = to_agent.magnitude();
            let overlap = radius + other.radius - distance;
            if overlap < 0.0 {
                continue;
            }
            // Coincident centres have no separation axis; fall back to the
            // agent's heading, which is always unit length.
            let push = to_agent.try_direction().unwrap_or(heading);
            corrected += push * overlap;
        }

        self.agent_mut(handle)?.position = corrected;
        Ok(())
    }
}

impl World<Vec2> {
    /// Add four walls boxing the rectangle from the origin to
    /// `(width, height)`, with normals facing inward.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateDirection`] if either extent
    /// is zero.
    pub fn add_boundary_walls(&mut self, width: f32, height: f32) -> Result<(), GeometryError> {
        let up = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(width, 0.0))?;
        let down = Wall::new(Vec2::new(width, height), Vec2::new(0.0, height))?;
        let left = Wall::new(Vec2::new(0.0, height), Vec2::new(0.0, 0.0))?;
        let right = Wall::new(Vec2::new(width, 0.0), Vec2::new(width, height))?;
        self.walls.extend([up, down, left, right]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn agent_at(x: f32, y: f32, radius: f32) -> MovingAgent<Vec2> {
        let mut a = MovingAgent::new(1.0, 5.0, 10.0, Vec2::new(x, y), Vec2::new(1.0, 0.0));
        a.radius = radius;
        a
    }

    #[test]
    fn test_handles_do_not_alias_after_removal() {
        let mut world = World::new();
        let first = world.spawn_agent(agent_at(0.0, 0.0, 1.0));
        world.remove_agent(first);
        let second = world.spawn_agent(agent_at(1.0, 1.0, 1.0));
        assert_ne!(first, second);
        assert!(matches!(world.agent(first), Err(WorldError::UnknownAgent)));
        assert!(world.agent(second).is_ok());
    }

    #[test]
    fn test_agent_ids_are_monotonic() {
        let mut world = World::new();
        let a = world.spawn_agent(agent_at(0.0, 0.0, 1.0));
        world.remove_agent(a);
        let b = world.spawn_agent(agent_at(0.0, 0.0, 1.0));
        assert_eq!(world.agent(b).unwrap().id(), 1);
    }

    #[test]
    fn test_agents_in_range_counts_bounding_radius() {
        let mut world = World::new();
        // 10 away from origin with radius 2: within range 9, not range 7
        let h = world.spawn_agent(agent_at(10.0, 0.0, 2.0));
        assert_eq!(world.agents_in_range(Vec2::zeros(), 9.0), vec![h]);
        assert!(world.agents_in_range(Vec2::zeros(), 7.0).is_empty());
    }

    #[test]
    fn test_non_penetration_moves_only_named_agent() {
        let mut world = World::new();
        // radii 3 + 3 = 6, distance 2: overlap 4
        let mover = world.spawn_agent(agent_at(2.0, 0.0, 3.0));
        let anchor = world.spawn_agent(agent_at(0.0, 0.0, 3.0));
        world.enforce_non_penetration(mover).unwrap();
        assert_relative_eq!(world.agent(mover).unwrap().position.x, 6.0, epsilon = 1e-5);
        assert_eq!(world.agent(anchor).unwrap().position, Vec2::zeros());
    }

    #[test]
    fn test_non_penetration_coincident_centres() {
        let mut world = World::new();
        let mover = world.spawn_agent(agent_at(0.0, 0.0, 1.0));
        world.spawn_agent(agent_at(0.0, 0.0, 1.0));
        world.enforce_non_penetration(mover).unwrap();
        // pushed along the heading by the full overlap
        assert_relative_eq!(world.agent(mover).unwrap().position.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_boundary_wall_normals_face_inward() {
        let mut world = World::new();
        world.add_boundary_walls(100.0, 100.0).unwrap();
        let walls = world.walls();
        assert_eq!(walls.len(), 4);
        // top edge runs left-to-right, its normal points into the box
        assert_relative_eq!(walls[0].normal().y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(walls[1].normal().y, -1.0, epsilon = 1e-5);
    }
}
