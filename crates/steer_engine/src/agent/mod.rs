//! Moving agents
//!
//! A [`MovingAgent`] is the steering entity: position, velocity, heading and
//! the per-agent limits the behaviour pipeline works against. Agents live in
//! a [`crate::world::World`] arena and are addressed by
//! [`crate::world::AgentHandle`].

use crate::config::AgentConfig;
use crate::foundation::math::SteeringVector;
use crate::steering::SteeringBehaviour;
use log::warn;

/// An autonomous moving entity
#[derive(Debug, Clone)]
pub struct MovingAgent<V: SteeringVector> {
    pub(crate) id: u64,

    /// Position in world space
    pub position: V,

    /// Velocity in units per tick
    pub velocity: V,

    /// Direction of travel; not necessarily the normalized velocity
    pub heading: V,

    /// Mass, divides the steering force during integration
    pub mass: f32,

    /// Speed cap applied after integration
    pub max_speed: f32,

    /// Magnitude cap on the aggregate steering force per tick
    pub max_force: f32,

    /// Maximum turn rate in radians per tick
    pub max_turn_rate: f32,

    /// Bounding radius, derived from the attached visual bounds
    pub radius: f32,

    pub(crate) steering: SteeringBehaviour<V>,
}

impl<V: SteeringVector> MovingAgent<V> {
    /// Create a new agent. It only participates in a simulation once
    /// spawned into a [`crate::world::World`].
    pub fn new(mass: f32, max_speed: f32, max_force: f32, position: V, heading: V) -> Self {
        Self {
            id: 0,
            position,
            velocity: V::zeros(),
            heading,
            mass,
            max_speed,
            max_force,
            max_turn_rate: std::f32::consts::PI,
            radius: 1.0,
            steering: SteeringBehaviour::new(),
        }
    }

    /// Create an agent from a tuning config
    pub fn from_config(config: &AgentConfig, position: V, heading: V) -> Self {
        let mut agent = Self::new(
            config.mass,
            config.max_speed,
            config.max_force,
            position,
            heading,
        );
        agent.max_turn_rate = config.max_turn_rate;
        agent.radius = config.radius;
        agent
    }

    /// Per-world identifier, assigned when the agent is spawned
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The agent's steering behaviour set
    pub fn steering(&self) -> &SteeringBehaviour<V> {
        &self.steering
    }

    /// Mutable access to the steering behaviour set, for toggling
    /// behaviours and tuning parameters
    pub fn steering_mut(&mut self) -> &mut SteeringBehaviour<V> {
        &mut self.steering
    }

    /// Apply one tick of movement from a steering force.
    ///
    /// The contract is force → velocity → position, once per tick:
    /// `velocity += force / mass`, clamped to `max_speed`, then
    /// `position += velocity`. A zero force halts the agent outright; the
    /// heading follows the velocity whenever the agent is actually moving.
    pub fn integrate(&mut self, force: V) {
        if self.mass <= 0.0 {
            warn!("agent {} has non-positive mass, skipping integration", self.id);
            return;
        }

        let acceleration = force / self.mass;
        self.velocity += acceleration;
        if acceleration == V::zeros() {
            self.velocity = V::zeros();
        }

        if self.velocity.magnitude() > self.max_speed {
            if let Some(dir) = self.velocity.try_direction() {
                self.velocity = dir * self.max_speed;
            }
        }

        self.position += self.velocity;

        if let Some(dir) = self.velocity.try_direction() {
            self.heading = dir;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn agent() -> MovingAgent<Vec2> {
        MovingAgent::new(2.0, 5.0, 10.0, Vec2::zeros(), Vec2::new(1.0, 0.0))
    }

    #[test]
    fn test_integrate_applies_force_then_velocity() {
        let mut a = agent();
        a.integrate(Vec2::new(4.0, 0.0));
        // velocity += force / mass = (2, 0); position += velocity
        assert_relative_eq!(a.velocity.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(a.position.x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_integrate_clamps_to_max_speed() {
        let mut a = agent();
        a.integrate(Vec2::new(100.0, 0.0));
        assert_relative_eq!(a.velocity.norm(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_heading_follows_velocity() {
        let mut a = agent();
        a.integrate(Vec2::new(0.0, 4.0));
        assert_relative_eq!(a.heading.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_force_halts_the_agent() {
        let mut a = agent();
        a.velocity = Vec2::new(3.0, 0.0);
        a.integrate(Vec2::zeros());
        assert_eq!(a.velocity, Vec2::zeros());
        assert_eq!(a.position, Vec2::zeros());
    }

    #[test]
    fn test_zero_mass_is_inert() {
        let mut a = agent();
        a.mass = 0.0;
        a.integrate(Vec2::new(4.0, 0.0));
        assert_eq!(a.velocity, Vec2::zeros());
        assert_eq!(a.position, Vec2::zeros());
    }
}
