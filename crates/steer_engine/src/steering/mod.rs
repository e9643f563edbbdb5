//! Steering behaviours
//!
//! Each moving agent owns one [`SteeringBehaviour`]: a set of per-behaviour
//! enable flags, targets and tuning parameters. The force computation itself
//! lives in [`pipeline`] and runs through [`crate::world::World`], which owns
//! the agents, walls and obstacles the behaviours read.

pub mod pipeline;

use crate::config::SteeringConfig;
use crate::foundation::math::SteeringVector;
use crate::world::AgentHandle;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Deceleration tier for the arrive behaviour.
///
/// The discriminant feeds directly into the arrival-speed computation:
/// higher values brake earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deceleration {
    /// Slow arrival
    Slow = 3,
    /// Normal speed arrival
    #[default]
    Normal = 2,
    /// Fast arrival
    Fast = 1,
}

impl Deceleration {
    /// Tier value used by the arrive speed formula
    pub fn tier(self) -> f32 {
        match self {
            Self::Slow => 3.0,
            Self::Normal => 2.0,
            Self::Fast => 1.0,
        }
    }
}

/// Per-call scratch produced while computing a steering force.
///
/// The tagged lists and feeler tips are rebuilt from scratch on every
/// [`crate::world::World::steering_force`] call; they are returned for
/// debugging and visualization rather than kept as shared state.
#[derive(Debug, Clone)]
pub struct SteeringDiagnostics<V> {
    /// Agents inside the view distance this tick
    pub tagged_neighbours: Vec<AgentHandle>,
    /// Obstacle indices inside the detection box this tick
    pub tagged_obstacles: Vec<usize>,
    /// Feeler ray tips used by wall avoidance this tick
    pub feelers: Vec<V>,
    /// Whether the force budget ran out before every enabled behaviour was
    /// evaluated
    pub saturated: bool,
}

impl<V> Default for SteeringDiagnostics<V> {
    fn default() -> Self {
        Self {
            tagged_neighbours: Vec::new(),
            tagged_obstacles: Vec::new(),
            feelers: Vec::new(),
            saturated: false,
        }
    }
}

/// A computed steering force plus the scratch state behind it
#[derive(Debug, Clone)]
pub struct SteeringOutput<V> {
    /// Net steering force, magnitude-capped at the agent's max force
    pub force: V,
    /// Per-call diagnostics
    pub diagnostics: SteeringDiagnostics<V>,
}

/// Behaviour flags, targets and tuning for one agent.
///
/// Owned exclusively by its [`crate::agent::MovingAgent`]; mutated through
/// the toggle methods and read by the pipeline each tick.
#[derive(Debug, Clone)]
pub struct SteeringBehaviour<V> {
    pub(crate) seek_on: bool,
    pub(crate) flee_on: bool,
    pub(crate) arrive_on: bool,
    pub(crate) pursuit_on: bool,
    pub(crate) evade_on: bool,
    pub(crate) wander_on: bool,
    pub(crate) wall_avoidance_on: bool,
    pub(crate) obstacle_avoidance_on: bool,
    pub(crate) separation_on: bool,
    pub(crate) alignment_on: bool,
    pub(crate) cohesion_on: bool,

    pub(crate) seek_target: V,
    pub(crate) flee_target: V,
    pub(crate) arrive_target: V,
    pub(crate) deceleration: Deceleration,
    /// Agent pursued when the pursuit behaviour is on
    pub(crate) evader: Option<AgentHandle>,
    /// Agent evaded when the evade behaviour is on
    pub(crate) pursuer: Option<AgentHandle>,

    /// Wall avoidance force multiplier
    pub wall_weight: f32,
    /// Obstacle avoidance force multiplier
    pub obstacle_weight: f32,
    /// Separation force multiplier
    pub separation_weight: f32,
    /// Alignment force multiplier
    pub alignment_weight: f32,
    /// Cohesion force multiplier
    pub cohesion_weight: f32,
    /// Neighbour query radius for the group behaviours
    pub view_distance: f32,
    /// Length of the forward feeler ray; side feelers use half of it
    pub wall_detection_length: f32,
    /// Radius of the wander circle
    pub wander_radius: f32,
    /// Distance of the wander circle ahead of the agent
    pub wander_distance: f32,
    /// Magnitude of the per-tick random wander displacement
    pub wander_jitter: f32,

    pub(crate) rng: SmallRng,
}

impl<V: SteeringVector> Default for SteeringBehaviour<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SteeringVector> SteeringBehaviour<V> {
    /// Create a behaviour set with everything switched off and neutral
    /// weights
    pub fn new() -> Self {
        Self {
            seek_on: false,
            flee_on: false,
            arrive_on: false,
            pursuit_on: false,
            evade_on: false,
            wander_on: false,
            wall_avoidance_on: false,
            obstacle_avoidance_on: false,
            separation_on: false,
            alignment_on: false,
            cohesion_on: false,
            seek_target: V::zeros(),
            flee_target: V::zeros(),
            arrive_target: V::zeros(),
            deceleration: Deceleration::Normal,
            evader: None,
            pursuer: None,
            wall_weight: 1.0,
            obstacle_weight: 1.0,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            view_distance: 50.0,
            wall_detection_length: 40.0,
            wander_radius: 10.0,
            wander_distance: 30.0,
            wander_jitter: 1.0,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Copy the tuning parameters from a config
    pub fn apply_config(&mut self, config: &SteeringConfig) {
        self.wall_weight = config.wall_weight;
        self.obstacle_weight = config.obstacle_weight;
        self.separation_weight = config.separation_weight;
        self.alignment_weight = config.alignment_weight;
        self.cohesion_weight = config.cohesion_weight;
        self.view_distance = config.view_distance;
        self.wall_detection_length = config.wall_detection_length;
        self.wander_radius = config.wander_radius;
        self.wander_distance = config.wander_distance;
        self.wander_jitter = config.wander_jitter;
    }

    /// Reseed the wander RNG; useful for deterministic tests and replays
    pub fn seed_wander(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Turn seek on, steering toward `target`
    pub fn seek_on(&mut self, target: V) {
        self.seek_target = target;
        self.seek_on = true;
    }

    /// Turn seek off
    pub fn seek_off(&mut self) {
        self.seek_on = false;
    }

    /// Turn flee on, steering away from `target`
    pub fn flee_on(&mut self, target: V) {
        self.flee_target = target;
        self.flee_on = true;
    }

    /// Turn flee off
    pub fn flee_off(&mut self) {
        self.flee_on = false;
    }

    /// Turn arrive on, decelerating into `target` at the given tier
    pub fn arrive_on(&mut self, target: V, deceleration: Deceleration) {
        self.arrive_target = target;
        self.deceleration = deceleration;
        self.arrive_on = true;
    }

    /// Turn arrive off
    pub fn arrive_off(&mut self) {
        self.arrive_on = false;
    }

    /// Turn pursuit on, chasing the given agent
    pub fn pursuit_on(&mut self, evader: AgentHandle) {
        self.evader = Some(evader);
        self.pursuit_on = true;
    }

    /// Turn pursuit off
    pub fn pursuit_off(&mut self) {
        self.pursuit_on = false;
    }

    /// Turn evade on, running from the given agent
    pub fn evade_on(&mut self, pursuer: AgentHandle) {
        self.pursuer = Some(pursuer);
        self.evade_on = true;
    }

    /// Turn evade off
    pub fn evade_off(&mut self) {
        self.evade_on = false;
    }

    /// Turn wander on
    pub fn wander_on(&mut self) {
        self.wander_on = true;
    }

    /// Turn wander off
    pub fn wander_off(&mut self) {
        self.wander_on = false;
    }

    /// Turn wall avoidance on (only evaluated in 2D)
    pub fn wall_avoidance_on(&mut self) {
        self.wall_avoidance_on = true;
    }

    /// Turn wall avoidance off
    pub fn wall_avoidance_off(&mut self) {
        self.wall_avoidance_on = false;
    }

    /// Turn obstacle avoidance on (only evaluated in 2D)
    pub fn obstacle_avoidance_on(&mut self) {
        self.obstacle_avoidance_on = true;
    }

    /// Turn obstacle avoidance off
    pub fn obstacle_avoidance_off(&mut self) {
        self.obstacle_avoidance_on = false;
    }

    /// Turn separation on
    pub fn separation_on(&mut self) {
        self.separation_on = true;
    }

    /// Turn separation off
    pub fn separation_off(&mut self) {
        self.separation_on = false;
    }

    /// Turn alignment on
    pub fn alignment_on(&mut self) {
        self.alignment_on = true;
    }

    /// Turn alignment off
    pub fn alignment_off(&mut self) {
        self.alignment_on = false;
    }

    /// Turn cohesion on
    pub fn cohesion_on(&mut self) {
        self.cohesion_on = true;
    }

    /// Turn cohesion off
    pub fn cohesion_off(&mut self) {
        self.cohesion_on = false;
    }
}
