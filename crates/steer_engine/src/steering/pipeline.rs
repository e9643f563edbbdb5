//! The per-tick force accumulation pipeline
//!
//! [`World::steering_force`] evaluates an agent's enabled behaviours in a
//! fixed priority order, spending a shared force budget of `max_force`.
//! Earlier behaviours get first claim on the budget; once a behaviour's
//! contribution would overflow it, the contribution is scaled to fill the
//! budget exactly and evaluation stops for the tick.
//!
//! The pipeline itself never mutates positions or velocities. The only
//! mutation is drawing the wander jitter from the agent's RNG, done up
//! front, so every behaviour reads one consistent snapshot of the world.

use super::{Deceleration, SteeringDiagnostics, SteeringOutput};
use crate::agent::MovingAgent;
use crate::foundation::math::{utils, SteeringVector};
use crate::geometry::{centroid, segment_intersection};
use crate::world::{AgentHandle, Obstacle, Wall, World, WorldError};
use log::warn;

/// Scales the arrive deceleration tiers into usable stopping distances
const DECELERATION_TWEAKER: f32 = 0.3;

/// Weight of the braking component of obstacle avoidance
const BRAKING_WEIGHT: f32 = 0.1;

/// Side feeler angle, degrees off the heading
const FEELER_SPREAD_DEG: f32 = 60.0;

impl<V: SteeringVector> World<V> {
    /// Compute the steering force for one agent, evaluating its enabled
    /// behaviours in priority order under the shared `max_force` budget.
    ///
    /// Priority order: wall avoidance, separation, alignment, cohesion,
    /// seek, obstacle avoidance, flee, arrive, pursuit, evade, wander.
    /// Wall and obstacle avoidance only run in 2D.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownAgent`] when `handle` is stale.
    pub fn steering_force(&mut self, handle: AgentHandle) -> Result<SteeringOutput<V>, WorldError> {
        // The RNG draw is the only mutation; after this block the whole
        // computation reads a consistent snapshot.
        let wander_jitter = {
            let agent = self.agent_mut(handle)?;
            if agent.steering.wander_on {
                let magnitude = agent.steering.wander_jitter;
                Some(V::jitter(&mut agent.steering.rng, magnitude))
            } else {
                None
            }
        };

        let agent = self.agent(handle)?;
        let steering = &agent.steering;
        let mut diagnostics = SteeringDiagnostics::default();
        let mut running = V::zeros();

        let needs_neighbours = steering.separation_on
            || steering.alignment_on
            || steering.cohesion_on
            || (V::WANDER_REFRESHES_NEIGHBOURS && steering.wander_on);
        if needs_neighbours {
            let mut tagged = self.agents_in_range(agent.position, steering.view_distance);
            tagged.retain(|&h| h != handle);
            diagnostics.tagged_neighbours = tagged;
        }
        let neighbours: Vec<&MovingAgent<V>> = diagnostics
            .tagged_neighbours
            .iter()
            .filter_map(|&h| self.agent(h).ok())
            .collect();

        // Defined after the bindings it captures; macro hygiene resolves
        // the identifiers against the definition site.
        macro_rules! spend {
            ($force:expr) => {
                if !accumulate(&mut running, $force, agent.max_force) {
                    diagnostics.saturated = true;
                    return Ok(SteeringOutput { force: running, diagnostics });
                }
            };
        }

        if V::PLANAR_AVOIDANCE && steering.wall_avoidance_on {
            let (force, feelers) = wall_avoidance(agent, self.walls());
            diagnostics.feelers = feelers;
            spend!(force * steering.wall_weight);
        }
        if steering.separation_on {
            spend!(separation(agent, &neighbours) * steering.separation_weight);
        }
        if steering.alignment_on {
            spend!(alignment(agent, &neighbours) * steering.alignment_weight);
        }
        if steering.cohesion_on {
            spend!(cohesion(agent, &neighbours) * steering.cohesion_weight);
        }
        if steering.seek_on {
            spend!(seek(agent, steering.seek_target));
        }
        if V::PLANAR_AVOIDANCE && steering.obstacle_avoidance_on {
            let (force, tagged) = obstacle_avoidance(agent, self.obstacles());
            diagnostics.tagged_obstacles = tagged;
            spend!(force * steering.obstacle_weight);
        }
        if steering.flee_on {
            spend!(flee(agent, steering.flee_target));
        }
        if steering.arrive_on {
            spend!(arrive(agent, steering.arrive_target, steering.deceleration));
        }
        if steering.pursuit_on {
            match steering.evader.and_then(|h| self.agent(h).ok()) {
                Some(evader) => spend!(pursuit(agent, evader)),
                None => warn!("agent {}: pursuit target is gone, no force", agent.id()),
            }
        }
        if steering.evade_on {
            match steering.pursuer.and_then(|h| self.agent(h).ok()) {
                Some(pursuer) => spend!(evade(agent, pursuer)),
                None => warn!("agent {}: evade target is gone, no force", agent.id()),
            }
        }
        if let Some(jitter) = wander_jitter {
            spend!(wander(agent, jitter));
        }

        Ok(SteeringOutput { force: running, diagnostics })
    }
}

/// Add `force` to `running` without letting the total exceed `max_force`.
///
/// Returns `false` when the budget is exhausted: either it already was, or
/// this contribution filled it (scaled down to fit exactly). The caller
/// stops evaluating further behaviours either way.
fn accumulate<V: SteeringVector>(running: &mut V, force: V, max_force: f32) -> bool {
    let remaining = max_force - running.magnitude();
    if remaining <= 0.0 {
        return false;
    }
    if force.magnitude() < remaining {
        *running += force;
        true
    } else {
        if let Some(dir) = force.try_direction() {
            *running += dir * remaining;
        }
        false
    }
}

/// Full-speed desired velocity toward `target`, minus the current velocity
fn seek<V: SteeringVector>(agent: &MovingAgent<V>, target: V) -> V {
    match (target - agent.position).try_direction() {
        Some(dir) => dir * agent.max_speed - agent.velocity,
        None => V::zeros(),
    }
}

/// Mirror of seek: full speed away from `target`
fn flee<V: SteeringVector>(agent: &MovingAgent<V>, target: V) -> V {
    match (agent.position - target).try_direction() {
        Some(dir) => dir * agent.max_speed - agent.velocity,
        None => V::zeros(),
    }
}

/// Seek that ramps the desired speed down with distance, so the agent
/// brakes into the target instead of overshooting
fn arrive<V: SteeringVector>(agent: &MovingAgent<V>, target: V, deceleration: Deceleration) -> V {
    let to_target = target - agent.position;
    let distance = to_target.magnitude();
    if distance > 0.0 {
        let speed = (distance / (deceleration.tier() * DECELERATION_TWEAKER)).min(agent.max_speed);
        to_target * (speed / distance) - agent.velocity
    } else {
        V::zeros()
    }
}

/// Estimated ticks needed to turn and face `target`; grows with how far
/// the heading is from pointing at it
fn turn_around_time<V: SteeringVector>(agent: &MovingAgent<V>, target: V) -> f32 {
    match (target - agent.position).try_direction() {
        Some(to_target) => (agent.heading.dot(&to_target) - 1.0) * -0.5,
        None => 0.0,
    }
}

/// Seek the evader's predicted position. When the evader is ahead and
/// nearly head-on there is nothing to predict, so seek it directly.
fn pursuit<V: SteeringVector>(agent: &MovingAgent<V>, evader: &MovingAgent<V>) -> V {
    let to_evader = evader.position - agent.position;
    let relative_heading = agent.heading.dot(&evader.heading);
    if to_evader.dot(&agent.heading) > 0.0 && relative_heading < -0.95 {
        return seek(agent, evader.position);
    }

    let closing_speed = agent.max_speed + evader.max_speed;
    if closing_speed <= 0.0 {
        return seek(agent, evader.position);
    }
    let look_ahead = to_evader.magnitude() / closing_speed + turn_around_time(agent, evader.position);
    seek(agent, evader.position + evader.velocity * look_ahead)
}

/// Flee the pursuer's predicted position. No head-on shortcut and no
/// turn-around term: when running away, prediction always applies.
fn evade<V: SteeringVector>(agent: &MovingAgent<V>, pursuer: &MovingAgent<V>) -> V {
    let to_pursuer = pursuer.position - agent.position;
    let closing_speed = agent.max_speed + pursuer.max_speed;
    if closing_speed <= 0.0 {
        return flee(agent, pursuer.position);
    }
    let look_ahead = to_pursuer.magnitude() / closing_speed;
    flee(agent, pursuer.position + pursuer.velocity * look_ahead)
}

/// Random point on the wander circle projected ahead of the agent. The
/// jitter is drawn fresh each call; there is no persistent wander target.
/// The result is the offset itself, not a desired-minus-velocity seek.
/// The heading is re-normalized so its magnitude never scales the
/// displacement.
fn wander<V: SteeringVector>(agent: &MovingAgent<V>, jitter: V) -> V {
    let on_circle = match jitter.try_direction() {
        Some(dir) => dir * agent.steering().wander_radius,
        None => jitter,
    };
    let ahead = match agent.heading.try_direction() {
        Some(dir) => dir * agent.steering().wander_distance,
        None => V::zeros(),
    };
    ahead + on_circle
}

/// Inverse-distance-weighted repulsion from each tagged neighbour
fn separation<V: SteeringVector>(agent: &MovingAgent<V>, neighbours: &[&MovingAgent<V>]) -> V {
    let mut force = V::zeros();
    for neighbour in neighbours {
        let to_agent = agent.position - neighbour.position;
        let distance = to_agent.magnitude();
        if let Some(dir) = to_agent.try_direction() {
            force += dir / distance;
        }
    }
    force
}

/// Average neighbour heading minus the agent's own; zero force when alone
fn alignment<V: SteeringVector>(agent: &MovingAgent<V>, neighbours: &[&MovingAgent<V>]) -> V {
    let headings: Vec<V> = neighbours.iter().map(|n| n.heading).collect();
    match centroid(&headings) {
        Ok(average) => average - agent.heading,
        Err(_) => V::zeros(),
    }
}

/// Seek the centroid of the tagged neighbours; zero force when alone
fn cohesion<V: SteeringVector>(agent: &MovingAgent<V>, neighbours: &[&MovingAgent<V>]) -> V {
    let positions: Vec<V> = neighbours.iter().map(|n| n.position).collect();
    match centroid(&positions) {
        Ok(center) => seek(agent, center),
        Err(_) => V::zeros(),
    }
}

/// Probe ahead with three feelers and push away from the nearest wall any
/// of them crosses, proportionally to how far the feeler overshoots it.
///
/// The nearest-hit tracking persists across the feeler loop while the
/// force is recomputed per feeler, so the force that survives pairs the
/// overall nearest wall with the last-visited feeler's tip. The loop runs
/// over the feelers in reverse, making that the straight-ahead feeler.
fn wall_avoidance<V: SteeringVector>(agent: &MovingAgent<V>, walls: &[Wall<V>]) -> (V, Vec<V>) {
    let steering = agent.steering();
    let spread = utils::deg_to_rad(FEELER_SPREAD_DEG);
    let feelers = vec![
        agent.position + agent.heading * steering.wall_detection_length,
        agent.position + agent.heading.rotated(spread) * (steering.wall_detection_length * 0.5),
        agent.position + agent.heading.rotated(-spread) * (steering.wall_detection_length * 0.5),
    ];

    let mut closest_distance = f32::MAX;
    let mut closest_wall: Option<&Wall<V>> = None;
    let mut closest_point = V::zeros();
    let mut force = V::zeros();

    for feeler in feelers.iter().rev() {
        for wall in walls {
            if let Some(hit) = segment_intersection(agent.position, *feeler, wall.start(), wall.end()) {
                if hit.distance < closest_distance {
                    closest_distance = hit.distance;
                    closest_wall = Some(wall);
                    closest_point = hit.point;
                }
            }
        }
        if let Some(wall) = closest_wall {
            let overshoot = *feeler - closest_point;
            force = wall.normal() * overshoot.magnitude();
        }
    }

    (force, feelers)
}

/// Steer laterally around (and brake for) the obstacle with the nearest
/// intersection point inside the agent's velocity-scaled detection box.
fn obstacle_avoidance<V: SteeringVector>(
    agent: &MovingAgent<V>,
    obstacles: &[Obstacle<V>],
) -> (V, Vec<usize>) {
    let speed_ratio = if agent.max_speed > 0.0 {
        agent.velocity.magnitude() / agent.max_speed
    } else {
        0.0
    };
    let box_length = 4.0 * agent.radius * (1.0 + speed_ratio);
    if box_length <= 0.0 {
        return (V::zeros(), Vec::new());
    }
    let side = agent.heading.perp();

    let mut tagged = Vec::new();
    let mut nearest_ip = f32::MAX;
    let mut nearest: Option<(f32, f32, f32)> = None; // (local_x, local_y, radius)

    for (index, obstacle) in obstacles.iter().enumerate() {
        let to_obstacle = obstacle.position - agent.position;
        let reach = box_length + obstacle.radius;
        if to_obstacle.magnitude_squared() >= reach * reach {
            continue;
        }
        tagged.push(index);

        let local_x = to_obstacle.dot(&agent.heading);
        if local_x < 0.0 {
            // behind the agent
            continue;
        }
        let local_y = to_obstacle.dot(&side);
        let expanded = obstacle.radius + agent.radius;
        if local_y.abs() >= expanded {
            continue;
        }

        // line/circle test along the local x axis
        let half_chord = (expanded * expanded - local_y * local_y).sqrt();
        let mut ip = local_x - half_chord;
        if ip <= 0.0 {
            ip = local_x + half_chord;
        }
        if ip < nearest_ip {
            nearest_ip = ip;
            nearest = Some((local_x, local_y, obstacle.radius));
        }
    }

    let force = match nearest {
        Some((local_x, local_y, radius)) => {
            // the closer the obstacle, the harder the lateral shove
            let multiplier = 1.0 + (box_length - local_x) / box_length;
            let lateral = (radius - local_y) * multiplier;
            let braking = (radius - local_x) * BRAKING_WEIGHT;
            side * lateral + agent.heading * braking
        }
        None => V::zeros(),
    };

    (force, tagged)
}
