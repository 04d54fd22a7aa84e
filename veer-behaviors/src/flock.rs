use veer_core::{EntityId, Vec3};
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::agent_state;

/// Push away from indexed neighbors.
///
/// Sums the offsets from each nearby entity and accelerates along the result
/// at full throttle. Neighborhood extent is the world index's query
/// neighborhood.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeparationBehavior;

impl SteeringBehavior for SeparationBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let mut total = Vec3::ZERO;
        world.for_each_nearby_entity(agent, |other| {
            total += state.position - other.position();
            false
        });

        let direction = total.normalized();
        if direction == Vec3::ZERO {
            return Steering::NONE;
        }
        Steering::linear(direction * state.max_acceleration)
    }
}

/// Match the average velocity of nearby steerables.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlignBehavior;

impl SteeringBehavior for AlignBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let mut sum = Vec3::ZERO;
        let mut count = 0u32;
        world.for_each_nearby_entity(agent, |other| {
            if let Some(steer) = other.steer() {
                sum += steer.velocity;
                count += 1;
            }
            false
        });

        if count == 0 {
            return Steering::NONE;
        }
        let average = sum / count as f32;
        Steering::linear(average - state.velocity)
    }
}

/// Pull toward the centroid of nearby steerables.
#[derive(Debug, Default, Clone, Copy)]
pub struct CohesionBehavior;

impl SteeringBehavior for CohesionBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let mut sum = Vec3::ZERO;
        let mut count = 0u32;
        world.for_each_nearby_entity(agent, |other| {
            if other.is_steerable() {
                sum += other.position();
                count += 1;
            }
            false
        });

        if count == 0 {
            return Steering::NONE;
        }
        let centroid = sum / count as f32;
        let direction = (centroid - state.position).normalized();
        Steering::linear(direction * state.max_acceleration)
    }
}
