use veer_core::EntityId;
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::{agent_state, seek_accel};

/// Accelerate at full throttle toward the agent's target position.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeekBehavior;

impl SteeringBehavior for SeekBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(target) = world.steerable(agent).and_then(|s| s.target_position()) else {
            return Steering::NONE;
        };
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };
        Steering::linear(seek_accel(state.position, target, state.max_acceleration))
    }
}

/// Accelerate at full throttle away from the agent's target position.
#[derive(Debug, Default, Clone, Copy)]
pub struct FleeBehavior;

impl SteeringBehavior for FleeBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(target) = world.steerable(agent).and_then(|s| s.target_position()) else {
            return Steering::NONE;
        };
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };
        Steering::linear(-seek_accel(state.position, target, state.max_acceleration))
    }
}
