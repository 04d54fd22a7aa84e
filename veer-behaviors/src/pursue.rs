use veer_core::{EntityId, Vec3};
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::{agent_state, seek_accel, AgentState};

fn predicted_target_position(
    world: &World,
    agent: &EntityId,
    state: AgentState,
    max_prediction_time: f32,
) -> Option<Vec3> {
    let target_id = world.steerable(agent)?.target_entity()?.clone();
    let target = world.get_entity_by_id(&target_id)?;
    let target_position = target.position();
    let target_velocity = target.steer().map(|s| s.velocity).unwrap_or(Vec3::ZERO);

    let distance = state.position.distance(target_position);
    let speed = state.velocity.length();
    let prediction = if speed <= distance / max_prediction_time {
        max_prediction_time
    } else {
        distance / speed
    };

    Some(target_position + target_velocity * prediction)
}

/// Chase the target entity by seeking where it will be, assuming it keeps its
/// current velocity.
#[derive(Debug, Clone, Copy)]
pub struct PursueBehavior {
    pub max_prediction_time: f32,
}

impl PursueBehavior {
    pub fn new(max_prediction_time: f32) -> Self {
        Self {
            max_prediction_time,
        }
    }
}

impl SteeringBehavior for PursueBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };
        let Some(predicted) =
            predicted_target_position(world, agent, state, self.max_prediction_time)
        else {
            return Steering::NONE;
        };
        Steering::linear(seek_accel(state.position, predicted, state.max_acceleration))
    }
}

/// Run from the target entity's predicted position.
#[derive(Debug, Clone, Copy)]
pub struct EvadeBehavior {
    pub max_prediction_time: f32,
}

impl EvadeBehavior {
    pub fn new(max_prediction_time: f32) -> Self {
        Self {
            max_prediction_time,
        }
    }
}

impl SteeringBehavior for EvadeBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };
        let Some(predicted) =
            predicted_target_position(world, agent, state, self.max_prediction_time)
        else {
            return Steering::NONE;
        };
        Steering::linear(-seek_accel(state.position, predicted, state.max_acceleration))
    }
}
