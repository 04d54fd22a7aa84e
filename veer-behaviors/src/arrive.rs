use veer_core::{EntityId, Vec3};
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::{agent_state, arrive_accel};

/// Seek the target position but slow down inside `slow_down_radius` and stop
/// inside `satisfaction_radius`.
#[derive(Debug, Clone, Copy)]
pub struct ArriveBehavior {
    pub satisfaction_radius: f32,
    pub slow_down_radius: f32,
}

impl ArriveBehavior {
    pub fn new(satisfaction_radius: f32, slow_down_radius: f32) -> Self {
        Self {
            satisfaction_radius,
            slow_down_radius,
        }
    }
}

impl SteeringBehavior for ArriveBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(target) = world.steerable(agent).and_then(|s| s.target_position()) else {
            return Steering::NONE;
        };
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        match arrive_accel(state, target, self.satisfaction_radius, self.slow_down_radius) {
            Some(accel) => Steering::linear(accel),
            None => {
                // Arrived: cut any residual drift.
                if let Some(steer) = world.steerable_mut(agent) {
                    steer.velocity = Vec3::ZERO;
                }
                Steering::NONE
            }
        }
    }
}
