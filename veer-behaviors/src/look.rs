use veer_core::EntityId;
use veer_world::{Steering, SteeringBehavior, World};

/// Keep the look target aimed along the current velocity.
///
/// Produces no acceleration; blend it with a movement policy.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaceVelocityBehavior;

impl SteeringBehavior for FaceVelocityBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(entity) = world.get_entity_by_id(agent) else {
            return Steering::NONE;
        };
        let position = entity.position();
        let Some(velocity) = entity.steer().map(|s| s.velocity) else {
            return Steering::NONE;
        };

        if velocity.length_squared() > f32::EPSILON {
            if let Some(steer) = world.steerable_mut(agent) {
                steer.set_look_target(position + velocity);
            }
        }
        Steering::NONE
    }
}
