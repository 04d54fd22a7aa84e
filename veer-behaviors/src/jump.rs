use veer_core::EntityId;
use veer_world::{Steering, SteeringBehavior, World};

/// The canonical jump-slot policy: launches the entity as soon as the run-up
/// marks it ready, and requests no linear acceleration of its own (flight is
/// gravity-only).
#[derive(Debug, Default, Clone, Copy)]
pub struct JumpBehavior;

impl SteeringBehavior for JumpBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let ready = world
            .steerable(agent)
            .map(|s| s.is_jump_ready() && !s.is_jump_taken_off())
            .unwrap_or(false);
        if ready {
            world.take_off(agent);
        }
        Steering::NONE
    }
}
