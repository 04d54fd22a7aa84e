use veer_core::EntityId;
use veer_world::{Steering, SteeringBehavior, World};

/// Evaluate policies in order and return the first non-zero result.
#[derive(Default)]
pub struct PriorityBehavior {
    behaviors: Vec<Box<dyn SteeringBehavior>>,
}

impl PriorityBehavior {
    pub fn new(behaviors: Vec<Box<dyn SteeringBehavior>>) -> Self {
        Self { behaviors }
    }

    pub fn push(&mut self, behavior: Box<dyn SteeringBehavior>) {
        self.behaviors.push(behavior);
    }
}

impl SteeringBehavior for PriorityBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        for behavior in self.behaviors.iter_mut() {
            let steering = behavior.compute(agent, world);
            if steering.linear.length_squared() > f32::EPSILON {
                return steering;
            }
        }
        Steering::NONE
    }
}
