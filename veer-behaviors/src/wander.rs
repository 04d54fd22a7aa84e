use veer_core::{DeterministicRng, EntityId, SplitMix64, Vec3};
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::agent_state;

/// Meander on the XZ plane by jittering a heading angle each tick.
///
/// Seeded, so identical seeds give identical trajectories.
#[derive(Debug, Clone)]
pub struct Wander2DBehavior {
    angle: f32,
    angle_change: f32,
    rng: SplitMix64,
}

impl Wander2DBehavior {
    pub fn new(seed: u64, angle_change: f32) -> Self {
        Self {
            angle: 0.0,
            angle_change,
            rng: SplitMix64::new(seed),
        }
    }
}

impl SteeringBehavior for Wander2DBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        self.angle += self.rng.next_f32_signed() * self.angle_change;
        let direction = Vec3::new(self.angle.cos(), 0.0, self.angle.sin());
        Steering::linear(direction * state.max_acceleration)
    }
}

/// Meander in all three axes by jittering a heading direction each tick.
#[derive(Debug, Clone)]
pub struct Wander3DBehavior {
    direction: Vec3,
    jitter: f32,
    rng: SplitMix64,
}

impl Wander3DBehavior {
    pub fn new(seed: u64, jitter: f32) -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, -1.0),
            jitter,
            rng: SplitMix64::new(seed),
        }
    }
}

impl SteeringBehavior for Wander3DBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let jittered = self.direction + self.rng.next_jitter_vec3() * self.jitter;
        let normalized = jittered.normalized();
        if normalized != Vec3::ZERO {
            self.direction = normalized;
        }
        Steering::linear(self.direction * state.max_acceleration)
    }
}
