use veer_core::{EntityId, Vec3};

use crate::World;

/// Result of a steering computation: the desired linear acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub linear: Vec3,
}

impl Steering {
    pub const NONE: Steering = Steering { linear: Vec3::ZERO };

    pub fn linear(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// An acceleration policy.
///
/// Invoked once per tick for the active entity; receives mutable world access
/// so stateful policies can query neighbors, retarget, or trigger privileged
/// jump transitions. Reentrant `step` calls are unsupported.
pub trait SteeringBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering;
}

/// The base policy: requests no movement.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleBehavior;

impl SteeringBehavior for IdleBehavior {
    fn compute(&mut self, _agent: &EntityId, _world: &mut World) -> Steering {
        Steering::NONE
    }
}

/// One weighted member of a [`BlendedBehavior`].
pub struct BlendEntry {
    pub behavior: Box<dyn SteeringBehavior>,
    pub weight: f32,
}

/// Weighted additive composition of policies.
///
/// Evaluation follows list order; the combined result is the weighted sum of
/// the member results, so it is order-independent for side-effect-free
/// members.
#[derive(Default)]
pub struct BlendedBehavior {
    entries: Vec<BlendEntry>,
}

impl BlendedBehavior {
    pub fn new(entries: Vec<BlendEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, behavior: Box<dyn SteeringBehavior>, weight: f32) {
        self.entries.push(BlendEntry { behavior, weight });
    }
}

impl SteeringBehavior for BlendedBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let mut linear = Vec3::ZERO;
        for entry in self.entries.iter_mut() {
            linear += entry.behavior.compute(agent, world).linear * entry.weight;
        }
        Steering { linear }
    }
}
