use veer_core::{EntityId, Vec3};
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::{agent_state, arrive_accel, seek_accel};

/// Slip behind the nearest obstacle relative to the hide-target entity.
///
/// For every indexed neighbor a hiding spot is projected on the far side of
/// the obstacle from the threat, `hide_distance` past its extents; the agent
/// arrives at the closest spot. With no obstacle in range it falls back to
/// fleeing the threat directly.
#[derive(Debug, Clone, Copy)]
pub struct HideBehavior {
    pub hide_distance: f32,
    pub satisfaction_radius: f32,
    pub slow_down_radius: f32,
}

impl HideBehavior {
    pub fn new(hide_distance: f32, satisfaction_radius: f32, slow_down_radius: f32) -> Self {
        Self {
            hide_distance,
            satisfaction_radius,
            slow_down_radius,
        }
    }
}

impl SteeringBehavior for HideBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(threat_id) = world
            .steerable(agent)
            .and_then(|s| s.hide_target_entity().cloned())
        else {
            return Steering::NONE;
        };
        let Some(threat_position) = world.get_entity_by_id(&threat_id).map(|e| e.position())
        else {
            return Steering::NONE;
        };
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let mut best: Option<(f32, Vec3)> = None;
        world.for_each_nearby_entity(agent, |obstacle| {
            if obstacle.id() == &threat_id {
                return false;
            }
            let away = (obstacle.position() - threat_position).normalized();
            if away == Vec3::ZERO {
                return false;
            }
            let size = obstacle.size();
            let clearance = 0.5 * size.x.max(size.y).max(size.z) + self.hide_distance;
            let spot = obstacle.position() + away * clearance;
            let distance = state.position.distance_squared(spot);
            if best.map(|(d, _)| distance < d).unwrap_or(true) {
                best = Some((distance, spot));
            }
            false
        });

        let Some((_, spot)) = best else {
            return Steering::linear(-seek_accel(
                state.position,
                threat_position,
                state.max_acceleration,
            ));
        };

        match arrive_accel(state, spot, self.satisfaction_radius, self.slow_down_radius) {
            Some(accel) => Steering::linear(accel),
            None => {
                if let Some(steer) = world.steerable_mut(agent) {
                    steer.velocity = Vec3::ZERO;
                }
                Steering::NONE
            }
        }
    }
}
