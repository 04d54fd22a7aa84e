//! The fixed-timestep integrator driving steerable entities.

use veer_core::{EntityId, Quat, Vec3, SIM_DT};

use crate::msgs;
use crate::world::World;

impl World {
    /// Advance one steerable entity by one fixed tick.
    ///
    /// Hidden entities are skipped silently; unknown ids and entities without
    /// an assigned behavior are reported through the diagnostics sink and left
    /// untouched. Reentrant calls for the same entity within one tick are
    /// unsupported.
    pub fn step(&mut self, id: &EntityId) {
        let Some(entity) = self.entities.get(id) else {
            self.report(msgs::NOT_INSERTED, id);
            return;
        };
        if entity.hidden {
            return;
        }

        // Pull the active policy out of its slot for the duration of the
        // computation so it can borrow the world.
        let slot = match entity.steer.as_ref() {
            Some(steer) => steer.active_slot,
            None => {
                self.report(msgs::NO_BEHAVIOR, id);
                return;
            }
        };
        let behavior = self
            .steerable_mut(id)
            .and_then(|steer| steer.slot_mut(slot).take());
        let Some(mut behavior) = behavior else {
            self.report(msgs::NO_BEHAVIOR, id);
            return;
        };

        let steering = behavior.compute(id, self);

        // Reinstall unless the policy installed a replacement meanwhile.
        if let Some(steer) = self.steerable_mut(id) {
            let slot_ref = steer.slot_mut(slot);
            if slot_ref.is_none() {
                *slot_ref = Some(behavior);
            }
        }

        let gravity = self.gravity;

        // Acceleration request, clamped to the configured ceiling.
        let mut landed = false;
        {
            let Some(steer) = self.steerable_mut(id) else {
                // The policy removed the entity.
                return;
            };
            steer.linear_acceleration = steering.linear.clamped_length(steer.max_acceleration);

            // Ballistic flight: gravity plus flight-time bookkeeping.
            if steer.jump_taken_off {
                steer.velocity.y += gravity * SIM_DT;
                steer.jump_time += SIM_DT;
                if let Some(flight_time) = steer
                    .jump_descriptor
                    .as_ref()
                    .and_then(|d| d.solution_for(id))
                    .map(|s| s.time)
                {
                    landed = steer.jump_time >= flight_time;
                }
            }
        }
        if landed {
            self.complete_jump(id, false);
        }

        // Integrate velocity, then position through the index.
        let new_position = {
            let Some(entity) = self.entities.get_mut(id) else {
                return;
            };
            let position = entity.position;
            let Some(steer) = entity.steer.as_mut() else {
                return;
            };
            steer.velocity += steer.linear_acceleration * SIM_DT;
            if steer.limit_velocity {
                steer.velocity = steer.velocity.clamped_length(steer.max_speed);
            }
            position + steer.velocity * SIM_DT
        };
        self.set_position(id, new_position);

        self.track_look_target(id);

        // Run-up complete?
        let ready = {
            match self.steerable(id) {
                Some(steer)
                    if steer.jump_initiated && !steer.jump_ready && !steer.jump_taken_off =>
                {
                    steer.jump_descriptor.as_ref().map(|descriptor| {
                        (
                            descriptor.takeoff_position(),
                            descriptor.takeoff_position_satisfaction_radius(),
                        )
                    })
                }
                _ => None,
            }
        };
        if let Some((takeoff, radius)) = ready {
            if let Some(entity) = self.entities.get(id) {
                if entity.position.distance(takeoff) <= radius {
                    self.make_jump_ready(id);
                }
            }
        }
    }

    /// Step every steerable entity once, in id order.
    pub fn step_all(&mut self) {
        let ids: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|(_, entity)| entity.steer.is_some())
            .map(|(id, _)| id.clone())
            .collect();
        for id in ids {
            if self.entities.contains_key(&id) {
                self.step(&id);
            }
        }
    }

    /// Rotate the look direction toward the look target by `look_speed` of
    /// the remaining rotation.
    fn track_look_target(&mut self, id: &EntityId) {
        let look = {
            let Some(entity) = self.entities.get(id) else {
                return;
            };
            let Some(steer) = entity.steer.as_ref() else {
                return;
            };
            steer.look_target.map(|target| {
                (
                    entity.position,
                    steer.look_direction,
                    steer.look_speed,
                    target,
                )
            })
        };
        let Some((position, look_direction, look_speed, target)) = look else {
            return;
        };

        let desired = (target - position).normalized();
        if desired == Vec3::ZERO {
            return;
        }

        let delta = Quat::from_unit_vectors(look_direction, desired);
        let partial = Quat::IDENTITY.slerp(delta, look_speed);
        self.set_look_direction(id, partial.rotate(look_direction));
    }
}
