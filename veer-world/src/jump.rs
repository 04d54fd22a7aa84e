use std::rc::Rc;

use thiserror::Error;
use veer_core::{EntityId, Vec3};
use veer_nav::{JumpDescriptor, JumpSolution};

use crate::entity::BehaviorSlot;
use crate::msgs;
use crate::steering::SteeringBehavior;
use crate::world::World;

/// Recoverable jump failures. State is left untouched on every variant; the
/// caller may retry with different parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JumpError {
    #[error("entity is not inserted to a world")]
    NotInserted,
    #[error("entity has no kinematic extension")]
    NotSteerable,
    #[error("launch equation has no feasible solution under current gravity and speed limits")]
    Unsolvable,
}

impl World {
    /// Initiate a jump through `descriptor`, steering with `run_up` until the
    /// takeoff point is reached.
    ///
    /// Solves the launch equation first; on success the solution is cached on
    /// the descriptor for this entity, the run-up policy becomes the active
    /// behavior, and the entity targets the takeoff position. Target mutation
    /// stays locked until the jump lands or is cancelled.
    pub fn jump(
        &mut self,
        id: &EntityId,
        run_up: Box<dyn SteeringBehavior>,
        descriptor: Rc<JumpDescriptor>,
    ) -> Result<(), JumpError> {
        self.begin_jump(id, Some(run_up), descriptor)
    }

    /// Initiate a jump keeping the currently assigned behavior as the run-up
    /// policy. Used by path followers already steering toward the takeoff
    /// waypoint.
    pub fn initiate_jump(
        &mut self,
        id: &EntityId,
        descriptor: Rc<JumpDescriptor>,
    ) -> Result<(), JumpError> {
        self.begin_jump(id, None, descriptor)
    }

    fn begin_jump(
        &mut self,
        id: &EntityId,
        run_up: Option<Box<dyn SteeringBehavior>>,
        descriptor: Rc<JumpDescriptor>,
    ) -> Result<(), JumpError> {
        let gravity = self.gravity;
        let (jump_speed, max_speed) = match self.get_entity_by_id(id) {
            None => {
                self.report(msgs::NOT_INSERTED, id);
                return Err(JumpError::NotInserted);
            }
            Some(entity) => match entity.steer() {
                None => return Err(JumpError::NotSteerable),
                Some(steer) => (steer.jump_speed, steer.max_speed),
            },
        };

        let Some(solution) = solve_launch(&descriptor, gravity, jump_speed, max_speed) else {
            self.report(msgs::UNSOLVABLE, id);
            return Err(JumpError::Unsolvable);
        };
        descriptor.cache_solution(id.clone(), solution);

        let takeoff = descriptor.takeoff_position();
        if let Some(steer) = self.steerable_mut(id) {
            if let Some(behavior) = run_up {
                steer.behavior = Some(behavior);
            }
            steer.active_slot = BehaviorSlot::Main;
            steer.target_entity = None;
            steer.hide_target_entity = None;
            steer.target_position = Some(takeoff);
            steer.jump_initiated = true;
            steer.jump_ready = false;
            steer.jump_taken_off = false;
            steer.jump_time = 0.0;
            steer.jump_descriptor = Some(descriptor);
        }

        self.report(msgs::JUMP_INITIATED, id);
        Ok(())
    }

    /// Launch: load the cached horizontal velocity, point the vertical
    /// component at `jump_speed`, and disable velocity clamping for the
    /// flight. Returns `false` when no solved descriptor is active.
    pub fn take_off(&mut self, id: &EntityId) -> bool {
        let Some(steer) = self.steerable_mut(id) else {
            return false;
        };
        let Some(solution) = steer
            .jump_descriptor
            .as_ref()
            .and_then(|d| d.solution_for(id))
        else {
            return false;
        };

        steer.velocity = Vec3::new(solution.vx, steer.jump_speed, solution.vz);
        steer.jump_taken_off = true;
        steer.limit_velocity = false;
        true
    }

    /// Reset the jump state machine after landing.
    ///
    /// With `suppress` set (the cancellation path) the landing-height snap and
    /// the completion listener are skipped.
    pub fn complete_jump(&mut self, id: &EntityId, suppress: bool) {
        let landing = {
            let Some(steer) = self.steerable_mut(id) else {
                return;
            };
            steer.jump_initiated = false;
            steer.jump_ready = false;
            steer.jump_taken_off = false;
            steer.velocity = Vec3::ZERO;
            steer.linear_acceleration = Vec3::ZERO;
            steer.jump_time = 0.0;
            steer.limit_velocity = true;
            steer.jump_descriptor.as_ref().map(|d| d.landing_position())
        };

        if suppress {
            return;
        }

        if let Some(landing) = landing {
            if let Some(entity) = self.get_entity_by_id(id) {
                let mut position = entity.position();
                position.y = landing.y;
                self.set_position(id, position);
            }
        }

        self.report(msgs::JUMP_COMPLETED, id);

        let listener = self
            .steerable_mut(id)
            .and_then(|s| s.jump_completion_listener.take());
        if let Some(mut listener) = listener {
            listener(id);
            if let Some(steer) = self.steerable_mut(id) {
                if steer.jump_completion_listener.is_none() {
                    steer.jump_completion_listener = Some(listener);
                }
            }
        }
    }

    /// Abort any jump in progress with a suppressed landing.
    /// Returns `false` when none is.
    pub fn cancel_jump(&mut self, id: &EntityId) -> bool {
        let in_progress = self
            .steerable(id)
            .map(|s| s.jump_initiated || s.jump_taken_off)
            .unwrap_or(false);
        if !in_progress {
            return false;
        }
        self.complete_jump(id, true);
        true
    }

    /// Run-up finished: switch to the jump behavior and mark the entity ready
    /// to take off. Reported but not performed when no jump behavior is set.
    pub(crate) fn make_jump_ready(&mut self, id: &EntityId) {
        let has_jump_behavior = match self.steerable(id) {
            None => return,
            Some(steer) => steer.jump_behavior.is_some(),
        };
        if !has_jump_behavior {
            self.report(msgs::NO_JUMP_BEHAVIOR, id);
            return;
        }

        if let Some(steer) = self.steerable_mut(id) {
            steer.jump_ready = true;
            steer.jump_initiated = true;
            steer.active_slot = BehaviorSlot::Jump;
        }
        self.report(msgs::JUMP_READY, id);

        let listener = self
            .steerable_mut(id)
            .and_then(|s| s.jump_ready_listener.take());
        if let Some(mut listener) = listener {
            listener(id);
            if let Some(steer) = self.steerable_mut(id) {
                if steer.jump_ready_listener.is_none() {
                    steer.jump_ready_listener = Some(listener);
                }
            }
        }
    }
}

/// Solve `0.5·g·t² + v·t = Δy` for the flight time connecting takeoff to
/// landing at fixed vertical launch speed `v`, then derive the horizontal
/// launch velocity. A feasible solution needs a real, finite, non-negative
/// time whose implied horizontal speed stays within `max_speed`; the `+√`
/// root is preferred, falling back to the `−√` root.
fn solve_launch(
    descriptor: &JumpDescriptor,
    gravity: f32,
    jump_speed: f32,
    max_speed: f32,
) -> Option<JumpSolution> {
    let takeoff = descriptor.takeoff_position();
    let landing = descriptor.landing_position();
    let dy = landing.y - takeoff.y;

    let discriminant = jump_speed * jump_speed + 2.0 * gravity * dy;
    if discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();

    check_time((-jump_speed + root) / gravity, takeoff, landing, max_speed)
        .or_else(|| check_time((-jump_speed - root) / gravity, takeoff, landing, max_speed))
}

fn check_time(time: f32, takeoff: Vec3, landing: Vec3, max_speed: f32) -> Option<JumpSolution> {
    if !time.is_finite() || time <= 0.0 {
        return None;
    }
    let vx = (landing.x - takeoff.x) / time;
    let vz = (landing.z - takeoff.z) / time;
    if (vx * vx + vz * vz).sqrt() > max_speed {
        return None;
    }
    Some(JumpSolution { vx, vz, time })
}
