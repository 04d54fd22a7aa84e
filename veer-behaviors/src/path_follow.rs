use veer_core::{EntityId, SplitMix64, Vec3};
use veer_nav::Path;
use veer_world::{Steering, SteeringBehavior, World};

use crate::util::{agent_state, seek_accel};

/// Walk a [`Path`] waypoint by waypoint.
///
/// Advances the cursor when the agent enters `satisfaction_radius` of the
/// current waypoint, and initiates any jump descriptor attached to the path
/// whose takeoff is the current waypoint. Finished paths produce no demand.
pub struct PathFollowingBehavior {
    path: Path,
    satisfaction_radius: f32,
}

impl PathFollowingBehavior {
    pub fn new(path: Path, satisfaction_radius: f32) -> Self {
        Self {
            path,
            satisfaction_radius,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }
}

impl SteeringBehavior for PathFollowingBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let Some(waypoint) = self.path.current_waypoint() else {
            return Steering::NONE;
        };
        if state.position.distance(waypoint) <= self.satisfaction_radius {
            self.path.next();
        }
        let Some(waypoint) = self.path.current_waypoint() else {
            return Steering::NONE;
        };

        let jumping = world
            .steerable(agent)
            .map(|s| s.is_jump_initiated() || s.is_jump_taken_off())
            .unwrap_or(false);
        if !jumping {
            let descriptor = self
                .path
                .jump_descriptors()
                .iter()
                .find(|d| d.takeoff_position() == waypoint)
                .cloned();
            if let Some(descriptor) = descriptor {
                // Failure leaves the agent walking the path instead.
                let _ = world.initiate_jump(agent, descriptor);
            }
        }

        Steering::linear(seek_accel(state.position, waypoint, state.max_acceleration))
    }
}

/// Drift between randomly drawn waypoints of a path.
///
/// Draws a waypoint, seeks it, and redraws once inside
/// `satisfaction_radius`. Seeded, so runs are reproducible.
pub struct RandomWaypointBehavior {
    path: Path,
    satisfaction_radius: f32,
    rng: SplitMix64,
    current: Option<Vec3>,
}

impl RandomWaypointBehavior {
    pub fn new(path: Path, satisfaction_radius: f32, seed: u64) -> Self {
        Self {
            path,
            satisfaction_radius,
            rng: SplitMix64::new(seed),
            current: None,
        }
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.current
    }
}

impl SteeringBehavior for RandomWaypointBehavior {
    fn compute(&mut self, agent: &EntityId, world: &mut World) -> Steering {
        let Some(state) = agent_state(world, agent) else {
            return Steering::NONE;
        };

        let arrived = self
            .current
            .map(|wp| state.position.distance(wp) <= self.satisfaction_radius)
            .unwrap_or(true);
        if arrived {
            self.current = self.path.random_waypoint(&mut self.rng);
        }

        let Some(waypoint) = self.current else {
            return Steering::NONE;
        };
        Steering::linear(seek_accel(state.position, waypoint, state.max_acceleration))
    }
}
