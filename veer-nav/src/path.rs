use std::rc::Rc;

use veer_core::{DeterministicRng, Vec3};

use crate::JumpDescriptor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Traversal options for a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathConfig {
    /// Wrap back to the first waypoint after the last.
    pub loops: bool,
    /// Walk the waypoints backwards after reaching either end.
    pub rewind: bool,
    /// Preallocate this many zeroed waypoint slots for `insert_waypoint`.
    pub fixed_length: Option<usize>,
}

/// An ordered list of waypoints with a traversal cursor.
///
/// `next()` advances the cursor honoring the loop/rewind options; plain paths
/// finish after the last waypoint and fire the finish callback once. Jump
/// descriptors may be attached between two existing waypoints so a path
/// follower can launch ballistic jumps mid-route.
pub struct Path {
    waypoints: Vec<Vec3>,
    len: usize,
    index: usize,
    loops: bool,
    rewind: bool,
    rewinding: bool,
    finished: bool,
    jump_descriptors: Vec<Rc<JumpDescriptor>>,
    finish_callback: Option<Box<dyn FnMut()>>,
}

impl Path {
    pub fn new(config: PathConfig) -> Self {
        let waypoints = match config.fixed_length {
            Some(n) => vec![Vec3::ZERO; n],
            None => Vec::new(),
        };
        Self {
            waypoints,
            len: 0,
            index: 0,
            loops: config.loops,
            rewind: config.rewind,
            rewinding: false,
            finished: false,
            jump_descriptors: Vec::new(),
            finish_callback: None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_rewinding(&self) -> bool {
        self.rewinding
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Append a waypoint, growing the list.
    pub fn add_waypoint(&mut self, waypoint: Vec3) {
        self.waypoints.push(waypoint);
        self.len += 1;
    }

    /// Fill the next preallocated slot (fixed-length paths).
    ///
    /// Falls back to appending when no free slot remains.
    pub fn insert_waypoint(&mut self, waypoint: Vec3) {
        if self.len < self.waypoints.len() {
            self.waypoints[self.len] = waypoint;
        } else {
            self.waypoints.push(waypoint);
        }
        self.len += 1;
    }

    /// The waypoint under the cursor, or `None` once the path is finished.
    pub fn current_waypoint(&self) -> Option<Vec3> {
        if self.finished || self.index >= self.len {
            return None;
        }
        self.waypoints.get(self.index).copied()
    }

    /// Index of a waypoint equal to `waypoint`, component-exact.
    pub fn waypoint_index(&self, waypoint: Vec3) -> Option<usize> {
        self.waypoints[..self.len].iter().position(|wp| *wp == waypoint)
    }

    pub fn waypoint_at(&self, index: usize) -> Option<Vec3> {
        if index < self.len {
            self.waypoints.get(index).copied()
        } else {
            None
        }
    }

    pub fn random_waypoint(&self, rng: &mut impl DeterministicRng) -> Option<Vec3> {
        if self.len == 0 {
            return None;
        }
        self.waypoints.get(rng.next_index(self.len)).copied()
    }

    /// Advance the cursor.
    pub fn next(&mut self) {
        if self.finished {
            return;
        }

        if !self.rewinding {
            self.index += 1;
            if self.index == self.len {
                if self.rewind {
                    self.index = self.len.saturating_sub(2);
                    self.rewinding = true;
                } else if self.loops {
                    self.index = 0;
                } else {
                    self.finish();
                }
            }
        } else if self.index == 0 {
            if self.loops {
                self.index = 1;
                self.rewinding = false;
            } else {
                self.finish();
            }
        } else {
            self.index -= 1;
        }
    }

    pub fn restart(&mut self) {
        self.rewinding = false;
        self.finished = false;
        self.index = 0;
    }

    pub fn set_finish_callback(&mut self, callback: Box<dyn FnMut()>) {
        self.finish_callback = Some(callback);
    }

    /// Attach a jump descriptor whose endpoints are existing waypoints.
    ///
    /// Returns `false` when either endpoint is not a waypoint of this path or
    /// the takeoff index does not strictly precede the landing index.
    pub fn add_jump_descriptor(&mut self, descriptor: Rc<JumpDescriptor>) -> bool {
        let Some(takeoff_index) = self.waypoint_index(descriptor.takeoff_position()) else {
            return false;
        };
        let Some(landing_index) = self.waypoint_index(descriptor.landing_position()) else {
            return false;
        };
        if takeoff_index >= landing_index {
            return false;
        }

        self.jump_descriptors.push(descriptor);
        true
    }

    pub fn jump_descriptors(&self) -> &[Rc<JumpDescriptor>] {
        &self.jump_descriptors
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(callback) = self.finish_callback.as_mut() {
            callback();
        }
    }
}
