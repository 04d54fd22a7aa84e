//! Spatial world index, entity kinematics, and the ballistic-jump state
//! machine.
//!
//! The [`World`] owns every entity and the grid index answering proximity
//! queries; steerable entities carry kinematic state and a pluggable
//! [`SteeringBehavior`] that produces a desired linear acceleration each
//! fixed tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod entity;
pub mod index;
pub mod jump;
pub mod observer;
pub mod steering;
pub mod world;

mod kinematics;

pub use entity::{Entity, Steerable};
pub use index::NearbyRecord;
pub use jump::JumpError;
pub use observer::WorldObserver;
pub use steering::{BlendEntry, BlendedBehavior, IdleBehavior, Steering, SteeringBehavior};
pub use world::World;

pub(crate) mod msgs {
    pub const NOT_INSERTED: &str = "Not inserted to a world.";
    pub const NO_BEHAVIOR: &str = "Has no behavior.";
    pub const UNSOLVABLE: &str = "Equation cannot be solved.";
    pub const JUMP_INITIATED: &str = "Jump initiated.";
    pub const JUMP_READY: &str = "Jump ready.";
    pub const NO_JUMP_BEHAVIOR: &str = "No jump behavior set.";
    pub const JUMP_COMPLETED: &str = "Jump completed.";
}
