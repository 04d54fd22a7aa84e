//! The steering policy catalog.
//!
//! Every behavior implements [`SteeringBehavior`] from `veer-world`: a small,
//! independently testable unit producing a desired linear acceleration from
//! the agent's state and the world around it. Compose them with
//! [`BlendedBehavior`](veer_world::BlendedBehavior) or [`PriorityBehavior`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arrive;
pub mod flock;
pub mod hide;
pub mod jump;
pub mod look;
pub mod path_follow;
pub mod priority;
pub mod pursue;
pub mod seek;
pub mod wander;

mod util;

pub use arrive::ArriveBehavior;
pub use flock::{AlignBehavior, CohesionBehavior, SeparationBehavior};
pub use hide::HideBehavior;
pub use jump::JumpBehavior;
pub use look::FaceVelocityBehavior;
pub use path_follow::{PathFollowingBehavior, RandomWaypointBehavior};
pub use priority::PriorityBehavior;
pub use pursue::{EvadeBehavior, PursueBehavior};
pub use seek::{FleeBehavior, SeekBehavior};
pub use wander::{Wander2DBehavior, Wander3DBehavior};

pub use veer_world::{SteeringBehavior, Steering};
