//! Deterministic, engine-agnostic primitives shared by the veer crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod aabb;
pub mod diagnostics;
pub mod id;
pub mod quat;
pub mod rng;
pub mod vec3;

pub use aabb::Aabb;
pub use diagnostics::{DiagnosticsSink, MemorySink, NoopSink, TracingSink};
pub use id::EntityId;
pub use quat::Quat;
pub use rng::{DeterministicRng, SplitMix64};
pub use vec3::Vec3;

/// Fixed simulation timestep, in seconds.
///
/// The integrator assumes the caller drives one `step` per entity per tick at
/// this rate; wall-clock pacing is the caller's concern.
pub const SIM_DT: f32 = 1.0 / 60.0;
