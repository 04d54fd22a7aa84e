//! Waypoint paths, jump descriptors, and graph search.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod graph;
pub mod jump;
pub mod path;

pub use astar::find_path;
pub use graph::{Graph, GraphEdge};
pub use jump::{JumpDescriptor, JumpSolution};
pub use path::{Path, PathConfig};
