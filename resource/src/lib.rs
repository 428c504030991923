//! REST resource graph model: paths, actions, verb templates, resource
//! nodes and the sampling operations the mutator builds test sequences
//! from.

mod action;
mod calls;
mod cluster;
mod error;
mod node;
mod path;
mod sequence;

pub use action::{HttpVerb, RestCallAction, RestParam};
pub use calls::ResourceCalls;
pub use cluster::ResourceCluster;
pub use error::{ResourceError, ResourceResult};
pub use node::{ResourceNode, VerbTemplate};
pub use path::{split_words, RestPath, Segment};
pub use sequence::ResourceSequence;
