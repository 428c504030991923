//! Shared fixtures for the cross-crate scenario tests.

pub mod fixtures;

pub mod prelude {
    pub use crate::fixtures::*;
    pub use rand::rngs::StdRng;
    pub use rand::SeedableRng;
}
