//! Shared primitives for the restgen workspace: column value holders,
//! search configuration, and the fitness/evaluation snapshot model that the
//! dependency-inference engine consumes.

mod config;
mod fitness;
mod value;

pub use config::SearchConfig;
pub use fitness::{
    ActionExecutionInfo, CallSnapshot, EvaluatedSequence, ExecutionFeedback, FitnessView,
    TargetFitness,
};
pub use value::{Gene, GeneKind, GeneValue};
