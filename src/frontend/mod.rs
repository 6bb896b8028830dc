//! Frontend module - Normalization, Patterns, Matching

pub mod normalize;
pub mod pattern;
pub mod matcher;

pub use matcher::{declarations, Declarations, FunctionMatch, ParamMatch, Parameters};
pub use normalize::{normalize, NormalizedSource};
