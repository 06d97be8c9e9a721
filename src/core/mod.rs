// Core algorithm exports
pub mod matcher;
pub mod measurement;
pub mod scoring;

pub use matcher::{compare_size_labels, detail_score, rank, MatchResult, Matcher};
pub use measurement::{FootType, Reading};
pub use scoring::{calculate_compatibility, score, FactorScore};
