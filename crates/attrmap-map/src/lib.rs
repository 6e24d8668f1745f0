#![deny(unsafe_code)]

pub mod engine;
pub mod matcher;
pub mod merge;
pub mod resolver;

pub use engine::MappingEngine;
pub use matcher::{MatchOutcome, has_placeholder, match_title, match_value, substitute_captures};
pub use merge::merge_passes;
pub use resolver::{Decision, ResolvedSet, decide};
