//! CLI library components for the attribute mapper.

pub mod logging;
pub mod pipeline;
