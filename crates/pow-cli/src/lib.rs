//! CLI library components for the prisoner-of-war record pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
