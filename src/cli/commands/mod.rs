//! CLI command implementations.

pub mod analyze;
pub mod run;
pub mod validate;
