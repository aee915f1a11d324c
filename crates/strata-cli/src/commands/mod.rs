//! CLI command implementations.

pub mod curate;
pub mod run;
pub mod serve;
pub mod split;
