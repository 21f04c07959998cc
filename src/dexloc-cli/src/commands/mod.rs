//! Command handlers for dexloc CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod configure;
pub mod evolutions;
pub mod show;
