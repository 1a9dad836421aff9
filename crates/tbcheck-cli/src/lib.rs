//! tbcheck CLI library.
//!
//! Commands for running device test benches and checking library sources,
//! plus the project configuration they share.

pub mod commands;
pub mod config;
