//! mindscreen-cli library root.
//!
//! Exposes the config layer and the interactive flows so integration tests
//! can drive them with scripted input, without going through `main`.

pub mod commands;
pub mod config;
pub mod state;
pub mod terminal;
