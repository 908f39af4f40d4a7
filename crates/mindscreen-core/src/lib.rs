//! mindscreen-core
//!
//! Pure domain types shared by the questionnaire logic, the inference
//! collaborators, and the terminal front end. No network or filesystem
//! dependency: this is the shared vocabulary of the mindscreen system.

pub mod error;
pub mod models;
