//! mindscreen-inference
//!
//! Outbound collaborators: the prediction service, the recommendation
//! text generator, and the news feed. Each remote call sits behind a trait
//! so callers and tests can substitute their own implementation.

pub mod client;
pub mod error;
pub mod fallback;
pub mod news;
pub mod predict;
pub mod prompt;
pub mod recommend;
