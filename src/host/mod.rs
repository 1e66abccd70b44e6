//! Host integration: frame scheduling, surface lookup and the per-surface spiral lifecycle.

pub mod instance;
pub mod scheduler;
