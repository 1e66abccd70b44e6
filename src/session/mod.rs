//! Offline rendering of a scene into frame sinks.

pub mod render_session;
pub mod scene;
