//! Frame sinks.
//!
//! Sinks consume rendered frames in order and are driven by `RenderSession::render_range`.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// PNG sequence output.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
