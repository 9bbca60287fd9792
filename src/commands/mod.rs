//! CLI command implementations.

mod capture;
mod config;
mod render;

pub use capture::CaptureCmd;
pub use config::ConfigCmd;
pub use render::RenderCmd;
