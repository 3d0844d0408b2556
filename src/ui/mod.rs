//! Terminal rendering for the dock window viewer.
//!
//! - **canvas**: Off-screen character grid
//! - **renderer**: Draws a dock window into a canvas and flushes it to the terminal

pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, Style};
pub use renderer::DockRenderer;
