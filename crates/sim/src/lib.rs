//! Headless host for the ArmView visualizer: configuration, the command
//! console, and the visualizer that ties pose state to the renderer.

pub mod config;
pub mod console;
pub mod visualizer;

pub use config::{LoadError, ViewerConfig};
pub use console::CommandConsole;
pub use visualizer::RobotVisualizer;
