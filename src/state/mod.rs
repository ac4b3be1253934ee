pub mod config;
pub mod geometry;
pub mod touch;

pub use config::ViewerConfig;
pub use geometry::{pinch_distance, Point, Viewport};
pub use touch::TapTracker;
