//! Glass board: hold up a brightly colored marker in front of the webcam and draw in the air.
//!
//! Each frame the marker is segmented in HSV, its largest blob is picked, the blob's top
//! point is smoothed and joined to last frame's point on a persistent canvas, and the
//! canvas is blended over the live video.

pub mod app;
pub mod blob;
pub mod camera;
pub mod canvas;
pub mod compose;
pub mod config;
pub mod draw;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sampler;
pub mod segment;
pub mod smoothing;
pub mod tracker;
pub mod types;

pub use config::BoardConfig;
pub use error::{Error, Result};
pub use pipeline::DrawingPipeline;
