//! Board configuration.
//!
//! Every tunable of the pipeline lives here. A JSON file may override any subset of
//! fields; whatever it leaves out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Color, Hsv, HsvRange};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub camera: CameraConfig,
    pub tracking: TrackingConfig,
    pub stroke: StrokeConfig,
    pub logging: LoggingConfig,
}

/// Which camera to open and what to ask it for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Device index (0 = default webcam).
    pub index: u32,
    /// Requested width; the device may pick the closest mode it supports.
    pub width: u32,
    /// Requested height.
    pub height: u32,
    /// Flip every frame horizontally so moving right draws right.
    pub mirror: bool,
}

/// Segmentation, blob selection and smoothing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Target color as inclusive HSV bounds (h in 0..180).
    pub color_range: HsvRange,
    /// Side of the square structuring element used for opening/closing. Must be odd.
    pub kernel_size: u32,
    /// Blobs with a smaller enclosed area are treated as noise.
    pub min_blob_area: f64,
    /// EMA factor: lower is smoother but lags more.
    pub smoothing_alpha: f64,
}

/// How strokes and the tip indicator are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    /// Line width in pixels.
    pub width: u32,
    /// Weight of the canvas in the composite (the frame always has weight 1).
    pub canvas_weight: f32,
    /// Radius of the dot marking the tracked tip; 0 disables it.
    pub indicator_radius: u32,
    pub indicator_color: Color,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "glass_board=debug,warn").
    pub level: String,
    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: 1280,
            height: 720,
            mirror: true,
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            // bright yellow
            color_range: HsvRange::new(Hsv::new(20, 100, 100), Hsv::new(30, 255, 255)),
            kernel_size: 5,
            min_blob_area: 800.0,
            smoothing_alpha: 0.2,
        }
    }
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            width: 7,
            canvas_weight: 0.8,
            indicator_radius: 7,
            indicator_color: Color::YELLOW,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl BoardConfig {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject settings the pipeline cannot run with. Called once at startup.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        if cam.width == 0 || cam.height == 0 {
            return Err(Error::config(format!(
                "camera resolution must be non-zero, got {}x{}",
                cam.width, cam.height
            )));
        }

        let HsvRange { lower, upper } = self.tracking.color_range;
        for (name, lo, hi) in [
            ("hue", lower.h, upper.h),
            ("saturation", lower.s, upper.s),
            ("value", lower.v, upper.v),
        ] {
            if lo > hi {
                return Err(Error::config(format!(
                    "{name} lower bound {lo} exceeds upper bound {hi}"
                )));
            }
        }
        if upper.h > 179 {
            return Err(Error::config(format!(
                "hue upper bound {} is outside 0..=179",
                upper.h
            )));
        }

        let k = self.tracking.kernel_size;
        if k == 0 || k % 2 == 0 || k > 255 {
            return Err(Error::config(format!(
                "kernel size must be odd and within 1..=255, got {k}"
            )));
        }

        let area = self.tracking.min_blob_area;
        if !area.is_finite() || area < 0.0 {
            return Err(Error::config(format!(
                "minimum blob area must be a non-negative number, got {area}"
            )));
        }

        let alpha = self.tracking.smoothing_alpha;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::config(format!(
                "smoothing alpha must be within (0, 1], got {alpha}"
            )));
        }

        if self.stroke.width == 0 {
            return Err(Error::config("stroke width must be at least 1"));
        }
        let weight = self.stroke.canvas_weight;
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::config(format!(
                "canvas weight must be a non-negative number, got {weight}"
            )));
        }

        Ok(())
    }
}
