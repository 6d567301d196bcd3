// Opens a camera and hands out decoded RGB frames.
// Visual expectation: each `next_frame()` is one fresh image of what the camera sees.

use crate::app::FrameSource;
use crate::error::{Error, Result};
use crate::types::Frame;

use image::RgbImage;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};
use tracing::{info, warn};

// A small wrapper around nokhwa::Camera so the loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (falls back if not exact).
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );

        // Ask for RGB frames in the mode closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!(
            index,
            requested = %format!("{width}x{height}"),
            actual = %format!("{}x{}", actual.width(), actual.height()),
            "camera opened"
        );

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Stop the stream. Dropping the capture does the same; this just makes it explicit and logged.
    pub fn release(mut self) {
        if let Err(e) = self.cam.stop_stream() {
            warn!("Stop stream: {e}");
        }
    }
}

impl FrameSource for CameraCapture {
    fn next_frame(&mut self) -> Result<Frame> {
        // Blocks until a new frame is ready.
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // Rewrap the raw bytes so we never depend on nokhwa's `image` version matching ours.
        let (w, h) = rgb_img.dimensions();
        let image = RgbImage::from_raw(w, h, rgb_img.into_raw())
            .ok_or_else(|| Error::CameraFrame(format!("Decode RGB: short buffer for {w}x{h}")))?;

        Ok(Frame::new(image))
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
