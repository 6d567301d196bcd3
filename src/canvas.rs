// The persistent ink layer. Strokes accumulate here frame after frame and only
// `clear` (or a change of frame size) wipes them.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::types::{Color, Point};

pub struct StrokeCanvas {
    image: Option<RgbImage>, // None until the first frame tells us the size
}

impl StrokeCanvas {
    /// Unsized canvas; it gets its dimensions from the first frame.
    pub fn new() -> Self {
        Self { image: None }
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            image: Some(RgbImage::new(width, height)),
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }

    /// Lazily create the buffer, or recreate it (blank) when the frame size changed.
    /// Returns true when the buffer was (re)initialized.
    pub fn ensure_size(&mut self, width: u32, height: u32) -> bool {
        if self.dimensions() == Some((width, height)) {
            return false;
        }
        self.image = Some(RgbImage::new(width, height));
        true
    }

    /// Every pixel back to zero.
    pub fn clear(&mut self) {
        if let Some(img) = self.image.as_mut() {
            img.pixels_mut().for_each(|px| *px = Rgb([0, 0, 0]));
        }
    }

    pub fn is_blank(&self) -> bool {
        self.image
            .as_ref()
            .is_none_or(|img| img.pixels().all(|px| px.0 == [0, 0, 0]))
    }

    pub fn as_image(&self) -> Option<&RgbImage> {
        self.image.as_ref()
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        let img = self.image.as_ref()?;
        if x >= img.width() || y >= img.height() {
            return None;
        }
        Some(Color::from(*img.get_pixel(x, y)))
    }

    /// Draw a straight line of `width` pixels from `from` to `to`.
    /// Discs are stamped every pixel along the segment, which also gives round caps
    /// so consecutive segments join without gaps. Parts off the canvas are clipped.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: Color, width: u32) {
        let Some(img) = self.image.as_mut() else {
            return;
        };
        let radius = (width / 2) as i32;
        let px = color.to_pixel();

        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;
        let steps = dx.abs().max(dy.abs()).ceil() as i32;
        if steps == 0 {
            draw_filled_circle_mut(img, (from.x, from.y), radius, px);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.x as f32 + dx * t).round() as i32;
            let y = (from.y as f32 + dy * t).round() as i32;
            draw_filled_circle_mut(img, (x, y), radius, px);
        }
    }
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        Self::new()
    }
}
