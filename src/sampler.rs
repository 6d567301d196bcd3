// Ink color = whatever the marker's surface looks like at its centroid.

use crate::types::{Color, Frame};

/// Read a single frame pixel at the rounded centroid. `None` if it lands outside the frame.
pub fn sample_color(frame: &Frame, centroid: (f64, f64)) -> Option<Color> {
    let (cx, cy) = centroid;
    if !cx.is_finite() || !cy.is_finite() {
        return None;
    }
    frame.color_at(cx.round() as i64, cy.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_the_rounded_pixel() {
        let mut frame = Frame::filled(10, 10, Color::BLACK);
        frame.as_image_mut().put_pixel(4, 7, Color::new(1, 2, 3).to_pixel());
        assert_eq!(sample_color(&frame, (3.6, 6.5)), Some(Color::new(1, 2, 3)));
        assert_eq!(sample_color(&frame, (4.0, 7.0)), Some(Color::new(1, 2, 3)));
        assert_eq!(sample_color(&frame, (4.0, 8.0)), Some(Color::BLACK));
    }

    #[test]
    fn test_outside_or_nan_is_none() {
        let frame = Frame::filled(10, 10, Color::WHITE);
        assert_eq!(sample_color(&frame, (10.2, 2.0)), None);
        assert_eq!(sample_color(&frame, (-0.6, 2.0)), None);
        assert_eq!(sample_color(&frame, (f64::NAN, 2.0)), None);
    }
}
