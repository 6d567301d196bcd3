// Blob selection: from a binary mask to one tracked object.
//
// Only outer borders of top-level regions count (holes are ignored). The region with
// the largest enclosed polygon area wins, as long as it clears `min_area`. Area and
// centroid both come from the border polygon (Green's theorem), not from pixel counts.

use imageproc::contours::{BorderType, find_contours};

use crate::types::{Mask, Point};

/// The dominant region of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Border points in traversal order.
    pub contour: Vec<Point>,
    /// Enclosed polygon area in pixel units.
    pub area: f64,
    /// Area-weighted center (M10/M00, M01/M00).
    pub centroid: (f64, f64),
    /// Border point with the smallest y; leftmost among equals.
    pub topmost: Point,
}

/// Picks the largest external region and rejects it if it is too small to be the marker.
#[derive(Debug, Clone)]
pub struct BlobSelector {
    min_area: f64,
}

impl BlobSelector {
    pub fn new(min_area: f64) -> Self {
        Self { min_area }
    }

    /// `None` when nothing is found, the dominant region is below `min_area`,
    /// or its moments are degenerate.
    pub fn select(&self, mask: &Mask) -> Option<Blob> {
        let contour = find_contours::<i32>(mask.as_image())
            .into_iter()
            .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
            .map(|c| {
                c.points
                    .into_iter()
                    .map(|p| Point::new(p.x, p.y))
                    .collect::<Vec<_>>()
            })
            .map(|pts| (polygon_area(&pts), pts))
            .max_by(|a, b| a.0.total_cmp(&b.0))?;

        let (area, points) = contour;
        if area < self.min_area {
            return None;
        }

        let centroid = centroid(&points)?;
        let topmost = topmost(&points)?;
        Some(Blob {
            contour: points,
            area,
            centroid,
            topmost,
        })
    }
}

/// Twice the signed area contribution of edge (a, b).
#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64
}

fn edges(points: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Shoelace area of the closed polygon through `points`, always non-negative.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f64 = edges(points).map(|(a, b)| cross(a, b)).sum();
    twice.abs() / 2.0
}

/// Polygon centroid from the first-order moments. `None` when M00 is zero.
pub fn centroid(points: &[Point]) -> Option<(f64, f64)> {
    if points.len() < 3 {
        return None;
    }
    let (mut m00, mut m10, mut m01) = (0.0, 0.0, 0.0);
    for (a, b) in edges(points) {
        let c = cross(a, b);
        m00 += c;
        m10 += (a.x + b.x) as f64 * c;
        m01 += (a.y + b.y) as f64 * c;
    }
    // The 1/2 and 1/6 factors cancel down to a 1/3; orientation sign cancels too.
    if m00 == 0.0 {
        return None;
    }
    Some((m10 / (3.0 * m00), m01 / (3.0 * m00)))
}

/// Minimal y, ties resolved by minimal x.
pub fn topmost(points: &[Point]) -> Option<Point> {
    points.iter().copied().min_by_key(|p| (p.y, p.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn mask_with(rects: &[(i32, i32, u32, u32)]) -> Mask {
        let mut img = GrayImage::new(200, 150);
        for &(x, y, w, h) in rects {
            draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(w, h), Luma([255u8]));
        }
        Mask::new(img)
    }

    #[test]
    fn test_empty_mask_has_no_blob() {
        assert_eq!(BlobSelector::new(800.0).select(&Mask::empty(50, 50)), None);
    }

    #[test]
    fn test_small_blob_rejected() {
        let mask = mask_with(&[(20, 20, 10, 10)]);
        assert_eq!(BlobSelector::new(800.0).select(&mask), None);
    }

    #[test]
    fn test_blob_at_threshold_accepted() {
        // Border polygon of a 40x40 patch runs through pixel centers: 39 x 39.
        let mask = mask_with(&[(20, 20, 40, 40)]);
        let blob = BlobSelector::new(1521.0).select(&mask).unwrap();
        assert_eq!(blob.area, 1521.0);
        assert_eq!(BlobSelector::new(1521.5).select(&mask), None);
    }

    #[test]
    fn test_largest_region_wins() {
        let mask = mask_with(&[(10, 10, 30, 30), (100, 60, 50, 50)]);
        let blob = BlobSelector::new(800.0).select(&mask).unwrap();
        assert_eq!(blob.area, 49.0 * 49.0);
        assert_eq!(blob.topmost, Point::new(100, 60));
    }

    #[test]
    fn test_rectangle_centroid_and_topmost() {
        let mask = mask_with(&[(10, 20, 40, 30)]);
        let blob = BlobSelector::new(800.0).select(&mask).unwrap();
        assert!((blob.centroid.0 - 29.5).abs() < 1e-9);
        assert!((blob.centroid.1 - 34.5).abs() < 1e-9);
        // Whole top row ties on y; leftmost wins.
        assert_eq!(blob.topmost, Point::new(10, 20));
    }

    #[test]
    fn test_hole_does_not_split_the_region() {
        let mut img = GrayImage::new(100, 100);
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(60, 60), Luma([255u8]));
        draw_filled_rect_mut(&mut img, Rect::at(30, 30).of_size(20, 20), Luma([0u8]));
        let blob = BlobSelector::new(800.0).select(&Mask::new(img)).unwrap();
        // Area is that of the outer border; the hole is not subtracted.
        assert_eq!(blob.area, 59.0 * 59.0);
    }

    #[test]
    fn test_degenerate_polygons() {
        let line = [Point::new(0, 0), Point::new(5, 0), Point::new(10, 0)];
        assert_eq!(polygon_area(&line), 0.0);
        assert_eq!(centroid(&line), None);
        assert_eq!(centroid(&[Point::new(1, 1)]), None);
        assert_eq!(topmost(&[]), None);
    }

    #[test]
    fn test_topmost_tie_break_is_leftmost() {
        let pts = [
            Point::new(9, 3),
            Point::new(4, 3),
            Point::new(6, 8),
            Point::new(2, 5),
        ];
        assert_eq!(topmost(&pts), Some(Point::new(4, 3)));
    }
}
