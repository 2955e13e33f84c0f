//! Renders captured strokes into a grayscale bitmap for the OCR engine.
//!
//! The pen layer is filtered the way a browser canvas would apply
//! `contrast(200%) brightness(80%)` before it is composited onto an opaque
//! white page, so thin strokes come out darker than they were drawn.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};

use super::capture::{CanvasSize, Point, Stroke};
use crate::error::RecognizeError;

pub const MIN_SCALE: u32 = 2;
pub const MAX_SCALE: u32 = 8;
/// Longest bitmap edge handed to the OCR engine, in pixels.
pub const MAX_EDGE: u32 = 2048;
const PEN_WIDTH: f64 = 4.0;
/// Luminance of the blue pen (#2563eb).
const PEN_LUMA: u8 = 96;
const BACKGROUND: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub scale: u32,
    pub pen_width: f64,
    pub contrast: f64,
    pub brightness: f64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: MIN_SCALE,
            pen_width: PEN_WIDTH,
            contrast: 2.0,
            brightness: 0.8,
        }
    }
}

/// CSS `contrast()` followed by `brightness()` on a single channel value.
pub fn filter_channel(value: u8, contrast: f64, brightness: f64) -> u8 {
    let v = value as f64 / 255.0;
    let v = ((v - 0.5) * contrast + 0.5).clamp(0.0, 1.0);
    let v = (v * brightness).clamp(0.0, 1.0);
    (v * 255.0).round() as u8
}

pub fn render(strokes: &[Stroke], canvas: CanvasSize, options: RasterOptions) -> GrayImage {
    let scale = options.scale.clamp(MIN_SCALE, MAX_SCALE) as f64;
    let width = bitmap_edge(canvas.width * scale);
    let height = bitmap_edge(canvas.height * scale);

    let mut coverage = vec![0.0_f64; pixel_count(width, height)];
    let radius = options.pen_width * scale / 2.0;

    for stroke in strokes {
        let points = stroke.points();
        if points.len() == 1 {
            stamp_segment(&mut coverage, width, height, points[0], points[0], scale, radius);
        }
        for pair in points.windows(2) {
            stamp_segment(&mut coverage, width, height, pair[0], pair[1], scale, radius);
        }
    }

    let pen = filter_channel(PEN_LUMA, options.contrast, options.brightness) as f64;
    GrayImage::from_fn(width, height, |x, y| {
        let alpha = coverage[pixel_index(width, x, y)];
        let value = BACKGROUND as f64 * (1.0 - alpha) + pen * alpha;
        Luma([value.round() as u8])
    })
}

fn bitmap_edge(scaled: f64) -> u32 {
    if scaled.is_finite() {
        scaled.ceil().clamp(1.0, MAX_EDGE as f64) as u32
    } else {
        MAX_EDGE
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    (width as usize)
        .checked_mul(height as usize)
        .unwrap_or(usize::MAX)
}

fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, RecognizeError> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

fn stamp_segment(
    coverage: &mut [f64],
    width: u32,
    height: u32,
    from: Point,
    to: Point,
    scale: f64,
    radius: f64,
) {
    let (ax, ay) = (from.x * scale, from.y * scale);
    let (bx, by) = (to.x * scale, to.y * scale);

    let min_x = (ax.min(bx) - radius - 1.0).floor().max(0.0) as u32;
    let max_x = ((ax.max(bx) + radius + 1.0).ceil() as u32).min(width - 1);
    let min_y = (ay.min(by) - radius - 1.0).floor().max(0.0) as u32;
    let max_y = ((ay.max(by) + radius + 1.0).ceil() as u32).min(height - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let d = distance_to_segment(x as f64 + 0.5, y as f64 + 0.5, ax, ay, bx, by);
            let alpha = (radius + 0.5 - d).clamp(0.0, 1.0);
            let cell = &mut coverage[pixel_index(width, x, y)];
            if alpha > *cell {
                *cell = alpha;
            }
        }
    }
}

fn distance_to_segment(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        Stroke::new(
            points
                .iter()
                .map(|&(x, y)| Point { x, y, timestamp: 0 })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_filter_channel_matches_css_formulas() {
        assert_eq!(filter_channel(255, 2.0, 0.8), 204);
        assert_eq!(filter_channel(0, 2.0, 0.8), 0);
        assert_eq!(filter_channel(128, 1.0, 1.0), 128);
        // dark grays are pushed to black
        assert_eq!(filter_channel(32, 2.0, 1.0), 0);
    }

    #[test]
    fn test_render_is_at_least_twice_capture_size() {
        let img = render(&[], CanvasSize::default(), RasterOptions::default());
        assert_eq!(img.width(), 530);
        assert_eq!(img.height(), 300);

        let img = render(
            &[],
            CanvasSize::default(),
            RasterOptions {
                scale: 1,
                ..RasterOptions::default()
            },
        );
        assert_eq!(img.width(), 530);
    }

    #[test]
    fn test_oversized_canvas_is_capped() {
        let huge = CanvasSize {
            width: 1.0e9,
            height: 70_000.0,
        };
        let img = render(
            &[stroke(&[(10.0, 10.0), (20.0, 20.0)])],
            huge,
            RasterOptions {
                scale: u32::MAX,
                ..RasterOptions::default()
            },
        );
        assert_eq!(img.width(), MAX_EDGE);
        assert_eq!(img.height(), MAX_EDGE);
        assert!(img.get_pixel(120, 120).0[0] < 255);
    }

    #[test]
    fn test_empty_render_is_opaque_white() {
        let img = render(&[], CanvasSize::default(), RasterOptions::default());
        assert!(img.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_pen_pixels_are_darker_than_the_pen() {
        let strokes = vec![stroke(&[(10.0, 75.0), (250.0, 75.0)])];
        let img = render(&strokes, CanvasSize::default(), RasterOptions::default());

        let on_line = img.get_pixel(260, 150).0[0];
        let far_away = img.get_pixel(260, 20).0[0];
        assert!(on_line < PEN_LUMA, "pen pixel {on_line} not darkened");
        assert_eq!(far_away, 255);
    }

    #[test]
    fn test_single_point_stroke_leaves_a_dot() {
        let strokes = vec![stroke(&[(100.0, 100.0)])];
        let img = render(&strokes, CanvasSize::default(), RasterOptions::default());
        assert!(img.get_pixel(200, 200).0[0] < 255);
    }

    #[test]
    fn test_encode_png_has_signature() {
        let img = render(&[], CanvasSize::default(), RasterOptions::default());
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
