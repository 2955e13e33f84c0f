use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Default logical canvas size in pad units.
pub const DEFAULT_CANVAS_WIDTH: f64 = 265.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
}

/// One continuous pointer-down to pointer-up path. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Returns `None` for an empty point list.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Where the canvas currently sits in display space (terminal cells for the TUI).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Records pointer movement into strokes. Owns no recognition logic.
#[derive(Debug, Clone)]
pub struct InkSurface {
    logical: CanvasSize,
    display: DisplayRect,
    strokes: Vec<Stroke>,
    current: Option<Vec<Point>>,
}

impl InkSurface {
    pub fn new(logical: CanvasSize, display: DisplayRect) -> Self {
        Self {
            logical,
            display,
            strokes: Vec::new(),
            current: None,
        }
    }

    pub fn set_display(&mut self, display: DisplayRect) {
        self.display = display;
    }

    pub fn display(&self) -> DisplayRect {
        self.display
    }

    pub fn logical_size(&self) -> CanvasSize {
        self.logical
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.current.is_none()
    }

    pub fn is_capturing(&self) -> bool {
        self.current.is_some()
    }

    /// Points of the stroke being drawn right now, for live rendering.
    pub fn pending(&self) -> &[Point] {
        self.current.as_deref().unwrap_or(&[])
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        // a begin without an end finalizes the dangling stroke first
        self.end();
        let point = self.to_logical(x, y);
        self.current = Some(vec![point]);
    }

    pub fn extend(&mut self, x: f64, y: f64) {
        let point = self.to_logical(x, y);
        if let Some(current) = self.current.as_mut() {
            current.push(point);
        }
    }

    pub fn end(&mut self) {
        if let Some(points) = self.current.take() {
            if let Some(stroke) = Stroke::new(points) {
                self.strokes.push(stroke);
            }
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// Snapshot of the finished strokes, handed to the recognizer.
    pub fn take_snapshot(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }

    fn to_logical(&self, x: f64, y: f64) -> Point {
        let scale_x = if self.display.width > 0.0 {
            self.logical.width / self.display.width
        } else {
            1.0
        };
        let scale_y = if self.display.height > 0.0 {
            self.logical.height / self.display.height
        } else {
            1.0
        };

        Point {
            x: ((x - self.display.left) * scale_x).clamp(0.0, self.logical.width),
            y: ((y - self.display.top) * scale_y).clamp(0.0, self.logical.height),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> InkSurface {
        // display is half the logical size, offset by (10, 5)
        InkSurface::new(
            CanvasSize::default(),
            DisplayRect::new(10.0, 5.0, 132.5, 75.0),
        )
    }

    #[test]
    fn test_stroke_rejects_empty_points() {
        assert!(Stroke::new(vec![]).is_none());
    }

    #[test]
    fn test_begin_extend_end_records_one_stroke() {
        let mut ink = surface();
        ink.begin(10.0, 5.0);
        ink.extend(20.0, 15.0);
        ink.extend(30.0, 25.0);
        assert!(ink.is_capturing());
        ink.end();

        assert!(!ink.is_capturing());
        assert_eq!(ink.strokes().len(), 1);
        assert_eq!(ink.strokes()[0].points().len(), 3);
    }

    #[test]
    fn test_coordinates_are_mapped_to_logical_canvas() {
        let mut ink = surface();
        ink.begin(10.0, 5.0);
        ink.extend(142.5, 80.0);
        ink.end();

        let points = ink.strokes()[0].points();
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert_eq!((points[1].x, points[1].y), (265.0, 150.0));
    }

    #[test]
    fn test_points_outside_display_are_clamped() {
        let mut ink = surface();
        ink.begin(0.0, 0.0);
        ink.extend(1000.0, 1000.0);
        ink.end();

        let points = ink.strokes()[0].points();
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert_eq!((points[1].x, points[1].y), (265.0, 150.0));
    }

    #[test]
    fn test_extend_without_begin_is_ignored() {
        let mut ink = surface();
        ink.extend(20.0, 20.0);
        assert!(ink.is_empty());

        ink.begin(20.0, 20.0);
        ink.end();
        ink.extend(40.0, 40.0);
        ink.end();

        assert_eq!(ink.strokes().len(), 1);
        assert_eq!(ink.strokes()[0].points().len(), 1);
    }

    #[test]
    fn test_end_without_begin_is_noop() {
        let mut ink = surface();
        ink.end();
        assert!(ink.strokes().is_empty());
    }

    #[test]
    fn test_clear_discards_strokes_and_pending() {
        let mut ink = surface();
        ink.begin(20.0, 20.0);
        ink.end();
        ink.begin(30.0, 30.0);
        ink.clear();

        assert!(ink.is_empty());
        assert!(!ink.is_capturing());
        ink.end();
        assert!(ink.strokes().is_empty());
    }

    #[test]
    fn test_set_display_changes_mapping() {
        let mut ink = surface();
        ink.set_display(DisplayRect::new(0.0, 0.0, 265.0, 150.0));
        ink.begin(100.0, 50.0);
        ink.end();

        let p = ink.strokes()[0].points()[0];
        assert_eq!((p.x, p.y), (100.0, 50.0));
    }

    #[test]
    fn test_display_rect_contains() {
        let rect = DisplayRect::new(10.0, 5.0, 20.0, 10.0);
        assert!(rect.contains(10.0, 5.0));
        assert!(rect.contains(29.5, 14.5));
        assert!(!rect.contains(30.0, 5.0));
        assert!(!rect.contains(9.9, 8.0));
    }
}
