use itertools::{Itertools, MinMaxResult};

use super::capture::Stroke;

/// Geometry the stroke heuristic looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkShape {
    pub stroke_count: usize,
    pub point_count: usize,
    pub width: f64,
    pub height: f64,
}

impl InkShape {
    pub fn measure(strokes: &[Stroke]) -> Self {
        let points = || strokes.iter().flat_map(|s| s.points().iter());

        Self {
            stroke_count: strokes.len(),
            point_count: points().count(),
            width: extent(points().map(|p| p.x).minmax()),
            height: extent(points().map(|p| p.y).minmax()),
        }
    }

    /// Width over height. A flat line is infinitely wide; a single dot is square.
    pub fn aspect_ratio(&self) -> f64 {
        match (self.width == 0.0, self.height == 0.0) {
            (true, true) => 1.0,
            (false, true) => f64::INFINITY,
            _ => self.width / self.height,
        }
    }
}

fn extent(range: MinMaxResult<f64>) -> f64 {
    match range {
        MinMaxResult::NoElements | MinMaxResult::OneElement(_) => 0.0,
        MinMaxResult::MinMax(min, max) => max - min,
    }
}

/// Deterministic stand-in used when OCR fails or reads nothing. The guesses
/// are placeholders keyed on stroke count and aspect ratio only.
pub fn guess(strokes: &[Stroke]) -> String {
    if strokes.is_empty() {
        return String::new();
    }

    let shape = InkShape::measure(strokes);
    let ratio = shape.aspect_ratio();

    let guess = match shape.stroke_count {
        1 if ratio > 3.0 => "l",
        1 if ratio < 0.3 => "i",
        1 => "o",
        2 => "h",
        3..=5 if ratio > 1.5 => "cat",
        3..=5 if ratio < 0.7 => "dog",
        3..=5 => "apple",
        _ => "text",
    };

    guess.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ink::capture::Point;

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
    fn test_measure_counts_and_bounds() {
        let strokes = vec![
            stroke(&[(10.0, 10.0), (50.0, 20.0)]),
            stroke(&[(30.0, 5.0), (20.0, 40.0), (25.0, 30.0)]),
        ];
        let shape = InkShape::measure(&strokes);

        assert_eq!(shape.stroke_count, 2);
        assert_eq!(shape.point_count, 5);
        assert_eq!(shape.width, 40.0);
        assert_eq!(shape.height, 35.0);
    }

    #[test]
    fn test_empty_input_guesses_nothing() {
        assert_eq!(guess(&[]), "");
    }

    #[test]
    fn test_single_stroke_guesses() {
        assert_eq!(guess(&[stroke(&[(0.0, 10.0), (100.0, 20.0)])]), "l");
        assert_eq!(guess(&[stroke(&[(10.0, 0.0), (12.0, 100.0)])]), "i");
        assert_eq!(
            guess(&[stroke(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)])]),
            "o"
        );
    }

    #[test]
    fn test_degenerate_single_strokes() {
        // perfectly flat line
        assert_eq!(guess(&[stroke(&[(0.0, 10.0), (100.0, 10.0)])]), "l");
        // single tap
        assert_eq!(guess(&[stroke(&[(5.0, 5.0)])]), "o");
    }

    #[test]
    fn test_two_strokes_guess_h() {
        let strokes = vec![
            stroke(&[(0.0, 0.0), (0.0, 50.0)]),
            stroke(&[(0.0, 25.0), (20.0, 50.0)]),
        ];
        assert_eq!(guess(&strokes), "h");
    }

    #[test]
    fn test_multi_stroke_guesses_by_ratio() {
        let wide = vec![
            stroke(&[(0.0, 0.0), (100.0, 10.0)]),
            stroke(&[(0.0, 20.0), (100.0, 30.0)]),
            stroke(&[(0.0, 40.0), (100.0, 50.0)]),
        ];
        assert_eq!(guess(&wide), "cat");

        let tall = vec![
            stroke(&[(0.0, 0.0), (10.0, 100.0)]),
            stroke(&[(20.0, 0.0), (30.0, 100.0)]),
            stroke(&[(40.0, 0.0), (50.0, 100.0)]),
            stroke(&[(0.0, 0.0), (50.0, 0.0)]),
        ];
        assert_eq!(guess(&tall), "dog");

        let square = vec![
            stroke(&[(0.0, 0.0), (50.0, 50.0)]),
            stroke(&[(50.0, 0.0), (0.0, 50.0)]),
            stroke(&[(25.0, 0.0), (25.0, 50.0)]),
        ];
        assert_eq!(guess(&square), "apple");
    }

    #[test]
    fn test_many_strokes_fall_through() {
        let strokes: Vec<Stroke> = (0..6)
            .map(|i| stroke(&[(i as f64, 0.0), (i as f64, 10.0)]))
            .collect();
        assert_eq!(guess(&strokes), "text");
    }

    #[test]
    fn test_guess_is_deterministic() {
        let strokes = vec![stroke(&[(0.0, 0.0), (200.0, 10.0)])];
        let first = guess(&strokes);
        for _ in 0..10 {
            assert_eq!(guess(&strokes), first);
        }
    }
}
