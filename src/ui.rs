pub mod quiz;
pub mod screen;
pub mod summary;
pub mod word_manager;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub(crate) fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub(crate) fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub(crate) fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub(crate) fn good_style() -> Style {
    bold_style().fg(Color::Green)
}

pub(crate) fn bad_style() -> Style {
    bold_style().fg(Color::Red)
}

/// Splits off the two bottom lines every screen uses for key hints and status.
pub(crate) fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1), // status
            Constraint::Length(1), // legend
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

pub(crate) fn legend(text: &str) -> Paragraph<'_> {
    Paragraph::new(Span::styled(text, italic_style()))
}

pub(crate) fn status(message: Option<&str>) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        message.unwrap_or_default(),
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout_reserves_bottom_lines() {
        let (body, status, legend) = frame_layout(Rect::new(0, 0, 80, 24));

        assert_eq!(status.height, 1);
        assert_eq!(legend.height, 1);
        assert_eq!(legend.y, 22);
        assert_eq!(status.y, 21);
        assert_eq!(body.x, HORIZONTAL_MARGIN);
        assert_eq!(body.height, 20);
    }

    #[test]
    fn test_frame_layout_tiny_area() {
        let (body, _, _) = frame_layout(Rect::new(0, 0, 12, 4));
        assert!(body.width <= 12);
    }

    #[test]
    fn test_styles_are_distinct() {
        assert_ne!(good_style(), bad_style());
        assert!(bold_style().add_modifier.contains(Modifier::BOLD));
        assert!(italic_style().add_modifier.contains(Modifier::ITALIC));
    }
}
