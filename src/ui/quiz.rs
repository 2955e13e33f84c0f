use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas, Points},
        Block, Gauge, List, ListItem, ListState, Paragraph, Wrap,
    },
    Frame,
};
use spelldrill::{
    ink::{CanvasSize, DisplayRect, InkSurface, Point},
    reconciler::Modality,
    SessionState,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    ui::{bad_style, bold_style, dim_style, frame_layout, good_style, legend, status},
    App,
};

const LEGEND: &str =
    "(enter) check/next / (^s) repeat / (^d) dictate / (^w) read ink / (^l) clear ink / (^u) clear / (^r) restart / (esc) words";

const MIN_HISTORY_WIDTH: u16 = 16;

/// The pad is placed on first render; until then no pointer lands on it.
pub fn initial_display() -> DisplayRect {
    DisplayRect::new(0.0, 0.0, 0.0, 0.0)
}

pub fn render_quiz(app: &mut App, f: &mut Frame) {
    let Some(session) = app.session.clone() else {
        return;
    };
    let recognizing = app.is_recognizing();

    let (body, status_area, legend_area) = frame_layout(f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // word x of n, score
            Constraint::Length(1), // progress
            Constraint::Length(1), // padding
            Constraint::Length(3), // answer
            Constraint::Length(4), // result
            Constraint::Min(6),    // ink pad and history
        ])
        .split(body);

    render_header(&session, f, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(session.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", session.progress() * 100.0));
    f.render_widget(gauge, chunks[1]);

    render_answer(&session, recognizing, f, chunks[3]);
    render_result(&session, f, chunks[4]);

    let history_width = session
        .history()
        .iter()
        .map(|r| r.word.width() as u16 + 4)
        .max()
        .unwrap_or(0)
        .max(MIN_HISTORY_WIDTH);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(history_width)])
        .split(chunks[5]);

    render_ink_pad(&mut app.ink, f, bottom[0]);
    render_history(&session, app.history_selected, f, bottom[1]);

    f.render_widget(status(app.status.as_deref()), status_area);
    f.render_widget(legend(LEGEND), legend_area);
}

fn render_header(session: &SessionState, f: &mut Frame, area: Rect) {
    let stats = session.stats();
    let position = session
        .current_index()
        .map(|i| i + 1)
        .unwrap_or(session.words().len());

    let line = Line::from(vec![
        Span::styled(
            format!("Word {} of {}", position, session.words().len()),
            bold_style(),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Score: {}/{}", stats.correct, stats.total),
            dim_style(),
        ),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn modality_label(modality: Option<Modality>) -> &'static str {
    match modality {
        Some(Modality::Typed) => "typed",
        Some(Modality::Dictation) => "spoken",
        Some(Modality::Ink) => "handwritten",
        None => "type, say or write",
    }
}

fn render_answer(session: &SessionState, recognizing: bool, f: &mut Frame, area: Rect) {
    let answer = session.answer();

    let mut title = format!(" Answer ({}) ", modality_label(answer.last_writer()));
    if answer.is_dictating() {
        title.push_str("● listening ");
    }
    if recognizing {
        title.push_str("… recognizing ");
    }

    let mut spans = vec![Span::styled(answer.value().to_string(), bold_style())];
    if !session.is_answered() {
        spans.push(Span::styled("_", dim_style()));
    }

    let field = Paragraph::new(Line::from(spans)).block(Block::bordered().title(title));
    f.render_widget(field, area);
}

fn render_result(session: &SessionState, f: &mut Frame, area: Rect) {
    let result = match session.last_result() {
        Some(result) if session.is_answered() => result,
        _ => {
            let hint = Paragraph::new(Span::styled(
                "Listen to the word and spell it",
                dim_style(),
            ))
            .alignment(Alignment::Center);
            f.render_widget(hint, area);
            return;
        }
    };

    let mut lines = if result.is_correct {
        vec![Line::from(Span::styled("Correct! 🎉", good_style()))]
    } else {
        vec![
            Line::from(Span::styled("Try again! 💪", bad_style())),
            Line::from(format!("Your answer: \"{}\"", result.user_answer)),
        ]
    };
    lines.push(Line::from(format!("Correct word: \"{}\"", result.word)));

    if let Some(translation) = session.translation() {
        let mut spans = vec![Span::styled(
            translation.translation.clone(),
            Style::default().fg(Color::Cyan),
        )];
        if translation.image_url.is_some() {
            spans.push(Span::styled("  (^o) picture", dim_style()));
        }
        lines.push(Line::from(spans));
    }

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

/// Strokes in canvas coordinates; the y axis points up on a ratatui canvas.
fn stroke_paths(ink: &InkSurface) -> Vec<Vec<(f64, f64)>> {
    let height = ink.logical_size().height;
    let flip = |p: &Point| (p.x, height - p.y);

    ink.strokes()
        .iter()
        .map(|s| s.points().iter().map(flip).collect::<Vec<_>>())
        .chain(std::iter::once(ink.pending().iter().map(flip).collect()))
        .filter(|path| !path.is_empty())
        .collect()
}

fn render_ink_pad(ink: &mut InkSurface, f: &mut Frame, area: Rect) {
    let block = Block::bordered().title(" Ink pad (draw with the mouse) ");
    let inner = block.inner(area);
    ink.set_display(DisplayRect::new(
        inner.x as f64,
        inner.y as f64,
        inner.width as f64,
        inner.height as f64,
    ));

    let CanvasSize { width, height } = ink.logical_size();
    let paths = stroke_paths(ink);

    let pad = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for path in &paths {
                if path.len() == 1 {
                    ctx.draw(&Points {
                        coords: path,
                        color: Color::White,
                    });
                }
                for pair in path.windows(2) {
                    ctx.draw(&canvas::Line {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: Color::White,
                    });
                }
            }
        });

    f.render_widget(pad, area);
}

fn render_history(session: &SessionState, selected: Option<usize>, f: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = session
        .history()
        .iter()
        .map(|r| {
            let (mark, style) = if r.is_correct {
                ("✓", good_style())
            } else {
                ("✗", bad_style())
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::raw(" "),
                Span::raw(r.word.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" History (^p) "))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(selected);

    f.render_stateful_widget(list, area, &mut state);
}
