use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use spelldrill::summary::Summary;

use crate::{
    ui::{bad_style, bold_style, frame_layout, good_style, legend, status},
    App,
};

const LEGEND: &str = "(r)estart / (i) practise incorrect / (b)ack to words / (q)uit";
const LEGEND_NO_RETRY: &str = "(r)estart / (b)ack to words / (q)uit";

fn score_line(summary: &Summary) -> Line<'static> {
    let stats = summary.stats();
    Line::from(vec![
        Span::styled(format!("Correct: {}", stats.correct), good_style()),
        Span::raw("   "),
        Span::styled(format!("Incorrect: {}", stats.incorrect), bad_style()),
        Span::raw("   "),
        Span::styled(format!("Accuracy: {:.1}%", summary.accuracy()), bold_style()),
    ])
}

pub fn render_summary(app: &mut App, f: &mut Frame) {
    let Some(summary) = &app.summary else {
        return;
    };

    let (body, status_area, legend_area) = frame_layout(f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1), // emoji
            Constraint::Length(1), // label
            Constraint::Length(1), // padding
            Constraint::Length(1), // score
            Constraint::Length(1), // padding
            Constraint::Min(1),    // words to practise
        ])
        .split(body);

    let tier = summary.tier();
    f.render_widget(
        Paragraph::new(tier.emoji()).alignment(Alignment::Center),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            tier.label(),
            bold_style().fg(Color::Magenta),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );
    f.render_widget(
        Paragraph::new(score_line(summary)).alignment(Alignment::Center),
        chunks[4],
    );

    if summary.can_retry() {
        let practise = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{} words to practise:", summary.incorrect_count()),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(summary.incorrect_words().join(", ")),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(practise, chunks[6]);
    }

    let keys = if summary.can_retry() {
        LEGEND
    } else {
        LEGEND_NO_RETRY
    };
    f.render_widget(status(app.status.as_deref()), status_area);
    f.render_widget(legend(keys), legend_area);
}
