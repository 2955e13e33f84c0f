use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{
    ui::{bold_style, dim_style, frame_layout, legend, status},
    App, ManagerMode,
};

const LEGEND: &str =
    "(enter) start / (a)dd / (b)ulk add / (i)mport / (e)xport / (d)elete / (x) clear all / (p)ronounce / (q)uit";

fn input_title(mode: ManagerMode) -> &'static str {
    match mode {
        ManagerMode::Browse => "",
        ManagerMode::AddWord => " New word (enter to add, esc to cancel) ",
        ManagerMode::BulkAdd => " Words, one per line (^s to add, esc to cancel) ",
        ManagerMode::ImportPath => " File to load (enter to load, esc to cancel) ",
    }
}

fn input_height(mode: ManagerMode) -> u16 {
    match mode {
        ManagerMode::Browse => 0,
        ManagerMode::BulkAdd => 8,
        ManagerMode::AddWord | ManagerMode::ImportPath => 3,
    }
}

pub fn render_word_manager(app: &mut App, f: &mut Frame) {
    let (body, status_area, legend_area) = frame_layout(f.area());
    let mode = app.manager.mode;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Min(3),    // words
            Constraint::Length(input_height(mode)),
        ])
        .split(body);

    f.render_widget(
        Paragraph::new(Span::styled("Spelling practice", bold_style())),
        chunks[0],
    );

    let items: Vec<ListItem> = if app.words.is_empty() {
        vec![ListItem::new(Span::styled(
            "No words yet. Press (a) to add one or (i) to load a file.",
            dim_style(),
        ))]
    } else {
        app.words
            .words()
            .iter()
            .enumerate()
            .map(|(i, w)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3}. ", i + 1), dim_style()),
                    Span::raw(w.clone()),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::bordered().title(format!(" Words ({}) ", app.words.len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state =
        ListState::default().with_selected((!app.words.is_empty()).then_some(app.manager.selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    if mode != ManagerMode::Browse {
        let input = Paragraph::new(format!("{}_", app.manager.input))
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(input_title(mode)));
        f.render_widget(input, chunks[2]);
    }

    f.render_widget(status(app.status.as_deref()), status_area);
    f.render_widget(legend(LEGEND), legend_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_only_shown_while_editing() {
        assert_eq!(input_height(ManagerMode::Browse), 0);
        assert!(input_height(ManagerMode::BulkAdd) > input_height(ManagerMode::AddWord));
        assert!(input_title(ManagerMode::BulkAdd).contains("^s"));
    }
}
