use ratatui::Frame;

use crate::{
    ui::{quiz::render_quiz, summary::render_summary, word_manager::render_word_manager},
    App, AppState,
};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

pub struct WordManagerScreen;

impl Screen for WordManagerScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_word_manager(app, f);
    }
}

/// Quiz screen - takes `&mut App` because the ink pad records where it was drawn
pub struct QuizScreen;

impl Screen for QuizScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_quiz(app, f);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_summary(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::WordManager => Box::new(WordManagerScreen),
        AppState::Quiz => Box::new(QuizScreen),
        AppState::Summary => Box::new(SummaryScreen),
    }
}
