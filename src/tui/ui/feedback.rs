//! Suggestion form view.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{FeedbackField, FeedbackForm, FormError};
use crate::domain::Feedback;
use crate::tui::styles::MedicalTheme;

use super::{key_hints, notice_line, render_footer, render_header};

#[derive(Default)]
pub struct FeedbackViewState {
    pub form: FeedbackForm,
    pub selected: usize,
    pub errors: Vec<String>,
}

impl FeedbackViewState {
    #[must_use]
    pub fn selected_field(&self) -> FeedbackField {
        FeedbackField::ALL[self.selected]
    }

    #[must_use]
    pub fn on_last_field(&self) -> bool {
        self.selected + 1 == FeedbackField::ALL.len()
    }

    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % FeedbackField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        let len = FeedbackField::ALL.len();
        self.selected = (self.selected + len - 1) % len;
    }

    pub fn input_char(&mut self, c: char) {
        if self.form.is_submit_enabled() {
            self.form.push_char(self.selected_field(), c);
            self.form.clear_notice();
            self.errors.clear();
        }
    }

    pub fn delete_char(&mut self) {
        if self.form.is_submit_enabled() {
            self.form.pop_char(self.selected_field());
        }
    }

    /// Returns the record to send, or `None` if the form refused.
    pub fn begin_submit(&mut self) -> Option<Feedback> {
        match self.form.begin_submit() {
            Ok(feedback) => {
                self.errors.clear();
                Some(feedback)
            }
            Err(FormError::Invalid(errors)) => {
                self.errors = errors;
                None
            }
            Err(_) => None,
        }
    }
}

pub fn render_feedback(f: &mut Frame, area: Rect, state: &FeedbackViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(f, chunks[0], "Submit a Suggestion", "Help us improve PredictCare");

    for (i, field) in FeedbackField::ALL.iter().enumerate() {
        render_input(f, chunks[i + 1], state, *field, i == state.selected);
    }

    let footer = if let Some(first) = state.errors.first() {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(first.clone(), MedicalTheme::danger()),
        ])
    } else if !state.form.is_submit_enabled() {
        Line::from(Span::styled("Submitting...", MedicalTheme::text_muted()))
    } else if let Some(notice) = state.form.notice() {
        notice_line(notice)
    } else {
        key_hints(&[
            ("↑↓", "Navigate"),
            ("Enter", if state.on_last_field() { "Submit Suggestion" } else { "Next" }),
            ("Esc", "Back"),
        ])
    };
    render_footer(f, chunks[4], footer);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    state: &FeedbackViewState,
    field: FeedbackField,
    selected: bool,
) {
    let value = state.form.value(field);
    let border_style = if selected {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };
    let title_style = if selected {
        MedicalTheme::focused()
    } else {
        MedicalTheme::text_secondary()
    };

    let mut spans = vec![if value.is_empty() {
        Span::styled(field.placeholder(), MedicalTheme::text_muted())
    } else {
        Span::styled(value.to_string(), MedicalTheme::text())
    }];
    if selected {
        spans.push(Span::styled("▌", MedicalTheme::cursor()));
    }

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label()), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    f.render_widget(
        Paragraph::new(Line::from(spans))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
