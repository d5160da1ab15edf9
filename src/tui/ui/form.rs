//! Risk parameter entry form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{presenter, FormController, FormError};
use crate::domain::{AssessmentRequest, Domain, FieldKind, FieldSpec, FieldValue};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, notice_line, render_footer, render_header};

const LABEL_WIDTH: usize = 28;
const SLIDER_CELLS: usize = 12;

/// View state wrapped around one domain's controller.
pub struct FormViewState {
    pub controller: FormController,
    pub selected: usize,
    /// Text being typed into the selected numeric field, not yet applied
    pub edit_buffer: Option<String>,
    pub errors: Vec<String>,
    /// Fake progress for the in-flight animation (0.0 to 1.0)
    pub progress: f64,
}

impl FormViewState {
    #[must_use]
    pub fn new(domain: Domain) -> Self {
        Self {
            controller: FormController::new(domain),
            selected: 0,
            edit_buffer: None,
            errors: Vec::new(),
            progress: 0.0,
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.controller.domain()
    }

    #[must_use]
    pub fn selected_spec(&self) -> &'static FieldSpec {
        &self.controller.fields()[self.selected]
    }

    pub fn next_field(&mut self) {
        if self.commit_edit() {
            self.selected = (self.selected + 1) % self.controller.fields().len();
        }
    }

    pub fn prev_field(&mut self) {
        if self.commit_edit() {
            let len = self.controller.fields().len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Numeric fields take digits into the edit buffer; flags take `0`/`1`
    /// immediately. Anything else is ignored.
    pub fn input_char(&mut self, c: char) {
        let spec = self.selected_spec();
        match spec.kind {
            FieldKind::Numeric { .. } if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.edit_buffer.get_or_insert_with(String::new).push(c);
                self.errors.clear();
            }
            FieldKind::Flag { .. } if c == '0' || c == '1' => {
                self.apply(|controller| controller.set(spec.key, &c.to_string()));
            }
            _ => {}
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.edit_buffer.take().is_some()
    }

    /// Apply the edit buffer to the selected field. Returns `false` (and
    /// records the error) if the text was rejected.
    pub fn commit_edit(&mut self) -> bool {
        let Some(buffer) = self.edit_buffer.take() else {
            return true;
        };
        if buffer.is_empty() {
            return true;
        }
        let key = self.selected_spec().key;
        self.apply(|controller| controller.set(key, &buffer))
    }

    /// Step the selected field (arrow keys).
    pub fn step_selected(&mut self, direction: i8) {
        self.edit_buffer = None;
        let key = self.selected_spec().key;
        self.apply(|controller| controller.step(key, direction));
    }

    fn apply(&mut self, op: impl FnOnce(&mut FormController) -> Result<(), FormError>) -> bool {
        match op(&mut self.controller) {
            Ok(()) => {
                self.errors.clear();
                true
            }
            Err(e) => {
                self.errors = vec![e.to_string()];
                false
            }
        }
    }

    /// Commit pending input and start a submission. Returns the snapshot to
    /// send, or `None` if the form refused.
    pub fn begin_submit(&mut self) -> Option<AssessmentRequest> {
        if !self.commit_edit() {
            return None;
        }
        match self.controller.begin_submit() {
            Ok(snapshot) => {
                self.errors.clear();
                self.progress = 0.0;
                Some(snapshot)
            }
            Err(FormError::Invalid(errors)) => {
                self.errors = errors;
                None
            }
            Err(FormError::InFlight) => None,
            Err(e) => {
                self.errors = vec![e.to_string()];
                None
            }
        }
    }

    /// Back to defaults ("Start New Assessment").
    pub fn reset(&mut self) {
        if self.controller.reset().is_ok() {
            self.edit_buffer = None;
            self.errors.clear();
            self.selected = 0;
        }
    }

    /// Text shown in a field's value column.
    #[must_use]
    pub fn field_text(&self, index: usize) -> String {
        if index == self.selected {
            if let Some(buffer) = &self.edit_buffer {
                return buffer.clone();
            }
        }
        let spec = &self.controller.fields()[index];
        self.controller.display_value(spec.key).unwrap_or_default()
    }
}

/// Render the parameter form.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormViewState) {
    let domain = state.domain();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &format!("{} {} Risk Prediction", presenter::icon(domain), presenter::short_name(domain)),
        "Enter Your Health Information",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let count = state.controller.fields().len();
    let mid = count.div_ceil(2);
    render_field_column(f, columns[0], state, 0..mid);
    render_field_column(f, columns[1], state, mid..count);

    render_form_footer(f, chunks[2], state);
}

fn render_field_column(f: &mut Frame, area: Rect, state: &FormViewState, range: std::ops::Range<usize>) {
    let fields = state.controller.fields();
    let mut lines = Vec::new();

    for index in range {
        let spec = &fields[index];
        let is_selected = index == state.selected;
        let editing = is_selected && state.edit_buffer.is_some();

        let label_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let mut spans = vec![
            Span::styled(if is_selected { " ▸ " } else { "   " }, MedicalTheme::cursor()),
            Span::styled(format!("{:<LABEL_WIDTH$}", spec.label), label_style),
            Span::styled(
                state.field_text(index),
                if is_selected {
                    MedicalTheme::selected()
                } else {
                    MedicalTheme::text()
                },
            ),
        ];
        if editing {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }
        if let (true, Some(FieldValue::Number(v))) =
            (spec.is_slider(), state.controller.value(spec.key))
        {
            spans.push(Span::styled(format!(" {}", slider_bar(spec, v)), MedicalTheme::info()));
        }
        spans.push(Span::styled(format!("  {}", spec.hint), MedicalTheme::text_muted()));

        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn slider_bar(spec: &FieldSpec, value: f64) -> String {
    let FieldKind::Numeric { min, max, .. } = spec.kind else {
        return String::new();
    };
    let ratio = if max > min { ((value - min) / (max - min)).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * SLIDER_CELLS as f64).round() as usize;
    format!("▕{}{}▏", "█".repeat(filled), "░".repeat(SLIDER_CELLS - filled))
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormViewState) {
    let content = if let Some(first) = state.errors.first() {
        let more = state.errors.len() - 1;
        let suffix = if more > 0 { format!(" (+{more} more)") } else { String::new() };
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(format!("{first}{suffix}"), MedicalTheme::danger()),
        ])
    } else if let Some(notice) = state.controller.notice() {
        notice_line(notice)
    } else {
        key_hints(&[
            ("↑↓", "Navigate"),
            ("←→", "Adjust"),
            ("0-9", "Type"),
            ("Enter", "Predict Risk"),
            ("R", "Reset"),
            ("Esc", "Back"),
        ])
    };

    render_footer(f, area, content);
}
