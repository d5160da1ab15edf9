//! Home view: model menu and backend status.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::presenter;
use crate::domain::Domain;
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_footer, render_header};

/// Last known inference service state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Checking,
    Healthy(String),
    Unreachable,
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub backend_url: String,
    pub backend_status: BackendStatus,
    pub feedback_configured: bool,
}

fn blurb(domain: Domain) -> &'static str {
    match domain {
        Domain::Chd => "Analyzes age, cholesterol, blood pressure and lifestyle habits.",
        Domain::Stroke => "Evaluates age, hypertension, heart disease and glucose levels.",
        Domain::Diabetes => "Analyzes glucose levels, BMI, age and other lab values.",
    }
}

pub fn render_home(f: &mut Frame, area: Rect, state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], "Home", "Health Risk Prediction");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_models(f, columns[0]);
    render_status(f, columns[1], state);

    render_footer(
        f,
        chunks[2],
        key_hints(&[
            ("1-3", "Select Model"),
            ("F", "Suggestion"),
            ("A", "About"),
            ("H", "Check Backend"),
            ("Q", "Quit"),
        ]),
    );
}

fn render_models(f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    for (i, domain) in Domain::ALL.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" [{}] ", i + 1), MedicalTheme::key_hint()),
            Span::styled(format!("{} ", presenter::icon(*domain)), MedicalTheme::focused()),
            Span::styled(format!("{} Detection", domain.title()), MedicalTheme::title()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("       {}", blurb(*domain)),
            MedicalTheme::text_secondary(),
        )));
        lines.push(Line::from(""));
    }

    let block = Block::default()
        .title(Span::styled(" Prediction Models ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status(f: &mut Frame, area: Rect, state: &HomeState) {
    let (status_text, status_style) = match &state.backend_status {
        BackendStatus::Unknown => ("not checked".to_string(), MedicalTheme::text_muted()),
        BackendStatus::Checking => ("checking...".to_string(), MedicalTheme::info()),
        BackendStatus::Healthy(status) => (status.clone(), MedicalTheme::success()),
        BackendStatus::Unreachable => ("unreachable".to_string(), MedicalTheme::danger()),
    };

    let (relay_text, relay_style) = if state.feedback_configured {
        ("configured", MedicalTheme::success())
    } else {
        ("not configured", MedicalTheme::warning())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Backend: ", MedicalTheme::text_secondary()),
            Span::styled(state.backend_url.clone(), MedicalTheme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Status:  ", MedicalTheme::text_secondary()),
            Span::styled(status_text, status_style),
        ]),
        Line::from(vec![
            Span::styled("  Feedback relay: ", MedicalTheme::text_secondary()),
            Span::styled(relay_text, relay_style),
        ]),
    ];

    let block = Block::default()
        .title(Span::styled(" System Status ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_menu_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).expect("terminal");
        let state = HomeState {
            backend_url: "http://127.0.0.1:5328/api".to_string(),
            backend_status: BackendStatus::Unreachable,
            feedback_configured: false,
        };
        terminal
            .draw(|f| render_home(f, f.area(), &state))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Chronic Heart Disease Detection"));
        assert!(text.contains("unreachable"));
    }
}
