//! About view: what the models look at and how submitted data is handled.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::presenter;
use crate::domain::Domain;
use crate::tui::styles::{MedicalTheme, APP_NAME};

use super::{key_hints, render_footer, render_header};

const MISSION: &str = "PredictCare makes health risk prediction accessible to everyone. \
     Machine learning models help you understand your health risks so you can take \
     proactive measures to improve your wellbeing.";

const STEPS: [&str; 4] = [
    "You enter your health parameters in one of the forms",
    "The prediction service's models analyze your data",
    "You receive a risk assessment based on the analysis",
    "The result explains what your risk tier means",
];

const PRIVACY: &str = "Parameters are sent only to the configured prediction service. \
     Nothing you enter is stored after the assessment is shown, and clinical values \
     are redacted from the application log.";

const NOT_A_DIAGNOSIS: &str = "Assessments are estimates based on the information you \
     provide. They are not medical diagnoses and do not replace professional medical \
     advice.";

fn model_summary(domain: Domain) -> &'static str {
    match domain {
        Domain::Chd => {
            "Analyzes age, cholesterol, blood pressure, smoking habits and medical history \
             to assess your risk of developing coronary heart disease."
        }
        Domain::Stroke => {
            "Evaluates age, hypertension, heart disease history, average glucose level \
             and BMI to determine your risk of experiencing a stroke."
        }
        Domain::Diabetes => {
            "Examines glucose levels, BMI, age, lab values and family history to assess \
             your risk of developing diabetes."
        }
    }
}

fn section(lines: &mut Vec<Line<'static>>, heading: &'static str) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(heading, MedicalTheme::title())));
}

fn about_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    section(&mut lines, "Our Mission");
    lines.push(Line::from(Span::styled(MISSION, MedicalTheme::text())));

    section(&mut lines, "How It Works");
    for (i, step) in STEPS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), MedicalTheme::key_hint()),
            Span::styled(*step, MedicalTheme::text()),
        ]));
    }

    section(&mut lines, "Prediction Models");
    for domain in Domain::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", presenter::icon(domain)), MedicalTheme::focused()),
            Span::styled(format!("{} Detection", domain.title()), MedicalTheme::subtitle()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", model_summary(domain)),
            MedicalTheme::text_secondary(),
        )));
    }

    section(&mut lines, "Data Privacy");
    lines.push(Line::from(Span::styled(PRIVACY, MedicalTheme::text())));

    section(&mut lines, "Not a Diagnosis");
    lines.push(Line::from(Span::styled(NOT_A_DIAGNOSIS, MedicalTheme::text())));

    lines
}

pub fn render_about(f: &mut Frame, area: Rect, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(f, chunks[0], &format!("About {APP_NAME}"), "Health Risk Prediction");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    f.render_widget(
        Paragraph::new(about_lines())
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        chunks[1],
    );

    render_footer(
        f,
        chunks[2],
        key_hints(&[("↑/↓", "Scroll"), ("Esc", "Back to Home")]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_renders_models_and_privacy() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|f| render_about(f, f.area(), 0)).expect("draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("About PredictCare"));
        assert!(text.contains("Stroke Detection"));
        assert!(text.contains("Data Privacy"));
    }
}
