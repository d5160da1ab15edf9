//! Submission progress and result views.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::{present, presenter, probability_label};
use crate::domain::{Domain, RiskAssessment};
use crate::tui::styles::MedicalTheme;

use super::{key_hints, render_footer, render_header};

/// Render the waiting state while a prediction is in flight.
pub fn render_progress(f: &mut Frame, area: Rect, domain: Domain, progress: f64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &format!("{} Risk Prediction", presenter::short_name(domain)),
        "Processing",
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(2)
        .split(chunks[1]);

    let stage = Paragraph::new(Line::from(Span::styled(
        "Analyzing your health information...",
        MedicalTheme::focused(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(stage, body[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::info())
        .ratio(progress.clamp(0.0, 1.0));
    f.render_widget(gauge, body[1]);

    render_footer(
        f,
        chunks[2],
        Line::from(Span::styled("Processing...", MedicalTheme::text_muted())),
    );
}

/// Render a classified result.
pub fn render_result(f: &mut Frame, area: Rect, assessment: &RiskAssessment) {
    let presentation = present(assessment.domain, assessment.tier);
    let tier_style = MedicalTheme::rgb(presentation.color);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    render_header(
        f,
        chunks[0],
        &presentation.title,
        "Based on the information you provided",
    );

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", presentation.title),
            MedicalTheme::subtitle(),
        ))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let headline = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}  {}", presentation.icon, presentation.headline),
            tier_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            probability_label(assessment.probability),
            MedicalTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(headline, body[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(tier_style)
        .ratio(assessment.probability.clamp(0.0, 1.0))
        .label(format!("{:.1}%", assessment.probability * 100.0));
    f.render_widget(gauge, body[1]);

    let explanation = Paragraph::new(vec![
        Line::from(Span::styled("What does this mean?", MedicalTheme::title())),
        Line::from(Span::styled(presentation.explanation, MedicalTheme::text())),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(explanation, body[2]);

    render_footer(
        f,
        chunks[2],
        key_hints(&[("Enter", "Start New Assessment"), ("Esc", "Back to Home")]),
    );
}
