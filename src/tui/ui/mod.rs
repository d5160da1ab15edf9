//! UI module: View components for the TUI.

pub mod about;
pub mod feedback;
pub mod form;
pub mod home;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::application::{Notice, DISCLAIMER};
use crate::tui::styles::{MedicalTheme, APP_NAME};

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("Disclaimer: ", MedicalTheme::text_secondary()),
        Span::styled(DISCLAIMER, MedicalTheme::text_muted()),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// One-line screen header: app name, then the screen's own title.
pub fn render_header(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {APP_NAME} "), MedicalTheme::header_bar()),
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(subtitle.to_string(), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Toast-style line for a notice.
pub fn notice_line(notice: &Notice) -> Line<'static> {
    let style = MedicalTheme::notice(notice.kind);
    let marker = if notice.is_error() { "! " } else { "✓ " };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(notice.title, style),
        Span::styled(" ─ ", MedicalTheme::text_muted()),
        Span::styled(notice.description, MedicalTheme::text()),
    ])
}

/// `[K] Label ` pairs for footers.
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!("[{key}] "), MedicalTheme::key_hint()),
                Span::styled(format!("{desc} "), MedicalTheme::key_desc()),
            ]
        })
        .collect();
    Line::from(spans)
}

/// Footer block with a top border.
pub fn render_footer(f: &mut Frame, area: Rect, content: Line<'static>) {
    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(footer, area);
}
