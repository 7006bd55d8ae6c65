//! Main client UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::client::state::{ClientApp, ConnectionState};

use super::alternatives;

/// Render the client UI based on connection state.
pub fn render(frame: &mut Frame, app: &ClientApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Status line
        Constraint::Min(5),    // Widget
        Constraint::Length(1), // Controls
    ])
    .margin(1)
    .split(area);

    render_status(frame, chunks[0], app);
    match &app.connection {
        ConnectionState::Closed { message } => render_closed(frame, chunks[1], message),
        _ => alternatives::render(frame, chunks[1], app),
    }
    render_controls(frame, chunks[2], app);
}

fn render_status(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let (text, color) = match &app.connection {
        ConnectionState::Connecting => (format!("Connecting to {}...", app.server_url), Color::Yellow),
        ConnectionState::Connected => (format!("Connected to {}", app.server_url), Color::Green),
        ConnectionState::Disconnected { message } => {
            (format!("{} (retrying)", message), Color::Red)
        }
        ConnectionState::Closed { .. } => ("Disconnected".to_string(), Color::Red),
    };

    let widget = Paragraph::new(text).alignment(Alignment::Right).fg(color);
    frame.render_widget(widget, area);
}

fn render_closed(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(5),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(Span::styled(
            "Press [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let text = match &app.notice {
        Some(notice) => Span::styled(notice.as_str(), Style::default().fg(Color::Red)),
        None => Span::styled(
            "j/k navigate  ·  space select  ·  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    };
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}
