//! Participant list.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::server::state::ServerState;

pub fn render(frame: &mut Frame, area: Rect, state: &ServerState) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Min(5),    // Participants
        Constraint::Length(2), // Instructions
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new("PARTICIPANTS")
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_participants(frame, chunks[1], state);

    let hint = if state.current.is_some() {
        "'next' for the following question  |  Tab for the tally  |  'help' for commands"
    } else {
        "'next' to show the first question  |  'help' for commands"
    };
    let instructions = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[2]);
}

fn render_participants(frame: &mut Frame, area: Rect, state: &ServerState) {
    let mut participants: Vec<_> = state.sessions.values().collect();
    participants.sort_by_key(|p| p.connected_at);

    let mut lines: Vec<Line> = participants
        .iter()
        .map(|p| {
            let (status, color) = match (p.is_connected(), p.selection) {
                (false, _) => ("leaving".to_string(), Color::Red),
                (true, Some(alternative)) if p.changes > 1 => (
                    format!("chose {} ({} answers)", alternative, p.changes),
                    Color::Green,
                ),
                (true, Some(alternative)) => (format!("chose {}", alternative), Color::Green),
                (true, None) => ("waiting".to_string(), Color::Yellow),
            };
            Line::from(vec![
                Span::styled("  * ", Style::default().fg(Color::Green)),
                Span::styled(format!("{:<10}", p.short_id()), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:<22}", p.addr),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(status, Style::default().fg(color)),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No participants connected yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, area);
}
