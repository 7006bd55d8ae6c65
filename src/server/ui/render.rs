//! Main server UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::server::state::{ServerState, ServerView};

use super::{help, lobby, tally};

/// Render the server UI based on current state.
pub fn render(frame: &mut Frame, state: &ServerState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Last history message
        Constraint::Length(3), // Command input
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    match state.current_view {
        ServerView::Lobby => lobby::render(frame, chunks[1], state),
        ServerView::Tally => tally::render(frame, chunks[1], state),
        ServerView::Help => help::render(frame, chunks[1]),
    }
    render_command_history(frame, chunks[2], state);
    render_command_input(frame, chunks[3], state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &ServerState) {
    let (showing, color) = match state.current {
        Some(i) => (format!("Q{}/{}", i + 1, state.questions.len()), Color::Green),
        None => ("nothing".to_string(), Color::Yellow),
    };

    let header_text = format!(
        " Showing: {}  |  Port: {}  |  Connected: {}  |  Answered: {}",
        showing,
        state.port,
        state.connected_count(),
        state.answered_count()
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(color).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Alternatives Room ")
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

fn render_command_history(frame: &mut Frame, area: Rect, state: &ServerState) {
    let last_msg = state
        .command_history
        .last()
        .map(|s| s.as_str())
        .unwrap_or("");

    let history = Paragraph::new(last_msg)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(history, area);
}

fn render_command_input(frame: &mut Frame, area: Rect, state: &ServerState) {
    let input = Paragraph::new(format!("> {}", state.command_input))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(input, area);

    let cursor_x = area.x + 3 + state.command_input.chars().count() as u16;
    frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
}
