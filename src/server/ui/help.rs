//! Help view for the server.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

const COMMANDS: [(&str, &str); 8] = [
    ("show <n>", "Show question n to every participant"),
    ("next", "Show the following question"),
    ("tally", "Answer counts for the question on display"),
    ("lobby", "Connected participants"),
    ("list", "List participants and their selections"),
    ("kick <session>", "Disconnect a participant by session prefix"),
    ("quit / exit", "Shutdown server"),
    ("help / ?", "Show this help"),
];

/// Render the help view.
pub fn render(frame: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVAILABLE COMMANDS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
    ];

    for (command, description) in COMMANDS {
        help_text.push(Line::from(vec![
            Span::styled(format!("  {:<16}", command), Style::default().fg(Color::Yellow)),
            Span::raw(description),
        ]));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        "Press Esc or Enter to close",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(widget, area);
}
