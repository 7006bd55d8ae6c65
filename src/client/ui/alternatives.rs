//! The alternatives form as radio rows.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::state::ClientApp;

pub fn render(frame: &mut Frame, area: Rect, app: &ClientApp) {
    let (Ok(wording), Ok(entries)) = (app.form.wording(), app.form.entries()) else {
        return;
    };

    if entries.is_empty() {
        let waiting = Paragraph::new("Waiting for a question...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    }

    let chunks = Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).split(area);

    let prompt = Paragraph::new(wording)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(prompt, chunks[0]);

    let lines: Vec<Line> = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let under_cursor = position == app.cursor;
            let style = if under_cursor {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if under_cursor { ">" } else { " " };
            let radio = if entry.is_checked() { "(*)" } else { "( )" };

            Line::from(vec![
                Span::styled(format!(" {} {} ", marker, radio), style),
                Span::styled(entry.label(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, chunks[1]);
}
