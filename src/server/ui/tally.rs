//! Answer counts for the question on display, plus the live answer feed.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::server::state::ServerState;

const BAR_WIDTH: usize = 30;

pub fn render(frame: &mut Frame, area: Rect, state: &ServerState) {
    let chunks = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
        .margin(1)
        .split(area);

    render_tally(frame, chunks[0], state);
    render_live_answers(frame, chunks[1], state);
}

fn render_tally(frame: &mut Frame, area: Rect, state: &ServerState) {
    let Some(question) = state.current_question() else {
        let idle = Paragraph::new("No question on display. Type 'next' or 'show <n>'.")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(idle, area);
        return;
    };

    let counts = state.tally();
    let answered: usize = counts.iter().sum();

    let mut lines = vec![
        Line::from(Span::styled(
            question.wording.as_str(),
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
    ];

    for (index, (answer, count)) in question.answers.iter().zip(&counts).enumerate() {
        let filled = if answered > 0 {
            count * BAR_WIDTH / answered
        } else {
            0
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>3}. ", index), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{:<24}", answer), Style::default().fg(Color::White)),
            Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
            Span::styled(
                format!(" {}", count),
                Style::default().fg(Color::Yellow).bold(),
            ),
        ]));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {}/{} answered ", answered, state.sessions.len()))
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_live_answers(frame: &mut Frame, area: Rect, state: &ServerState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .live_answers
        .iter()
        .rev()
        .take(visible)
        .map(|answer| {
            Line::from(vec![
                Span::styled(
                    format!("{:>4}s ago  ", answer.timestamp.elapsed().as_secs()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<10}", answer.participant),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("Q{} -> {}", answer.question_index + 1, answer.alternative),
                    Style::default().fg(Color::Green),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Live answers ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
