//! Server command parser and executor.
//!
//! Handles host commands like `show`, `next`, `kick`, etc.

use crate::protocol::ServerMessage;

use super::state::{ServerState, ServerView, short_id};

/// Result of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Ok(Option<String>),
    /// Command failed with an error message.
    Error(String),
    /// Server should quit.
    Quit,
}

/// Parse and execute a command.
pub fn execute_command(state: &mut ServerState, input: &str) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok(None);
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    match command.as_str() {
        "show" => cmd_show(state, args),
        "next" => cmd_next(state),
        "tally" => cmd_view(state, ServerView::Tally),
        "lobby" => cmd_view(state, ServerView::Lobby),
        "list" => cmd_list(state),
        "kick" => cmd_kick(state, args),
        "quit" | "exit" => cmd_quit(state),
        "help" | "?" => {
            if state.current_view != ServerView::Help {
                state.previous_view = Some(state.current_view);
            }
            state.current_view = ServerView::Help;
            CommandResult::Ok(None)
        }
        _ => CommandResult::Error(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    }
}

/// Show question `n` (1-based) to every participant.
fn cmd_show(state: &mut ServerState, args: &[&str]) -> CommandResult {
    let Some(arg) = args.first() else {
        return CommandResult::Error("Usage: show <number>".to_string());
    };
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => show(state, n - 1),
        _ => CommandResult::Error(format!("Invalid question number: {}", arg)),
    }
}

/// Show the question after the one on display, or the first one.
fn cmd_next(state: &mut ServerState) -> CommandResult {
    let next = state.current.map_or(0, |i| i + 1);
    if next >= state.questions.len() {
        return CommandResult::Error("No more questions in the deck.".to_string());
    }
    show(state, next)
}

fn show(state: &mut ServerState, index: usize) -> CommandResult {
    let total = state.questions.len();
    match state.show_question(index) {
        Ok(question) => {
            let msg = format!("Showing question {}/{}: {}", index + 1, total, question.wording);
            state.current_view = ServerView::Tally;
            CommandResult::Ok(Some(msg))
        }
        Err(e) => CommandResult::Error(e),
    }
}

fn cmd_view(state: &mut ServerState, view: ServerView) -> CommandResult {
    state.current_view = view;
    CommandResult::Ok(None)
}

/// List connected participants.
fn cmd_list(state: &mut ServerState) -> CommandResult {
    let mut participants: Vec<String> = state
        .sessions
        .values()
        .map(|p| match p.selection {
            Some(alternative) => format!(
                "{} ({} after {} answers)",
                p.short_id(),
                alternative,
                p.changes
            ),
            None => format!("{} (-)", p.short_id()),
        })
        .collect();
    participants.sort();

    if participants.is_empty() {
        CommandResult::Ok(Some("No participants connected.".to_string()))
    } else {
        CommandResult::Ok(Some(format!("Participants: {}", participants.join(", "))))
    }
}

/// Kick a participant by session id prefix.
fn cmd_kick(state: &mut ServerState, args: &[&str]) -> CommandResult {
    let Some(prefix) = args.first() else {
        return CommandResult::Error("Usage: kick <session>".to_string());
    };

    let id = match state.find_by_prefix(prefix) {
        Ok(id) => id,
        Err(e) => return CommandResult::Error(e),
    };

    if let Some(participant) = state.sessions.get_mut(&id) {
        participant.send(ServerMessage::Kicked {
            reason: "Kicked by host".to_string(),
        });
        participant.sender = None;
        participant.selection = None;
    }
    CommandResult::Ok(Some(format!("Kicked participant: {}", short_id(&id))))
}

/// Quit the server.
fn cmd_quit(state: &mut ServerState) -> CommandResult {
    state.broadcast(ServerMessage::ServerClosing);
    state.should_quit = true;
    CommandResult::Quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::tests::{deck, drain, join};

    #[test]
    fn test_show_and_next_walk_the_deck() {
        let mut state = ServerState::new(deck(), 8712);
        let (_, mut rx) = join(&mut state, 5000);

        assert!(matches!(execute_command(&mut state, "next"), CommandResult::Ok(Some(_))));
        assert_eq!(state.current, Some(0));
        assert_eq!(state.current_view, ServerView::Tally);

        assert!(matches!(execute_command(&mut state, "NEXT"), CommandResult::Ok(Some(_))));
        assert_eq!(state.current, Some(1));
        assert!(matches!(execute_command(&mut state, "next"), CommandResult::Error(_)));

        assert!(matches!(execute_command(&mut state, "show 1"), CommandResult::Ok(Some(_))));
        assert_eq!(state.current, Some(0));

        let shows = drain(&mut rx)
            .into_iter()
            .filter(|m| matches!(m, ServerMessage::AlternativesShow { .. }))
            .count();
        assert_eq!(shows, 3);
    }

    #[test]
    fn test_show_rejects_bad_numbers() {
        let mut state = ServerState::new(deck(), 8712);
        for input in ["show", "show 0", "show x", "show 3"] {
            assert!(
                matches!(execute_command(&mut state, input), CommandResult::Error(_)),
                "{input}"
            );
        }
        assert_eq!(state.current, None);
    }

    #[test]
    fn test_kick_closes_participant_channel() {
        let mut state = ServerState::new(deck(), 8712);
        let (id, mut rx) = join(&mut state, 5000);
        let prefix = short_id(&id);

        let result = execute_command(&mut state, &format!("kick {}", prefix));
        assert!(matches!(result, CommandResult::Ok(Some(_))));
        assert!(!state.sessions[&id].is_connected());

        let received = drain(&mut rx);
        assert!(matches!(received.last(), Some(ServerMessage::Kicked { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_quit_notifies_participants() {
        let mut state = ServerState::new(deck(), 8712);
        let (_, mut rx) = join(&mut state, 5000);
        assert_eq!(execute_command(&mut state, "quit"), CommandResult::Quit);
        assert!(state.should_quit);
        assert_eq!(drain(&mut rx).last(), Some(&ServerMessage::ServerClosing));
    }

    #[test]
    fn test_list_shows_selection_and_answer_count() {
        let mut state = ServerState::new(deck(), 8712);
        let (a, _rx) = join(&mut state, 5000);
        assert!(matches!(
            execute_command(&mut state, "list"),
            CommandResult::Ok(Some(msg)) if msg.ends_with("(-)")
        ));

        execute_command(&mut state, "next");
        state.record_answer(&a, 0).unwrap();
        state.record_answer(&a, 1).unwrap();
        assert_eq!(
            execute_command(&mut state, "list"),
            CommandResult::Ok(Some(format!("Participants: {} (1 after 2 answers)", short_id(&a))))
        );
    }

    #[test]
    fn test_unknown_and_empty_commands() {
        let mut state = ServerState::new(deck(), 8712);
        assert_eq!(execute_command(&mut state, "   "), CommandResult::Ok(None));
        assert!(matches!(execute_command(&mut state, "start"), CommandResult::Error(_)));
    }

    #[test]
    fn test_help_remembers_previous_view() {
        let mut state = ServerState::new(deck(), 8712);
        execute_command(&mut state, "tally");
        execute_command(&mut state, "help");
        assert_eq!(state.current_view, ServerView::Help);
        assert_eq!(state.previous_view, Some(ServerView::Tally));
    }
}
