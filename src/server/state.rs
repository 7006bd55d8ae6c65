//! Server state management.
//!
//! Holds the question deck, the question currently on display and one
//! participant entry per open connection.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Instant;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::models::Question;
use crate::protocol::ServerMessage;

const HISTORY_LIMIT: usize = 100;
const LIVE_FEED_LIMIT: usize = 50;

/// What view the host is currently seeing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServerView {
    /// Connected participants.
    #[default]
    Lobby,
    /// Answer counts for the question on display.
    Tally,
    /// Available commands.
    Help,
}

/// One connected participant.
pub struct Participant {
    pub id: Uuid,
    pub addr: SocketAddr,
    /// Alternative selected for the question on display.
    pub selection: Option<usize>,
    /// Answer messages received for the question on display.
    pub changes: usize,
    pub connected_at: Instant,
    /// Channel to this participant's connection task. Dropping it closes
    /// the connection.
    pub sender: Option<mpsc::UnboundedSender<ServerMessage>>,
}

impl Participant {
    pub fn new(addr: SocketAddr, sender: mpsc::UnboundedSender<ServerMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            addr,
            selection: None,
            changes: 0,
            connected_at: Instant::now(),
            sender: Some(sender),
        }
    }

    /// First eight hex digits of the session id, as shown to the host.
    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }

    pub fn is_connected(&self) -> bool {
        self.sender.is_some()
    }

    /// Send a message to this participant.
    pub fn send(&self, msg: ServerMessage) -> bool {
        if let Some(sender) = &self.sender {
            sender.send(msg).is_ok()
        } else {
            false
        }
    }
}

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// A received answer, for the live feed.
#[derive(Debug, Clone)]
pub struct LiveAnswer {
    pub participant: String,
    pub question_index: usize,
    pub alternative: usize,
    pub timestamp: Instant,
}

/// Main server state.
pub struct ServerState {
    pub questions: Vec<Question>,
    /// Index of the question on display.
    pub current: Option<usize>,
    pub sessions: HashMap<Uuid, Participant>,
    pub current_view: ServerView,
    /// View to return to when leaving Help.
    pub previous_view: Option<ServerView>,
    pub command_input: String,
    pub command_history: Vec<String>,
    pub live_answers: Vec<LiveAnswer>,
    pub should_quit: bool,
    pub port: u16,
}

impl ServerState {
    pub fn new(questions: Vec<Question>, port: u16) -> Self {
        Self {
            questions,
            current: None,
            sessions: HashMap::new(),
            current_view: ServerView::Lobby,
            previous_view: None,
            command_input: String::new(),
            command_history: Vec::new(),
            live_answers: Vec::new(),
            should_quit: false,
            port,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|i| self.questions.get(i))
    }

    /// Register a new connection. It is sent the question on display, if any.
    pub fn connect(&mut self, participant: Participant) -> Uuid {
        let id = participant.id;
        participant.send(ServerMessage::ConnectionAck { session_id: id });
        if let Some(question) = self.current_question() {
            participant.send(ServerMessage::show(question));
        }
        self.add_to_history(format!(
            "Participant {} connected from {}",
            participant.short_id(),
            participant.addr
        ));
        self.sessions.insert(id, participant);
        id
    }

    pub fn disconnect(&mut self, id: &Uuid) {
        if let Some(participant) = self.sessions.remove(id) {
            self.add_to_history(format!("Participant {} disconnected", participant.short_id()));
        }
    }

    /// Put question `index` on display for everyone and clear the previous
    /// selections.
    pub fn show_question(&mut self, index: usize) -> Result<&Question, String> {
        let question = self.questions.get(index).ok_or_else(|| {
            format!(
                "No question {}; the deck has {}.",
                index + 1,
                self.questions.len()
            )
        })?;
        let msg = ServerMessage::show(question);

        for participant in self.sessions.values_mut() {
            participant.selection = None;
            participant.changes = 0;
        }
        self.current = Some(index);
        self.live_answers.clear();
        self.broadcast(msg);

        Ok(&self.questions[index])
    }

    /// Record `alternative` as `id`'s selection for the question on display.
    ///
    /// The error is the text sent back in an `error.malformed` reply.
    pub fn record_answer(&mut self, id: &Uuid, alternative: usize) -> Result<(), String> {
        let Some(question_index) = self.current else {
            return Err("No question is being shown.".to_string());
        };
        let question = &self.questions[question_index];
        if !question.has_alternative(alternative) {
            return Err(format!(
                "Alternative {} is out of range; the question has {}.",
                alternative,
                question.answers.len()
            ));
        }

        let participant = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| "Unknown session.".to_string())?;
        participant.selection = Some(alternative);
        participant.changes += 1;
        let name = participant.short_id();

        self.live_answers.push(LiveAnswer {
            participant: name,
            question_index,
            alternative,
            timestamp: Instant::now(),
        });
        if self.live_answers.len() > LIVE_FEED_LIMIT {
            self.live_answers.remove(0);
        }

        Ok(())
    }

    /// Number of participants currently selecting each alternative.
    pub fn tally(&self) -> Vec<usize> {
        let Some(question) = self.current_question() else {
            return Vec::new();
        };
        let mut counts = vec![0; question.answers.len()];
        for selection in self.sessions.values().filter_map(|p| p.selection) {
            if let Some(count) = counts.get_mut(selection) {
                *count += 1;
            }
        }
        counts
    }

    pub fn connected_count(&self) -> usize {
        self.sessions.values().filter(|p| p.is_connected()).count()
    }

    pub fn answered_count(&self) -> usize {
        self.sessions
            .values()
            .filter(|p| p.selection.is_some())
            .count()
    }

    /// Find a participant by a prefix of its session id.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Uuid, String> {
        let prefix = prefix.to_lowercase();
        let mut candidates = self
            .sessions
            .keys()
            .filter(|id| id.simple().to_string().starts_with(&prefix));

        match (candidates.next(), candidates.next()) {
            (Some(id), None) => Ok(*id),
            (None, _) => Err(format!("No participant matches {}", prefix)),
            (Some(_), Some(_)) => Err(format!("Several participants match {}", prefix)),
        }
    }

    /// Broadcast a message to all connected participants.
    pub fn broadcast(&self, msg: ServerMessage) {
        for participant in self.sessions.values() {
            if participant.is_connected() {
                participant.send(msg.clone());
            }
        }
    }

    pub fn add_to_history(&mut self, msg: String) {
        tracing::info!(target: "alternatives::host", "{}", msg);
        self.command_history.push(msg);
        if self.command_history.len() > HISTORY_LIMIT {
            self.command_history.remove(0);
        }
    }
}
