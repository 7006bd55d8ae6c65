//! WebSocket server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{Mutex, mpsc};
use tokio::time::MissedTickBehavior;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Result;
use crate::models::Question;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::terminal;

use super::commands::{CommandResult, execute_command};
use super::state::{Participant, ServerState, ServerView};
use super::ui;

/// Shared server state wrapped in Arc<Mutex> for async access.
pub(crate) type SharedState = Arc<Mutex<ServerState>>;

/// Connection supervision timings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Heartbeat {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Heartbeat {
    fn from_config(config: &Config) -> Self {
        Self {
            interval: config.ping_interval(),
            timeout: config.pong_timeout(),
        }
    }
}

/// Run the room server with the host console on this terminal.
pub async fn run(config: &Config, questions: Vec<Question>) -> Result<()> {
    let port = config.port;
    let state = Arc::new(Mutex::new(ServerState::new(questions, port)));

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "server listening");

    let acceptor = tokio::spawn(accept_loop(
        listener,
        Arc::clone(&state),
        Heartbeat::from_config(config),
    ));

    let result = run_tui(state).await;
    acceptor.abort();
    result
}

pub(crate) async fn accept_loop(listener: TcpListener, state: SharedState, heartbeat: Heartbeat) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(handle_connection(stream, addr, state, heartbeat));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to accept connection");
            }
        }
    }
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: SharedState,
    heartbeat: Heartbeat,
) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::warn!(%addr, error = %e, "WebSocket handshake failed");
            return;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();
    let session_id = state.lock().await.connect(Participant::new(addr, tx));
    tracing::debug!(%addr, %session_id, "participant connected");

    if let Err(e) = handle_messages(session_id, ws_stream, rx, &state, heartbeat).await {
        tracing::warn!(%session_id, error = %e, "connection closed with error");
    }

    state.lock().await.disconnect(&session_id);
}

/// Pump one connection until either side closes it or it stops answering
/// pings.
async fn handle_messages(
    session_id: Uuid,
    ws_stream: tokio_tungstenite::WebSocketStream<TcpStream>,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    state: &SharedState,
    heartbeat: Heartbeat,
) -> Result<()> {
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let mut ping = tokio::time::interval(heartbeat.interval);
    ping.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ping.tick().await;
    let mut last_pong = Instant::now();

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => {
                let text = match incoming {
                    Some(Ok(Message::Text(text))) => text.to_string(),
                    Some(Ok(Message::Pong(_))) => {
                        last_pong = Instant::now();
                        continue;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                };

                let reply = handle_client_text(session_id, &text, state).await;
                if let Some(reply) = reply {
                    let json = serde_json::to_string(&reply)?;
                    ws_sender.send(Message::Text(json.into())).await?;
                }
            }
            outgoing = rx.recv() => {
                // A closed channel means the host dropped this participant.
                let Some(msg) = outgoing else { break };
                let json = serde_json::to_string(&msg)?;
                ws_sender.send(Message::Text(json.into())).await?;
            }
            _ = ping.tick() => {
                if last_pong.elapsed() > heartbeat.timeout {
                    tracing::info!(%session_id, "no pong within timeout, dropping connection");
                    break;
                }
                ws_sender.send(Message::Ping(Vec::new().into())).await?;
            }
        }
    }

    let _ = ws_sender.close().await;
    Ok(())
}

/// Apply one text frame from a participant, returning the reply to send, if
/// any.
pub(crate) async fn handle_client_text(
    session_id: Uuid,
    text: &str,
    state: &SharedState,
) -> Option<ServerMessage> {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(%session_id, error = %e, "malformed client message");
            return Some(ServerMessage::malformed(format!("Malformed message: {}", e)));
        }
    };

    let mut state = state.lock().await;
    match msg {
        ClientMessage::AlternativesAnswer { alternative } => {
            match state.record_answer(&session_id, alternative) {
                Ok(()) => {
                    tracing::debug!(%session_id, alternative, "answer recorded");
                    None
                }
                Err(reason) => Some(ServerMessage::malformed(reason)),
            }
        }
    }
}

/// Run the server TUI.
async fn run_tui(state: SharedState) -> Result<()> {
    let mut terminal = terminal::init()?;

    loop {
        {
            let state = state.lock().await;
            if state.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &state))?;
        }

        // Poll with a timeout so connection changes show up without input.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(&state, key.code).await {
                    break;
                }
            }
        }
    }

    terminal::restore()?;
    Ok(())
}

/// Handle keyboard input for the server TUI.
async fn handle_input(state: &SharedState, key: KeyCode) -> bool {
    let mut state = state.lock().await;

    if state.current_view == ServerView::Help {
        if matches!(key, KeyCode::Esc | KeyCode::Enter) {
            state.current_view = state.previous_view.take().unwrap_or_default();
        }
        return false;
    }

    match key {
        KeyCode::Char(c) => {
            state.command_input.push(c);
        }
        KeyCode::Backspace => {
            state.command_input.pop();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut state.command_input);
            match execute_command(&mut state, &input) {
                CommandResult::Ok(Some(msg)) => state.add_to_history(msg),
                CommandResult::Ok(None) => {}
                CommandResult::Error(msg) => state.add_to_history(format!("Error: {}", msg)),
                CommandResult::Quit => return true,
            }
        }
        KeyCode::Esc => {
            state.command_input.clear();
        }
        KeyCode::Tab => {
            state.current_view = match state.current_view {
                ServerView::Lobby => ServerView::Tally,
                ServerView::Tally | ServerView::Help => ServerView::Lobby,
            };
        }
        _ => {}
    }

    false
}
