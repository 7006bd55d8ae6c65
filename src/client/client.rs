//! WebSocket client implementation.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::tungstenite::Message;

use crate::config::Config;
use crate::error::Result;
use crate::models::Question;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::terminal;

use super::state::{ClientApp, ConnectionState};
use super::ui;

/// Shared client app state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Run the participant client until the user quits.
pub async fn run(config: &Config, host: &str, port: u16) -> Result<()> {
    let url = config.ws_url(host, port);
    let (tx, rx) = mpsc::unbounded_channel::<ClientMessage>();
    let app = Arc::new(Mutex::new(ClientApp::new(url.clone(), tx)));

    let connection = tokio::spawn(connection_loop(
        url,
        config.reconnect_interval(),
        Arc::clone(&app),
        rx,
    ));

    let result = run_tui(app).await;
    connection.abort();
    result
}

/// Keep a connection to the server open, retrying every `retry` after it
/// drops, until the server closes this client for good.
async fn connection_loop(
    url: String,
    retry: Duration,
    app: SharedApp,
    mut outbound: mpsc::UnboundedReceiver<ClientMessage>,
) {
    loop {
        discard_offline_answers(&mut outbound);
        app.lock().await.connection = ConnectionState::Connecting;

        tracing::info!(%url, "connecting");
        match tokio_tungstenite::connect_async(url.as_str()).await {
            Ok((ws_stream, _)) => {
                // Answers checked while the handshake was pending are stale too.
                discard_offline_answers(&mut outbound);
                let reason = pump(ws_stream, &app, &mut outbound).await;
                tracing::info!(%reason, "connection ended");
                app.lock().await.disconnect(reason);
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "failed to connect");
                app.lock()
                    .await
                    .disconnect(format!("Failed to connect to server: {}", e));
            }
        }

        if app.lock().await.is_closed() {
            break;
        }
        tokio::time::sleep(retry).await;
    }
}

/// Answers given while offline are not replayed.
fn discard_offline_answers(outbound: &mut mpsc::UnboundedReceiver<ClientMessage>) {
    let mut dropped = 0;
    while outbound.try_recv().is_ok() {
        dropped += 1;
    }
    if dropped > 0 {
        tracing::debug!(dropped, "discarded answers given while offline");
    }
}

/// Forward frames both ways until the connection ends; returns why it ended.
async fn pump<S>(
    ws_stream: tokio_tungstenite::WebSocketStream<S>,
    app: &SharedApp,
    outbound: &mut mpsc::UnboundedReceiver<ClientMessage>,
) -> String
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
{
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => handle_server_text(app, &text).await,
                Some(Ok(Message::Close(_))) | None => {
                    return "Connection closed by server".to_string();
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return format!("Connection error: {}", e),
            },
            msg = outbound.recv() => {
                let Some(msg) = msg else {
                    return "Client shutting down".to_string();
                };
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode client message");
                        continue;
                    }
                };
                if let Err(e) = ws_sender.send(Message::Text(json.into())).await {
                    return format!("Connection error: {}", e);
                }
            }
        }
    }
}

/// Decode one text frame and apply it. Undecodable frames are logged and
/// skipped.
async fn handle_server_text(app: &SharedApp, text: &str) {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(msg) => handle_server_message(&mut *app.lock().await, msg),
        Err(e) => tracing::warn!(error = %e, frame = %text, "ignoring malformed server message"),
    }
}

/// Handle a message from the server.
fn handle_server_message(app: &mut ClientApp, msg: ServerMessage) {
    match msg {
        ServerMessage::ConnectionAck { session_id } => {
            tracing::info!(%session_id, "connection acknowledged");
            app.connected();
        }
        ServerMessage::AlternativesShow { wording, answers } => {
            app.show(&Question::new(wording, answers));
        }
        ServerMessage::MalformedMessage { message } => {
            tracing::warn!(%message, "server rejected a message");
            app.notice = Some(message);
        }
        ServerMessage::Kicked { reason } => {
            app.close(format!("Kicked: {}", reason));
        }
        ServerMessage::ServerClosing => {
            app.disconnect("Server is shutting down".to_string());
        }
    }
}

/// Run the client TUI.
async fn run_tui(app: SharedApp) -> Result<()> {
    let mut terminal = terminal::init()?;

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_input(&mut *app.lock().await, key.code);
            }
        }
    }

    terminal::restore()?;
    Ok(())
}

/// Handle keyboard input.
fn handle_input(app: &mut ClientApp, key: KeyCode) {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Enter if app.is_closed() => {
            app.should_quit = true;
        }
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => app.check_cursor(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    type ServerStream = tokio_tungstenite::WebSocketStream<TcpStream>;

    fn app() -> (ClientApp, mpsc::UnboundedReceiver<ClientMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ClientApp::new("ws://localhost:8712".to_string(), tx), rx)
    }

    fn show(wording: &str, answers: &[&str]) -> ServerMessage {
        ServerMessage::AlternativesShow {
            wording: wording.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_pick_one_example() {
        let (mut app, mut rx) = app();
        handle_server_message(
            &mut app,
            ServerMessage::ConnectionAck {
                session_id: uuid::Uuid::new_v4(),
            },
        );
        handle_server_message(&mut app, show("Pick one", &["Cat", "Dog"]));

        assert_eq!(app.form.wording().unwrap(), "Pick one");
        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));

        assert_eq!(
            rx.try_recv().unwrap(),
            ClientMessage::AlternativesAnswer { alternative: 1 }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_repeated_show_appends() {
        let (mut app, mut rx) = app();
        handle_server_message(&mut app, show("Pick one", &["Cat", "Dog"]));
        handle_server_message(&mut app, show("Pick one", &["Cat", "Dog"]));
        assert_eq!(app.entry_count(), 4);

        handle_input(&mut app, KeyCode::Up);
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(
            rx.try_recv().unwrap(),
            ClientMessage::AlternativesAnswer { alternative: 1 }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_kick_closes_and_enter_quits() {
        let (mut app, _rx) = app();
        handle_server_message(
            &mut app,
            ServerMessage::Kicked {
                reason: "Kicked by host".to_string(),
            },
        );
        assert!(app.is_closed());
        handle_input(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_server_errors_become_notice() {
        let (mut app, _rx) = app();
        handle_server_message(&mut app, ServerMessage::malformed("No question is being shown."));
        assert_eq!(app.notice.as_deref(), Some("No question is being shown."));

        handle_server_message(&mut app, ServerMessage::ServerClosing);
        assert!(matches!(app.connection, ConnectionState::Disconnected { .. }));
    }

    #[tokio::test]
    async fn test_malformed_frame_is_skipped() {
        let (app, _rx) = app();
        let app = Arc::new(Mutex::new(app));
        handle_server_text(&app, r#"{"type":"alternatives.show","wording":"x"}"#).await;
        handle_server_text(&app, "garbage").await;
        assert_eq!(app.lock().await.entry_count(), 0);
    }

    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("ws://{}", listener.local_addr().unwrap());
        (listener, url)
    }

    async fn accept(listener: &TcpListener) -> ServerStream {
        let (stream, _) = listener.accept().await.unwrap();
        tokio_tungstenite::accept_async(stream).await.unwrap()
    }

    async fn push(ws: &mut ServerStream, msg: ServerMessage) {
        let json = serde_json::to_string(&msg).unwrap();
        ws.send(Message::Text(json.into())).await.unwrap();
    }

    async fn next_answer(ws: &mut ServerStream) -> ClientMessage {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("connection ended: {other:?}"),
            }
        }
    }

    fn ack() -> ServerMessage {
        ServerMessage::ConnectionAck {
            session_id: uuid::Uuid::new_v4(),
        }
    }

    fn spawn_loop(
        url: String,
        retry: Duration,
    ) -> (SharedApp, mpsc::UnboundedSender<ClientMessage>, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Arc::new(Mutex::new(ClientApp::new(url.clone(), tx.clone())));
        let handle = tokio::spawn(connection_loop(url, retry, Arc::clone(&app), rx));
        (app, tx, handle)
    }

    async fn wait_for(app: &SharedApp, done: impl Fn(&ConnectionState) -> bool) -> ConnectionState {
        for _ in 0..100 {
            let state = app.lock().await.connection.clone();
            if done(&state) {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        app.lock().await.connection.clone()
    }

    #[tokio::test]
    async fn test_server_closing_reason_survives_the_close() {
        let (listener, url) = listen().await;
        let (app, _tx, handle) = spawn_loop(url, Duration::from_secs(10));

        let mut ws = accept(&listener).await;
        push(&mut ws, ack()).await;
        push(&mut ws, ServerMessage::ServerClosing).await;
        let _ = ws.close(None).await;
        while let Ok(Some(_)) = tokio::time::timeout(Duration::from_secs(1), ws.next()).await {}
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            app.lock().await.connection,
            ConnectionState::Disconnected {
                message: "Server is shutting down".to_string()
            }
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_kicked_client_stops_reconnecting() {
        let (listener, url) = listen().await;
        let (app, _tx, handle) = spawn_loop(url, Duration::from_millis(50));

        let mut ws = accept(&listener).await;
        push(&mut ws, ack()).await;
        push(
            &mut ws,
            ServerMessage::Kicked {
                reason: "Kicked by host".to_string(),
            },
        )
        .await;
        let _ = ws.close(None).await;

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(app.lock().await.is_closed());

        let again = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn test_plain_close_reconnects_after_interval() {
        let (listener, url) = listen().await;
        let retry = Duration::from_millis(200);
        let (app, _tx, handle) = spawn_loop(url, retry);

        let mut first = accept(&listener).await;
        push(&mut first, ack()).await;
        let _ = first.close(None).await;
        let closed_at = Instant::now();

        let mut second = tokio::time::timeout(Duration::from_secs(2), accept(&listener))
            .await
            .unwrap();
        assert!(closed_at.elapsed() >= retry / 2);

        push(&mut second, ack()).await;
        assert_eq!(
            wait_for(&app, |s| *s == ConnectionState::Connected).await,
            ConnectionState::Connected
        );
        handle.abort();
    }

    #[tokio::test]
    async fn test_answers_given_offline_are_not_sent() {
        let (listener, url) = listen().await;
        let (app, tx, handle) = spawn_loop(url, Duration::from_secs(10));

        tx.send(ClientMessage::AlternativesAnswer { alternative: 0 }).unwrap();
        // The handshake waits until the listener accepts.
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(ClientMessage::AlternativesAnswer { alternative: 1 }).unwrap();

        let mut ws = accept(&listener).await;
        push(&mut ws, ack()).await;
        wait_for(&app, |s| *s == ConnectionState::Connected).await;
        tx.send(ClientMessage::AlternativesAnswer { alternative: 2 }).unwrap();

        let answer = tokio::time::timeout(Duration::from_secs(2), next_answer(&mut ws))
            .await
            .unwrap();
        assert_eq!(answer, ClientMessage::AlternativesAnswer { alternative: 2 });
        handle.abort();
    }
}
