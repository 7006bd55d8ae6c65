//! Client state management.

use tokio::sync::mpsc;

use crate::models::Question;
use crate::protocol::ClientMessage;
use crate::widget::{AlternativesForm, Document, WidgetError};

/// Connection status of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connecting to server.
    Connecting,
    /// Connected and acknowledged.
    Connected,
    /// Lost or refused; a retry is scheduled.
    Disconnected { message: String },
    /// The server will not take this client back.
    Closed { message: String },
}

/// Client application state.
pub struct ClientApp {
    pub connection: ConnectionState,
    pub form: AlternativesForm,
    /// Position in the form the cursor points at.
    pub cursor: usize,
    /// Last error reported by the server or the widget.
    pub notice: Option<String>,
    pub server_url: String,
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(server_url: String, outbound: mpsc::UnboundedSender<ClientMessage>) -> Self {
        Self {
            connection: ConnectionState::Connecting,
            form: AlternativesForm::new(Document::alternatives(), outbound),
            cursor: 0,
            notice: None,
            server_url,
            should_quit: false,
        }
    }

    /// A fresh connection starts from an empty form, like a page reload.
    pub fn connected(&mut self) {
        self.connection = ConnectionState::Connected;
        self.form.reset(Document::alternatives());
        self.cursor = 0;
        self.notice = None;
    }

    /// Record why the connection ended. The first reason given for a
    /// connection is kept, so a server notice is not replaced by the socket
    /// close that follows it.
    pub fn disconnect(&mut self, message: String) {
        if matches!(
            self.connection,
            ConnectionState::Connecting | ConnectionState::Connected
        ) {
            self.connection = ConnectionState::Disconnected { message };
        }
    }

    pub fn close(&mut self, message: String) {
        self.connection = ConnectionState::Closed { message };
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.connection, ConnectionState::Closed { .. })
    }

    pub fn show(&mut self, question: &Question) {
        if let Err(e) = self.form.show(question) {
            self.report(e);
        }
    }

    pub fn entry_count(&self) -> usize {
        self.form.entries().map_or(0, |entries| entries.len())
    }

    pub fn cursor_down(&mut self) {
        let count = self.entry_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn cursor_up(&mut self) {
        let count = self.entry_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Check the entry under the cursor.
    pub fn check_cursor(&mut self) {
        if self.entry_count() == 0 {
            return;
        }
        match self.form.check(self.cursor) {
            Ok(_) => self.notice = None,
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: WidgetError) {
        tracing::error!(error = %error, "alternatives widget failed");
        self.notice = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (ClientApp, mpsc::UnboundedReceiver<ClientMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ClientApp::new("ws://localhost:8712".to_string(), tx), rx)
    }

    fn cat_dog() -> Question {
        Question::new("Pick one", vec!["Cat".to_string(), "Dog".to_string()])
    }

    #[test]
    fn test_cursor_wraps_around_entries() {
        let (mut app, _rx) = app();
        app.cursor_down();
        assert_eq!(app.cursor, 0);

        app.show(&cat_dog());
        app.cursor_down();
        assert_eq!(app.cursor, 1);
        app.cursor_down();
        assert_eq!(app.cursor, 0);
        app.cursor_up();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_selecting_second_entry_sends_its_index() {
        let (mut app, mut rx) = app();
        app.show(&cat_dog());
        app.cursor_down();
        app.check_cursor();

        assert_eq!(
            rx.try_recv().unwrap(),
            ClientMessage::AlternativesAnswer { alternative: 1 }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reconnection_clears_form() {
        let (mut app, _rx) = app();
        app.show(&cat_dog());
        app.cursor_down();
        app.disconnect("gone".to_string());
        app.connected();

        assert_eq!(app.entry_count(), 0);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.connection, ConnectionState::Connected);
    }

    #[test]
    fn test_first_disconnect_reason_is_kept() {
        let (mut app, _rx) = app();
        app.connected();
        app.disconnect("Server is shutting down".to_string());
        app.disconnect("Connection closed by server".to_string());
        assert_eq!(
            app.connection,
            ConnectionState::Disconnected {
                message: "Server is shutting down".to_string()
            }
        );
    }

    #[test]
    fn test_closed_is_final() {
        let (mut app, _rx) = app();
        app.close("Kicked: Kicked by host".to_string());
        app.disconnect("Connection error".to_string());
        assert!(app.is_closed());
    }
}
