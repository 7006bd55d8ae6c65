//! # alternatives
//!
//! A room of participants answering multiple-choice questions pushed by a
//! host over WebSocket.
//!
//! - [`server`] holds the question deck, pushes `alternatives.show` to every
//!   participant and tallies the `alternatives.answer` replies.
//! - [`client`] hosts the [`widget`] in a terminal UI.
//! - [`page`] composes the HTML page that carries the same widget for
//!   browsers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use alternatives::{Config, load_questions_from_json, server};
//!
//! #[tokio::main]
//! async fn main() -> alternatives::Result<()> {
//!     let config = Config::default();
//!     let questions = load_questions_from_json("questions.json")?;
//!     server::run(&config, questions).await
//! }
//! ```

pub mod client;
pub mod config;
mod data;
mod error;
pub mod logging;
mod models;
pub mod page;
pub mod protocol;
pub mod server;
pub mod terminal;
pub mod widget;

pub use config::Config;
pub use data::{LoadError, load_questions_from_json};
pub use error::{Error, Result};
pub use models::Question;
