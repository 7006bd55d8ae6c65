//! Participant client module.
//!
//! Connects to a room server and hosts the alternatives widget in the
//! terminal.

mod client;
mod state;
mod ui;

pub use client::run;
