//! Room server module.
//!
//! Hosts a question deck and pushes `alternatives.show` to every connected
//! participant over WebSocket.

mod commands;
mod server;
mod state;
mod ui;

pub use server::run;
