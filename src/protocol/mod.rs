//! Wire protocol shared by the room server and participant clients.

mod messages;

pub use messages::{ClientMessage, DEFAULT_PORT, ServerMessage};
