mod help;
mod lobby;
mod render;
mod tally;

pub use render::render;
