mod alternatives;
mod render;

pub use render::render;
