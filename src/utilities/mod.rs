pub mod colour;
pub mod logging;

pub use colour::{hex_to_rgba, is_gif};
pub use logging::init_tracing;
