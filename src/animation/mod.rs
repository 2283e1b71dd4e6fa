pub mod movement;
pub mod tick_clock;

pub use movement::{AnimatedObject, AnimationTable};
pub use tick_clock::{TickClock, TickStatus};
