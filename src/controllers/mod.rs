pub mod osc;

pub use osc::{OscController, OscSender, WorldCommand};
