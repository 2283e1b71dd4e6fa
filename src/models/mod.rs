pub mod grid_model;
pub mod snapshot;

pub use grid_model::{GridCell, GridModel};
pub use snapshot::{ObjectState, Shape, Snapshot, SnapshotError, Visualization};
