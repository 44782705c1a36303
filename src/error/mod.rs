//! Error types shared by every cellgrid module.

mod types;

pub use types::{CellError, ModeKind, Result};
