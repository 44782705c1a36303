//! Layout module orchestrator.
//!
//! Downstream crates import cell types from here while the tree builder
//! lives in the private `core` module.

pub mod config;
mod core;
mod digest;
pub mod fit;

pub use config::{CellConfig, DebugConfig, RawBounds, RawPoint};
pub use core::{BuildOptions, Cell, MIN_SIZE};
pub use digest::LayoutDigest;
pub use fit::{CellAlign, CellScale, Placement, align, fit, place};
