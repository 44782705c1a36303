use std::fmt;

use thiserror::Error;

use crate::layout::CellScale;

/// Unified result type for the cellgrid crate.
pub type Result<T> = std::result::Result<T, CellError>;

/// Which family of mode a raw value was meant to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Scale,
    Align,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::Scale => f.write_str("scale"),
            ModeKind::Align => f.write_str("align"),
        }
    }
}

/// Errors surfaced while building cells or computing placements.
#[derive(Debug, Error)]
pub enum CellError {
    #[error("invalid {kind} mode `{value}`")]
    InvalidMode { kind: ModeKind, value: String },
    #[error("scale mode {0:?} is not supported by fit")]
    UnsupportedScale(CellScale),
    #[error("malformed unit `{value}` in cell `{cell}`")]
    MalformedUnit { cell: String, value: String },
    #[error("cell name must not be empty")]
    EmptyName,
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl CellError {
    pub fn invalid_mode(kind: ModeKind, value: impl fmt::Display) -> Self {
        Self::InvalidMode {
            kind,
            value: value.to_string(),
        }
    }
}
