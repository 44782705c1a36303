//! Declarative 2D cell layout.
//!
//! A tree of named [`CellConfig`]s is resolved in one top-down pass into a
//! tree of [`Cell`]s with absolute pixel bounds and padded content areas.
//! [`fit`] and [`align`] then compute how to scale and position content of
//! any size inside a cell.
//!
//! ```
//! use cellgrid::{Cell, CellConfig, RawBounds, Size};
//!
//! let config = CellConfig::new("Screen")
//!     .with_bounds(RawBounds::new(0.0, 0.0, 800.0, 600.0))
//!     .with_padding(0.25)
//!     .with_cell(CellConfig::new("Logo").with_bounds(RawBounds::default().with_height("64")));
//!
//! let screen: Cell = Cell::build(&config)?;
//! let logo = screen.find_by_name("Logo").expect("logo cell");
//! assert_eq!(logo.bounds().x, 200.0);
//! assert_eq!(logo.bounds().height, 64.0);
//!
//! let placement = logo.place(Size::new(800.0, 128.0))?;
//! assert_eq!(placement.scale.x, 0.5);
//! # Ok::<(), cellgrid::CellError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod units;

pub use error::{CellError, ModeKind, Result};
pub use geometry::{Point, Rect, Size};
pub use layout::{
    BuildOptions, Cell, CellAlign, CellConfig, CellScale, DebugConfig, LayoutDigest, MIN_SIZE,
    Placement, RawBounds, RawPoint, align, fit, place,
};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use logging::{MemorySink, WriterSink};
pub use metrics::{BuildMetrics, MetricSnapshot};
pub use units::{Padding, RawRect, Unit, UnitPolicy, parse_px, resolve_padding, resolve_scalar};
