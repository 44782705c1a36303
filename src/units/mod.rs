//! Unit resolution: fractions, pixel strings and padding rects.

mod core;

pub use core::{
    Padding, RawRect, Unit, UnitPolicy, apply_padding, parse_px, resolve_padding, resolve_scalar,
    try_resolve_scalar,
};
