use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A raw bound value as written in a cell configuration.
///
/// Numbers are fractions of the parent extent; strings are absolute pixel
/// values such as `"24"` or `"24px"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Unit {
    Fraction(f64),
    Pixels(String),
}

impl Unit {
    pub fn px(value: impl ToString) -> Self {
        Self::Pixels(value.to_string())
    }

    pub fn is_pixels(&self) -> bool {
        matches!(self, Unit::Pixels(_))
    }
}

impl From<f64> for Unit {
    fn from(value: f64) -> Self {
        Self::Fraction(value)
    }
}

impl From<&str> for Unit {
    fn from(value: &str) -> Self {
        Self::Pixels(value.to_string())
    }
}

impl From<String> for Unit {
    fn from(value: String) -> Self {
        Self::Pixels(value)
    }
}

/// How malformed pixel strings are treated during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitPolicy {
    /// Malformed strings resolve to `NaN` and flow into the geometry.
    #[default]
    Lenient,
    /// Malformed strings abort the build with `CellError::MalformedUnit`.
    Strict,
}

/// Parse the leading base-10 integer of a pixel string.
///
/// Leading whitespace and a single sign are accepted and anything after the
/// digit run is ignored, so `"10px"` is 10 and `"12.7"` is 12. Returns `None`
/// when no digit follows the optional sign.
pub fn parse_px(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = unsigned
        .bytes()
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let magnitude: f64 = unsigned[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Resolve a raw unit against a parent extent, or `None` if malformed.
pub fn try_resolve_scalar(raw: &Unit, parent_extent: f64) -> Option<f64> {
    match raw {
        Unit::Fraction(fraction) => Some(fraction * parent_extent),
        Unit::Pixels(text) => parse_px(text),
    }
}

/// Resolve a raw unit against a parent extent; malformed strings yield `NaN`.
pub fn resolve_scalar(raw: &Unit, parent_extent: f64) -> f64 {
    try_resolve_scalar(raw, parent_extent).unwrap_or(f64::NAN)
}

/// Per-side padding fractions; missing fields take defaults on resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// Padding as written in a configuration: one symmetric inset or per-side fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    Uniform(f64),
    Sides(RawRect),
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl From<RawRect> for Padding {
    fn from(value: RawRect) -> Self {
        Self::Sides(value)
    }
}

/// Resolve padding into a fractional rect relative to the owning bounds.
pub fn resolve_padding(raw: Option<&Padding>) -> Rect {
    match raw {
        None => Rect::new(0.0, 0.0, 1.0, 1.0),
        Some(Padding::Uniform(inset)) => {
            Rect::new(*inset, *inset, 1.0 - 2.0 * inset, 1.0 - 2.0 * inset)
        }
        Some(Padding::Sides(sides)) => {
            let x = sides.x.unwrap_or(0.0);
            let y = sides.y.unwrap_or(0.0);
            Rect::new(
                x,
                y,
                sides.width.unwrap_or(1.0 - x),
                sides.height.unwrap_or(1.0 - y),
            )
        }
    }
}

/// Apply a fractional padding rect to absolute bounds.
pub fn apply_padding(bounds: Rect, padding: Rect) -> Rect {
    Rect::new(
        bounds.x + padding.x * bounds.width,
        bounds.y + padding.y * bounds.height,
        bounds.width * padding.width,
        bounds.height * padding.height,
    )
}
