//! Cell configuration tree as read from JSON or built in code.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::fit::{CellAlign, CellScale};
use crate::units::{Padding, Unit};

/// Raw bounds of a cell; each omitted field falls back to auto layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Unit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Unit>,
}

impl RawBounds {
    pub fn new(
        x: impl Into<Unit>,
        y: impl Into<Unit>,
        width: impl Into<Unit>,
        height: impl Into<Unit>,
    ) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            width: Some(width.into()),
            height: Some(height.into()),
        }
    }

    pub fn with_x(mut self, x: impl Into<Unit>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn with_y(mut self, y: impl Into<Unit>) -> Self {
        self.y = Some(y.into());
        self
    }

    pub fn with_width(mut self, width: impl Into<Unit>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<Unit>) -> Self {
        self.height = Some(height.into());
        self
    }
}

/// Absolute rects are recorded as plain numbers.
impl From<Rect> for RawBounds {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Pixel translation; a missing axis is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl RawPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Drawing hint for consumers that outline cells. Never read by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Declarative description of one cell and its subtree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<RawBounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<CellScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<CellAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<RawPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cells: Vec<CellConfig>,
}

impl CellConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_bounds(mut self, bounds: RawBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn with_scale(mut self, scale: CellScale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_align(mut self, align: CellAlign) -> Self {
        self.align = Some(align);
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Some(RawPoint::new(x, y));
        self
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn with_cell(mut self, cell: CellConfig) -> Self {
        self.cells.push(cell);
        self
    }

    /// Copy of this config without its children.
    pub(crate) fn header(&self) -> Self {
        Self {
            name: self.name.clone(),
            bounds: self.bounds.clone(),
            padding: self.padding,
            scale: self.scale,
            align: self.align,
            offset: self.offset,
            debug: self.debug,
            cells: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::RawRect;
    use serde_json::json;

    #[test]
    fn parses_nested_json_config() {
        let config = CellConfig::from_json_value(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 800, "height": 600 },
            "padding": 0.25,
            "scale": "showAll",
            "align": "centerTop",
            "offset": { "x": 4 },
            "debug": { "color": 16711680, "fill": true },
            "cells": [
                { "name": "Header", "bounds": { "height": "48px" } },
                { "name": "Body", "padding": { "x": 0.125 } }
            ]
        }))
        .unwrap();

        assert_eq!(config.name, "Root");
        assert_eq!(config.scale, Some(CellScale::ShowAll));
        assert_eq!(config.align, Some(CellAlign::CenterTop));
        assert_eq!(config.padding, Some(Padding::Uniform(0.25)));
        assert_eq!(
            config.offset,
            Some(RawPoint {
                x: Some(4.0),
                y: None
            })
        );
        assert_eq!(config.debug.and_then(|d| d.color), Some(0xff0000));
        assert_eq!(config.cells.len(), 2);

        let header = config.cells[0].bounds.as_ref().unwrap();
        assert_eq!(header.x, None);
        assert_eq!(header.height, Some(Unit::px("48px")));

        assert_eq!(
            config.cells[1].padding,
            Some(Padding::Sides(RawRect {
                x: Some(0.125),
                ..RawRect::default()
            }))
        );
    }

    #[test]
    fn missing_name_is_a_config_error() {
        let err = CellConfig::from_json_str(r#"{ "bounds": { "x": 0 } }"#).unwrap_err();
        assert!(err.to_string().starts_with("config error"));
    }

    #[test]
    fn unknown_scale_name_is_rejected_on_load() {
        let result = CellConfig::from_json_value(json!({ "name": "Root", "scale": "stretch" }));
        assert!(result.is_err());
    }

    #[test]
    fn builder_helpers_match_json() {
        let built = CellConfig::new("Root")
            .with_bounds(RawBounds::new(0.0, 0.0, 200.0, 100.0))
            .with_cell(CellConfig::new("Child").with_bounds(RawBounds::default().with_width("20")));
        let parsed = CellConfig::from_json_value(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 200, "height": 100 },
            "cells": [{ "name": "Child", "bounds": { "width": "20" } }]
        }))
        .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn serialization_omits_unset_fields() {
        let json = CellConfig::new("Leaf").to_json_string().unwrap();
        assert_eq!(json, r#"{"name":"Leaf"}"#);
    }
}
