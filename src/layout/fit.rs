//! Scale and alignment math for placing content inside a target area.
//!
//! Both functions are pure: a consumer passes the natural size of whatever it
//! draws together with a cell's area and receives a scale factor and a
//! top-left position.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CellError, ModeKind, Result};
use crate::geometry::{Point, Rect, Size};

/// How content is scaled to a target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMode")]
pub enum CellScale {
    /// Keep natural size.
    None,
    /// Shrink uniformly to fit, never enlarge.
    #[default]
    Fit,
    /// Stretch each axis independently.
    Fill,
    /// Uniform scale so the content is fully visible.
    ShowAll,
    /// Uniform scale so the content covers the target.
    Envelop,
    /// Reserved for consumer-provided scaling; `fit` rejects it.
    Custom,
}

/// Where content is pinned inside a target rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMode")]
pub enum CellAlign {
    None,
    #[default]
    Center,
    CenterTop,
    CenterBottom,
    LeftCenter,
    LeftTop,
    LeftBottom,
    RightCenter,
    RightTop,
    RightBottom,
}

/// A mode as written in a config: camelCase name or 1-based index.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawMode {
    Index(u8),
    Name(String),
}

impl TryFrom<RawMode> for CellScale {
    type Error = CellError;

    fn try_from(raw: RawMode) -> Result<Self> {
        match raw {
            RawMode::Index(index) => <Self as TryFrom<u8>>::try_from(index),
            RawMode::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<RawMode> for CellAlign {
    type Error = CellError;

    fn try_from(raw: RawMode) -> Result<Self> {
        match raw {
            RawMode::Index(index) => <Self as TryFrom<u8>>::try_from(index),
            RawMode::Name(name) => name.parse(),
        }
    }
}

impl TryFrom<u8> for CellScale {
    type Error = CellError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            1 => CellScale::None,
            2 => CellScale::Fit,
            3 => CellScale::Fill,
            4 => CellScale::ShowAll,
            5 => CellScale::Envelop,
            6 => CellScale::Custom,
            other => return Err(CellError::invalid_mode(ModeKind::Scale, other)),
        })
    }
}

impl FromStr for CellScale {
    type Err = CellError;

    fn from_str(value: &str) -> Result<Self> {
        Ok(match value {
            "none" => CellScale::None,
            "fit" => CellScale::Fit,
            "fill" => CellScale::Fill,
            "showAll" => CellScale::ShowAll,
            "envelop" => CellScale::Envelop,
            "custom" => CellScale::Custom,
            other => return Err(CellError::invalid_mode(ModeKind::Scale, other)),
        })
    }
}

impl TryFrom<u8> for CellAlign {
    type Error = CellError;

    fn try_from(value: u8) -> Result<Self> {
        Ok(match value {
            1 => CellAlign::None,
            2 => CellAlign::Center,
            3 => CellAlign::CenterTop,
            4 => CellAlign::CenterBottom,
            5 => CellAlign::LeftCenter,
            6 => CellAlign::LeftTop,
            7 => CellAlign::LeftBottom,
            8 => CellAlign::RightCenter,
            9 => CellAlign::RightTop,
            10 => CellAlign::RightBottom,
            other => return Err(CellError::invalid_mode(ModeKind::Align, other)),
        })
    }
}

impl FromStr for CellAlign {
    type Err = CellError;

    fn from_str(value: &str) -> Result<Self> {
        Ok(match value {
            "none" => CellAlign::None,
            "center" => CellAlign::Center,
            "centerTop" => CellAlign::CenterTop,
            "centerBottom" => CellAlign::CenterBottom,
            "leftCenter" => CellAlign::LeftCenter,
            "leftTop" => CellAlign::LeftTop,
            "leftBottom" => CellAlign::LeftBottom,
            "rightCenter" => CellAlign::RightCenter,
            "rightTop" => CellAlign::RightTop,
            "rightBottom" => CellAlign::RightBottom,
            other => return Err(CellError::invalid_mode(ModeKind::Align, other)),
        })
    }
}

/// Scale factor needed to bring `content` to `target` under `mode`.
pub fn fit(content: Size, target: Size, mode: CellScale) -> Result<Point> {
    let sx = target.width / content.width;
    let sy = target.height / content.height;

    match mode {
        CellScale::None => Ok(Point::new(1.0, 1.0)),
        CellScale::Fit => {
            let s = sx.min(sy);
            Ok(if s < 1.0 {
                Point::new(s, s)
            } else {
                Point::new(1.0, 1.0)
            })
        }
        CellScale::Fill => Ok(Point::new(sx, sy)),
        CellScale::ShowAll => {
            let s = sx.min(sy);
            Ok(Point::new(s, s))
        }
        CellScale::Envelop => {
            let s = sx.max(sy);
            Ok(Point::new(s, s))
        }
        CellScale::Custom => Err(CellError::UnsupportedScale(mode)),
    }
}

/// Top-left position of `content` placed inside `target` under `mode`.
pub fn align(content: Size, target: Rect, mode: CellAlign) -> Point {
    let near_x = target.x;
    let near_y = target.y;
    let far_x = target.x + (target.width - content.width);
    let far_y = target.y + (target.height - content.height);
    let mid_x = target.x + (target.width - content.width) / 2.0;
    let mid_y = target.y + (target.height - content.height) / 2.0;

    match mode {
        CellAlign::None | CellAlign::LeftTop => Point::new(near_x, near_y),
        CellAlign::Center => Point::new(mid_x, mid_y),
        CellAlign::CenterTop => Point::new(mid_x, near_y),
        CellAlign::CenterBottom => Point::new(mid_x, far_y),
        CellAlign::LeftCenter => Point::new(near_x, mid_y),
        CellAlign::LeftBottom => Point::new(near_x, far_y),
        CellAlign::RightCenter => Point::new(far_x, mid_y),
        CellAlign::RightTop => Point::new(far_x, near_y),
        CellAlign::RightBottom => Point::new(far_x, far_y),
    }
}

/// Combined result of fitting and aligning one piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub scale: Point,
    pub position: Point,
    /// Content size after scaling.
    pub size: Size,
}

/// Fit `content` into `target`, then align the scaled size inside it.
pub fn place(
    content: Size,
    target: Rect,
    scale: CellScale,
    alignment: CellAlign,
) -> Result<Placement> {
    let factor = fit(content, target.size(), scale)?;
    let size = content.scaled(factor);
    Ok(Placement {
        scale: factor,
        position: align(size, target, alignment),
        size,
    })
}
