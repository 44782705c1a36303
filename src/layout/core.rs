use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::error::{CellError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::layout::config::{CellConfig, DebugConfig, RawBounds};
use crate::layout::fit::{self, CellAlign, CellScale, Placement};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::BuildMetrics;
use crate::units::{Unit, UnitPolicy, apply_padding, resolve_padding, try_resolve_scalar};

/// Width and height given to cells without bounds. Non-zero so scale math
/// against such a cell never divides by zero.
pub const MIN_SIZE: f64 = 1.0 / 9_007_199_254_740_991.0;

/// Knobs for a single build pass.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Treatment of pixel strings without a leading integer.
    pub unit_policy: UnitPolicy,
    /// Optional structured logger used by the builder.
    pub logger: Option<Logger>,
    /// Target field used on every emitted event.
    pub log_target: String,
    /// Shared counters merged into after every successful build.
    pub metrics: Option<Arc<Mutex<BuildMetrics>>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            unit_policy: UnitPolicy::Lenient,
            logger: None,
            log_target: "cellgrid::layout.build".to_string(),
            metrics: None,
        }
    }
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self {
            unit_policy: UnitPolicy::Strict,
            ..Self::default()
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(BuildMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<BuildMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// A resolved node of the layout tree.
///
/// Geometry and children are fixed at build time; only `contents` may change
/// afterwards. To change the layout, build a new tree.
#[derive(Debug, Clone)]
pub struct Cell<T = ()> {
    config: CellConfig,
    bounds: Rect,
    area: Rect,
    scale: CellScale,
    align: CellAlign,
    offset: Point,
    contents: Vec<T>,
    cells: Vec<Cell<T>>,
}

impl<T> Cell<T> {
    pub fn build(config: &CellConfig) -> Result<Self> {
        Self::build_with(config, &BuildOptions::default())
    }

    pub fn build_with(config: &CellConfig, options: &BuildOptions) -> Result<Self> {
        let mut builder = Builder::new(options);
        let bounds = config
            .bounds
            .as_ref()
            .map(|raw| builder.root_bounds(raw, &config.name))
            .transpose()?;
        let root = builder.build_cell(config, bounds, 0)?;
        builder.finish();
        Ok(root)
    }

    /// Build and also return the configuration as it was resolved, with every
    /// child's bounds replaced by the absolute rect it was placed at.
    pub fn build_with_snapshot(
        config: &CellConfig,
        options: &BuildOptions,
    ) -> Result<(Self, CellConfig)> {
        let cell = Self::build_with(config, options)?;
        let snapshot = cell.resolved_config();
        Ok((cell, snapshot))
    }

    /// This cell's configuration without children. Use
    /// [`Cell::resolved_config`] for the whole subtree.
    pub fn config(&self) -> &CellConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Full rect in root pixel space, before padding.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds with padding applied; children and content are placed here.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn scale(&self) -> CellScale {
        self.scale
    }

    pub fn align(&self) -> CellAlign {
        self.align
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn debug(&self) -> Option<DebugConfig> {
        self.config.debug
    }

    pub fn contents(&self) -> &[T] {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut Vec<T> {
        &mut self.contents
    }

    pub fn push_content(&mut self, item: T) {
        self.contents.push(item);
    }

    /// This cell followed by every descendant, depth first.
    pub fn flatten(&self) -> Vec<&Cell<T>> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a Cell<T>>) {
        out.push(self);
        for cell in &self.cells {
            cell.collect_into(out);
        }
    }

    /// First cell in depth-first order with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Cell<T>> {
        if self.name() == name {
            return Some(self);
        }
        self.cells.iter().find_map(|cell| cell.find_by_name(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Cell<T>> {
        if self.config.name == name {
            return Some(self);
        }
        self.cells
            .iter_mut()
            .find_map(|cell| cell.find_by_name_mut(name))
    }

    /// Configuration tree as it was resolved. The input config is never
    /// modified; this is where resolved child bounds are recorded.
    pub fn resolved_config(&self) -> CellConfig {
        let mut config = self.config.clone();
        config.cells = self.cells.iter().map(Cell::resolved_config).collect();
        config
    }

    /// Scale and position for content of the given natural size, using this
    /// cell's area and modes.
    pub fn place(&self, content: Size) -> Result<Placement> {
        fit::place(content, self.area, self.scale, self.align)
    }
}

impl<T: PartialEq> Cell<T> {
    /// First cell in depth-first order whose contents include `item`.
    pub fn find_by_content(&self, item: &T) -> Option<&Cell<T>> {
        if self.contents.contains(item) {
            return Some(self);
        }
        self.cells.iter().find_map(|cell| cell.find_by_content(item))
    }
}

struct Builder<'a> {
    options: &'a BuildOptions,
    metrics: BuildMetrics,
}

impl<'a> Builder<'a> {
    fn new(options: &'a BuildOptions) -> Self {
        Self {
            options,
            metrics: BuildMetrics::new(),
        }
    }

    /// Root bounds are absolute: numbers are pixels, missing fields are zero.
    fn root_bounds(&mut self, raw: &RawBounds, cell: &str) -> Result<Rect> {
        Ok(Rect::new(
            self.absolute(raw.x.as_ref(), cell)?,
            self.absolute(raw.y.as_ref(), cell)?,
            self.absolute(raw.width.as_ref(), cell)?,
            self.absolute(raw.height.as_ref(), cell)?,
        ))
    }

    fn absolute(&mut self, raw: Option<&Unit>, cell: &str) -> Result<f64> {
        match raw {
            Some(unit) => self.scalar(unit, 1.0, cell),
            None => Ok(0.0),
        }
    }

    fn scalar(&mut self, unit: &Unit, parent_extent: f64, cell: &str) -> Result<f64> {
        if let Some(value) = try_resolve_scalar(unit, parent_extent) {
            return Ok(value);
        }

        self.metrics.record_malformed_unit();
        let value = match unit {
            Unit::Pixels(text) => text.clone(),
            Unit::Fraction(fraction) => fraction.to_string(),
        };
        match self.options.unit_policy {
            UnitPolicy::Strict => Err(CellError::MalformedUnit {
                cell: cell.to_string(),
                value,
            }),
            UnitPolicy::Lenient => {
                self.emit(
                    LogLevel::Warn,
                    "malformed_unit",
                    [json_str("cell", cell), json_str("value", value)],
                );
                Ok(f64::NAN)
            }
        }
    }

    fn build_cell<T>(
        &mut self,
        config: &CellConfig,
        placement: Option<Rect>,
        depth: usize,
    ) -> Result<Cell<T>> {
        if config.name.is_empty() {
            return Err(CellError::EmptyName);
        }

        let offset = config
            .offset
            .map(|raw| Point::new(raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0)))
            .unwrap_or_default();
        let bounds = placement
            .unwrap_or(Rect::new(0.0, 0.0, MIN_SIZE, MIN_SIZE))
            .translate(offset);
        let area = apply_padding(bounds, resolve_padding(config.padding.as_ref()));

        let mut cells: Vec<Cell<T>> = Vec::with_capacity(config.cells.len());
        for child in &config.cells {
            let placement = child
                .bounds
                .as_ref()
                .map(|raw| self.child_bounds(raw, area, &cells, &child.name))
                .transpose()?;
            let mut cell = self.build_cell(child, placement, depth + 1)?;
            if let Some(rect) = placement {
                cell.config.bounds = Some(RawBounds::from(rect));
            }
            cells.push(cell);
        }

        self.metrics.record_cell(depth);
        self.emit(
            LogLevel::Debug,
            "cell_resolved",
            [
                json_str("cell", config.name.as_str()),
                json_kv("depth", depth),
                json_kv("bounds", json!(bounds)),
                json_kv("area", json!(area)),
            ],
        );

        Ok(Cell {
            config: config.header(),
            bounds,
            area,
            scale: config.scale.unwrap_or_default(),
            align: config.align.unwrap_or_default(),
            offset,
            contents: Vec::new(),
            cells,
        })
    }

    /// Absolute rect for a child inside `area`. Omitted positions flow after
    /// the siblings already built; omitted extents run to the far edge.
    fn child_bounds<T>(
        &mut self,
        raw: &RawBounds,
        area: Rect,
        siblings: &[Cell<T>],
        cell: &str,
    ) -> Result<Rect> {
        let x = match &raw.x {
            Some(unit) => area.left() + self.scalar(unit, area.width, cell)?,
            None => {
                self.metrics.record_auto_position();
                siblings
                    .iter()
                    .map(|sibling| sibling.bounds.right())
                    .fold(area.left(), nan_max)
            }
        };
        let y = match &raw.y {
            Some(unit) => area.top() + self.scalar(unit, area.height, cell)?,
            None => {
                self.metrics.record_auto_position();
                siblings
                    .iter()
                    .map(|sibling| sibling.bounds.bottom())
                    .fold(area.top(), nan_max)
            }
        };
        let width = match &raw.width {
            Some(unit) => self.scalar(unit, area.width, cell)?,
            None => {
                self.metrics.record_auto_size();
                area.right() - x
            }
        };
        let height = match &raw.height {
            Some(unit) => self.scalar(unit, area.height, cell)?,
            None => {
                self.metrics.record_auto_size();
                area.bottom() - y
            }
        };

        Ok(Rect::new(x, y, width, height))
    }

    fn emit<const N: usize>(
        &self,
        level: LogLevel,
        message: &str,
        fields: [(String, serde_json::Value); N],
    ) {
        if let Some(logger) = &self.options.logger {
            if logger.enabled(level) {
                let event = event_with_fields(level, &self.options.log_target, message, fields);
                let _ = logger.log_event(event);
            }
        }
    }

    fn finish(mut self) {
        self.metrics.record_build();
        if let Some(shared) = &self.options.metrics {
            if let Ok(mut guard) = shared.lock() {
                guard.merge(&self.metrics);
            }
        }
        if let Some(logger) = &self.options.logger {
            let event = self
                .metrics
                .snapshot()
                .to_log_event(&self.options.log_target);
            let _ = logger.log_event(event);
        }
    }
}

/// Like `f64::max`, but a `NaN` edge stays `NaN` so malformed siblings
/// poison later auto-flow instead of being skipped.
fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemorySink;
    use crate::units::Padding;
    use serde_json::json;

    fn config(value: serde_json::Value) -> CellConfig {
        CellConfig::from_json_value(value).unwrap()
    }

    fn build(value: serde_json::Value) -> Cell {
        Cell::build(&config(value)).unwrap()
    }

    fn bounds_of(root: &Cell, name: &str) -> Rect {
        root.find_by_name(name).unwrap().bounds()
    }

    #[test]
    fn root_bounds_are_absolute() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 10, "y": 20, "width": 300, "height": 150 }
        }));
        assert_eq!(root.bounds(), Rect::new(10.0, 20.0, 300.0, 150.0));
        assert_eq!(root.area(), root.bounds());
    }

    #[test]
    fn root_accepts_pixel_strings_and_missing_fields() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": "10px", "width": "300" }
        }));
        assert_eq!(root.bounds(), Rect::new(10.0, 0.0, 300.0, 0.0));
    }

    #[test]
    fn offset_translates_root_bounds() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 10, "y": 20, "width": 100, "height": 50 },
            "offset": { "x": 5, "y": -5 }
        }));
        assert_eq!(root.bounds(), Rect::new(15.0, 15.0, 100.0, 50.0));
        assert_eq!(root.offset(), Point::new(5.0, -5.0));
    }

    #[test]
    fn missing_bounds_is_degenerate_square() {
        let root = build(json!({ "name": "Root" }));
        assert_eq!(root.bounds(), Rect::new(0.0, 0.0, MIN_SIZE, MIN_SIZE));
        assert!(root.bounds().width > 0.0);
    }

    #[test]
    fn defaults_for_modes_and_contents() {
        let root = build(json!({ "name": "Root" }));
        assert_eq!(root.scale(), CellScale::Fit);
        assert_eq!(root.align(), CellAlign::Center);
        assert_eq!(root.offset(), Point::new(0.0, 0.0));
        assert!(root.contents().is_empty());
        assert!(root.cells().is_empty());
        assert_eq!(root.debug(), None);
    }

    #[test]
    fn uniform_padding_insets_area() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 100, "y": 40, "width": 200, "height": 80 },
            "padding": 0.25
        }));
        let b = root.bounds();
        let p = 0.25;
        assert_eq!(
            root.area(),
            Rect::new(
                b.x + p * b.width,
                b.y + p * b.height,
                b.width * (1.0 - 2.0 * p),
                b.height * (1.0 - 2.0 * p),
            )
        );
        assert_eq!(root.area(), Rect::new(150.0, 60.0, 100.0, 40.0));
    }

    #[test]
    fn children_resolve_against_padded_area() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 200, "height": 200 },
            "padding": 0.25,
            "cells": [
                { "name": "Child", "bounds": { "x": 0.5, "y": 0, "width": "20", "height": 0.25 } }
            ]
        }));
        assert_eq!(bounds_of(&root, "Child"), Rect::new(100.0, 50.0, 20.0, 25.0));
    }

    #[test]
    fn second_sibling_flows_after_first() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "cells": [
                { "name": "A", "bounds": { "y": 0, "width": "120" } },
                { "name": "B", "bounds": { "y": 0, "width": 0.25 } }
            ]
        }));
        let a = bounds_of(&root, "A");
        let b = bounds_of(&root, "B");
        assert_eq!(b.x, a.right());
        assert_eq!(a, Rect::new(0.0, 0.0, 120.0, 100.0));
        assert_eq!(b, Rect::new(120.0, 0.0, 75.0, 100.0));
    }

    #[test]
    fn omitted_extents_fill_to_far_edge() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 300, "height": 100 },
            "cells": [
                { "name": "Left", "bounds": { "y": 0, "width": "100" } },
                { "name": "Middle", "bounds": { "y": 0, "width": 0.5 } },
                { "name": "Right", "bounds": { "y": 0 } }
            ]
        }));
        assert_eq!(bounds_of(&root, "Middle"), Rect::new(100.0, 0.0, 150.0, 100.0));
        assert_eq!(bounds_of(&root, "Right"), Rect::new(250.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn both_axes_flow_when_omitted() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "cells": [
                { "name": "Top", "bounds": { "width": "40", "height": "30" } },
                { "name": "Next", "bounds": {} }
            ]
        }));
        assert_eq!(bounds_of(&root, "Top"), Rect::new(0.0, 0.0, 40.0, 30.0));
        assert_eq!(bounds_of(&root, "Next"), Rect::new(40.0, 30.0, 60.0, 70.0));
    }

    #[test]
    fn child_offset_shifts_later_siblings() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "cells": [
                { "name": "A", "bounds": { "y": 0, "width": "40" }, "offset": { "x": 10 } },
                { "name": "B", "bounds": { "y": 0 } }
            ]
        }));
        assert_eq!(bounds_of(&root, "A"), Rect::new(10.0, 0.0, 40.0, 100.0));
        assert_eq!(bounds_of(&root, "B"), Rect::new(50.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn child_without_bounds_sits_at_origin() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 100, "y": 100, "width": 50, "height": 50 },
            "cells": [
                { "name": "Loose" },
                { "name": "Placed", "bounds": { "y": 0 } }
            ]
        }));
        assert_eq!(
            bounds_of(&root, "Loose"),
            Rect::new(0.0, 0.0, MIN_SIZE, MIN_SIZE)
        );
        assert_eq!(bounds_of(&root, "Placed"), Rect::new(100.0, 100.0, 50.0, 50.0));
        assert!(root.find_by_name("Loose").unwrap().config().bounds.is_none());
    }

    #[test]
    fn nested_cells_resolve_recursively() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 400, "height": 400 },
            "cells": [{
                "name": "Panel",
                "bounds": { "x": 0.5, "y": 0.5 },
                "padding": { "x": 0.25, "y": 0.25, "width": 0.5, "height": 0.5 },
                "cells": [{ "name": "Icon", "bounds": { "x": 0, "y": 0, "width": 1, "height": 1 } }]
            }]
        }));
        let panel = root.find_by_name("Panel").unwrap();
        assert_eq!(panel.bounds(), Rect::new(200.0, 200.0, 200.0, 200.0));
        assert_eq!(panel.area(), Rect::new(250.0, 250.0, 100.0, 100.0));
        assert_eq!(bounds_of(&root, "Icon"), panel.area());
    }

    #[test]
    fn flatten_is_pre_order() {
        let root = build(json!({
            "name": "Root",
            "cells": [
                { "name": "A", "cells": [{ "name": "A1" }, { "name": "A2" }] },
                { "name": "B" }
            ]
        }));
        let names: Vec<&str> = root.flatten().into_iter().map(Cell::name).collect();
        assert_eq!(names, vec!["Root", "A", "A1", "A2", "B"]);
    }

    #[test]
    fn find_by_name_returns_first_match() {
        let root = build(json!({
            "name": "Root",
            "cells": [
                { "name": "Child", "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 } },
                { "name": "Child", "bounds": { "x": "5", "y": 0, "width": 1, "height": 1 } }
            ]
        }));
        assert!(root.find_by_name("Child").is_some());
        assert_eq!(bounds_of(&root, "Child").x, 0.0);
        assert!(root.find_by_name("Should not be defined").is_none());
    }

    #[test]
    fn contents_attach_after_build() {
        let mut root: Cell<&str> = Cell::build(&config(json!({
            "name": "Root",
            "cells": [{ "name": "Slot" }, { "name": "Other" }]
        })))
        .unwrap();

        root.find_by_name_mut("Slot").unwrap().push_content("sprite");
        root.find_by_name_mut("Other")
            .unwrap()
            .contents_mut()
            .extend(["label", "sprite"]);

        assert_eq!(root.find_by_content(&"sprite").unwrap().name(), "Slot");
        assert_eq!(root.find_by_content(&"label").unwrap().name(), "Other");
        assert!(root.find_by_content(&"missing").is_none());
    }

    #[test]
    fn input_config_is_not_mutated() {
        let input = config(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "cells": [{ "name": "Child", "bounds": { "width": 0.5 } }]
        }));
        let before = input.clone();
        let (root, snapshot) =
            Cell::<()>::build_with_snapshot(&input, &BuildOptions::default()).unwrap();

        assert_eq!(input, before);
        assert_eq!(
            snapshot.cells[0].bounds,
            Some(RawBounds::new(0.0, 0.0, 50.0, 100.0))
        );
        assert_eq!(snapshot.bounds, before.bounds);
        assert_eq!(root.cells()[0].config().bounds, snapshot.cells[0].bounds);
        assert!(root.config().cells.is_empty());
    }

    #[test]
    fn identical_configs_build_identical_trees() {
        let value = json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 640, "height": 480 },
            "padding": 0.125,
            "cells": [
                { "name": "A", "bounds": { "y": 0, "width": 0.5 } },
                { "name": "B", "bounds": { "y": "10", "height": "32" }, "cells": [{ "name": "B1", "bounds": {} }] }
            ]
        });
        let first = build(value.clone());
        let second = build(value);

        let geometry = |root: &Cell| -> Vec<(Rect, Rect)> {
            root.flatten()
                .into_iter()
                .map(|cell| (cell.bounds(), cell.area()))
                .collect()
        };
        assert_eq!(geometry(&first), geometry(&second));
        assert_eq!(first.digest(), second.digest());
    }

    #[test]
    fn malformed_unit_is_nan_when_lenient() {
        let sink = Arc::new(MemorySink::new());
        let mut options = BuildOptions::default().with_logger(Logger::from_shared(sink.clone()));
        options.enable_metrics();

        let root: Cell = Cell::build_with(
            &config(json!({
                "name": "Root",
                "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
                "cells": [{ "name": "Child", "bounds": { "x": "wide", "y": 0 } }]
            })),
            &options,
        )
        .unwrap();

        let child = root.find_by_name("Child").unwrap().bounds();
        assert!(child.x.is_nan());
        assert!(child.width.is_nan());
        assert_eq!(child.y, 0.0);

        let warnings: Vec<_> = sink
            .events()
            .into_iter()
            .filter(|event| event.message == "malformed_unit")
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, LogLevel::Warn);
        assert_eq!(warnings[0].fields.get("value"), Some(&json!("wide")));

        let handle = options.metrics_handle().unwrap();
        let snapshot = handle.lock().unwrap().snapshot();
        assert_eq!(snapshot.malformed_units, 1);
    }

    #[test]
    fn malformed_unit_fails_when_strict() {
        let err = Cell::<()>::build_with(
            &config(json!({
                "name": "Root",
                "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
                "cells": [{ "name": "Child", "bounds": { "width": "auto" } }]
            })),
            &BuildOptions::strict(),
        )
        .unwrap_err();
        match err {
            CellError::MalformedUnit { cell, value } => {
                assert_eq!(cell, "Child");
                assert_eq!(value, "auto");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = CellConfig::new("Root").with_cell(CellConfig::new(""));
        let err = Cell::<()>::build(&input).unwrap_err();
        assert!(matches!(err, CellError::EmptyName));
    }

    #[test]
    fn build_logs_cells_and_summary() {
        let sink = Arc::new(MemorySink::new());
        let options = BuildOptions::default().with_logger(Logger::from_shared(sink.clone()));
        let _root: Cell = Cell::build_with(
            &config(json!({ "name": "Root", "cells": [{ "name": "A" }, { "name": "B" }] })),
            &options,
        )
        .unwrap();

        let messages = sink.messages();
        assert_eq!(
            messages,
            vec!["cell_resolved", "cell_resolved", "cell_resolved", "build_complete"]
        );
        let summary = sink.events().pop().unwrap();
        assert_eq!(summary.fields.get("cells"), Some(&json!(3)));
        assert_eq!(summary.fields.get("max_depth"), Some(&json!(1)));
    }

    #[test]
    fn quiet_logger_skips_debug_events() {
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::from_shared(sink.clone()).with_min_level(LogLevel::Info);
        let options = BuildOptions::default().with_logger(logger);
        let _root: Cell =
            Cell::build_with(&config(json!({ "name": "Root", "cells": [{ "name": "A" }] })), &options)
                .unwrap();
        assert_eq!(sink.messages(), vec!["build_complete"]);
    }

    #[test]
    fn place_uses_cell_area_and_modes() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 200, "height": 100 },
            "scale": "showAll",
            "align": "rightBottom"
        }));
        let placement = root.place(Size::new(50.0, 50.0)).unwrap();
        assert_eq!(placement.scale, Point::new(2.0, 2.0));
        assert_eq!(placement.position, Point::new(100.0, 0.0));
    }

    #[test]
    fn malformed_sibling_poisons_auto_flow() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 0, "y": 0, "width": 100, "height": 100 },
            "cells": [
                { "name": "A", "bounds": { "x": "wide", "y": 0, "width": "30" } },
                { "name": "B", "bounds": { "y": 0, "width": "30" } }
            ]
        }));
        assert!(bounds_of(&root, "A").x.is_nan());

        let b = bounds_of(&root, "B");
        assert!(b.x.is_nan());
        assert_eq!(b.y, 0.0);
        assert_eq!(b.width, 30.0);
    }

    #[test]
    fn pixel_positions_offset_from_area_origin() {
        let root = build(json!({
            "name": "Root",
            "bounds": { "x": 50, "y": 20, "width": 100, "height": 100 },
            "cells": [{ "name": "Child", "bounds": { "x": "10px", "y": "5" } }]
        }));
        assert_eq!(bounds_of(&root, "Child"), Rect::new(60.0, 25.0, 90.0, 95.0));
    }

    #[test]
    fn nan_max_keeps_nan() {
        assert!(nan_max(f64::NAN, 1.0).is_nan());
        assert!(nan_max(1.0, f64::NAN).is_nan());
        assert_eq!(nan_max(1.0, 2.0), 2.0);
    }

    #[test]
    fn grid_config_round_trip() {
        let grid_config = CellConfig::new("TestGrid")
            .with_bounds(RawBounds::new(0.0, 0.0, 200.0, 200.0))
            .with_padding(Padding::Uniform(10.0))
            .with_scale(CellScale::Fill)
            .with_align(CellAlign::CenterTop)
            .with_cell(
                CellConfig::new("TestCell1").with_bounds(RawBounds::new(0.0, 0.0, 100.0, 100.0)),
            );
        let grid: Cell = Cell::build(&grid_config).unwrap();

        assert_eq!(grid.config(), &grid_config.header());
        assert_eq!(grid.name(), "TestGrid");
        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.bounds(), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(grid.scale(), CellScale::Fill);
        assert_eq!(grid.align(), CellAlign::CenterTop);
        assert!(grid.find_by_name("TestCell1").is_some());
        assert!(grid.find_by_name("Should not be Defined").is_none());
    }
}
