use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated while building cell trees.
#[derive(Debug, Default, Clone)]
pub struct BuildMetrics {
    builds: u64,
    cells: u64,
    auto_positioned: u64,
    auto_sized: u64,
    malformed_units: u64,
    max_depth: usize,
}

impl BuildMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_build(&mut self) {
        self.builds = self.builds.saturating_add(1);
    }

    pub fn record_cell(&mut self, depth: usize) {
        self.cells = self.cells.saturating_add(1);
        self.max_depth = self.max_depth.max(depth);
    }

    /// One axis placed by auto-flow after its siblings.
    pub fn record_auto_position(&mut self) {
        self.auto_positioned = self.auto_positioned.saturating_add(1);
    }

    /// One extent filled to the far edge of the parent area.
    pub fn record_auto_size(&mut self) {
        self.auto_sized = self.auto_sized.saturating_add(1);
    }

    pub fn record_malformed_unit(&mut self) {
        self.malformed_units = self.malformed_units.saturating_add(1);
    }

    pub fn merge(&mut self, other: &BuildMetrics) {
        self.builds = self.builds.saturating_add(other.builds);
        self.cells = self.cells.saturating_add(other.cells);
        self.auto_positioned = self.auto_positioned.saturating_add(other.auto_positioned);
        self.auto_sized = self.auto_sized.saturating_add(other.auto_sized);
        self.malformed_units = self.malformed_units.saturating_add(other.malformed_units);
        self.max_depth = self.max_depth.max(other.max_depth);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            builds: self.builds,
            cells: self.cells,
            auto_positioned: self.auto_positioned,
            auto_sized: self.auto_sized,
            malformed_units: self.malformed_units,
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub builds: u64,
    pub cells: u64,
    pub auto_positioned: u64,
    pub auto_sized: u64,
    pub malformed_units: u64,
    pub max_depth: usize,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "build_complete", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("builds".to_string(), json!(self.builds));
        map.insert("cells".to_string(), json!(self.cells));
        map.insert("auto_positioned".to_string(), json!(self.auto_positioned));
        map.insert("auto_sized".to_string(), json!(self.auto_sized));
        map.insert("malformed_units".to_string(), json!(self.malformed_units));
        map.insert("max_depth".to_string(), json!(self.max_depth));
        map
    }
}
