use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters for editor activity. Rejections are counted separately so a
/// noisy drag gesture shows up as a high rejected/committed ratio.
#[derive(Debug, Default, Clone)]
pub struct EditorMetrics {
    events: u64,
    adds: u64,
    failed_adds: u64,
    moves: u64,
    rejected_moves: u64,
    resizes: u64,
    rejected_resizes: u64,
    removals: u64,
    exports: u64,
}

impl EditorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self) {
        self.events = self.events.saturating_add(1);
    }

    pub fn record_add(&mut self, placed: bool) {
        if placed {
            self.adds = self.adds.saturating_add(1);
        } else {
            self.failed_adds = self.failed_adds.saturating_add(1);
        }
    }

    pub fn record_move(&mut self, committed: bool) {
        if committed {
            self.moves = self.moves.saturating_add(1);
        } else {
            self.rejected_moves = self.rejected_moves.saturating_add(1);
        }
    }

    pub fn record_resize(&mut self, committed: bool) {
        if committed {
            self.resizes = self.resizes.saturating_add(1);
        } else {
            self.rejected_resizes = self.rejected_resizes.saturating_add(1);
        }
    }

    pub fn record_removal(&mut self) {
        self.removals = self.removals.saturating_add(1);
    }

    pub fn record_export(&mut self) {
        self.exports = self.exports.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            events: self.events,
            adds: self.adds,
            failed_adds: self.failed_adds,
            moves: self.moves,
            rejected_moves: self.rejected_moves,
            resizes: self.resizes,
            rejected_resizes: self.rejected_resizes,
            removals: self.removals,
            exports: self.exports,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub events: u64,
    pub adds: u64,
    pub failed_adds: u64,
    pub moves: u64,
    pub rejected_moves: u64,
    pub resizes: u64,
    pub rejected_resizes: u64,
    pub removals: u64,
    pub exports: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "editor_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("events".to_string(), json!(self.events));
        map.insert("adds".to_string(), json!(self.adds));
        map.insert("failed_adds".to_string(), json!(self.failed_adds));
        map.insert("moves".to_string(), json!(self.moves));
        map.insert("rejected_moves".to_string(), json!(self.rejected_moves));
        map.insert("resizes".to_string(), json!(self.resizes));
        map.insert("rejected_resizes".to_string(), json!(self.rejected_resizes));
        map.insert("removals".to_string(), json!(self.removals));
        map.insert("exports".to_string(), json!(self.exports));
        map
    }
}
