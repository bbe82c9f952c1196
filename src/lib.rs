//! Bento grid placement engine.
//!
//! Rectangular items live on a fixed `columns x rows` cell grid. The store
//! keeps every item in bounds and non-overlapping; pointer gestures are
//! translated into cell proposals that the store validates and either
//! commits or silently discards. Layouts can be exported as responsive
//! grid markup.

pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod store;
pub mod transform;

pub use editor::driver::{ScriptCommand, ScriptDriver, ScriptDriverError, ScriptResponse};
pub use editor::{
    DEFAULT_BLOCK_SIZE, EditorConfig, EditorEvent, EditorSession, EventOutcome, Gesture,
    RenameDraft,
};
pub use error::{BentoError, Result};
pub use export::{ExportCache, LayoutSnapshot, MarkupExporter};
pub use geometry::{CellRect, PixelRect, PixelSize, Point};
pub use layout::{
    Footprint, GridCell, GridError, GridSettings, PlacementError, can_place, find_first_fit,
    fits_in_bounds, occupancy, overlaps,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{EditorMetrics, MetricSnapshot};
pub use store::{Item, ItemId, ItemStore, Proposal};
pub use transform::GridGeometry;
