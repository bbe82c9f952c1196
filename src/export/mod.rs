//! Layout export orchestrator.
//!
//! Exporters only read the store; they never mutate items or settings.

mod markup;

pub use markup::{
    ExportCache, LayoutSnapshot, MarkupExporter, column_span_classes, row_span_classes,
};
