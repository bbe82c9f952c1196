use std::fmt::Write as _;

use blake3::Hash;
use serde::Serialize;

use crate::layout::grid::GridSettings;
use crate::store::{Item, ItemStore};

const ITEM_INDENT: usize = 4;
const ITEM_CLASSES: &str = "rounded-md overflow-hidden border border-white";
const INNER_CLASSES: &str = "h-full w-full p-4 flex items-center justify-center";

/// Renders a store as a responsive grid section, one fragment per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupExporter;

impl MarkupExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render_store(&self, store: &ItemStore) -> String {
        self.render(store.items(), store.settings())
    }

    pub fn render(&self, items: &[Item], settings: &GridSettings) -> String {
        let mut out = String::new();
        out.push_str("<section className=\"w-full max-w-7xl mx-auto\">\n");
        let _ = writeln!(
            out,
            "  <div className=\"grid grid-cols-1 sm:grid-cols-2 md:grid-cols-4 lg:grid-cols-{} gap-{} p-4\">",
            settings.columns(),
            settings.gap()
        );

        for item in items {
            for line in item_fragment(item).lines() {
                let _ = writeln!(out, "{:indent$}{line}", "", indent = ITEM_INDENT);
            }
        }

        out.push_str("  </div>\n");
        out.push_str("</section>");
        out
    }
}

fn item_fragment(item: &Item) -> String {
    format!(
        "<div\n  className=\"{} {} {ITEM_CLASSES}\"\n>\n  <div className=\"{INNER_CLASSES}\">\n    {}\n  </div>\n</div>",
        column_span_classes(item.w()),
        row_span_classes(item.h()),
        item.content()
    )
}

/// Column span collapses to 1, 2, and 4 columns on narrower breakpoints.
pub fn column_span_classes(w: i32) -> String {
    if w <= 1 {
        return "col-span-1".to_string();
    }
    format!(
        "col-span-1 sm:col-span-{} md:col-span-{} lg:col-span-{w}",
        w.min(2),
        w.min(4)
    )
}

/// Tall blocks only span rows from the medium breakpoint up.
pub fn row_span_classes(h: i32) -> String {
    if h <= 1 {
        return "row-span-1".to_string();
    }
    format!("row-span-1 md:row-span-{h}")
}

/// Re-renders markup only when the store's fingerprint changes.
#[derive(Debug, Default)]
pub struct ExportCache {
    exporter: MarkupExporter,
    last: Option<(Hash, String)>,
}

impl ExportCache {
    pub fn new(exporter: MarkupExporter) -> Self {
        Self {
            exporter,
            last: None,
        }
    }

    /// Markup for the current store state. Returns `(markup, fresh)` where
    /// `fresh` is false when the cached render was reused.
    pub fn render(&mut self, store: &ItemStore) -> (&str, bool) {
        let fingerprint = store.fingerprint();
        let fresh = !matches!(&self.last, Some((hash, _)) if *hash == fingerprint);
        if fresh {
            let markup = self.exporter.render_store(store);
            self.last = Some((fingerprint, markup));
        }
        let markup = self.last.as_ref().map(|(_, m)| m.as_str()).unwrap_or_default();
        (markup, fresh)
    }

    /// Most recent markup, if anything has been rendered.
    pub fn last(&self) -> Option<&str> {
        self.last.as_ref().map(|(_, markup)| markup.as_str())
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

/// Read-only JSON view of a store.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSnapshot<'a> {
    pub settings: &'a GridSettings,
    pub items: &'a [Item],
}

impl<'a> LayoutSnapshot<'a> {
    pub fn of(store: &'a ItemStore) -> Self {
        Self {
            settings: store.settings(),
            items: store.items(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
