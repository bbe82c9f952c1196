//! Event-driven editing session over a single item store.
//!
//! UI layers translate raw input into [`EditorEvent`]s and hand them to
//! [`EditorSession::dispatch`]. Every event runs to completion before the
//! next one; drag and resize gestures are a stream of independent
//! proposals, each validated against the current store.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::export::ExportCache;
use crate::geometry::{PixelSize, Point};
use crate::layout::grid::GridSettings;
use crate::layout::placement::PlacementError;
use crate::logging::{
    EDITOR_TARGET, LogLevel, Logger, METRICS_TARGET, event_with_fields, field, text_field,
};
use crate::metrics::{EditorMetrics, MetricSnapshot};
use crate::store::{ItemId, ItemStore, Proposal};
use crate::transform::GridGeometry;

pub mod driver;
pub mod gesture;

pub use gesture::{DragGesture, Gesture, RenameDraft, ResizeGesture};

/// Size of blocks created by [`EditorEvent::AddBlock`].
pub const DEFAULT_BLOCK_SIZE: (i32, i32) = (2, 2);

/// Configuration knobs for an editing session.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub settings: GridSettings,
    /// `(w, h)` of newly added blocks.
    pub default_block: (i32, i32),
    /// Optional structured logger shared with the store.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<EditorMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    pub metrics_target: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            settings: GridSettings::default(),
            default_block: DEFAULT_BLOCK_SIZE,
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: METRICS_TARGET.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn with_settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EditorMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EditorMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// User intents delivered to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    AddBlock,
    Remove { id: ItemId },
    Select { id: ItemId },
    ClearAll,
    /// Programmatic move, validated like a drop.
    MoveTo { id: ItemId, x: i32, y: i32 },
    DragStart { id: ItemId },
    DragMove { pointer: Point },
    Drop { pointer: Point },
    DragCancel,
    ResizeStart { id: ItemId, pointer: Point },
    ResizeMove { pointer: Point },
    ResizeEnd,
    /// Span sliders set the size directly.
    SetSpan { id: ItemId, w: i32, h: i32 },
    RenameStart { id: ItemId },
    RenameInput { text: String },
    RenameCommit,
    RenameCancel,
    ContainerResized { origin: Point, size: PixelSize },
    GenerateCode,
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBlock => "add_block",
            Self::Remove { .. } => "remove",
            Self::Select { .. } => "select",
            Self::ClearAll => "clear_all",
            Self::MoveTo { .. } => "move_to",
            Self::DragStart { .. } => "drag_start",
            Self::DragMove { .. } => "drag_move",
            Self::Drop { .. } => "drop",
            Self::DragCancel => "drag_cancel",
            Self::ResizeStart { .. } => "resize_start",
            Self::ResizeMove { .. } => "resize_move",
            Self::ResizeEnd => "resize_end",
            Self::SetSpan { .. } => "set_span",
            Self::RenameStart { .. } => "rename_start",
            Self::RenameInput { .. } => "rename_input",
            Self::RenameCommit => "rename_commit",
            Self::RenameCancel => "rename_cancel",
            Self::ContainerResized { .. } => "container_resized",
            Self::GenerateCode => "generate_code",
        }
    }
}

/// What happened to a dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// State changed (or the gesture advanced).
    Applied,
    /// The proposal was validated and discarded; state is unchanged.
    Rejected,
    /// Nothing to act on: no gesture in flight, unknown id, or unmeasured container.
    Ignored,
    /// Surfaced failure. Only adding a block can fail.
    Failed(PlacementError),
}

impl EventOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Rejected => "rejected",
            Self::Ignored => "ignored",
            Self::Failed(_) => "failed",
        }
    }
}

impl From<Proposal> for EventOutcome {
    fn from(proposal: Proposal) -> Self {
        match proposal {
            Proposal::Committed => Self::Applied,
            Proposal::Rejected => Self::Rejected,
            Proposal::Missing => Self::Ignored,
        }
    }
}

fn applied_if(changed: bool) -> EventOutcome {
    if changed {
        EventOutcome::Applied
    } else {
        EventOutcome::Ignored
    }
}

pub struct EditorSession {
    store: ItemStore,
    geometry: GridGeometry,
    config: EditorConfig,
    gesture: Gesture,
    rename: Option<RenameDraft>,
    export: ExportCache,
    started_at: Instant,
    last_metrics_emit: Option<Instant>,
}

impl EditorSession {
    pub fn new(mut config: EditorConfig) -> Self {
        if config.metrics.is_none() && config.metrics_interval > Duration::ZERO {
            config.enable_metrics();
        }
        let mut store = ItemStore::new(config.settings.clone());
        store.set_logger(config.logger.clone());
        let geometry = GridGeometry::unmeasured(&config.settings);

        let session = Self {
            store,
            geometry,
            config,
            gesture: Gesture::Idle,
            rename: None,
            export: ExportCache::default(),
            started_at: Instant::now(),
            last_metrics_emit: None,
        };
        session.log(
            LogLevel::Info,
            "session_started",
            [
                field("columns", session.config.settings.columns()),
                field("rows", session.config.settings.rows()),
            ],
        );
        session
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn rename_draft(&self) -> Option<&RenameDraft> {
        self.rename.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Markup from the most recent [`EditorEvent::GenerateCode`].
    pub fn generated_code(&self) -> Option<&str> {
        self.export.last()
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started_at.elapsed()))
    }

    pub fn dispatch(&mut self, event: EditorEvent) -> EventOutcome {
        let name = event.name();
        let outcome = self.apply(event);
        self.with_metrics(EditorMetrics::record_event);
        self.log(
            LogLevel::Debug,
            "event_dispatched",
            [text_field("event", name), text_field("outcome", outcome.name())],
        );
        self.maybe_emit_metrics();
        outcome
    }

    /// Dispatch a sequence of events in order, collecting their outcomes.
    pub fn run_scripted<I>(&mut self, events: I) -> Vec<EventOutcome>
    where
        I: IntoIterator<Item = EditorEvent>,
    {
        events.into_iter().map(|event| self.dispatch(event)).collect()
    }

    fn apply(&mut self, event: EditorEvent) -> EventOutcome {
        match event {
            EditorEvent::AddBlock => self.add_block(),
            EditorEvent::Remove { id } => self.remove(&id),
            EditorEvent::Select { id } => applied_if(self.store.select(&id)),
            EditorEvent::ClearAll => {
                self.store.clear_all();
                self.gesture = Gesture::Idle;
                self.rename = None;
                EventOutcome::Applied
            }
            EditorEvent::MoveTo { id, x, y } => self.propose_move(&id, x, y),
            EditorEvent::DragStart { id } => self.drag_start(id),
            EditorEvent::DragMove { pointer } => self.drag_move(pointer),
            EditorEvent::Drop { pointer } => self.drop_at(pointer),
            EditorEvent::DragCancel => self.end_gesture(|g| matches!(g, Gesture::Dragging(_))),
            EditorEvent::ResizeStart { id, pointer } => self.resize_start(id, pointer),
            EditorEvent::ResizeMove { pointer } => self.resize_move(pointer),
            EditorEvent::ResizeEnd => self.end_gesture(|g| matches!(g, Gesture::Resizing(_))),
            EditorEvent::SetSpan { id, w, h } => self.propose_resize(&id, w, h),
            EditorEvent::RenameStart { id } => self.rename_start(id),
            EditorEvent::RenameInput { text } => match self.rename.as_mut() {
                Some(draft) => {
                    draft.text = text;
                    EventOutcome::Applied
                }
                None => EventOutcome::Ignored,
            },
            EditorEvent::RenameCommit => match self.rename.take() {
                Some(draft) => applied_if(self.store.rename_item(&draft.id, draft.text)),
                None => EventOutcome::Ignored,
            },
            EditorEvent::RenameCancel => applied_if(self.rename.take().is_some()),
            EditorEvent::ContainerResized { origin, size } => {
                self.geometry.set_container(origin, size);
                EventOutcome::Applied
            }
            EditorEvent::GenerateCode => {
                let (_, fresh) = self.export.render(&self.store);
                self.with_metrics(EditorMetrics::record_export);
                self.log(LogLevel::Debug, "code_generated", [field("fresh", fresh)]);
                EventOutcome::Applied
            }
        }
    }

    fn add_block(&mut self) -> EventOutcome {
        let (w, h) = self.config.default_block;
        match self.store.add_default_item(w, h) {
            Ok(_) => {
                self.with_metrics(|m| m.record_add(true));
                EventOutcome::Applied
            }
            Err(err) => {
                self.with_metrics(|m| m.record_add(false));
                self.log(
                    LogLevel::Warn,
                    "no_space_available",
                    [field("w", w), field("h", h)],
                );
                EventOutcome::Failed(err)
            }
        }
    }

    fn remove(&mut self, id: &str) -> EventOutcome {
        if !self.store.remove_item(id) {
            return EventOutcome::Ignored;
        }
        self.with_metrics(EditorMetrics::record_removal);
        if self.gesture.target() == Some(id) {
            self.gesture = Gesture::Idle;
        }
        if self.rename.as_ref().is_some_and(|draft| draft.id == id) {
            self.rename = None;
        }
        EventOutcome::Applied
    }

    fn propose_move(&mut self, id: &str, x: i32, y: i32) -> EventOutcome {
        let proposal = self.store.move_item(id, x, y);
        if proposal != Proposal::Missing {
            self.with_metrics(|m| m.record_move(proposal.is_committed()));
        }
        proposal.into()
    }

    fn propose_resize(&mut self, id: &str, w: i32, h: i32) -> EventOutcome {
        let proposal = self.store.resize_item(id, w, h);
        if proposal != Proposal::Missing {
            self.with_metrics(|m| m.record_resize(proposal.is_committed()));
        }
        proposal.into()
    }

    fn drag_start(&mut self, id: ItemId) -> EventOutcome {
        if self.store.get(&id).is_none() {
            return EventOutcome::Ignored;
        }
        self.gesture = Gesture::Dragging(DragGesture { id, preview: None });
        EventOutcome::Applied
    }

    fn drag_move(&mut self, pointer: Point) -> EventOutcome {
        let Gesture::Dragging(drag) = &mut self.gesture else {
            return EventOutcome::Ignored;
        };
        let Some(item) = self.store.get(&drag.id) else {
            return EventOutcome::Ignored;
        };
        if self.geometry.cell_size().is_none() {
            return EventOutcome::Ignored;
        }
        drag.preview = Some(self.geometry.drag_preview(pointer, item.w(), item.h()));
        EventOutcome::Applied
    }

    fn drop_at(&mut self, pointer: Point) -> EventOutcome {
        let Gesture::Dragging(drag) = &self.gesture else {
            return EventOutcome::Ignored;
        };
        let id = drag.id.clone();
        self.gesture = Gesture::Idle;

        let Some(item) = self.store.get(&id) else {
            return EventOutcome::Ignored;
        };
        match self.geometry.snap_to_cell(pointer, item.w(), item.h()) {
            Some((x, y)) => self.propose_move(&id, x, y),
            None => EventOutcome::Ignored,
        }
    }

    fn resize_start(&mut self, id: ItemId, pointer: Point) -> EventOutcome {
        let Some(item) = self.store.get(&id) else {
            return EventOutcome::Ignored;
        };
        let (start_w, start_h) = (item.w(), item.h());
        self.gesture = Gesture::Resizing(ResizeGesture {
            id,
            start: pointer,
            start_w,
            start_h,
        });
        EventOutcome::Applied
    }

    fn resize_move(&mut self, pointer: Point) -> EventOutcome {
        let Gesture::Resizing(resize) = &self.gesture else {
            return EventOutcome::Ignored;
        };
        let delta = resize.delta(pointer);
        let candidate = self
            .geometry
            .resize_from_delta(resize.start_w, resize.start_h, delta);
        let Some((w, h)) = candidate else {
            return EventOutcome::Ignored;
        };
        let id = resize.id.clone();
        self.propose_resize(&id, w, h)
    }

    fn end_gesture(&mut self, matches: impl Fn(&Gesture) -> bool) -> EventOutcome {
        if !matches(&self.gesture) {
            return EventOutcome::Ignored;
        }
        self.gesture = Gesture::Idle;
        EventOutcome::Applied
    }

    fn rename_start(&mut self, id: ItemId) -> EventOutcome {
        let Some(item) = self.store.get(&id) else {
            return EventOutcome::Ignored;
        };
        let text = item.content().to_string();
        self.rename = Some(RenameDraft { id, text });
        EventOutcome::Applied
    }

    fn with_metrics(&self, record: impl FnOnce(&mut EditorMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref()
            && let Ok(mut guard) = metrics.lock()
        {
            record(&mut guard);
        }
    }

    fn maybe_emit_metrics(&mut self) {
        if self.config.metrics_interval == Duration::ZERO {
            return;
        }
        let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        else {
            return;
        };

        let now = Instant::now();
        match self.last_metrics_emit {
            Some(last) if now.duration_since(last) < self.config.metrics_interval => return,
            Some(_) => {}
            None => {
                self.last_metrics_emit = Some(now);
                return;
            }
        }
        self.last_metrics_emit = Some(now);

        if let Ok(guard) = metrics.lock() {
            let uptime = now.duration_since(self.started_at);
            let event = guard.snapshot(uptime).to_log_event(&self.config.metrics_target);
            let _ = logger.log_event(event);
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, EDITOR_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("items", &self.store.len())
            .field("gesture", &self.gesture)
            .field("rename", &self.rename)
            .field("geometry", &self.geometry)
            .finish()
    }
}
