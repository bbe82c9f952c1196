use blake3::Hash;
use serde::Serialize;
use serde_json::Value;

use crate::geometry::CellRect;
use crate::layout::grid::{GridCell, GridSettings, occupancy};
use crate::layout::placement::{Footprint, PlacementError, can_place, find_first_fit};
use crate::logging::{LogLevel, Logger, STORE_TARGET, event_with_fields, field, text_field};

/// Stable item identifier, minted as `item-<n>`.
pub type ItemId = String;

const ID_PREFIX: &str = "item-";
const LABEL_PREFIX: &str = "Block";
const FIRST_ID: u64 = 1;

/// A block anchored on the grid. Only [`ItemStore`] mutates these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    content: String,
}

impl Item {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn w(&self) -> i32 {
        self.w
    }

    pub fn h(&self) -> i32 {
        self.h
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.w, self.h)
    }
}

impl Footprint for Item {
    fn footprint_id(&self) -> &str {
        &self.id
    }

    fn footprint(&self) -> CellRect {
        self.rect()
    }
}

/// Result of proposing a move or resize.
///
/// Rejection is an ordinary value, not an error: interactive callers
/// propose on every pointer event and simply drop rejected proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proposal {
    Committed,
    Rejected,
    Missing,
}

impl Proposal {
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// Authoritative, ordered collection of placed items.
#[derive(Debug, Clone)]
pub struct ItemStore {
    settings: GridSettings,
    items: Vec<Item>,
    next_id: u64,
    selected: Option<ItemId>,
    logger: Option<Logger>,
}

impl ItemStore {
    pub fn new(settings: GridSettings) -> Self {
        Self {
            settings,
            items: Vec::new(),
            next_id: FIRST_ID,
            selected: None,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger = logger;
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Seat a new `width x height` item at the first free slot.
    ///
    /// The id counter only advances when a slot is found; on failure the
    /// store is left untouched.
    pub fn add_item(
        &mut self,
        width: i32,
        height: i32,
        label: impl Into<String>,
    ) -> Result<ItemId, PlacementError> {
        let Some((x, y)) = find_first_fit(width, height, &self.items, &self.settings) else {
            self.log("add_failed", [field("w", width), field("h", height)]);
            return Err(PlacementError::NoSpaceAvailable { width, height });
        };

        let id = format!("{ID_PREFIX}{}", self.next_id);
        self.next_id += 1;
        self.items.push(Item {
            id: id.clone(),
            x,
            y,
            w: width,
            h: height,
            content: label.into(),
        });
        self.selected = Some(id.clone());
        self.log(
            "item_added",
            [
                text_field("id", id.as_str()),
                field("x", x),
                field("y", y),
                field("w", width),
                field("h", height),
            ],
        );
        Ok(id)
    }

    /// Add an item labelled `Block <n>`, where `<n>` matches its id.
    pub fn add_default_item(&mut self, width: i32, height: i32) -> Result<ItemId, PlacementError> {
        let label = format!("{LABEL_PREFIX} {}", self.next_id);
        self.add_item(width, height, label)
    }

    /// Remove an item. Unknown ids are a no-op; returns whether anything was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            if self.selected.as_deref() == Some(id) {
                self.selected = None;
            }
            self.log("item_removed", [text_field("id", id)]);
        }
        removed
    }

    /// Propose a new top-left corner for an item, keeping its size.
    pub fn move_item(&mut self, id: &str, x: i32, y: i32) -> Proposal {
        let Some(index) = self.index_of(id) else {
            return Proposal::Missing;
        };
        let current = self.items[index].rect();
        let candidate = CellRect::new(x, y, current.w, current.h);

        if !can_place(candidate, &self.items, Some(id), &self.settings) {
            self.log(
                "move_rejected",
                [text_field("id", id), field("x", x), field("y", y)],
            );
            return Proposal::Rejected;
        }

        let item = &mut self.items[index];
        item.x = x;
        item.y = y;
        self.log(
            "item_moved",
            [text_field("id", id), field("x", x), field("y", y)],
        );
        Proposal::Committed
    }

    /// Propose a new size for an item, keeping its top-left corner.
    pub fn resize_item(&mut self, id: &str, w: i32, h: i32) -> Proposal {
        let Some(index) = self.index_of(id) else {
            return Proposal::Missing;
        };
        let current = self.items[index].rect();
        let candidate = CellRect::new(current.x, current.y, w, h);

        if !can_place(candidate, &self.items, Some(id), &self.settings) {
            self.log(
                "resize_rejected",
                [text_field("id", id), field("w", w), field("h", h)],
            );
            return Proposal::Rejected;
        }

        let item = &mut self.items[index];
        item.w = w;
        item.h = h;
        self.log(
            "item_resized",
            [text_field("id", id), field("w", w), field("h", h)],
        );
        Proposal::Committed
    }

    /// Replace an item's label. Returns false for unknown ids.
    pub fn rename_item(&mut self, id: &str, label: impl Into<String>) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let label = label.into();
        self.log(
            "item_renamed",
            [text_field("id", id), text_field("label", label.as_str())],
        );
        self.items[index].content = label;
        true
    }

    /// Drop every item, reset the id sequence, and clear the selection.
    pub fn clear_all(&mut self) {
        let cleared = self.items.len();
        self.items.clear();
        self.next_id = FIRST_ID;
        self.selected = None;
        self.log("cleared", [field("items", cleared)]);
    }

    /// Select an existing item. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Largest `(w, h)` an item could take from its current corner, ignoring other items.
    pub fn max_span(&self, id: &str) -> Option<(i32, i32)> {
        self.get(id).map(|item| {
            (
                i32::from(self.settings.columns()) - item.x,
                i32::from(self.settings.rows()) - item.y,
            )
        })
    }

    /// Per-cell occupancy, recomputed from the item list.
    pub fn occupancy(&self) -> Vec<GridCell> {
        occupancy(&self.settings, self.items.iter().map(Item::rect))
    }

    /// Content hash of the grid settings and ordered item list.
    pub fn fingerprint(&self) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.settings.columns().to_le_bytes());
        hasher.update(&self.settings.rows().to_le_bytes());
        hasher.update(&self.settings.gap().to_le_bytes());
        hash_str(&mut hasher, self.settings.background_color());
        for item in &self.items {
            hash_str(&mut hasher, &item.id);
            for value in [item.x, item.y, item.w, item.h] {
                hasher.update(&value.to_le_bytes());
            }
            hash_str(&mut hasher, &item.content);
        }
        hasher.finalize()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn log<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(LogLevel::Debug, STORE_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
