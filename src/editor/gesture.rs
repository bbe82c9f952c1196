use crate::geometry::{PixelRect, Point};
use crate::store::ItemId;

/// Pointer gesture currently in flight. At most one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragGesture),
    Resizing(ResizeGesture),
}

impl Gesture {
    /// Id of the item the gesture is acting on.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(&drag.id),
            Self::Resizing(resize) => Some(&resize.id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub id: ItemId,
    /// Floating preview relative to the container, updated on every move.
    pub preview: Option<PixelRect>,
}

/// Resize anchored at the pointer position and item size when the handle was grabbed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeGesture {
    pub id: ItemId,
    pub start: Point,
    pub start_w: i32,
    pub start_h: i32,
}

impl ResizeGesture {
    pub fn delta(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.start.x, pointer.y - self.start.y)
    }
}

/// Label being edited but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub id: ItemId,
    pub text: String,
}
