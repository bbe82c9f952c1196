//! Pixel <-> cell conversions for pointer-driven gestures.
//!
//! Conversions are advisory. A snapped cell is clamped into the frame so it
//! satisfies the bounds invariant, but overlap is left to the item store.
//! Cell size is `container / cell_count` per axis; the visual gap is not
//! part of the math.

use crate::geometry::{CellRect, PixelRect, PixelSize, Point};
use crate::layout::grid::GridSettings;

/// Pixel placement of the grid container plus the grid resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    origin: Point,
    size: PixelSize,
    columns: u16,
    rows: u16,
}

impl GridGeometry {
    pub fn new(origin: Point, size: PixelSize, settings: &GridSettings) -> Self {
        Self {
            origin,
            size,
            columns: settings.columns(),
            rows: settings.rows(),
        }
    }

    /// Geometry for a container that has not been measured yet.
    pub fn unmeasured(settings: &GridSettings) -> Self {
        Self::new(Point::default(), PixelSize::default(), settings)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Update the container's pixel placement after a layout change.
    pub fn set_container(&mut self, origin: Point, size: PixelSize) {
        self.origin = origin;
        self.size = size;
    }

    /// Pixel size of one cell, or `None` while the container has no area.
    pub fn cell_size(&self) -> Option<PixelSize> {
        if self.size.is_empty() || !self.size.width.is_finite() || !self.size.height.is_finite() {
            return None;
        }
        Some(PixelSize::new(
            self.size.width / f32::from(self.columns),
            self.size.height / f32::from(self.rows),
        ))
    }

    /// Snap a pointer position to the top-left cell of a dragged `w x h` item.
    ///
    /// The pointer is treated as the item's centre. The result is clamped to
    /// `[0, cells - extent]` on each axis.
    pub fn snap_to_cell(&self, pointer: Point, w: i32, h: i32) -> Option<(i32, i32)> {
        let cell = self.cell_size()?;
        let footprint = PixelSize::new(w as f32 * cell.width, h as f32 * cell.height);

        let rel_x = pointer.x - self.origin.x - footprint.width / 2.0;
        let rel_y = pointer.y - self.origin.y - footprint.height / 2.0;

        let x = snap_axis(rel_x / cell.width, i32::from(self.columns), w)?;
        let y = snap_axis(rel_y / cell.height, i32::from(self.rows), h)?;
        Some((x, y))
    }

    /// Candidate size for a resize gesture that started at `start_w x start_h`
    /// and has since moved the pointer by `delta` pixels. Never below 1x1.
    pub fn resize_from_delta(
        &self,
        start_w: i32,
        start_h: i32,
        delta: Point,
    ) -> Option<(i32, i32)> {
        let cell = self.cell_size()?;
        let w = round_half_up(start_w as f32 + delta.x / cell.width)?;
        let h = round_half_up(start_h as f32 + delta.y / cell.height)?;
        Some((w.max(1), h.max(1)))
    }

    /// Pixel rectangle covered by a cell rectangle, relative to the container.
    pub fn cell_rect_to_pixels(&self, rect: CellRect) -> PixelRect {
        let columns = f32::from(self.columns);
        let rows = f32::from(self.rows);
        PixelRect::new(
            rect.x as f32 / columns * self.size.width,
            rect.y as f32 / rows * self.size.height,
            rect.w as f32 / columns * self.size.width,
            rect.h as f32 / rows * self.size.height,
        )
    }

    /// Floating preview of a dragged `w x h` item centred on the pointer,
    /// relative to the container. Not snapped or clamped.
    pub fn drag_preview(&self, pointer: Point, w: i32, h: i32) -> PixelRect {
        let footprint = self.cell_rect_to_pixels(CellRect::new(0, 0, w, h));
        PixelRect::new(
            pointer.x - footprint.width / 2.0 - self.origin.x,
            pointer.y - footprint.height / 2.0 - self.origin.y,
            footprint.width,
            footprint.height,
        )
    }
}

fn snap_axis(cells: f32, count: i32, extent: i32) -> Option<i32> {
    let upper = (count - extent).max(0);
    round_half_up(cells).map(|value| value.clamp(0, upper))
}

/// Round to nearest with halves going up, matching pointer-math conventions.
fn round_half_up(value: f32) -> Option<i32> {
    if !value.is_finite() {
        return None;
    }
    Some((value + 0.5).floor() as i32)
}
