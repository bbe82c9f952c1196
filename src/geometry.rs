/// Rectangle measured in grid cells.
///
/// Coordinates are signed so candidate placements coming from pointer math
/// (which may land left of or above the grid) can be represented and
/// rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl CellRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    /// True when either extent is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    pub fn contains_cell(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Size in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Rectangle in pixel space, relative to the grid container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_exclusive() {
        let rect = CellRect::new(1, 2, 3, 4);
        assert_eq!(rect.right(), 4);
        assert_eq!(rect.bottom(), 6);
        assert!(rect.contains_cell(1, 2));
        assert!(rect.contains_cell(3, 5));
        assert!(!rect.contains_cell(4, 5));
        assert!(!rect.contains_cell(3, 6));
    }

    #[test]
    fn degenerate_extents() {
        assert!(CellRect::new(0, 0, 0, 1).is_degenerate());
        assert!(CellRect::new(0, 0, 1, -1).is_degenerate());
        assert!(!CellRect::new(0, 0, 1, 1).is_degenerate());
    }

    #[test]
    fn zero_pixel_size_is_empty() {
        assert!(PixelSize::new(0.0, 10.0).is_empty());
        assert!(PixelSize::new(f32::NAN, 10.0).is_empty());
        assert!(!PixelSize::new(1.0, 1.0).is_empty());
    }
}
