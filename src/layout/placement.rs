//! Placement engine - pure legality checks and the first-fit search.
//!
//! Nothing in here mutates state. The item store calls these functions
//! before committing any change, so the bounds and no-overlap invariants
//! hold for every state a caller can observe.

use thiserror::Error;

use crate::geometry::CellRect;
use crate::layout::grid::GridSettings;

/// Anything that occupies a rectangle on the grid under a stable id.
pub trait Footprint {
    fn footprint_id(&self) -> &str;
    fn footprint(&self) -> CellRect;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no space available for a {width}x{height} block")]
    NoSpaceAvailable { width: i32, height: i32 },
}

/// True iff `rect` has positive extent and lies fully inside a `columns x rows` grid.
pub fn fits_in_bounds(rect: CellRect, columns: u16, rows: u16) -> bool {
    !rect.is_degenerate()
        && rect.x >= 0
        && rect.y >= 0
        && rect.right() <= i32::from(columns)
        && rect.bottom() <= i32::from(rows)
}

/// Axis-aligned intersection test. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: CellRect, b: CellRect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Bounds check plus overlap check against every item except `excluding`.
pub fn can_place<'a, T, I>(
    candidate: CellRect,
    items: I,
    excluding: Option<&str>,
    settings: &GridSettings,
) -> bool
where
    T: Footprint + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if !fits_in_bounds(candidate, settings.columns(), settings.rows()) {
        return false;
    }

    items
        .into_iter()
        .filter(|item| Some(item.footprint_id()) != excluding)
        .all(|item| !overlaps(candidate, item.footprint()))
}

/// Scan top-left positions row-major and return the first free `width x height` slot.
///
/// Greedy first fit: `y` ascending, then `x` ascending, no backtracking and
/// no compaction of existing items. Degenerate or oversized requests return
/// `None` without scanning.
pub fn find_first_fit<'a, T, I>(
    width: i32,
    height: i32,
    items: I,
    settings: &GridSettings,
) -> Option<(i32, i32)>
where
    T: Footprint + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let columns = i32::from(settings.columns());
    let rows = i32::from(settings.rows());
    if width <= 0 || height <= 0 || width > columns || height > rows {
        return None;
    }

    let taken = OccupancyMask::build(settings, items);

    for y in 0..=rows - height {
        for x in 0..=columns - width {
            if taken.is_free(CellRect::new(x, y, width, height)) {
                return Some((x, y));
            }
        }
    }

    None
}

/// Scratch bitmap used by the first-fit scan.
struct OccupancyMask {
    columns: i32,
    cells: Vec<bool>,
}

impl OccupancyMask {
    fn build<'a, T, I>(settings: &GridSettings, items: I) -> Self
    where
        T: Footprint + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let columns = i32::from(settings.columns());
        let rows = i32::from(settings.rows());
        let mut cells = vec![false; settings.cell_count()];

        for item in items {
            let rect = item.footprint();
            for y in rect.y.max(0)..rect.bottom().min(rows) {
                for x in rect.x.max(0)..rect.right().min(columns) {
                    cells[(y * columns + x) as usize] = true;
                }
            }
        }

        Self { columns, cells }
    }

    fn is_free(&self, rect: CellRect) -> bool {
        (rect.y..rect.bottom()).all(|y| {
            (rect.x..rect.right()).all(|x| !self.cells[(y * self.columns + x) as usize])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block(&'static str, CellRect);

    impl Footprint for Block {
        fn footprint_id(&self) -> &str {
            self.0
        }

        fn footprint(&self) -> CellRect {
            self.1
        }
    }

    fn grid(columns: u16, rows: u16) -> GridSettings {
        GridSettings::new(columns, rows).unwrap()
    }

    #[test]
    fn bounds_check() {
        assert!(fits_in_bounds(CellRect::new(0, 0, 4, 4), 4, 4));
        assert!(fits_in_bounds(CellRect::new(2, 3, 2, 1), 4, 4));
        assert!(!fits_in_bounds(CellRect::new(3, 0, 2, 1), 4, 4));
        assert!(!fits_in_bounds(CellRect::new(0, 3, 1, 2), 4, 4));
        assert!(!fits_in_bounds(CellRect::new(-1, 0, 1, 1), 4, 4));
        assert!(!fits_in_bounds(CellRect::new(0, -1, 1, 1), 4, 4));
    }

    #[test]
    fn degenerate_rects_never_fit() {
        assert!(!fits_in_bounds(CellRect::new(0, 0, 0, 1), 4, 4));
        assert!(!fits_in_bounds(CellRect::new(0, 0, 1, -2), 4, 4));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = CellRect::new(0, 0, 2, 2);
        assert!(!overlaps(a, CellRect::new(2, 0, 2, 2)));
        assert!(!overlaps(a, CellRect::new(0, 2, 2, 2)));
        assert!(!overlaps(a, CellRect::new(2, 2, 1, 1)));
        assert!(overlaps(a, CellRect::new(1, 1, 2, 2)));
        assert!(overlaps(CellRect::new(1, 1, 2, 2), a));
    }

    #[test]
    fn containment_overlaps() {
        assert!(overlaps(CellRect::new(0, 0, 4, 4), CellRect::new(1, 1, 1, 1)));
    }

    #[test]
    fn can_place_excludes_self() {
        let settings = grid(4, 4);
        let items = [Block("a", CellRect::new(0, 0, 2, 2))];
        let shifted = CellRect::new(1, 0, 2, 2);
        assert!(can_place(shifted, &items, Some("a"), &settings));
        assert!(!can_place(shifted, &items, None, &settings));
    }

    #[test]
    fn can_place_rejects_out_of_bounds() {
        let settings = grid(4, 4);
        let items: [Block; 0] = [];
        assert!(!can_place(CellRect::new(3, 3, 2, 2), &items, None, &settings));
    }

    #[test]
    fn first_fit_on_empty_grid_is_origin() {
        let items: [Block; 0] = [];
        assert_eq!(find_first_fit(2, 2, &items, &grid(4, 4)), Some((0, 0)));
    }

    #[test]
    fn first_fit_scans_left_to_right_then_down() {
        let settings = grid(4, 4);
        let items = [Block("a", CellRect::new(0, 0, 2, 2))];
        assert_eq!(find_first_fit(2, 2, &items, &settings), Some((2, 0)));

        let items = [
            Block("a", CellRect::new(0, 0, 2, 2)),
            Block("b", CellRect::new(2, 0, 2, 2)),
        ];
        assert_eq!(find_first_fit(2, 2, &items, &settings), Some((0, 2)));
        assert_eq!(find_first_fit(1, 1, &items, &settings), Some((0, 2)));
    }

    #[test]
    fn first_fit_does_not_compact() {
        let settings = grid(4, 1);
        let items = [Block("a", CellRect::new(1, 0, 1, 1))];
        assert_eq!(find_first_fit(2, 1, &items, &settings), Some((2, 0)));
        assert_eq!(find_first_fit(3, 1, &items, &settings), None);
    }

    #[test]
    fn first_fit_exhaustion() {
        let settings = grid(2, 2);
        let items = [Block("a", CellRect::new(0, 0, 2, 2))];
        assert_eq!(find_first_fit(2, 2, &items, &settings), None);
        assert_eq!(find_first_fit(1, 1, &items, &settings), None);
    }

    #[test]
    fn first_fit_rejects_oversized_and_degenerate_requests() {
        let items: [Block; 0] = [];
        let settings = grid(3, 3);
        assert_eq!(find_first_fit(4, 1, &items, &settings), None);
        assert_eq!(find_first_fit(1, 4, &items, &settings), None);
        assert_eq!(find_first_fit(0, 1, &items, &settings), None);
        assert_eq!(find_first_fit(1, -1, &items, &settings), None);
        assert_eq!(find_first_fit(3, 3, &items, &settings), Some((0, 0)));
    }
}
