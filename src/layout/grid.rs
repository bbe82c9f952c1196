//! Grid model - the fixed discrete space blocks are anchored to
//!
//! A grid is `columns x rows` cells. Settings are validated once at
//! construction and never change for the lifetime of a store, so every
//! placement check can rely on `columns >= 1` and `rows >= 1`.
//!
//! # Example
//! ```
//! use bento_grid::layout::grid::GridSettings;
//!
//! let settings = GridSettings::new(4, 4)?.with_gap(2.0);
//! assert_eq!(settings.cell_count(), 16);
//!
//! let parsed = GridSettings::from_json(r#"{"columns": 6, "rows": 3}"#)?;
//! assert_eq!(parsed.columns(), 6);
//! # Ok::<(), bento_grid::layout::grid::GridError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CellRect;

/// Columns in the reference configuration.
pub const DEFAULT_COLUMNS: u16 = 12;
/// Rows in the reference configuration.
pub const DEFAULT_ROWS: u16 = 12;
/// Visual spacing between cells in the reference configuration.
pub const DEFAULT_GAP: f32 = 4.0;
pub const DEFAULT_BACKGROUND: &str = "transparent";

/// Errors raised when a grid shape or settings payload is invalid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must have at least one column")]
    ZeroColumns,
    #[error("grid must have at least one row")]
    ZeroRows,
    #[error("gap must be a finite, non-negative number (got {0})")]
    InvalidGap(f32),
    #[error("invalid grid settings: {0}")]
    Decode(String),
}

/// Immutable per-session grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGridSettings", rename_all = "camelCase")]
pub struct GridSettings {
    columns: u16,
    rows: u16,
    gap: f32,
    background_color: String,
}

impl GridSettings {
    /// Create settings for a `columns x rows` grid with the reference gap and background.
    pub fn new(columns: u16, rows: u16) -> Result<Self, GridError> {
        if columns == 0 {
            return Err(GridError::ZeroColumns);
        }
        if rows == 0 {
            return Err(GridError::ZeroRows);
        }
        Ok(Self {
            columns,
            rows,
            gap: DEFAULT_GAP,
            background_color: DEFAULT_BACKGROUND.to_string(),
        })
    }

    /// Parse settings from JSON, applying the same validation as [`GridSettings::new`].
    pub fn from_json(raw: &str) -> Result<Self, GridError> {
        serde_json::from_str(raw).map_err(|err| GridError::Decode(err.to_string()))
    }

    /// Set the visual gap. Negative or non-finite values are ignored.
    pub fn with_gap(mut self, gap: f32) -> Self {
        if gap.is_finite() && gap >= 0.0 {
            self.gap = gap;
        }
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// The whole grid as a cell rectangle anchored at the origin.
    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, i32::from(self.columns), i32::from(self.rows))
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            gap: DEFAULT_GAP,
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGridSettings {
    columns: u16,
    rows: u16,
    #[serde(default = "default_gap")]
    gap: f32,
    #[serde(default = "default_background")]
    background_color: String,
}

fn default_gap() -> f32 {
    DEFAULT_GAP
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl TryFrom<RawGridSettings> for GridSettings {
    type Error = GridError;

    fn try_from(raw: RawGridSettings) -> Result<Self, Self::Error> {
        if !(raw.gap.is_finite() && raw.gap >= 0.0) {
            return Err(GridError::InvalidGap(raw.gap));
        }
        Ok(Self::new(raw.columns, raw.rows)?
            .with_gap(raw.gap)
            .with_background_color(raw.background_color))
    }
}

/// Derived occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub x: u16,
    pub y: u16,
    pub occupied: bool,
}

/// Project a set of rectangles onto the grid, row-major.
///
/// Purely derived: the result is rebuilt from the rectangles on every call
/// and never stored alongside them. Parts of a rectangle that fall outside
/// the grid are ignored.
pub fn occupancy<I>(settings: &GridSettings, rects: I) -> Vec<GridCell>
where
    I: IntoIterator<Item = CellRect>,
{
    let columns = settings.columns as usize;
    let mut cells: Vec<GridCell> = (0..settings.rows)
        .flat_map(|y| {
            (0..settings.columns).map(move |x| GridCell {
                x,
                y,
                occupied: false,
            })
        })
        .collect();

    let bounds = settings.bounds();
    for rect in rects {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(bounds.w);
        let y1 = rect.bottom().min(bounds.h);
        for y in y0..y1 {
            for x in x0..x1 {
                cells[y as usize * columns + x as usize].occupied = true;
            }
        }
    }

    cells
}
