// Grid geometry: dimensions, pixel to cell conversion, bounds checks.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: i32 = 5;
/// Default number of rows widgets may occupy.
pub const DEFAULT_ROW_CAPACITY: i32 = 10;
/// Default edge length of one cell in pixels.
pub const DEFAULT_CELL_SIZE: f64 = 300.0;
/// Default number of rows drawn for the empty grid backdrop.
pub const DEFAULT_DISPLAY_ROWS: i32 = 4;
/// Largest accepted column count, row capacity or display row count.
pub const MAX_GRID_DIMENSION: i32 = 1024;

/// A cell coordinate. May lie outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Construct a cell coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half-open rectangle of cells, `x..x+cols` by `y..y+rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in cells.
    pub cols: i32,
    /// Height in cells.
    pub rows: i32,
}

impl Area {
    /// Construct an area from origin and span.
    pub const fn new(x: i32, y: i32, cols: i32, rows: i32) -> Self {
        Self { x, y, cols, rows }
    }

    /// A single cell.
    pub const fn unit(cell: Cell) -> Self {
        Self::new(cell.x, cell.y, 1, 1)
    }

    /// First column past the right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.cols)
    }

    /// First row past the bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.rows)
    }

    /// Half-open overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True if `cell` lies inside this area.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x && cell.x < self.right() && cell.y >= self.y && cell.y < self.bottom()
    }

    /// Every cell of the area, column by column.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.x..self.right()).flat_map(move |x| (self.y..self.bottom()).map(move |y| Cell { x, y }))
    }
}

/// Fixed grid dimensions plus the pixel scale used to interpret drops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    columns: i32,
    row_capacity: i32,
    cell_size: f64,
    display_rows: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            row_capacity: DEFAULT_ROW_CAPACITY,
            cell_size: DEFAULT_CELL_SIZE,
            display_rows: DEFAULT_DISPLAY_ROWS,
        }
    }
}

impl Grid {
    /// Build a grid, rejecting empty dimensions and unusable cell sizes.
    ///
    /// `display_rows` only controls how many backdrop rows are drawn and is
    /// unrelated to `row_capacity`.
    pub fn new(columns: i32, row_capacity: i32, cell_size: f64, display_rows: i32) -> Result<Self> {
        if columns < 1 {
            return Err(Error::InvalidGrid(format!(
                "columns must be at least 1 (got {columns})"
            )));
        }
        if row_capacity < 1 {
            return Err(Error::InvalidGrid(format!(
                "row capacity must be at least 1 (got {row_capacity})"
            )));
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidGrid(format!(
                "cell size must be positive (got {cell_size})"
            )));
        }
        if display_rows < 0 {
            return Err(Error::InvalidGrid(format!(
                "display rows must not be negative (got {display_rows})"
            )));
        }
        for (name, value) in [
            ("columns", columns),
            ("row capacity", row_capacity),
            ("display rows", display_rows),
        ] {
            if value > MAX_GRID_DIMENSION {
                return Err(Error::InvalidGrid(format!(
                    "{name} must be at most {MAX_GRID_DIMENSION} (got {value})"
                )));
            }
        }
        Ok(Self {
            columns,
            row_capacity,
            cell_size,
            display_rows,
        })
    }

    /// Number of columns.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// Rows available for placement.
    pub fn row_capacity(&self) -> i32 {
        self.row_capacity
    }

    /// Pixel edge length of one cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Rows drawn for the empty backdrop.
    pub fn display_rows(&self) -> i32 {
        self.display_rows
    }

    /// Convert a drop position in pixels to a cell by flooring. The result is
    /// not clamped; callers reject out-of-range cells.
    pub fn to_cell(&self, px: f64, py: f64) -> Cell {
        Cell {
            x: floor_div(px, self.cell_size),
            y: floor_div(py, self.cell_size),
        }
    }

    /// True iff the area lies entirely inside the grid. Empty or negative
    /// spans are never in bounds.
    pub fn in_bounds(&self, x: i32, y: i32, cols: i32, rows: i32) -> bool {
        // No additions: origins and spans may come from untrusted input.
        (1..=self.columns).contains(&cols)
            && (1..=self.row_capacity).contains(&rows)
            && x >= 0
            && y >= 0
            && x <= self.columns - cols
            && y <= self.row_capacity - rows
    }

    /// True iff `area` lies entirely inside the grid.
    pub fn contains_area(&self, area: &Area) -> bool {
        self.in_bounds(area.x, area.y, area.cols, area.rows)
    }

    /// Clamp an origin so a `cols x rows` footprint stays inside the grid.
    pub fn clamp_origin(&self, x: i32, y: i32, cols: i32, rows: i32) -> Cell {
        Cell {
            x: x.min(self.columns - cols).max(0),
            y: y.min(self.row_capacity - rows).max(0),
        }
    }

    /// Cells drawn for the empty grid backdrop, row-major.
    pub fn display_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity((self.display_rows * self.columns).max(0) as usize);
        for y in 0..self.display_rows {
            for x in 0..self.columns {
                cells.push(Cell { x, y });
            }
        }
        cells
    }
}

/// Floor division of a pixel coordinate, saturating at the `i32` range.
fn floor_div(px: f64, size: f64) -> i32 {
    let v = (px / size).floor();
    if v.is_nan() {
        return 0;
    }
    // `as` saturates for out-of-range floats.
    v as i32
}
