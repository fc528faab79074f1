// Defaults for dashboard configuration

use dashgrid_engine::{
    geom::{DEFAULT_CELL_SIZE, DEFAULT_COLUMNS, DEFAULT_DISPLAY_ROWS, DEFAULT_ROW_CAPACITY},
    store::DEFAULT_STORAGE_KEY,
};

// Serde default functions
/// Default grid width.
pub const fn default_columns() -> i32 {
    DEFAULT_COLUMNS
}
/// Default row capacity.
pub const fn default_row_capacity() -> i32 {
    DEFAULT_ROW_CAPACITY
}
/// Default pixel cell size.
pub const fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}
/// Default number of backdrop rows.
pub const fn default_display_rows() -> i32 {
    DEFAULT_DISPLAY_ROWS
}
/// Default store key.
pub fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
