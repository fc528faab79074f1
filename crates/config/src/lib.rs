//! RON configuration for dashgrid: grid dimensions, the widget catalog, and
//! the default layout.

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod raw;

#[cfg(test)]
mod test_parse;

pub use error::Error;
pub use loader::{load_from_path, load_from_str};
pub use raw::{RawConfig, RawGrid, RawPlacement};

/// Directory holding user config and state (`~/.dashgrid`).
fn base_dir() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".dashgrid");
    p
}

/// Determine the preferred user config path (`~/.dashgrid/config.ron`).
pub fn default_config_path() -> PathBuf {
    base_dir().join("config.ron")
}

/// Default location of the persisted layout store (`~/.dashgrid/state.json`).
pub fn default_state_path() -> PathBuf {
    base_dir().join("state.json")
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.dashgrid/config.ron` when it exists.
/// 3) Else `None`, meaning built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let preferred = default_config_path();
    preferred.exists().then_some(preferred)
}
