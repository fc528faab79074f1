//! Persistence of the layout through a key-value string store.
//!
//! The layout is stored under a single key as a JSON array of
//! `{"widgetId", "x", "y", "cols", "rows"}` records. Loading never fails:
//! missing, unreadable or malformed data falls back to the default layout.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    Error, Result,
    catalog::{Catalog, WidgetId},
    geom::{Cell, Grid},
    layout::{Layout, PlacedWidget},
};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "dashboard";

/// Minimal string key-value persistence medium.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used by tests and embedders that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without counting it as a write.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of successful `set` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Peek at a stored value.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Make subsequent reads fail with an I/O error.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make subsequent writes fail with an I/O error.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(Error::Store(io::Error::other("memory store read failure")));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Store(io::Error::other("memory store write failure")));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Store backed by a single JSON object file mapping keys to strings.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the JSON file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(Error::Deserialize),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(Error::Store(e)),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&all).map_err(Error::Serialize)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), key, "file_store_write");
        Ok(())
    }
}

/// The layout shown before anything has been saved: widget 1 at the origin,
/// widget 2 next to it.
pub fn builtin_default_placements() -> Vec<(WidgetId, Cell)> {
    vec![(WidgetId(1), Cell::new(0, 0)), (WidgetId(2), Cell::new(1, 0))]
}

/// Resolve default placements against the catalog and check the result.
pub fn build_default_layout(
    catalog: &Catalog,
    grid: &Grid,
    placements: &[(WidgetId, Cell)],
) -> Result<Layout> {
    let mut layout = Layout::new();
    for &(id, at) in placements {
        let def = catalog.get(id).ok_or_else(|| {
            Error::InvalidLayout(format!("default layout references unknown widget {id}"))
        })?;
        if layout.contains(id) {
            return Err(Error::InvalidLayout(format!(
                "default layout places widget {id} twice"
            )));
        }
        layout.push(PlacedWidget::from_definition(def, at));
    }
    layout
        .check(grid)
        .map_err(|fault| Error::InvalidLayout(format!("default layout: {fault}")))?;
    Ok(layout)
}

/// Reads and writes the layout record in a [`KeyValueStore`].
#[derive(Debug)]
pub struct LayoutStore<S> {
    store: S,
    key: String,
    default: Layout,
}

impl<S: KeyValueStore> LayoutStore<S> {
    /// Layout store over `store`, keeping the layout under `key`.
    pub fn new(store: S, key: impl Into<String>, default: Layout) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// Key of the layout record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Layout used when nothing usable is stored.
    pub fn default_layout(&self) -> &Layout {
        &self.default
    }

    /// Backing key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Restore the persisted layout, falling back to the default when the
    /// record is missing, unreadable, malformed, or inconsistent with `grid`.
    ///
    /// Records naming widgets absent from `catalog`, repeating an id, or
    /// carrying an empty span are dropped individually.
    pub fn load(&self, catalog: &Catalog, grid: &Grid) -> Layout {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no saved layout, using default");
                return self.default.clone();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read layout, using default");
                return self.default.clone();
            }
        };

        let records: Vec<PlacedWidget> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "malformed layout, using default");
                return self.default.clone();
            }
        };

        let layout = sanitize(records, catalog, grid);
        if let Err(fault) = layout.check(grid) {
            warn!(key = %self.key, %fault, "saved layout does not fit the grid, using default");
            return self.default.clone();
        }
        debug!(key = %self.key, widgets = layout.len(), "layout loaded");
        layout
    }

    /// Serialize and write the layout.
    pub fn save(&mut self, layout: &Layout) -> Result<()> {
        let text = serde_json::to_string(layout).map_err(Error::Serialize)?;
        self.store.set(&self.key, &text)?;
        debug!(key = %self.key, widgets = layout.len(), "layout saved");
        Ok(())
    }

    /// Discard the current layout in favor of the default and persist it.
    ///
    /// The default is returned even when the write fails, so callers can keep
    /// it in memory and retry.
    pub fn reset(&mut self) -> (Layout, Result<()>) {
        let layout = self.default.clone();
        let res = self.save(&layout);
        info!(key = %self.key, "layout reset to default");
        (layout, res)
    }
}

/// Drop records that cannot be resolved against the catalog or can never fit
/// the grid.
fn sanitize(records: Vec<PlacedWidget>, catalog: &Catalog, grid: &Grid) -> Layout {
    let mut seen = HashSet::new();
    let mut layout = Layout::new();
    for rec in records {
        if !catalog.contains(rec.widget) {
            warn!(widget = %rec.widget, "skipping saved widget missing from catalog");
            continue;
        }
        if rec.cols < 1 || rec.rows < 1 {
            warn!(widget = %rec.widget, cols = rec.cols, rows = rec.rows, "skipping saved widget with empty span");
            continue;
        }
        if rec.cols > grid.columns() || rec.rows > grid.row_capacity() {
            warn!(widget = %rec.widget, cols = rec.cols, rows = rec.rows, "skipping saved widget larger than the grid");
            continue;
        }
        if !seen.insert(rec.widget) {
            warn!(widget = %rec.widget, "skipping duplicate saved widget");
            continue;
        }
        layout.push(rec);
    }
    layout
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn default_store(store: MemoryStore) -> LayoutStore<MemoryStore> {
        let catalog = Catalog::builtin();
        let default =
            build_default_layout(&catalog, &Grid::default(), &builtin_default_placements())
                .unwrap();
        LayoutStore::new(store, DEFAULT_STORAGE_KEY, default)
    }

    fn pw(id: u32, x: i32, y: i32, cols: i32, rows: i32) -> PlacedWidget {
        PlacedWidget::new(WidgetId(id), x, y, cols, rows)
    }

    #[test]
    fn builtin_default_layout() {
        let s = default_store(MemoryStore::new());
        assert_eq!(
            s.default_layout().widgets(),
            &[pw(1, 0, 0, 1, 1), pw(2, 1, 0, 2, 2)]
        );
    }

    #[test]
    fn default_layout_rejects_bad_placements() {
        let catalog = Catalog::builtin();
        let grid = Grid::default();
        assert!(build_default_layout(&catalog, &grid, &[(WidgetId(9), Cell::new(0, 0))]).is_err());
        assert!(
            build_default_layout(
                &catalog,
                &grid,
                &[(WidgetId(1), Cell::new(0, 0)), (WidgetId(1), Cell::new(2, 0))]
            )
            .is_err()
        );
        assert!(
            build_default_layout(
                &catalog,
                &grid,
                &[(WidgetId(2), Cell::new(0, 0)), (WidgetId(1), Cell::new(1, 1))]
            )
            .is_err()
        );
        assert!(build_default_layout(&catalog, &grid, &[(WidgetId(2), Cell::new(4, 0))]).is_err());
    }

    #[test]
    fn missing_record_loads_default() {
        let s = default_store(MemoryStore::new());
        let layout = s.load(&Catalog::builtin(), &Grid::default());
        assert_eq!(&layout, s.default_layout());
    }

    #[test]
    fn malformed_record_loads_default() {
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "{not json"));
        let layout = s.load(&Catalog::builtin(), &Grid::default());
        assert_eq!(&layout, s.default_layout());
    }

    #[test]
    fn read_failure_loads_default() {
        let mut mem = MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, "[]");
        mem.set_fail_reads(true);
        let s = default_store(mem);
        assert_eq!(
            &s.load(&Catalog::builtin(), &Grid::default()),
            s.default_layout()
        );
    }

    #[test]
    fn unknown_and_duplicate_records_are_skipped() {
        let raw = r#"[
            {"widgetId":3,"x":0,"y":0,"cols":1,"rows":2},
            {"widgetId":99,"x":1,"y":0,"cols":1,"rows":1},
            {"widgetId":3,"x":4,"y":4,"cols":1,"rows":2},
            {"widgetId":5,"x":2,"y":0,"cols":0,"rows":1}
        ]"#;
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, raw));
        let layout = s.load(&Catalog::builtin(), &Grid::default());
        assert_eq!(layout.widgets(), &[pw(3, 0, 0, 1, 2)]);
    }

    #[test]
    fn oversized_span_is_skipped() {
        let raw = r#"[
            {"widgetId":1,"x":1,"y":0,"cols":2147483647,"rows":1},
            {"widgetId":4,"x":0,"y":3,"cols":2,"rows":1}
        ]"#;
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, raw));
        let layout = s.load(&Catalog::builtin(), &Grid::default());
        assert_eq!(layout.widgets(), &[pw(4, 0, 3, 2, 1)]);
    }

    #[test]
    fn extreme_origin_loads_default() {
        let raw = r#"[{"widgetId":1,"x":2147483647,"y":2147483647,"cols":1,"rows":1}]"#;
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, raw));
        assert_eq!(
            &s.load(&Catalog::builtin(), &Grid::default()),
            s.default_layout()
        );
    }

    #[test]
    fn inconsistent_record_loads_default() {
        let raw = r#"[{"widgetId":1,"x":0,"y":0,"cols":2,"rows":2},{"widgetId":2,"x":1,"y":1,"cols":2,"rows":2}]"#;
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, raw));
        assert_eq!(
            &s.load(&Catalog::builtin(), &Grid::default()),
            s.default_layout()
        );
    }

    #[test]
    fn saved_spans_are_kept_even_if_catalog_differs() {
        let raw = r#"[{"widgetId":1,"x":0,"y":0,"cols":3,"rows":1}]"#;
        let s = default_store(MemoryStore::new().with_value(DEFAULT_STORAGE_KEY, raw));
        let layout = s.load(&Catalog::builtin(), &Grid::default());
        assert_eq!(layout.widgets(), &[pw(1, 0, 0, 3, 1)]);
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut s = default_store(MemoryStore::new());
        let layout = Layout::from_widgets(vec![pw(4, 3, 9, 2, 1), pw(5, 0, 0, 1, 1)]);
        s.save(&layout).unwrap();
        assert_eq!(s.store().writes(), 1);
        let loaded = s.load(&Catalog::builtin(), &Grid::default());
        assert!(loaded.same_placements(&layout));
    }

    #[test]
    fn reset_persists_default() {
        let mut s = default_store(MemoryStore::new());
        let (layout, res) = s.reset();
        res.unwrap();
        assert_eq!(&layout, s.default_layout());
        assert_eq!(
            s.store().value(DEFAULT_STORAGE_KEY),
            Some(r#"[{"widgetId":1,"x":0,"y":0,"cols":1,"rows":1},{"widgetId":2,"x":1,"y":0,"cols":2,"rows":2}]"#)
        );
    }

    #[test]
    fn write_failure_is_reported() {
        let mut mem = MemoryStore::new();
        mem.set_fail_writes(true);
        let mut s = default_store(mem);
        assert!(matches!(s.save(&Layout::new()), Err(Error::Store(_))));
        let (layout, res) = s.reset();
        assert!(res.is_err());
        assert_eq!(&layout, s.default_layout());
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let path = env::temp_dir().join(format!("dashgrid-store-{}.json", process::id()));
        let _ignored = fs::remove_file(&path);

        let mut fs_store = FileStore::new(&path);
        assert_eq!(fs_store.get("a").unwrap(), None);
        fs_store.set("a", "1").unwrap();
        fs_store.set("b", "[]").unwrap();
        fs_store.set("a", "2").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap().as_deref(), Some("2"));
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("[]"));

        fs::write(&path, "oops").unwrap();
        assert!(matches!(reopened.get("a"), Err(Error::Deserialize(_))));
        let _ignored = fs::remove_file(&path);
    }
}
