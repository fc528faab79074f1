#[cfg(test)]
mod tests {
    use std::path::Path;

    use dashgrid_engine::{Cell, WidgetId};

    use crate::*;

    #[test]
    fn empty_config_uses_builtin_defaults() {
        let cfg = load_from_str("()", None).unwrap();
        assert_eq!(cfg.grid.columns(), 5);
        assert_eq!(cfg.grid.row_capacity(), 10);
        assert_eq!(cfg.grid.display_rows(), 4);
        assert_eq!(cfg.catalog.len(), 5);
        assert_eq!(cfg.storage_key, "dashboard");
        assert_eq!(
            cfg.default_placements,
            vec![(WidgetId(1), Cell::new(0, 0)), (WidgetId(2), Cell::new(1, 0))]
        );
    }

    #[test]
    fn full_config_parses() {
        let ron = r#"(
            grid: (columns: 3, row_capacity: 6, cell_size: 120.0, display_rows: 2),
            storage_key: "home",
            catalog: [
                (id: 10, name: "Clock", width: 1, height: 1),
                (id: 11, name: "Chart", description: "Sales", width: 2, height: 2),
            ],
            default_layout: [(widget: 11, x: 1, y: 0)],
        )"#;
        let cfg = load_from_str(ron, None).unwrap();
        assert_eq!(cfg.grid.columns(), 3);
        assert_eq!(cfg.grid.cell_size(), 120.0);
        assert_eq!(cfg.storage_key, "home");
        let chart = cfg.catalog.get(WidgetId(11)).unwrap();
        assert_eq!(chart.description, "Sales");
        assert_eq!((chart.width, chart.height), (2, 2));
        assert_eq!(cfg.default_placements, vec![(WidgetId(11), Cell::new(1, 0))]);
    }

    #[test]
    fn partial_grid_keeps_other_defaults() {
        let cfg = load_from_str("(grid: (columns: 7))", None).unwrap();
        assert_eq!(cfg.grid.columns(), 7);
        assert_eq!(cfg.grid.row_capacity(), 10);
        assert_eq!(cfg.grid.cell_size(), 300.0);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = load_from_str("(colour: \"red\")", None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn zero_columns_fail_validation() {
        let err = load_from_str("(grid: (columns: 0))", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn oversized_grid_fails_validation() {
        let err = load_from_str("(grid: (columns: 2147483647))", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        let err = load_from_str("(grid: (display_rows: 2147483647))", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn widget_wider_than_grid_fails_validation() {
        let ron = r#"(
            catalog: [(id: 1, name: "huge", width: 2147483647, height: 1)],
            default_layout: [],
        )"#;
        let err = load_from_str(ron, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("widget 1"));
    }

    #[test]
    fn duplicate_catalog_ids_fail_validation() {
        let ron = r#"(catalog: [
            (id: 1, name: "a", width: 1, height: 1),
            (id: 1, name: "b", width: 1, height: 1),
        ])"#;
        let err = load_from_str(ron, None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn overlapping_default_layout_fails_validation() {
        let ron = "(default_layout: [(widget: 2, x: 0, y: 0), (widget: 1, x: 1, y: 1)])";
        let err = load_from_str(ron, Some(Path::new("dash.ron"))).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.path(), Some(Path::new("dash.ron")));
        assert!(err.pretty().contains("dash.ron"));
    }

    #[test]
    fn default_layout_outside_grid_fails_validation() {
        let ron = "(grid: (columns: 2), default_layout: [(widget: 2, x: 1, y: 0)])";
        assert!(load_from_str(ron, None).is_err());
    }

    #[test]
    fn empty_storage_key_fails_validation() {
        let err = load_from_str("(storage_key: \"\")", None).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn non_ron_extension_is_rejected() {
        let err = load_from_path(Path::new("/tmp/dashgrid.toml")).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn explicit_config_path_wins() {
        let p = Path::new("/etc/dash.ron");
        assert_eq!(resolve_config_path(Some(p)), Some(p.to_path_buf()));
    }
}
