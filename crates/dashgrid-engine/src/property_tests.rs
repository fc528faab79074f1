use proptest::prelude::*;

use crate::{
    Catalog, Dashboard, DashboardConfig, Grid, Layout, MemoryStore, Placer, WidgetId,
    store::{DEFAULT_STORAGE_KEY, LayoutStore},
};

#[derive(Debug, Clone)]
enum Op {
    Add(u32),
    Remove(usize),
    Drop(u32, f64, f64),
    Toggle,
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u32..=6).prop_map(Op::Add),
        1 => (0usize..7).prop_map(Op::Remove),
        6 => (1u32..=5, -400.0f64..1900.0, -400.0f64..3400.0)
            .prop_map(|(id, px, py)| Op::Drop(id, px, py)),
        1 => (1u32..=5, -1.0e13f64..1.0e13, -1.0e13f64..1.0e13)
            .prop_map(|(id, px, py)| Op::Drop(id, px, py)),
        1 => Just(Op::Toggle),
        1 => Just(Op::Reset),
    ]
}

fn apply(d: &mut Dashboard<MemoryStore>, op: &Op) {
    match *op {
        Op::Add(id) => {
            let _ignored = d.add_widget(WidgetId(id));
        }
        Op::Remove(idx) => {
            let _ignored = d.remove_widget(idx);
        }
        Op::Drop(id, px, py) => {
            let _ignored = d.on_drop(WidgetId(id), px, py);
        }
        Op::Toggle => {
            d.toggle_edit_mode();
        }
        Op::Reset => {
            d.reset_to_default();
        }
    }
}

proptest! {
    #[test]
    fn every_operation_sequence_keeps_layout_valid(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut d = Dashboard::open(DashboardConfig::default(), MemoryStore::new()).unwrap();
        for op in &ops {
            apply(&mut d, op);
            prop_assert!(d.layout().validate(d.grid()), "invalid after {:?}: {:?}", op, d.layout());
        }
    }

    #[test]
    fn rejected_drops_do_not_write(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut d = Dashboard::open(DashboardConfig::default(), MemoryStore::new()).unwrap();
        for op in &ops {
            let before = d.layout().clone();
            let writes = d.store().writes();
            if let Op::Drop(id, px, py) = *op {
                if d.on_drop(WidgetId(id), px, py).is_err() {
                    prop_assert_eq!(d.layout(), &before);
                    prop_assert_eq!(d.store().writes(), writes);
                }
            } else {
                apply(&mut d, op);
            }
        }
    }

    #[test]
    fn saved_layout_loads_back(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut d = Dashboard::open(DashboardConfig::default(), MemoryStore::new()).unwrap();
        for op in &ops {
            apply(&mut d, op);
        }
        let layout = d.layout().clone();
        let mut store = LayoutStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY, Layout::new());
        store.save(&layout).unwrap();
        let loaded = store.load(&Catalog::builtin(), &Grid::default());
        prop_assert!(loaded.same_placements(&layout));
    }

    #[test]
    fn first_fit_is_deterministic(
        ops in prop::collection::vec(op_strategy(), 0..30),
        cols in 1i32..=5,
        rows in 1i32..=4,
    ) {
        let mut d = Dashboard::open(DashboardConfig::default(), MemoryStore::new()).unwrap();
        for op in &ops {
            apply(&mut d, op);
        }
        let placer = Placer::new(d.layout(), d.grid());
        let first = placer.first_fit(cols, rows);
        prop_assert_eq!(first, placer.first_fit(cols, rows));
        if let Some(at) = first {
            prop_assert!(d.grid().in_bounds(at.x, at.y, cols, rows));
            prop_assert!(d.layout().is_area_empty(at.x, at.y, cols, rows, &[]));
        }
    }
}
