//! Property-based invariant tests for the item store and pointer transforms.
//!
//! 1. Any sequence of operations keeps every item in bounds.
//! 2. Any sequence of operations keeps items pairwise non-overlapping.
//! 3. Rejected proposals leave the store untouched.
//! 4. First-fit is deterministic and returns the row-major first free slot.
//! 5. Resize gestures never yield a size below 1x1.
//! 6. Snapped cells always satisfy the bounds check.
//! 7. Clearing the store restarts the id sequence.

use bento_grid::{
    CellRect, GridGeometry, GridSettings, ItemStore, PixelSize, Point, Proposal, can_place,
    find_first_fit, fits_in_bounds, overlaps,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add { w: i32, h: i32 },
    Move { slot: usize, x: i32, y: i32 },
    Resize { slot: usize, w: i32, h: i32 },
    Remove { slot: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1i32..=4, 1i32..=4).prop_map(|(w, h)| Op::Add { w, h }),
        (0usize..16, -2i32..10, -2i32..10).prop_map(|(slot, x, y)| Op::Move { slot, x, y }),
        (0usize..16, -1i32..8, -1i32..8).prop_map(|(slot, w, h)| Op::Resize { slot, w, h }),
        (0usize..16).prop_map(|slot| Op::Remove { slot }),
    ]
}

fn settings_strategy() -> impl Strategy<Value = GridSettings> {
    (1u16..=8, 1u16..=8).prop_map(|(c, r)| GridSettings::new(c, r).unwrap())
}

fn id_at(store: &ItemStore, slot: usize) -> String {
    if store.is_empty() {
        return "item-missing".to_string();
    }
    store.items()[slot % store.len()].id().to_string()
}

fn apply(store: &mut ItemStore, op: &Op) -> Option<Proposal> {
    match *op {
        Op::Add { w, h } => {
            let _ = store.add_item(w, h, "block");
            None
        }
        Op::Move { slot, x, y } => Some(store.move_item(&id_at(store, slot), x, y)),
        Op::Resize { slot, w, h } => Some(store.resize_item(&id_at(store, slot), w, h)),
        Op::Remove { slot } => {
            store.remove_item(&id_at(store, slot));
            None
        }
    }
}

fn assert_valid(store: &ItemStore) -> Result<(), TestCaseError> {
    let settings = store.settings();
    let items = store.items();
    for item in items {
        prop_assert!(
            fits_in_bounds(item.rect(), settings.columns(), settings.rows()),
            "out of bounds: {:?}",
            item
        );
    }
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            prop_assert!(!overlaps(a.rect(), b.rect()), "{:?} overlaps {:?}", a, b);
        }
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Store invariants under random operation sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn operations_preserve_layout_invariants(
        settings in settings_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut store = ItemStore::new(settings);
        for op in &ops {
            let before = store.items().to_vec();
            let fingerprint = store.fingerprint();
            if let Some(proposal) = apply(&mut store, op) {
                if proposal != Proposal::Committed {
                    prop_assert_eq!(store.fingerprint(), fingerprint);
                    prop_assert_eq!(store.items(), before.as_slice());
                }
            }
            assert_valid(&store)?;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. First-fit determinism and ordering
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_fit_is_row_major_minimum(
        settings in settings_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..30),
        w in 1i32..=4,
        h in 1i32..=4,
    ) {
        let mut store = ItemStore::new(settings.clone());
        for op in &ops {
            apply(&mut store, op);
        }

        let first = find_first_fit(w, h, store.items(), &settings);
        prop_assert_eq!(first, find_first_fit(w, h, store.items(), &settings));

        let mut expected = None;
        'scan: for y in 0..i32::from(settings.rows()) {
            for x in 0..i32::from(settings.columns()) {
                if can_place(CellRect::new(x, y, w, h), store.items(), None, &settings) {
                    expected = Some((x, y));
                    break 'scan;
                }
            }
        }
        prop_assert_eq!(first, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Resize gestures floor at 1x1
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_from_delta_never_below_one(
        start_w in 1i32..=12,
        start_h in 1i32..=12,
        dx in -5000.0f32..5000.0,
        dy in -5000.0f32..5000.0,
    ) {
        let settings = GridSettings::default();
        let geometry = GridGeometry::new(
            Point::new(0.0, 0.0),
            PixelSize::new(1200.0, 900.0),
            &settings,
        );
        let (w, h) = geometry
            .resize_from_delta(start_w, start_h, Point::new(dx, dy))
            .unwrap();
        prop_assert!(w >= 1 && h >= 1, "got {}x{}", w, h);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Snapped cells are always in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snapped_cells_fit_in_frame(
        settings in settings_strategy(),
        w in 1i32..=8,
        h in 1i32..=8,
        px in -2000.0f32..4000.0,
        py in -2000.0f32..4000.0,
    ) {
        prop_assume!(w <= i32::from(settings.columns()) && h <= i32::from(settings.rows()));
        let geometry = GridGeometry::new(
            Point::new(40.0, 60.0),
            PixelSize::new(800.0, 600.0),
            &settings,
        );
        let (x, y) = geometry.snap_to_cell(Point::new(px, py), w, h).unwrap();
        prop_assert!(fits_in_bounds(
            CellRect::new(x, y, w, h),
            settings.columns(),
            settings.rows()
        ));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Clear-all restarts ids
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clear_all_restarts_id_sequence(adds in 1usize..20) {
        let mut store = ItemStore::new(GridSettings::default());
        for _ in 0..adds {
            let _ = store.add_default_item(1, 1);
        }
        store.clear_all();
        prop_assert!(store.is_empty());
        prop_assert!(store.selected().is_none());
        let id = store.add_default_item(1, 1).unwrap();
        prop_assert_eq!(id, "item-1");
        prop_assert_eq!(store.items()[0].content(), "Block 1");
    }
}
