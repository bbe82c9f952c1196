use std::hint::black_box;

use bento_grid::{
    EditorConfig, EditorEvent, EditorSession, GridSettings, ItemStore, Logger, NullSink,
    PixelSize, Point, find_first_fit,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn packed_store(columns: u16, rows: u16) -> ItemStore {
    let mut store = ItemStore::new(GridSettings::new(columns, rows).expect("settings"));
    // Fill with 1x1 blocks, leaving the last row open.
    for _ in 0..(usize::from(columns) * usize::from(rows - 1)) {
        store.add_item(1, 1, "cell").expect("space");
    }
    store
}

fn first_fit_nearly_full(c: &mut Criterion) {
    let store = packed_store(24, 24);
    c.bench_function("first_fit_nearly_full_24x24", |b| {
        b.iter(|| {
            black_box(find_first_fit(
                black_box(3),
                black_box(1),
                store.items(),
                store.settings(),
            ))
        });
    });
}

fn first_fit_exhausted(c: &mut Criterion) {
    let store = packed_store(24, 24);
    c.bench_function("first_fit_exhausted_24x24", |b| {
        b.iter(|| {
            black_box(find_first_fit(
                black_box(2),
                black_box(2),
                store.items(),
                store.settings(),
            ))
        });
    });
}

fn store_churn(c: &mut Criterion) {
    c.bench_function("store_churn_12x12", |b| {
        b.iter(|| {
            let mut store = ItemStore::new(GridSettings::default());
            while store.add_default_item(2, 2).is_ok() {}
            for index in 1..=store.len() {
                let id = format!("item-{index}");
                black_box(store.move_item(&id, 10, 10));
                black_box(store.resize_item(&id, 3, 3));
            }
            store.clear_all();
        });
    });
}

fn drag_session(c: &mut Criterion) {
    let script: Vec<EditorEvent> = std::iter::once(EditorEvent::ContainerResized {
        origin: Point::new(0.0, 0.0),
        size: PixelSize::new(1200.0, 1200.0),
    })
    .chain((0..8).map(|_| EditorEvent::AddBlock))
    .chain(std::iter::once(EditorEvent::DragStart {
        id: "item-1".into(),
    }))
    .chain((0..200).map(|step| EditorEvent::DragMove {
        pointer: Point::new(step as f32 * 5.0, step as f32 * 3.0),
    }))
    .chain(std::iter::once(EditorEvent::Drop {
        pointer: Point::new(900.0, 900.0),
    }))
    .chain(std::iter::once(EditorEvent::GenerateCode))
    .collect();

    c.bench_function("editor_drag_session", |b| {
        b.iter(|| {
            let config = EditorConfig::default().with_logger(Logger::new(NullSink));
            let mut session = EditorSession::new(config);
            black_box(session.run_scripted(script.clone()));
        });
    });
}

criterion_group!(
    benches,
    first_fit_nearly_full,
    first_fit_exhausted,
    store_churn,
    drag_session
);
criterion_main!(benches);
