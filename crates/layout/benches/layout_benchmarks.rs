//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layout::{ComponentId, ComponentKind, ComponentTree, LayoutEngine};
use style::{CrossAlign, FlexConfig, JustifyContent};

/// A column of `count` rows, each holding a label, an input and a button.
fn form_tree(count: usize) -> ComponentTree {
    let mut tree = ComponentTree::new();
    let root = tree.create(ComponentKind::Column);
    tree.set_root(root);
    tree.set_flex(root, FlexConfig::new().with_gap(8.0));

    for i in 0..count {
        let row = tree.create(ComponentKind::Row);
        tree.set_flex(
            row,
            FlexConfig::new()
                .with_gap(4.0)
                .with_justify(JustifyContent::SpaceBetween)
                .with_cross_axis(CrossAlign::Stretch),
        );
        let label = tree.create_text(ComponentKind::Text, format!("Field {i}"));
        let input = tree.create(ComponentKind::Input);
        let button = tree.create_text(ComponentKind::Button, "Apply");
        for child in [label, input, button] {
            let _ = tree.append_child(row, child);
        }
        let _ = tree.append_child(root, row);
    }
    tree
}

/// A chain of nested containers `depth` levels deep.
fn nested_tree(depth: usize) -> (ComponentTree, ComponentId) {
    let mut tree = ComponentTree::new();
    let root = tree.create(ComponentKind::Center);
    tree.set_root(root);
    let mut parent = root;
    for _ in 0..depth {
        let child = tree.create(ComponentKind::Container);
        let _ = tree.append_child(parent, child);
        parent = child;
    }
    let leaf = tree.create_text(ComponentKind::Text, "deepest");
    let _ = tree.append_child(parent, leaf);
    (tree, leaf)
}

/// Benchmark wide trees.
fn bench_wide(c: &mut Criterion) {
    let engine = LayoutEngine::new(1280.0, 800.0);
    let mut group = c.benchmark_group("wide");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("form_rows", size), size, |b, &size| {
            let mut tree = form_tree(size);
            b.iter(|| {
                tree.invalidate_all();
                black_box(engine.layout(&mut tree).map(|pass| pass.laid_out))
            })
        });
    }

    group.finish();
}

/// Benchmark deep trees.
fn bench_deep(c: &mut Criterion) {
    let engine = LayoutEngine::new(1280.0, 800.0);
    let mut group = c.benchmark_group("deep");

    for depth in [8, 64, 200].iter() {
        group.bench_with_input(BenchmarkId::new("nested", depth), depth, |b, &depth| {
            let (mut tree, leaf) = nested_tree(depth);
            b.iter(|| {
                tree.invalidate_all();
                let _ = engine.layout(&mut tree);
                black_box(tree.bounds(leaf))
            })
        });
    }

    group.finish();
}

/// Benchmark the natural size estimate.
fn bench_peek(c: &mut Criterion) {
    let engine = LayoutEngine::new(1280.0, 800.0);
    let tree = form_tree(500);
    let root = tree.root();

    c.bench_function("peek_wide_column", |b| {
        b.iter(|| root.map(|root| black_box(engine.peek(&tree, root, engine.viewport().size()))))
    });
}

criterion_group!(benches, bench_wide, bench_deep, bench_peek);
criterion_main!(benches);
