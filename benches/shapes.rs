use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use avl::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Ascending values. A plain BST built from these would be a linked list, so this is the
/// order that makes the AVL tree rotate the most.
fn ascending(num_levels: usize) -> Vec<i32> {
    (0..).take(num_nodes_in_full_tree(num_levels)).collect()
}

/// Values ordered so that, even without any self-balancing, the resultant tree would be full.
/// The AVL tree never needs to rotate for these.
fn balanced(num_levels: usize) -> Vec<i32> {
    let xs = ascending(num_levels);
    let mut order = Vec::with_capacity(xs.len());
    fill_balanced_order(&xs, &mut order);
    order
}

/// Recursive helper for [`balanced`].
fn fill_balanced_order(xs: &[i32], order: &mut Vec<i32>) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        order.push(xs[mid]);
        fill_balanced_order(&xs[..mid], order);
        fill_balanced_order(&xs[mid + 1..], order);
    }
}

fn build(xs: &[i32]) -> Tree<i32> {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(*x);
    }
    tree
}

/// Benches building and then traversing trees of various sizes from ascending and balanced
/// insertion orders.
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut build_group = c.benchmark_group("build");
    for num_levels in [3, 7, 11, 15] {
        let orders = [
            ("ascending", ascending(num_levels)),
            ("balanced", balanced(num_levels)),
        ];
        for (name, xs) in &orders {
            let id = BenchmarkId::new(name.to_string(), xs.len());
            build_group.bench_with_input(id, xs, |b, xs| b.iter(|| build(xs)));
        }
    }
    build_group.finish();

    let mut traverse_group = c.benchmark_group("in-order");
    for num_levels in [3, 7, 11, 15] {
        let tree = build(&ascending(num_levels));
        let id = BenchmarkId::from_parameter(tree.len());
        traverse_group.bench_with_input(id, &tree, |b, tree| {
            b.iter(|| tree.in_order().copied().sum::<i32>())
        });
    }
    traverse_group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
