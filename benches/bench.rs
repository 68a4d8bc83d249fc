use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl::Tree;

#[derive(Clone)]
enum SetEnum<T> {
    Avl(Tree<T>),
    BTree(BTreeSet<T>),
}

impl<T> SetEnum<T> {
    fn contains(&self, x: &T) -> bool
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => t.contains(x),
            Self::BTree(t) => t.contains(x),
        }
    }

    fn insert(&mut self, x: T) -> bool
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => t.insert(x),
            Self::BTree(t) => t.insert(x),
        }
    }

    fn delete(&mut self, x: &T) -> bool
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => t.delete(x),
            Self::BTree(t) => t.remove(x),
        }
    }
}

/// Helper to bench a function on a set.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// implementations of ordered sets before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut SetEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element_in_tree = 2usize.pow(num_levels as u32) - 2;

        let avl_tree = {
            let mut tree = Tree::new();
            for x in 0..num_nodes {
                tree.insert(x as i32);
            }

            tree
        };
        let btree_set = (0..num_nodes).map(|x| x as i32).collect();
        let set_tests = [
            ("avl", SetEnum::Avl(avl_tree)),
            ("btree", SetEnum::BTree(btree_set)),
        ];
        for (name, set) in set_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut set = black_box(set.clone());
                        let instant = std::time::Instant::now();
                        f(&mut set, black_box(largest_element_in_tree as i32));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "contains", |set, i| {
        let _found = black_box(set.contains(&i));
    });
    bench_helper(c, "delete", |set, i| {
        set.delete(&i);
    });

    bench_helper(c, "insert", |set, i| {
        set.insert(i + 1);
    });

    bench_helper(c, "contains-miss", |set, i| {
        let _found = black_box(set.contains(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |set, i| {
        set.delete(&(i + 1));
    });
    bench_helper(c, "insert-duplicate", |set, i| {
        set.insert(i);
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
