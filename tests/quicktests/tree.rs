use avl::compare::Signed;
use avl::{PreOrderStyle, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same elements in both, and that every
/// insert and delete reported the same outcome.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone,
{
    ops.iter().all(|op| {
        let agrees = match op {
            Op::Insert(x) => tree.insert(x.clone()) == set.insert(x.clone()),
            Op::Delete(x) => tree.delete(x) == set.remove(x),
        };
        agrees && tree.validate().is_ok() && tree.len() == set.len()
    })
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set) && tree.in_order().eq(set.iter())
}

#[quickcheck]
fn fuzz_multiple_operations_strings(ops: Vec<Op<String>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set) && tree.in_order().eq(set.iter())
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && tree.validate().is_ok()
}

#[quickcheck]
fn deleting_everything_empties_the_tree(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    let mut inserted = Vec::new();
    for x in xs {
        if tree.insert(x) {
            inserted.push(x);
        }
    }
    let all_deleted = inserted.iter().all(|x| tree.delete(x));

    all_deleted && tree.is_empty() && tree.height() == 0 && tree.in_order().next().is_none()
}

#[quickcheck]
fn failed_delete_keeps_structure(xs: Vec<i8>, missing: i8) -> bool {
    let mut tree = Tree::new();
    for x in xs.iter().filter(|x| **x != missing) {
        tree.insert(*x);
    }
    let style = PreOrderStyle::structural();
    let before = tree.display_pre_order(style).to_string();
    let len = tree.len();

    !tree.delete(&missing) && tree.display_pre_order(style).to_string() == before && tree.len() == len
}

#[quickcheck]
fn absolute_value_ordering(xs: Vec<i8>) -> bool {
    let by_abs = Signed(|a: &i16, b: &i16| (a.abs() - b.abs()).signum() as i32);
    let mut tree = Tree::with_comparator(by_abs);
    let mut magnitudes = BTreeSet::new();
    for x in &xs {
        let x = i16::from(*x);
        if tree.insert(x) != magnitudes.insert(x.abs()) {
            return false;
        }
    }

    tree.validate().is_ok()
        && xs.iter().all(|x| tree.contains(&-i16::from(*x)))
        && tree.in_order().map(|x| x.abs()).eq(magnitudes.iter().copied())
}
