// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for reparenting and global-matrix consistency.

use kurbo::Affine;
use proptest::prelude::*;
use understory_transform_tree::{TransformId, TransformTree, TreeError};

const TOLERANCE: f64 = 1e-6;

fn close(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() <= TOLERANCE * (1.0 + x.abs().max(y.abs())))
}

/// Well-conditioned affines: translation, rotation, and a scale away from zero.
fn arb_affine() -> impl Strategy<Value = Affine> {
    (
        -100.0..100.0_f64,
        -100.0..100.0_f64,
        -3.2..3.2_f64,
        0.5..2.0_f64,
        0.5..2.0_f64,
    )
        .prop_map(|(tx, ty, th, sx, sy)| {
            Affine::translate((tx, ty)) * Affine::rotate(th) * Affine::scale_non_uniform(sx, sy)
        })
}

/// Recompute every global from scratch and compare with the cached values.
fn assert_globals_consistent(tree: &TransformTree, ids: &[TransformId]) {
    for &id in ids {
        let mut expected = tree.local(id).unwrap();
        let mut cursor = tree.parent(id);
        while let Some(p) = cursor {
            expected = tree.local(p).unwrap() * expected;
            cursor = tree.parent(p);
        }
        assert!(
            close(tree.global(id).unwrap(), expected),
            "stale global for {id:?}"
        );
    }
}

proptest! {
    #[test]
    fn attach_then_detach_with_keep_restores_global(
        parent_tf in arb_affine(),
        child_tf in arb_affine(),
    ) {
        let mut tree = TransformTree::new();
        let parent = tree.insert(parent_tf);
        let child = tree.insert(child_tf);
        let before = tree.global(child).unwrap();

        tree.attach_child(parent, child, true).unwrap();
        prop_assert!(close(tree.global(child).unwrap(), before));
        tree.detach_child(parent, child, true).unwrap();
        prop_assert!(close(tree.global(child).unwrap(), before));
        prop_assert!(close(tree.local(child).unwrap(), before));
    }

    #[test]
    fn random_reparenting_keeps_forest_and_globals(
        locals in prop::collection::vec(arb_affine(), 2..7),
        ops in prop::collection::vec((0usize..7, 0usize..7, any::<bool>(), any::<bool>()), 0..24),
    ) {
        let mut tree = TransformTree::new();
        let ids: Vec<_> = locals.iter().map(|&l| tree.insert(l)).collect();

        for (p, c, keep, detach) in ops {
            let parent = ids[p % ids.len()];
            let child = ids[c % ids.len()];
            if detach {
                let world = tree.global(child).unwrap();
                match tree.detach_child(parent, child, keep) {
                    Ok(()) => {
                        prop_assert_eq!(tree.parent(child), None);
                        if keep {
                            prop_assert!(close(tree.global(child).unwrap(), world));
                        }
                    }
                    Err(e) => prop_assert_eq!(e, TreeError::NotAChild { parent, child }),
                }
            } else {
                let world = tree.global(child).unwrap();
                let would_cycle = parent == child || tree.is_ancestor_of(child, parent);
                match tree.attach_child(parent, child, keep) {
                    Ok(()) => {
                        prop_assert!(!would_cycle);
                        prop_assert_eq!(tree.parent(child), Some(parent));
                        if keep {
                            prop_assert!(close(tree.global(child).unwrap(), world));
                        }
                    }
                    Err(e) => {
                        prop_assert!(would_cycle);
                        prop_assert_eq!(e, TreeError::WouldCreateCycle { parent, child });
                    }
                }
            }

            // Forest: no node is its own ancestor.
            for &id in &ids {
                prop_assert!(!tree.is_ancestor_of(id, id));
            }
            assert_globals_consistent(&tree, &ids);
        }
    }
}

#[test]
fn cycle_rejection_leaves_tree_untouched() {
    let mut tree = TransformTree::new();
    let root = tree.insert(Affine::translate((1.0, 2.0)));
    let mid = tree.insert_under(root, Affine::rotate(0.5)).unwrap();
    let leaf = tree.insert_under(mid, Affine::scale(2.0)).unwrap();
    let snapshot = |t: &TransformTree| {
        [root, mid, leaf].map(|id| (t.local(id), t.global(id), t.parent(id), t.children(id).to_vec()))
    };
    let before = snapshot(&tree);
    let err = tree.attach_child(leaf, root, true).unwrap_err();
    assert!(err.to_string().contains("would create a cycle"));
    assert_eq!(snapshot(&tree), before);
}
