use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

/// Independent checks that never read the cached heights.
fn validate_tree(t: &AvlTree) {
    fn rec(link: &Link, count: &mut usize) -> u8 {
        let Some(node) = link else {
            return 0;
        };
        *count += 1;
        let lh = rec(&node.left, count);
        let rh = rec(&node.right, count);
        assert!(
            (i16::from(rh) - i16::from(lh)).abs() <= 1,
            "node {:?} is unbalanced: left {lh}, right {rh}",
            node.key
        );
        let h = lh.max(rh) + 1;
        assert_eq!(node.height, h, "stale height at {:?}", node.key);
        h
    }

    let mut count = 0usize;
    rec(&t.root, &mut count);
    assert_eq!(count, t.len(), "reachable node count must match AvlTree::len");

    let keys: Vec<&str> = t.iter().map(|(k, _)| k).collect();
    assert!(
        keys.windows(2).all(|w| w[0] < w[1]),
        "in-order keys must be strictly ascending"
    );
    assert_eq!(t.verify_integrity(), Ok(()));
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Insert(
        // A small alphabet keeps key collisions, and so upserts, frequent.
        #[proptest(strategy = "\"[a-f]{0,4}\"")] String,
        #[proptest(strategy = "\"[0-9]{1,3}\"")] String,
    ),
    Find(#[proptest(strategy = "\"[a-f]{0,4}\"")] String),
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t = AvlTree::new();
        let mut m: BTreeMap<String, String> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, payload) => {
                    let old_t = t.insert(key.clone(), payload.clone());
                    let old_m = m.insert(key, payload);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Find(key) => {
                    prop_assert_eq!(t.find(&key), m.get(&key).map(String::as_str));
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(&str, &str)> = t.iter().collect();
        let expected: Vec<(&str, &str)> = m.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_height_bound(keys in prop::collection::btree_set("[a-z]{1,8}", 0..=500)) {
        let n = keys.len();
        let t: AvlTree = keys.into_iter().map(|k| (k, String::new())).collect();
        let bound = 2.0 * (n as f64 + 1.44).log2() - 0.328;
        prop_assert!(t.height() as f64 <= bound, "height {} for {} keys", t.height(), n);
    }

    #[test]
    fn prop_sorted_input_stays_balanced(n in 0usize..=2000) {
        let mut t = AvlTree::new();
        for i in 0..n {
            t.insert(format!("{i:06}"), "");
        }
        validate_tree(&t);
        prop_assert_eq!(t.len(), n);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys = ["a", "b", "c", "d", "e", "f", "g"];

    for_each_permutation(&keys, |perm| {
        let mut t = AvlTree::new();
        for k in &perm {
            assert_eq!(t.insert(*k, k.to_uppercase()), None);
        }

        validate_tree(&t);
        assert!(t.height() <= 4, "{perm:?} produced height {}", t.height());
        let got: Vec<(&str, &str)> = t.iter().collect();
        assert_eq!(
            got,
            [
                ("a", "A"),
                ("b", "B"),
                ("c", "C"),
                ("d", "D"),
                ("e", "E"),
                ("f", "F"),
                ("g", "G"),
            ]
        );
    });
}

#[test]
fn exhaustive_upsert_order_small_set() {
    let keys = ["a", "b", "c", "d", "e"];

    // Build once, then overwrite every key in every order.
    let base: AvlTree = keys.iter().map(|k| (*k, "old")).collect();
    let base_dump = base.dump();

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        for k in perm {
            assert_eq!(t.insert(k, "new"), Some("old".to_string()));
        }
        assert_eq!(t.dump(), base_dump);
        assert!(t.iter().all(|(_, p)| p == "new"));
        assert_eq!(t.len(), keys.len());
    });
}
