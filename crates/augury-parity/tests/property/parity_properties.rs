use augury_parity::overlap::{overlap_at_k, query_overlap};
use augury_parity::sampling::sample_pool;
use proptest::prelude::*;

fn id_list() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::hash_set(0usize..50, 0..12).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        max_global_rejects: 65536,
        ..ProptestConfig::default()
    })]

    #[test]
    fn overlap_stays_in_unit_interval(
        truth in prop::collection::vec(id_list(), 1..20),
        cand in prop::collection::vec(id_list(), 1..20),
        k in 1usize..12,
    ) {
        let n = truth.len().min(cand.len());
        let v = overlap_at_k(&truth[..n], &cand[..n], k).unwrap();
        prop_assert!((0.0..=1.0).contains(&v), "overlap {}", v);
    }

    #[test]
    fn self_overlap_is_exactly_one(lists in prop::collection::vec(id_list(), 1..20), k in 1usize..12) {
        prop_assert_eq!(overlap_at_k(&lists, &lists, k), Some(1.0));
    }

    #[test]
    fn query_overlap_is_symmetric_for_equal_lengths(a in id_list(), b in id_list()) {
        prop_assume!(a.len() == b.len());
        prop_assert_eq!(query_overlap(&a, &b, 12), query_overlap(&b, &a, 12));
    }

    #[test]
    fn sample_pool_is_deterministic(rows in 0usize..5000, samples in 0usize..300, seed in any::<u64>()) {
        let a = sample_pool(rows, samples, seed);
        prop_assert_eq!(a.len(), samples.min(rows));
        prop_assert_eq!(a, sample_pool(rows, samples, seed));
    }
}
