use std::collections::HashSet;
use std::sync::Arc;

use augury_index::VectorMatrix;
use augury_retrieval::tiebreak::top_k;
use augury_retrieval::{ExactEngine, RerankSearcher, SearchMode};
use proptest::prelude::*;

/// Matrices with many exact duplicates so ties are common.
fn tied_matrix() -> impl Strategy<Value = Arc<VectorMatrix>> {
    (2usize..40, 1usize..6).prop_flat_map(|(rows, dim)| {
        prop::collection::vec(prop::collection::vec(-2i8..=2, dim), rows).prop_map(move |raw| {
            let rows: Vec<Vec<f32>> = raw
                .into_iter()
                .map(|r| r.into_iter().map(f32::from).collect())
                .collect();
            Arc::new(VectorMatrix::from_rows(rows, dim).unwrap())
        })
    })
}

proptest! {
    #[test]
    fn verification_never_returns_query_row(m in tied_matrix(), k in 1usize..10, pick in any::<prop::sample::Index>()) {
        let row = pick.index(m.rows());
        let hits = ExactEngine::new(Arc::clone(&m), 1e-10)
            .search(SearchMode::Verification { row }, k)
            .unwrap();
        prop_assert!(hits.iter().all(|n| n.row != row));
        prop_assert_eq!(hits.len(), k.min(m.rows() - 1));
    }

    #[test]
    fn ties_rank_by_ascending_row(m in tied_matrix(), pick in any::<prop::sample::Index>()) {
        let row = pick.index(m.rows());
        let hits = ExactEngine::new(Arc::clone(&m), 1e-10)
            .search(SearchMode::Verification { row }, m.rows())
            .unwrap();
        for w in hits.windows(2) {
            if w[0].score == w[1].score {
                prop_assert!(w[0].row < w[1].row);
            }
        }
    }

    #[test]
    fn top_k_is_order_independent(mut keys in prop::collection::vec((-3i32..3, 0usize..1000), 0..60), k in 0usize..20) {
        let mut seen = HashSet::new();
        keys.retain(|(_, row)| seen.insert(*row));
        let ranked: Vec<(f64, usize)> = keys.iter().map(|&(s, r)| (f64::from(s), r)).collect();
        let mut reversed = ranked.clone();
        reversed.reverse();
        prop_assert_eq!(top_k(ranked, k), top_k(reversed, k));
    }

    #[test]
    fn rerank_length_is_min_of_k_and_candidates(m in tied_matrix(), k in 1usize..12, take in 0usize..12) {
        let searcher = RerankSearcher::new(Arc::clone(&m), 1e-12);
        let ids: Vec<usize> = (1..m.rows()).take(take).collect();
        let out = searcher.rerank(0, &ids, k).unwrap();
        prop_assert_eq!(out.len(), k.min(ids.len()));
        let out_set: HashSet<_> = out.iter().collect();
        prop_assert!(out_set.iter().all(|id| ids.contains(id)));
    }
}
