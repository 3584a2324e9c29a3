//! Per-query latency bench.

use std::hint::black_box;
use std::time::Instant;

use augury_core::constants::MIN_BENCH_QUERIES;
use augury_core::errors::AuguryResult;
use augury_core::traits::INeighborSearcher;
use tracing::debug;

use crate::sampling::bench_queries;

/// Latency distribution of one bench run, in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySample {
    pub durations_ms: Vec<f64>,
}

impl LatencySample {
    pub fn p95_ms(&self) -> Option<f64> {
        percentile(&self.durations_ms, 95.0)
    }
}

/// Time `searcher` over queries drawn with replacement from `pool`.
///
/// One discarded warm-up query runs first. At least the bench minimum of
/// queries is issued regardless of `queries`. Returns `None` for an empty
/// pool: there is nothing to measure.
pub fn measure(
    searcher: &dyn INeighborSearcher,
    pool: &[usize],
    k: usize,
    queries: usize,
    seed: u64,
) -> AuguryResult<Option<LatencySample>> {
    let Some(&warm) = pool.first() else {
        return Ok(None);
    };
    black_box(searcher.neighbors_of_row(warm, k)?);

    let rows = bench_queries(pool, queries.max(MIN_BENCH_QUERIES), seed);
    let mut durations_ms = Vec::with_capacity(rows.len());
    for row in rows {
        let start = Instant::now();
        let hits = searcher.neighbors_of_row(row, k)?;
        durations_ms.push(start.elapsed().as_secs_f64() * 1000.0);
        black_box(hits);
    }
    debug!(
        searcher = searcher.name(),
        queries = durations_ms.len(),
        "latency bench finished"
    );
    Ok(Some(LatencySample { durations_ms }))
}

/// Percentile with linear interpolation between closest ranks.
///
/// `pct` is in [0, 100]. `None` for an empty slice.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (pct / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every row it is asked about.
    struct CountingSearcher {
        calls: Mutex<Vec<usize>>,
    }

    impl CountingSearcher {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<usize> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl INeighborSearcher for CountingSearcher {
        fn name(&self) -> &str {
            "counting"
        }

        fn rows(&self) -> usize {
            100
        }

        fn neighbors_of_row(&self, row: usize, k: usize) -> AuguryResult<Vec<usize>> {
            self.calls.lock().unwrap().push(row);
            Ok((0..k).collect())
        }
    }

    #[test]
    fn small_query_counts_are_raised_to_the_minimum() {
        let searcher = CountingSearcher::new();
        let sample = measure(&searcher, &[4, 9, 17], 3, 10, 1).unwrap().unwrap();
        assert_eq!(sample.durations_ms.len(), MIN_BENCH_QUERIES);
        assert_eq!(searcher.calls().len(), MIN_BENCH_QUERIES + 1);
    }

    #[test]
    fn larger_query_counts_are_honored() {
        let searcher = CountingSearcher::new();
        let sample = measure(&searcher, &[1, 2], 3, MIN_BENCH_QUERIES + 250, 1)
            .unwrap()
            .unwrap();
        assert_eq!(sample.durations_ms.len(), MIN_BENCH_QUERIES + 250);
    }

    #[test]
    fn warm_up_is_one_untimed_query_on_the_first_pool_row() {
        let searcher = CountingSearcher::new();
        let pool = [42, 7, 13];
        let sample = measure(&searcher, &pool, 3, 0, 5).unwrap().unwrap();
        let calls = searcher.calls();
        assert_eq!(calls[0], 42);
        assert_eq!(calls.len(), sample.durations_ms.len() + 1);
    }

    #[test]
    fn timed_queries_draw_from_the_pool_with_replacement() {
        let searcher = CountingSearcher::new();
        let pool = [3, 8, 21];
        measure(&searcher, &pool, 3, 0, 1).unwrap();
        let timed = &searcher.calls()[1..];
        assert!(timed.iter().all(|row| pool.contains(row)));
        for row in pool {
            let hits = timed.iter().filter(|&&r| r == row).count();
            assert!(hits > 1, "row {row} drawn {hits} times");
        }
    }

    #[test]
    fn empty_pool_measures_nothing() {
        let searcher = CountingSearcher::new();
        assert_eq!(measure(&searcher, &[], 3, 10, 1).unwrap(), None);
        assert!(searcher.calls().is_empty());
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let values: Vec<f64> = (1..=100).map(f64::from).collect();
        let p95 = percentile(&values, 95.0).unwrap();
        assert!((p95 - 95.05).abs() < 1e-9);
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(100.0));
    }

    #[test]
    fn percentile_of_single_value_is_that_value() {
        assert_eq!(percentile(&[4.2], 95.0), Some(4.2));
        assert_eq!(percentile(&[], 95.0), None);
    }

    #[test]
    fn percentile_ignores_input_order() {
        let a = [5.0, 1.0, 3.0, 2.0, 4.0];
        let b = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&a, 95.0), percentile(&b, 95.0));
    }
}
