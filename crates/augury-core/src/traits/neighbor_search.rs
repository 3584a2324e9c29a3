use crate::errors::AuguryResult;

/// A top-K neighbor search over corpus rows, used for parity comparison.
///
/// Queries are corpus members, so implementations must exclude the query's
/// own row and break score ties by ascending row id.
pub trait INeighborSearcher: Send + Sync {
    /// Strategy name used in metric keys.
    fn name(&self) -> &str;

    /// Number of rows searched.
    fn rows(&self) -> usize;

    /// Up to `k` row ids nearest to `row`, best first, `row` itself excluded.
    fn neighbors_of_row(&self, row: usize, k: usize) -> AuguryResult<Vec<usize>>;
}
