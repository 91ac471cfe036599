//! Track pool lookups

use crate::models::Track;

/// Find the first track of an album in a pool sorted by albumhash.
///
/// Returns `None` for an empty pool or when the album has no tracks left.
pub fn find_track(pool: &[Track], albumhash: &str) -> Option<usize> {
    let idx = pool.partition_point(|t| t.albumhash.as_str() < albumhash);
    match pool.get(idx) {
        Some(track) if track.albumhash == albumhash => Some(idx),
        _ => None,
    }
}

/// Sort a pool so that `find_track` can search it
pub fn sort_pool(pool: &mut [Track]) {
    pool.sort_by(|a, b| a.albumhash.cmp(&b.albumhash));
}

/// Whether the pool is ordered by albumhash
pub fn is_sorted_pool(pool: &[Track]) -> bool {
    pool.windows(2).all(|w| w[0].albumhash <= w[1].albumhash)
}
