pub mod fuzzy;
pub mod geo;
pub mod time;

pub use geo::*;
pub use time::*;

use rayon::prelude::*;
use std::cmp::Ordering;

/// Hits scoring at or below this are dropped from search results.
pub const MIN_SEARCH_SCORE: f64 = 0.1;

pub trait Identifiable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn normalized_name(&self) -> &str;
}

/// Generic fuzzy search function built for multithreaded searching.
/// Results are ordered by descending score, equal scores keep haystack order.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Identifiable,
{
    let normalized_needle = fuzzy::normalize(needle);
    if normalized_needle.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<(usize, &T, f64)> = haystack
        .par_iter()
        .enumerate()
        .filter_map(|(i, hay)| {
            let score = fuzzy::score(&normalized_needle, hay.normalized_name());
            (score > MIN_SEARCH_SCORE).then_some((i, hay, score))
        })
        .collect();

    results.par_sort_unstable_by(|(ia, _, a), (ib, _, b)| {
        b.partial_cmp(a).unwrap_or(Ordering::Equal).then(ia.cmp(ib))
    });
    results.into_iter().map(|(_, entity, _)| entity).collect()
}
