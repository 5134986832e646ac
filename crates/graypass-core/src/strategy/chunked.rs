//! Statically chunked parallel loop.
//!
//! The index range is cut up front into `ceil(len / workers)`-sized
//! contiguous chunks, the last one clipped to `len`. Each chunk is carved off
//! the slice with `split_at_mut` and processed on its own scoped thread, so
//! workers never share an index and need no synchronization beyond the final
//! join.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::thread;

use super::StrategyError;
use crate::pixel::Pixel;
use crate::rule::apply_rule;

/// Split `0..len` into at most `workers` contiguous, non-empty ranges.
///
/// Every range but the last has length `ceil(len / workers)`. Workers whose
/// chunk would start at or past `len` get no range, and an empty input yields
/// no ranges at all.
pub fn chunk_ranges(len: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let chunk_size = len.div_ceil(workers.get());
    (0..workers.get())
        .map(|worker| {
            let start = (worker * chunk_size).min(len);
            let end = (start + chunk_size).min(len);
            start..end
        })
        .filter(|range| !range.is_empty())
        .collect()
}

/// Visit every item, one scoped thread per chunk from [`chunk_ranges`].
///
/// Returns the number of visits for which `visit` returned `true`.
///
/// # Errors
///
/// Returns `StrategyError::WorkerPanicked` if any worker thread panicked.
pub fn drive<T, F>(
    items: &mut [T],
    workers: NonZeroUsize,
    visit: F,
) -> Result<usize, StrategyError>
where
    T: Send,
    F: Fn(usize, &mut T) -> bool + Sync,
{
    let ranges = chunk_ranges(items.len(), workers);
    log::debug!(
        "static schedule: {} items in {} chunks",
        items.len(),
        ranges.len()
    );

    let visit = &visit;
    let results = thread::scope(|scope| {
        let mut rest = items;
        let mut handles = Vec::with_capacity(ranges.len());

        for range in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            let offset = range.start;

            handles.push(scope.spawn(move || {
                chunk
                    .iter_mut()
                    .enumerate()
                    .map(|(i, item)| visit(offset + i, item) as usize)
                    .sum::<usize>()
            }));
        }
        debug_assert!(rest.is_empty());

        // Join every handle so a panicking worker is reported, not re-raised
        handles.into_iter().map(|h| h.join()).collect::<Vec<_>>()
    });

    results.into_iter().try_fold(0, |total, result| {
        result
            .map(|hits| total + hits)
            .map_err(|_| StrategyError::WorkerPanicked)
    })
}

/// Apply the grayscale rule to every pixel, returning how many changed.
pub fn apply(pixels: &mut [Pixel], workers: NonZeroUsize) -> Result<usize, StrategyError> {
    drive(pixels, workers, |_, pixel| apply_rule(pixel))
}
