//! Dynamically scheduled parallel loop.
//!
//! A dedicated rayon pool with exactly `workers` threads runs a parallel
//! iterator over the item slice. Rayon splits the index range and balances it
//! through work stealing, so no worker owns a fixed contiguous range. Each
//! item is still handed out through `par_iter_mut`, which yields every
//! `&mut T` exactly once.

use std::num::NonZeroUsize;

use rayon::prelude::*;

use super::StrategyError;
use crate::pixel::Pixel;
use crate::rule::apply_rule;

/// Visit every item on a pool of `workers` threads.
///
/// Returns the number of visits for which `visit` returned `true`.
///
/// # Errors
///
/// Returns `StrategyError::ThreadPool` if the pool cannot be started.
pub fn drive<T, F>(
    items: &mut [T],
    workers: NonZeroUsize,
    visit: F,
) -> Result<usize, StrategyError>
where
    T: Send,
    F: Fn(usize, &mut T) -> bool + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.get())
        .thread_name(|i| format!("graypass-dynamic-{}", i))
        .build()
        .map_err(|e| StrategyError::ThreadPool(e.to_string()))?;

    log::debug!(
        "dynamic schedule: {} items on {} workers",
        items.len(),
        pool.current_num_threads()
    );

    Ok(pool.install(|| {
        items
            .par_iter_mut()
            .enumerate()
            .map(|(index, item)| visit(index, item) as usize)
            .sum::<usize>()
    }))
}

/// Apply the grayscale rule to every pixel, returning how many changed.
pub fn apply(pixels: &mut [Pixel], workers: NonZeroUsize) -> Result<usize, StrategyError> {
    drive(pixels, workers, |_, pixel| apply_rule(pixel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_runs_on_pool_threads() {
        let mut items = vec![(); 256];
        let names = Mutex::new(HashSet::new());
        drive(&mut items, workers(4), |_, _| {
            let name = std::thread::current().name().map(str::to_string);
            names.lock().unwrap().insert(name);
            false
        })
        .unwrap();

        let names = names.into_inner().unwrap();
        assert!(!names.is_empty() && names.len() <= 4);
        for name in names {
            assert!(name.unwrap().starts_with("graypass-dynamic-"));
        }
    }

    #[test]
    fn test_single_worker() {
        let mut items: Vec<u32> = vec![0; 100];
        let hits = drive(&mut items, workers(1), |index, item| {
            *item = index as u32;
            true
        })
        .unwrap();

        assert_eq!(hits, 100);
        assert!(items.iter().enumerate().all(|(i, v)| *v == i as u32));
    }

    #[test]
    fn test_empty_slice() {
        let mut items: Vec<u8> = Vec::new();
        assert_eq!(drive(&mut items, workers(8), |_, _| true).unwrap(), 0);
    }

    #[test]
    fn test_apply_scenario() {
        let mut pixels = vec![Pixel::new(10, 10, 10), Pixel::new(100, 50, 25)];
        assert_eq!(apply(&mut pixels, workers(8)).unwrap(), 1);
        assert_eq!(pixels, vec![Pixel::new(10, 10, 10), Pixel::gray(58)]);
    }
}
