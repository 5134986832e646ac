//! Partition strategies for applying the grayscale rule over a pixel array.
//!
//! Three interchangeable drivers share one contract: every index is visited
//! exactly once, by exactly one execution context. They differ only in how
//! the index range is scheduled:
//!
//! - [`sequential`]: one in-order pass on the calling thread
//! - [`dynamic`]: a rayon pool with a fixed worker count, work-stealing split
//! - [`chunked`]: `ceil(len / workers)`-sized contiguous chunks on scoped threads
//!
//! Every driver is generic over the visited item so the coverage guarantee
//! can be checked with plain counters; the `apply` functions bind it to
//! [`crate::rule::apply_rule`].

pub mod chunked;
pub mod dynamic;
pub mod sequential;

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pixel::Pixel;
use crate::raster;

/// Worker count used by the parallel strategies unless configured otherwise.
pub const DEFAULT_WORKERS: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(n) => n,
    None => unreachable!(),
};

/// Errors that can occur while running a parallel strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    /// A worker thread panicked before finishing its chunk.
    #[error("Worker thread panicked")]
    WorkerPanicked,
}

/// The scheduling discipline used to visit the pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Single in-order pass.
    Sequential,
    /// Runtime-partitioned parallel loop (work stealing).
    Dynamic,
    /// Pre-divided contiguous chunks, one per worker.
    Chunked,
}

impl Strategy {
    /// All strategies in benchmark order.
    pub const ALL: [Strategy; 3] = [Strategy::Sequential, Strategy::Dynamic, Strategy::Chunked];

    /// Suffix appended to the input stem for this strategy's output file.
    pub fn suffix(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Dynamic => "parallel_for",
            Strategy::Chunked => "parallel",
        }
    }

    /// Human-readable name used in timing reports.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential implementation",
            Strategy::Dynamic => "parallel for implementation",
            Strategy::Chunked => "parallel implementation",
        }
    }

    /// Returns true if this strategy runs on worker threads.
    pub fn is_parallel(self) -> bool {
        !matches!(self, Strategy::Sequential)
    }

    /// Output path for `input` under this strategy.
    pub fn output_path(self, input: &Path) -> PathBuf {
        raster::output_path(input, self.suffix())
    }

    /// Apply the grayscale rule to every pixel, returning how many changed.
    ///
    /// `workers` is ignored by [`Strategy::Sequential`].
    ///
    /// # Errors
    ///
    /// Propagates the [`StrategyError`] of the parallel drivers.
    pub fn apply(
        self,
        pixels: &mut [Pixel],
        workers: NonZeroUsize,
    ) -> Result<usize, StrategyError> {
        match self {
            Strategy::Sequential => Ok(sequential::apply(pixels)),
            Strategy::Dynamic => dynamic::apply(pixels, workers),
            Strategy::Chunked => chunked::apply(pixels, workers),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    /// Run a driver over `len` items and return per-index visit counts,
    /// tracked both in the items themselves and in a shared atomic table.
    fn visit_counts(strategy: Strategy, len: usize, n: usize) -> (Vec<u32>, Vec<u32>) {
        let mut items = vec![0u32; len];
        let table: Vec<AtomicU32> = (0..len).map(|_| AtomicU32::new(0)).collect();
        let visit = |index: usize, item: &mut u32| {
            *item += 1;
            table[index].fetch_add(1, Ordering::Relaxed);
            true
        };

        let hits = match strategy {
            Strategy::Sequential => sequential::drive(&mut items, visit),
            Strategy::Dynamic => dynamic::drive(&mut items, workers(n), visit).unwrap(),
            Strategy::Chunked => chunked::drive(&mut items, workers(n), visit).unwrap(),
        };
        assert_eq!(hits, len);

        let table = table.into_iter().map(AtomicU32::into_inner).collect();
        (items, table)
    }

    #[test]
    fn test_default_workers() {
        assert_eq!(DEFAULT_WORKERS.get(), 8);
    }

    #[test]
    fn test_suffixes_and_labels() {
        assert_eq!(Strategy::Sequential.suffix(), "sequential");
        assert_eq!(Strategy::Dynamic.suffix(), "parallel_for");
        assert_eq!(Strategy::Chunked.suffix(), "parallel");
        assert_eq!(Strategy::Dynamic.label(), "parallel for implementation");
        assert_eq!(Strategy::Chunked.to_string(), "parallel");
    }

    #[test]
    fn test_is_parallel() {
        assert!(!Strategy::Sequential.is_parallel());
        assert!(Strategy::Dynamic.is_parallel());
        assert!(Strategy::Chunked.is_parallel());
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            Strategy::Dynamic.output_path(Path::new("image4k.ppm")),
            PathBuf::from("image4k_parallel_for.ppm")
        );
    }

    #[test]
    fn test_every_index_visited_once() {
        for strategy in Strategy::ALL {
            for len in [0, 1, 2, 7, 8, 9, 63, 64, 65, 1000] {
                for n in [1, 2, 3, 8, 13] {
                    let (items, table) = visit_counts(strategy, len, n);
                    assert!(
                        items.iter().all(|&c| c == 1),
                        "{} len={} workers={}: item counts {:?}",
                        strategy,
                        len,
                        n,
                        items
                    );
                    assert!(
                        table.iter().all(|&c| c == 1),
                        "{} len={} workers={}: index counts {:?}",
                        strategy,
                        len,
                        n,
                        table
                    );
                }
            }
        }
    }

    #[test]
    fn test_scenario_all_strategies() {
        for strategy in Strategy::ALL {
            let mut pixels = vec![Pixel::new(10, 10, 10), Pixel::new(100, 50, 25)];
            let changed = strategy.apply(&mut pixels, DEFAULT_WORKERS).unwrap();

            assert_eq!(changed, 1, "{}", strategy);
            assert_eq!(pixels[0], Pixel::new(10, 10, 10));
            assert_eq!(pixels[1], Pixel::new(58, 58, 58));
        }
    }

    #[test]
    fn test_empty_image_all_strategies() {
        for strategy in Strategy::ALL {
            let mut pixels: Vec<Pixel> = Vec::new();
            assert_eq!(strategy.apply(&mut pixels, DEFAULT_WORKERS).unwrap(), 0);
        }
    }
}
