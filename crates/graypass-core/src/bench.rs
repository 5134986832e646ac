//! Benchmark harness timing each strategy end to end.
//!
//! A run is load -> transform -> save for one input under one strategy,
//! measured with a monotonic clock. The harness only observes: a failed run
//! is reported as an error outcome and the remaining strategies still run.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::{self, ImageHeader, RasterError};
use crate::strategy::{Strategy, StrategyError, DEFAULT_WORKERS};

/// Errors from a single benchmark run, tagged with the stage that failed.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The input could not be loaded.
    #[error(transparent)]
    Load(RasterError),

    /// The strategy failed while transforming the pixels.
    #[error(transparent)]
    Transform(#[from] StrategyError),

    /// The output could not be saved.
    #[error(transparent)]
    Save(RasterError),
}

/// Harness settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Worker count handed to the parallel strategies.
    pub workers: NonZeroUsize,
    /// Strategies to run, in order.
    pub strategies: Vec<Strategy>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

/// Timing and bookkeeping for one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: Strategy,
    pub input: PathBuf,
    pub output: PathBuf,
    pub header: ImageHeader,
    /// Worker count, `None` for the sequential strategy.
    pub workers: Option<usize>,
    /// Number of pixels the rule changed.
    pub changed: usize,
    /// Wall-clock time for load, transform and save together.
    pub elapsed: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time elapsed: {:.5} seconds ({}",
            self.elapsed.as_secs_f64(),
            self.strategy.label()
        )?;
        if let Some(workers) = self.workers {
            write!(f, ", {} threads", workers)?;
        }
        f.write_str(")")
    }
}

/// The result of running one strategy against one input.
#[derive(Debug)]
pub struct StrategyOutcome {
    pub strategy: Strategy,
    pub result: Result<RunReport, BenchError>,
}

impl fmt::Display for StrategyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(report) => fmt::Display::fmt(report, f),
            Err(e) => write!(f, "Error: {}", e),
        }
    }
}

/// Load `input`, apply `strategy`, save next to the input, and time it all.
///
/// # Errors
///
/// Returns the `BenchError` of the first stage that failed.
pub fn run_strategy(
    input: &Path,
    strategy: Strategy,
    config: &BenchConfig,
) -> Result<RunReport, BenchError> {
    let start = Instant::now();

    let mut image = raster::load(input).map_err(BenchError::Load)?;
    let loaded = start.elapsed();

    let changed = strategy.apply(image.pixels_mut(), config.workers)?;
    let transformed = start.elapsed();

    let output = strategy.output_path(input);
    raster::save(&output, &image).map_err(BenchError::Save)?;
    let elapsed = start.elapsed();

    log::debug!(
        "{} on {}: load {:.2?}, transform {:.2?}, save {:.2?}",
        strategy,
        input.display(),
        loaded,
        transformed - loaded,
        elapsed - transformed
    );

    let (header, _) = image.into_parts();
    Ok(RunReport {
        strategy,
        input: input.to_path_buf(),
        output,
        header,
        workers: strategy.is_parallel().then_some(config.workers.get()),
        changed,
        elapsed,
    })
}

/// Run every configured strategy against `input`, in order.
///
/// Each strategy loads the input independently. Failures are logged and
/// returned as outcomes; they never stop the remaining strategies.
pub fn run_all(input: &Path, config: &BenchConfig) -> Vec<StrategyOutcome> {
    config
        .strategies
        .iter()
        .map(|&strategy| {
            let result = run_strategy(input, strategy, config);
            match &result {
                Ok(report) => log::info!(
                    "{} -> {}: {} of {} pixels changed in {:.2?}",
                    strategy,
                    report.output.display(),
                    report.changed,
                    report.header.pixel_count().unwrap_or_default(),
                    report.elapsed
                ),
                Err(e) => log::error!("{} on {} failed: {}", strategy, input.display(), e),
            }
            StrategyOutcome { strategy, result }
        })
        .collect()
}
