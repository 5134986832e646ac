//! Graypass Core - selective grayscale conversion benchmark
//!
//! This crate loads raw RGB rasters, greys out every chromatic pixel while
//! leaving black, white and gray pixels untouched, and compares three ways of
//! scheduling that work over the pixel array.
//!
//! # Module Structure
//!
//! - `pixel` - The packed 3-byte pixel and its classification helpers
//! - `rule` - The per-pixel skip-or-transform decision
//! - `raster` - Container codec (load, save, output naming)
//! - `strategy` - Sequential, dynamically scheduled and chunked drivers
//! - `bench` - End-to-end timing of each strategy

pub mod bench;
pub mod pixel;
pub mod raster;
pub mod rule;
pub mod strategy;

pub use bench::{run_all, run_strategy, BenchConfig, BenchError, RunReport, StrategyOutcome};
pub use pixel::Pixel;
pub use raster::{load, save, ImageHeader, RasterError, RasterImage};
pub use rule::apply_rule;
pub use strategy::{Strategy, StrategyError, DEFAULT_WORKERS};
