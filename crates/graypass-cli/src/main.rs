//! Graypass benchmark runner
//!
//! Runs every partition strategy against two fixed inputs in the working
//! directory and prints one timing line per run. Failed runs are printed in
//! place of their timing line; the process always exits normally.

use std::path::Path;

use graypass_core::{run_all, BenchConfig};
use log::LevelFilter;

/// Inputs in run order, each with the heading printed before it.
const INPUTS: [(&str, &str); 2] = [
    ("Smaller images:", "image256px.ppm"),
    ("Larger images:", "image4k.ppm"),
];

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });
    let _ = builder.try_init();
}

fn main() {
    init_logging();
    let config = BenchConfig::default();

    for (i, (heading, input)) in INPUTS.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", heading);
        for outcome in run_all(Path::new(input), &config) {
            println!("{}", outcome);
        }
    }
}
