//! Parses the result files of frequency/thread sweeps of a lattice-update kernel and selects the
//! best static and dynamic configurations.
//!
//! Each run of the swept kernel writes one text file named
//! `{size}_{iterations}_c{core*10}_u{uncore*10}_t{threads}` into a directory per implementation
//! variant. A file holds `#` comment lines, among them one `#C` line with the run's compute time,
//! and one `name,iteration,elapsed,energy` line per kernel invocation.
//!
//! From a directory this library builds:
//! - a static table ([`build_static_table`]), one row per file with the run's total energy and
//!   runtime, and derived EDP, ED2P and MLUPS;
//! - a dynamic table ([`build_dynamic_table`]), one row per kernel and file with the kernel's mean
//!   elapsed time and energy.
//!
//! Rows are selected with [`best_static`] and [`best_dynamic`]; the per-kernel best rows combine into
//! an [`IdealDynamicConfig`], and [`Tradeoff`] compares it with a reference and the best static
//! configuration. Parsing problems never abort a scan: they are collected in the [`ScanReport`]
//! returned with every table.
#![deny(clippy::unwrap_used)]

mod error;
pub use error::*;

mod sweep_key;
pub use sweep_key::*;

pub mod log_line;
pub use log_line::{KernelSample, LineFormat, LogLine};

pub mod metrics;

mod objective;
pub use objective::*;

mod summary_stats;
pub use summary_stats::{elapsed_summary, SummaryStats};

mod table;
pub use table::*;

mod result_file;
pub use result_file::*;

mod scan;
pub use scan::{Scan, ScanCfg, ScanIssue, ScanReport};

mod static_cfg;
pub use static_cfg::*;

mod dynamic_cfg;
pub use dynamic_cfg::*;

mod select;
pub use select::*;

mod integrity;
pub use integrity::*;
