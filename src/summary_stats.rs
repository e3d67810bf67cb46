//! Distribution summaries of kernel elapsed times.

use hdrhistogram::{CreationError, Histogram};

/// Summary statistics of the elapsed times of one kernel within one result file, in microseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: u64,
    pub mean: f64,
    pub stdev: f64,
    pub min: u64,
    pub p25: u64,
    pub median: u64,
    pub p75: u64,
    pub p90: u64,
    pub p99: u64,
    pub max: u64,
}

impl SummaryStats {
    /// Computes summary statistics from the given histogram.
    pub fn new(hist: &Histogram<u64>) -> Self {
        Self {
            count: hist.len(),
            mean: hist.mean(),
            stdev: hist.stdev(),
            min: hist.min(),
            p25: hist.value_at_quantile(0.25),
            median: hist.value_at_quantile(0.50),
            p75: hist.value_at_quantile(0.75),
            p90: hist.value_at_quantile(0.90),
            p99: hist.value_at_quantile(0.99),
            max: hist.max(),
        }
    }
}

/// Creates an auto-resizing histogram with `sigfig` significant figures.
pub(crate) fn new_histogram(sigfig: u8) -> Result<Histogram<u64>, CreationError> {
    let mut hist = Histogram::<u64>::new_with_bounds(1, 60 * 1000 * 1000, sigfig)?;
    hist.auto(true);
    Ok(hist)
}

/// Summarizes elapsed times given in milliseconds, recorded at microsecond resolution.
pub fn elapsed_summary(
    elapsed_ms: impl IntoIterator<Item = f64>,
    sigfig: u8,
) -> Result<SummaryStats, CreationError> {
    let mut hist = new_histogram(sigfig)?;
    for ms in elapsed_ms {
        let micros = (ms * 1000.0).round().max(0.0) as u64;
        hist.saturating_record(micros);
    }
    Ok(SummaryStats::new(&hist))
}
