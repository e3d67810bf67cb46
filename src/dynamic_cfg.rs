//! One row per kernel and result file: per-phase runtime and energy of a configuration.

use crate::{
    log_line::LineFormat,
    metrics::{ed2p, edp, mlups},
    result_file::KernelGroup,
    scan::{list_result_files, load_result_file},
    summary_stats::elapsed_summary,
    Error, Objective, Record, Result, ResultFile, Scan, ScanCfg, ScanReport, SummaryStats,
    SweepKey, Table, Value,
};
use std::path::Path;

/// Mean measurements of one kernel under one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicConfigRow {
    pub kernel_name: String,
    pub key: SweepKey,
    pub mean_runtime_ms: f64,
    pub mean_energy_joules: f64,
    pub edp: f64,
    pub ed2p: f64,
    /// Lattice updates of a single kernel invocation over its mean runtime.
    pub mlups: f64,
    /// Number of samples averaged.
    pub samples: usize,
    /// Distribution of the kernel's elapsed times, in microseconds.
    pub elapsed_stats: SummaryStats,
}

pub type DynamicTable = Table<DynamicConfigRow>;

impl DynamicConfigRow {
    /// Returns `None` if no sample of `group` carries an elapsed time.
    fn from_group(
        key: &SweepKey,
        group: &KernelGroup<'_>,
        hist_sigfig: u8,
    ) -> Result<Option<Self>> {
        let Some(mean_runtime_ms) = group.mean_elapsed_ms() else {
            log::debug!("kernel {} has no elapsed times", group.kernel_name);
            return Ok(None);
        };
        let mean_energy_joules = group.mean_energy_joules();
        Ok(Some(DynamicConfigRow {
            kernel_name: group.kernel_name.to_owned(),
            key: key.clone(),
            mean_runtime_ms,
            mean_energy_joules,
            edp: edp(mean_energy_joules, mean_runtime_ms),
            ed2p: ed2p(mean_energy_joules, mean_runtime_ms),
            mlups: mlups(mean_runtime_ms, key.size, 1),
            samples: group.len(),
            elapsed_stats: elapsed_summary(group.elapsed_ms(), hist_sigfig)?,
        }))
    }

    /// Builds one row per distinct kernel of `file`, in order of first appearance. Kernels without
    /// any elapsed time, which only occur in files parsed with [`LineFormat::Static`], are omitted.
    ///
    /// # Errors
    /// [`Error::HistogramConfig`] if `hist_sigfig` is invalid.
    pub fn rows_for(file: &ResultFile, hist_sigfig: u8) -> Result<Vec<Self>> {
        let mut rows = Vec::new();
        for group in file.kernel_groups() {
            if let Some(row) = Self::from_group(&file.key, &group, hist_sigfig)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Value of the column ranked by `objective`.
    pub fn objective_value(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Runtime => self.mean_runtime_ms,
            Objective::Energy => self.mean_energy_joules,
            Objective::Edp => self.edp,
            Objective::Ed2p => self.ed2p,
            Objective::Mlups => self.mlups,
        }
    }
}

impl Record for DynamicConfigRow {
    const COLUMNS: &'static [&'static str] = &[
        "Kernel Name",
        "Size",
        "Iteration",
        "Core",
        "Uncore",
        "Threads",
        "Runtime",
        "Energy",
        "EDP",
        "ED2P",
        "MLUPS",
        "Samples",
        "Implementation",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let k = &self.key;
        let v = match column {
            "Kernel Name" => Value::Text(self.kernel_name.clone()),
            "Size" => Value::Int(k.size.into()),
            "Iteration" => Value::Int(k.iterations.into()),
            "Core" => Value::Real(k.core_freq),
            "Uncore" => Value::Real(k.uncore_freq),
            "Threads" => Value::Int(k.threads.into()),
            "Runtime" => Value::Real(self.mean_runtime_ms),
            "Energy" => Value::Real(self.mean_energy_joules),
            "EDP" => Value::Real(self.edp),
            "ED2P" => Value::Real(self.ed2p),
            "MLUPS" => Value::Real(self.mlups),
            "Samples" => Value::Int(self.samples as u64),
            "Implementation" => Value::Text(k.implementation.label().to_owned()),
            _ => return None,
        };
        Some(v)
    }
}

impl DynamicTable {
    /// Distinct kernel names in order of first appearance.
    pub fn kernel_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in self.iter() {
            if !names.contains(&row.kernel_name.as_str()) {
                names.push(&row.kernel_name);
            }
        }
        names
    }

    /// The rows measured with `threads` threads.
    pub fn with_threads(&self, threads: u32) -> Self {
        self.filter(|r| r.key.threads == threads)
    }

    /// The rows of kernel `kernel_name`.
    pub fn for_kernel(&self, kernel_name: &str) -> Self {
        self.filter(|r| r.kernel_name == kernel_name)
    }
}

/// Builds the dynamic table of result directory `dir`: for each usable file in file name order,
/// one row per kernel in order of first appearance.
///
/// Files with malformed names are excluded and reported, zero-byte files contribute no rows and are
/// reported as [`Error::EmptyFile`], and data lines without an elapsed time are skipped and reported.
///
/// # Errors
/// [`Error::Io`] if `dir` cannot be listed, [`Error::HistogramConfig`] if `cfg` is invalid.
pub fn build_dynamic_table(dir: impl AsRef<Path>, cfg: &ScanCfg) -> Result<Scan<DynamicTable>> {
    let dir = dir.as_ref();
    cfg.validate()?;
    let implementation = cfg.implementation_for(dir);
    log::debug!("building dynamic table for {dir:?} as {implementation}");

    let mut report = ScanReport::default();
    let mut table = DynamicTable::new();
    for path in list_result_files(dir, cfg, &mut report)? {
        let Some(file) =
            load_result_file(dir, &path, implementation, LineFormat::Dynamic, &mut report)
        else {
            continue;
        };
        if file.is_empty {
            report.record(dir, Some(&file.file_name), Error::EmptyFile);
            continue;
        }
        for row in DynamicConfigRow::rows_for(&file, cfg.hist_sigfig)? {
            table.push(row);
        }
    }

    Ok(Scan { table, report })
}

/// Builds and concatenates the dynamic tables of `dirs`, in the given order.
///
/// # Errors
/// The first error of [`build_dynamic_table`] that aborts a directory.
pub fn build_dynamic_tables<P: AsRef<Path>>(
    dirs: impl IntoIterator<Item = P>,
    cfg: &ScanCfg,
) -> Result<Scan<DynamicTable>> {
    let mut acc = Scan {
        table: DynamicTable::new(),
        report: ScanReport::default(),
    };
    for dir in dirs {
        let scan = build_dynamic_table(dir, cfg)?;
        acc.table.extend(scan.table);
        acc.report.merge(scan.report);
    }
    Ok(acc)
}
