//! One row per result file: whole-run runtime and energy of a configuration.

use crate::{
    log_line::LineFormat,
    metrics::{ed2p, edp, mlups},
    scan::{list_result_files, load_result_file},
    Error, Objective, Record, Result, ResultFile, Scan, ScanCfg, ScanReport, SweepKey, Table,
    Value,
};
use std::path::Path;

/// Whole-run measurements of one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticConfigRow {
    pub key: SweepKey,
    /// Sum of all kernel energies in the file.
    pub total_energy: f64,
    /// Total runtime from the `#C` line, as written by the kernel. Current kernels write seconds,
    /// the unit of [`IdealDynamicConfig::runtime`](crate::IdealDynamicConfig::runtime).
    pub runtime_ms: f64,
    pub edp: f64,
    pub ed2p: f64,
    pub mlups: f64,
}

pub type StaticTable = Table<StaticConfigRow>;

impl StaticConfigRow {
    /// Builds the row for a parsed result file.
    ///
    /// # Errors
    /// [`Error::EmptyFile`] for a zero-byte file, [`Error::MissingRuntimeMarker`] if the file has
    /// no `#C` line.
    pub fn from_result_file(file: &ResultFile) -> Result<Self> {
        if file.is_empty {
            return Err(Error::EmptyFile);
        }
        let runtime_ms = file.runtime_ms.ok_or(Error::MissingRuntimeMarker)?;
        let total_energy = file.total_energy();
        let key = file.key.clone();
        Ok(StaticConfigRow {
            edp: edp(total_energy, runtime_ms),
            ed2p: ed2p(total_energy, runtime_ms),
            mlups: mlups(runtime_ms, key.size, key.iterations),
            key,
            total_energy,
            runtime_ms,
        })
    }

    /// Value of the column ranked by `objective`.
    pub fn objective_value(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Runtime => self.runtime_ms,
            Objective::Energy => self.total_energy,
            Objective::Edp => self.edp,
            Objective::Ed2p => self.ed2p,
            Objective::Mlups => self.mlups,
        }
    }
}

impl Record for StaticConfigRow {
    const COLUMNS: &'static [&'static str] = &[
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
        "Implementation",
    ];

    fn value(&self, column: &str) -> Option<Value> {
        let k = &self.key;
        let v = match column {
            "Size" => Value::Int(k.size.into()),
            "Iteration" => Value::Int(k.iterations.into()),
            "Core" => Value::Real(k.core_freq),
            "Uncore" => Value::Real(k.uncore_freq),
            "Threads" => Value::Int(k.threads.into()),
            "Runtime" => Value::Real(self.runtime_ms),
            "Energy" => Value::Real(self.total_energy),
            "EDP" => Value::Real(self.edp),
            "ED2P" => Value::Real(self.ed2p),
            "MLUPS" => Value::Real(self.mlups),
            "Implementation" => Value::Text(k.implementation.label().to_owned()),
            _ => return None,
        };
        Some(v)
    }
}

/// Builds the static table of result directory `dir`, one row per usable file in file name order.
///
/// Files with malformed names, zero bytes or no `#C` line are excluded and reported; unparsable
/// lines are skipped and reported.
///
/// # Errors
/// [`Error::Io`] if `dir` cannot be listed, [`Error::HistogramConfig`] if `cfg` is invalid.
pub fn build_static_table(dir: impl AsRef<Path>, cfg: &ScanCfg) -> Result<Scan<StaticTable>> {
    let dir = dir.as_ref();
    cfg.validate()?;
    let implementation = cfg.implementation_for(dir);
    log::debug!("building static table for {dir:?} as {implementation}");

    let mut report = ScanReport::default();
    let mut table = StaticTable::new();
    for path in list_result_files(dir, cfg, &mut report)? {
        let Some(file) =
            load_result_file(dir, &path, implementation, LineFormat::Static, &mut report)
        else {
            continue;
        };
        match StaticConfigRow::from_result_file(&file) {
            Ok(row) => table.push(row),
            Err(e) => report.record(dir, Some(&file.file_name), e),
        }
    }

    Ok(Scan { table, report })
}

/// Builds and concatenates the static tables of `dirs`, in the given order.
///
/// # Errors
/// The first error of [`build_static_table`] that aborts a directory.
pub fn build_static_tables<P: AsRef<Path>>(
    dirs: impl IntoIterator<Item = P>,
    cfg: &ScanCfg,
) -> Result<Scan<StaticTable>> {
    let mut acc = Scan {
        table: StaticTable::new(),
        report: ScanReport::default(),
    };
    for dir in dirs {
        let scan = build_static_table(dir, cfg)?;
        acc.table.extend(scan.table);
        acc.report.merge(scan.report);
    }
    Ok(acc)
}
