//! Directory scanning configuration and the issue report returned alongside every table.

use crate::{
    classify_implementation, log_line::LineFormat, summary_stats::new_histogram, Error,
    Implementation, Result, ResultFile,
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

//==============
// ScanCfg

/// Configuration of a result directory scan.
#[derive(Debug, Clone)]
pub struct ScanCfg {
    pub(crate) implementation: Option<Implementation>,
    pub(crate) skip_hidden: bool,
    pub(crate) hist_sigfig: u8,
}

impl Default for ScanCfg {
    /// Instantiates a default [`ScanCfg`]. The defaults are:
    /// - no explicit implementation tag, so the variant is inferred from the directory path with
    ///   [`classify_implementation`]. This default can be modified by using [`Self::with_implementation`].
    /// - hidden entries such as `.DS_Store` are skipped. This default can be modified by using
    ///   [`Self::with_skip_hidden`].
    /// - `hist_sigfig` of 2 for kernel elapsed-time histograms. This default can be modified by using
    ///   [`Self::with_hist_sigfig`].
    fn default() -> Self {
        ScanCfg {
            implementation: None,
            skip_hidden: true,
            hist_sigfig: 2,
        }
    }
}

impl ScanCfg {
    /// Creates a new [`ScanCfg`] the same as `self` but tagging every file with `implementation`.
    pub fn with_implementation(&self, implementation: Implementation) -> Self {
        ScanCfg {
            implementation: Some(implementation),
            ..self.clone()
        }
    }

    /// Creates a new [`ScanCfg`] the same as `self` but with the given `skip_hidden`.
    pub fn with_skip_hidden(&self, skip_hidden: bool) -> Self {
        ScanCfg {
            skip_hidden,
            ..self.clone()
        }
    }

    /// Creates a new [`ScanCfg`] the same as `self` but with the given `hist_sigfig`
    /// (see [hdrhistogram::Histogram::sigfig]).
    pub fn with_hist_sigfig(&self, hist_sigfig: u8) -> Self {
        ScanCfg {
            hist_sigfig,
            ..self.clone()
        }
    }

    pub fn hist_sigfig(&self) -> u8 {
        self.hist_sigfig
    }

    /// The implementation tag for files in `dir`: the explicit one if set, else the one inferred
    /// from the path.
    pub fn implementation_for(&self, dir: &Path) -> Implementation {
        self.implementation
            .unwrap_or_else(|| classify_implementation(dir))
    }

    /// Validates that `hist_sigfig` yields valid histograms.
    pub(crate) fn validate(&self) -> Result<()> {
        let _ = new_histogram(self.hist_sigfig)?;
        Ok(())
    }
}

//==============
// ScanReport

/// A problem found while scanning; `file` is `None` for directory-level issues.
#[derive(Debug)]
pub struct ScanIssue {
    /// The scanned directory.
    pub dir: PathBuf,
    pub file: Option<String>,
    pub error: Error,
}

impl ScanIssue {
    /// Path of the file the issue is about, or of the directory for directory-level issues.
    pub fn path(&self) -> PathBuf {
        match &self.file {
            Some(file) => self.dir.join(file),
            None => self.dir.clone(),
        }
    }
}

/// Issues collected while building a table from one or more directories.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Number of candidate result files visited.
    pub files_scanned: usize,
    pub issues: Vec<ScanIssue>,
}

impl ScanReport {
    pub(crate) fn record(&mut self, dir: &Path, file: Option<&str>, error: Error) {
        let issue = ScanIssue {
            dir: dir.to_path_buf(),
            file: file.map(str::to_owned),
            error,
        };
        log::warn!("{}: {}", issue.path().display(), issue.error);
        self.issues.push(issue);
    }

    /// Appends the counts and issues of `other`.
    pub fn merge(&mut self, other: ScanReport) {
        self.files_scanned += other.files_scanned;
        self.issues.extend(other.issues);
    }

    /// Whether nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues for files that contributed no rows, other than empty files.
    pub fn skipped_files(&self) -> impl Iterator<Item = &ScanIssue> {
        self.issues.iter().filter(|i| {
            i.file.is_some() && !matches!(i.error, Error::UnparsableLine { .. } | Error::EmptyFile)
        })
    }

    /// Paths of the zero-byte files.
    pub fn empty_files(&self) -> Vec<PathBuf> {
        self.issues
            .iter()
            .filter(|i| i.file.is_some() && matches!(i.error, Error::EmptyFile))
            .map(ScanIssue::path)
            .collect()
    }

    /// Whether a scanned directory held no result files.
    pub fn has_empty_directory(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.error, Error::EmptyDirectory))
    }

    /// Total number of skipped lines.
    pub fn skipped_line_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.error, Error::UnparsableLine { .. }))
            .count()
    }

    /// Number of skipped lines per file path, for files with at least one.
    pub fn skipped_lines_by_file(&self) -> BTreeMap<PathBuf, usize> {
        let mut acc = BTreeMap::new();
        for issue in &self.issues {
            if issue.file.is_some() && matches!(issue.error, Error::UnparsableLine { .. }) {
                *acc.entry(issue.path()).or_insert(0) += 1;
            }
        }
        acc
    }
}

/// A table together with the issues found while building it.
#[derive(Debug)]
pub struct Scan<T> {
    pub table: T,
    pub report: ScanReport,
}

//==============
// Directory listing

/// Lists the result files in `dir`, sorted by file name.
///
/// Subdirectories are ignored, as are hidden entries when `cfg` says so. An empty listing is
/// recorded in `report` as [`Error::EmptyDirectory`].
///
/// # Errors
/// [`Error::Io`] if `dir` cannot be listed.
pub(crate) fn list_result_files(
    dir: &Path,
    cfg: &ScanCfg,
    report: &mut ScanReport,
) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if cfg.skip_hidden && hidden {
            log::trace!("skipping hidden entry {path:?}");
            continue;
        }
        if path.is_dir() {
            log::trace!("skipping subdirectory {path:?}");
            continue;
        }
        files.push(path);
    }
    files.sort();

    if files.is_empty() {
        report.record(dir, None, Error::EmptyDirectory);
    }
    log::debug!("{} result files in {dir:?}", files.len());
    Ok(files)
}

/// Loads the result file at `path` in `dir`, counting it in `report` and moving its issues there.
///
/// Returns `None` if the file has a malformed name or cannot be read.
pub(crate) fn load_result_file(
    dir: &Path,
    path: &Path,
    implementation: Implementation,
    format: LineFormat,
    report: &mut ScanReport,
) -> Option<ResultFile> {
    report.files_scanned += 1;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut file = match ResultFile::load(path, implementation, format) {
        Ok(file) => file,
        Err(e) => {
            report.record(dir, Some(&name), e);
            return None;
        }
    };
    for e in std::mem::take(&mut file.line_errors) {
        report.record(dir, Some(&name), e);
    }
    Some(file)
}
