//! Completeness check of a result directory against the file names a sweep is expected to produce.

use crate::{Error, Result};
use std::{collections::BTreeSet, fs, path::Path};

/// Expected files that are absent, and present files with zero bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub missing: BTreeSet<String>,
    pub empty: BTreeSet<String>,
}

impl IntegrityReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

/// Checks that every name in `expected` exists in `dir` and is non-empty.
///
/// # Errors
/// [`Error::Io`] if `dir` cannot be listed or a present file cannot be inspected.
pub fn check_integrity<S: AsRef<str>>(
    dir: impl AsRef<Path>,
    expected: impl IntoIterator<Item = S>,
) -> Result<IntegrityReport> {
    let dir = dir.as_ref();
    let mut present = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        present.insert(entry.file_name().to_string_lossy().into_owned());
    }

    let mut report = IntegrityReport::default();
    for name in expected {
        let name = name.as_ref();
        if !present.contains(name) {
            report.missing.insert(name.to_owned());
            continue;
        }
        let path = dir.join(name);
        let len = fs::metadata(&path).map_err(|e| Error::io(&path, e))?.len();
        if len == 0 {
            report.empty.insert(name.to_owned());
        }
    }

    log::debug!(
        "{dir:?}: {} missing, {} empty result files",
        report.missing.len(),
        report.empty.len()
    );
    Ok(report)
}
