//! Decoding of sweep coordinates from result file names and of the implementation variant from
//! result directory paths.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fmt::{self, Display},
    path::Path,
};

//=================
// Implementation

/// Code-generation variant of the kernel that produced a result directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Implementation {
    Reference,
    /// Reference code, single-thread tuned.
    ReferenceSt,
    Avx2,
    /// AVX2 code, single-thread tuned.
    Avx2St,
}

impl Implementation {
    pub const ALL: [Implementation; 4] = [
        Implementation::Reference,
        Implementation::ReferenceSt,
        Implementation::Avx2,
        Implementation::Avx2St,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Implementation::Reference => "Reference",
            Implementation::ReferenceSt => "Reference (ST)",
            Implementation::Avx2 => "AVX2",
            Implementation::Avx2St => "AVX2 (ST)",
        }
    }

    pub fn is_avx2(&self) -> bool {
        matches!(self, Implementation::Avx2 | Implementation::Avx2St)
    }

    pub fn is_single_thread_tuned(&self) -> bool {
        matches!(self, Implementation::ReferenceSt | Implementation::Avx2St)
    }
}

impl Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Infers the implementation variant from the text of a result directory path.
///
/// Compatibility shim for existing result layouts, which carry the variant only in directory
/// names. A path containing `_avx` selects the AVX2 family, anything else the reference family;
/// within either family a path containing `static_tuning` selects the single-thread-tuned member.
/// Prefer tagging the variant explicitly through [`ScanCfg::with_implementation`](crate::ScanCfg::with_implementation).
pub fn classify_implementation(dir: impl AsRef<Path>) -> Implementation {
    let text = dir.as_ref().to_string_lossy();
    let st = text.contains("static_tuning");
    match (text.contains("_avx"), st) {
        (true, true) => Implementation::Avx2St,
        (true, false) => Implementation::Avx2,
        (false, true) => Implementation::ReferenceSt,
        (false, false) => Implementation::Reference,
    }
}

//=================
// Filename grammar

/// One field of the result file name grammar
/// `{size}_{iterations}_c{core_code}_u{uncore_code}_t{threads}`.
struct FieldSpec {
    name: &'static str,
    re: Regex,
}

impl FieldSpec {
    fn new(name: &'static str, pattern: &str) -> Self {
        FieldSpec {
            name,
            re: Regex::new(pattern).expect("field patterns are valid by construction"),
        }
    }

    /// Extracts the positive integer captured for this field in `file_name`.
    fn extract(&self, file_name: &str) -> Result<u32> {
        let malformed = || Error::MalformedFilename {
            name: file_name.to_owned(),
            field: self.name,
        };
        let value: u32 = self
            .re
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(malformed)?;
        if value == 0 {
            return Err(malformed());
        }
        Ok(value)
    }
}

struct FilenameGrammar {
    size: FieldSpec,
    iterations: FieldSpec,
    core: FieldSpec,
    uncore: FieldSpec,
    threads: FieldSpec,
}

static FILENAME_GRAMMAR: Lazy<FilenameGrammar> = Lazy::new(|| FilenameGrammar {
    size: FieldSpec::new("size", r"^(\d+)"),
    iterations: FieldSpec::new("iterations", r"_(\d+)_c"),
    core: FieldSpec::new("core", r"_c(\d+)_"),
    uncore: FieldSpec::new("uncore", r"_u(\d+)_"),
    threads: FieldSpec::new("threads", r"_t(\d+)"),
});

//=================
// SweepKey

/// Sweep coordinates of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepKey {
    pub size: u32,
    pub iterations: u32,
    /// Core frequency in GHz.
    pub core_freq: f64,
    /// Uncore frequency in GHz.
    pub uncore_freq: f64,
    pub threads: u32,
    pub implementation: Implementation,
}

impl SweepKey {
    /// Decodes the sweep coordinates in file name `name`, tagging them with `implementation`.
    ///
    /// # Errors
    /// [`Error::MalformedFilename`] naming the first field that is absent or not a positive integer.
    pub fn decode(name: &str, implementation: Implementation) -> Result<Self> {
        let g = &*FILENAME_GRAMMAR;
        let size = g.size.extract(name)?;
        let iterations = g.iterations.extract(name)?;
        let core_code = g.core.extract(name)?;
        let uncore_code = g.uncore.extract(name)?;
        let threads = g.threads.extract(name)?;
        Ok(SweepKey {
            size,
            iterations,
            core_freq: f64::from(core_code) / 10.0,
            uncore_freq: f64::from(uncore_code) / 10.0,
            threads,
            implementation,
        })
    }

    /// Core frequency code as written in file names (GHz x 10).
    pub fn core_code(&self) -> u32 {
        (self.core_freq * 10.0).round() as u32
    }

    /// Uncore frequency code as written in file names (GHz x 10).
    pub fn uncore_code(&self) -> u32 {
        (self.uncore_freq * 10.0).round() as u32
    }

    /// Encodes `self` with the canonical file name grammar.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_c{}_u{}_t{}",
            self.size,
            self.iterations,
            self.core_code(),
            self.uncore_code(),
            self.threads
        )
    }

    /// Whether `self` and `other` denote the same run configuration.
    pub fn same_coordinates(&self, other: &SweepKey) -> bool {
        self.size == other.size
            && self.iterations == other.iterations
            && self.core_code() == other.core_code()
            && self.uncore_code() == other.uncore_code()
            && self.threads == other.threads
            && self.implementation == other.implementation
    }
}

impl Display for SweepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.file_name(), self.implementation)
    }
}
