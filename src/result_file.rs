//! A single result file, read fully and parsed line by line before any aggregation.

use crate::{
    log_line::{parse_line, KernelSample, LineFormat, LogLine},
    Error, Implementation, Result, SweepKey,
};
use std::{collections::HashMap, fs, path::Path};

/// Parsed contents of one result file.
#[derive(Debug)]
pub struct ResultFile {
    pub file_name: String,
    pub key: SweepKey,
    /// Value of the first `#C` runtime marker, if any, in the unit the kernel writes it (seconds
    /// for current kernels).
    pub runtime_ms: Option<f64>,
    /// Kernel samples in file order.
    pub samples: Vec<KernelSample>,
    /// [`Error::UnparsableLine`]s for the lines that were skipped.
    pub line_errors: Vec<Error>,
    /// Whether the file had zero bytes.
    pub is_empty: bool,
}

/// The samples of one kernel within a result file.
#[derive(Debug)]
pub struct KernelGroup<'a> {
    pub kernel_name: &'a str,
    pub samples: Vec<&'a KernelSample>,
}

impl KernelGroup<'_> {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of the elapsed times of the samples that carry one.
    pub fn mean_elapsed_ms(&self) -> Option<f64> {
        let elapsed: Vec<f64> = self.samples.iter().filter_map(|s| s.elapsed_ms).collect();
        if elapsed.is_empty() {
            return None;
        }
        Some(elapsed.iter().sum::<f64>() / elapsed.len() as f64)
    }

    pub fn mean_energy_joules(&self) -> f64 {
        let n = self.samples.len() as f64;
        self.samples.iter().map(|s| s.energy_joules).sum::<f64>() / n
    }

    pub fn elapsed_ms(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().filter_map(|s| s.elapsed_ms)
    }
}

impl ResultFile {
    /// Parses `content`, the text of result file `file_name`.
    ///
    /// Unparsable lines are skipped and kept in [`Self::line_errors`]; zero-byte content yields an
    /// empty-sample result with [`Self::is_empty`] set.
    ///
    /// # Errors
    /// [`Error::MalformedFilename`] if `file_name` does not follow the sweep grammar.
    pub fn parse(
        file_name: &str,
        implementation: Implementation,
        content: &str,
        format: LineFormat,
    ) -> Result<Self> {
        let key = SweepKey::decode(file_name, implementation)?;
        Ok(Self::from_bytes(file_name, key, content.as_bytes(), format))
    }

    /// Reads and parses the result file at `path`.
    ///
    /// Lines that are not valid UTF-8 are skipped like any other unparsable line.
    ///
    /// # Errors
    /// [`Error::MalformedFilename`] if the file name does not follow the sweep grammar, in which
    /// case the file is not read, or [`Error::Io`] if it cannot be read.
    pub fn load(path: &Path, implementation: Implementation, format: LineFormat) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let key = SweepKey::decode(&file_name, implementation)?;
        let content = fs::read(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_bytes(&file_name, key, &content, format))
    }

    fn from_bytes(file_name: &str, key: SweepKey, content: &[u8], format: LineFormat) -> Self {
        let mut file = ResultFile {
            file_name: file_name.to_owned(),
            key,
            runtime_ms: None,
            samples: Vec::new(),
            line_errors: Vec::new(),
            is_empty: content.is_empty(),
        };

        let mut lines = content.split(|b| *b == b'\n').peekable();
        let mut line_no = 0;
        while let Some(bytes) = lines.next() {
            line_no += 1;
            if bytes.is_empty() && lines.peek().is_none() {
                break;
            }
            let parsed = match std::str::from_utf8(bytes) {
                Ok(line) => parse_line(line, line_no, format),
                Err(_) => Err(Error::UnparsableLine {
                    line_no,
                    line: String::from_utf8_lossy(bytes).trim_end().to_owned(),
                }),
            };
            match parsed {
                Ok(LogLine::Blank) | Ok(LogLine::Comment) => {}
                Ok(LogLine::RuntimeMarker(runtime)) => match file.runtime_ms {
                    None => file.runtime_ms = Some(runtime),
                    Some(first) => log::warn!(
                        "{file_name}: extra runtime marker {runtime} on line {line_no} ignored, keeping {first}"
                    ),
                },
                Ok(LogLine::Sample(sample)) => file.samples.push(sample),
                Err(e) => file.line_errors.push(e),
            }
        }

        log::debug!(
            "parsed {file_name}: {} samples, runtime {:?}, {} skipped lines",
            file.samples.len(),
            file.runtime_ms,
            file.line_errors.len()
        );
        file
    }

    /// Sum of the energies of all samples.
    pub fn total_energy(&self) -> f64 {
        self.samples.iter().map(|s| s.energy_joules).sum()
    }

    pub fn skipped_lines(&self) -> usize {
        self.line_errors.len()
    }

    /// Groups the samples by kernel name, in order of each kernel's first appearance.
    pub fn kernel_groups(&self) -> Vec<KernelGroup<'_>> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<KernelGroup<'_>> = Vec::new();
        for sample in &self.samples {
            let name = sample.kernel_name.as_str();
            let i = *index.entry(name).or_insert_with(|| {
                groups.push(KernelGroup {
                    kernel_name: name,
                    samples: Vec::new(),
                });
                groups.len() - 1
            });
            groups[i].samples.push(sample);
        }
        groups
    }
}
