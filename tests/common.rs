#![allow(dead_code)]

use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

/// A result directory named `name` inside a temporary directory that lives as long as this value.
pub struct ResultDir {
    _tmp: TempDir,
    pub path: PathBuf,
}

impl ResultDir {
    pub fn new(name: &str, files: &[(&str, &str)]) -> Self {
        _ = env_logger::try_init();
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join(name);
        fs::create_dir_all(&path).expect("result dir");
        let dir = ResultDir { _tmp: tmp, path };
        for (file_name, content) in files {
            dir.write(file_name, content);
        }
        dir
    }

    pub fn write(&self, file_name: &str, content: &str) {
        fs::write(self.path.join(file_name), content).expect("result file");
    }

    pub fn write_bytes(&self, file_name: &str, content: &[u8]) {
        fs::write(self.path.join(file_name), content).expect("result file");
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One kernel invocation line: `(name, iteration, elapsed_ms, energy)`.
pub type KernelLine = (&'static str, u64, f64, f64);

/// Result file text with a header, a `#C` compute time line and the given kernel lines.
pub fn run_log(compute_time: f64, lines: &[KernelLine]) -> String {
    let mut s = String::new();
    s.push_str("#========================= fd3d =========================\n");
    s.push_str("#Grid Size                                    :  64 x 64 x 64\n");
    s.push_str("#Number of threads                            :  8\n");
    for (name, iteration, elapsed, energy) in lines {
        writeln!(s, "{name},{iteration},{elapsed:.6},{energy:.6}").expect("write to string");
    }
    writeln!(s, "#Compute time                                 :  {compute_time}")
        .expect("write to string");
    s.push_str("#Total effective MLUPS                        :  100\n");
    s.push_str("#===================================================================\n");
    s
}

pub fn are_close(left: f64, right: f64, pct: f64) -> bool {
    let avg_abs = (left.abs() + right.abs()) / 2.0;
    (left - right).abs() <= avg_abs * pct
}
