// Comparison report: one CSV line per instance with the objective of each
// method

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::{
    solver_service::{KnapsackError, Result},
    value_objects::Method,
};

/// Objective values of every method on one instance
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    pub instance_name: String,
    /// One entry per method, in the order of the harness methods
    pub objectives: Vec<(Method, f64)>,
}

impl ComparisonRecord {
    pub fn objective(&self, method: Method) -> Option<f64> {
        self.objectives
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, value)| *value)
    }
}

/// `results<day><month><year>_<h>_<m>_<s>.txt` inside `dir`.
pub fn timestamped_report_path(dir: impl AsRef<Path>, now: DateTime<Utc>) -> PathBuf {
    dir.as_ref()
        .join(format!("results{}.txt", now.format("%d%b%Y_%H_%M_%S")))
}

/// Writes the report header and records, flushing after every record so an
/// aborted batch leaves the lines written so far.
pub struct ReportWriter<W: Write> {
    out: W,
    path: PathBuf,
}

impl ReportWriter<BufWriter<File>> {
    /// Create the report file, and its directory if needed.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| KnapsackError::io(dir, e))?;
        }
        let file = File::create(&path).map_err(|e| KnapsackError::io(&path, e))?;
        log::info!("writing report to {}", path.display());
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, path: impl Into<PathBuf>) -> Self {
        Self {
            out,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_header(&mut self, methods: &[Method]) -> Result<()> {
        let mut header = String::from("instance_name");
        for method in methods {
            header.push(',');
            header.push_str(method.report_column());
        }
        self.write_line(&header)
    }

    pub fn write_record(&mut self, record: &ComparisonRecord) -> Result<()> {
        let mut line = record.instance_name.clone();
        for (_, value) in &record.objectives {
            line.push(',');
            line.push_str(&value.to_string());
        }
        self.write_line(&line)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| KnapsackError::io(&self.path, e))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
