//! Batch runner
//!
//! Processes files one after another. Each file produces an explicit
//! [`FileReport`]; the [`FailurePolicy`] decides whether the first failure
//! stops the run.

use crate::mapping::MappingTable;
use crate::rewrite::{rewrite_file, FileOutcome, RewriteError, RewriteOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What to do after a file fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing file
    #[default]
    Abort,
    /// Record the failure and go on with the next file
    Continue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub on_error: FailurePolicy,
    pub rewrite: RewriteOptions,
}

/// Outcome of one file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<FileOutcome, RewriteError>,
}

/// Outcome of a whole run, in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    /// Files never attempted because the run aborted
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RewriteError> {
        self.files
            .iter()
            .filter_map(|report| report.result.as_ref().err())
    }

    pub fn rewritten(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Rewritten { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Unchanged))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files
            .iter()
            .filter(|report| report.result.as_ref().is_ok_and(&predicate))
            .count()
    }
}

/// Rewrite every file in `files` with `table`
pub fn run_batch<P: AsRef<Path>>(
    files: &[P],
    table: &MappingTable,
    options: &BatchOptions,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, path) in files.iter().enumerate() {
        let path = path.as_ref();
        let result = rewrite_file(path, table, &options.rewrite);
        let failed = result.is_err();
        if let Err(err) = &result {
            tracing::debug!(path = %path.display(), error = %err, "file failed");
        }
        report.files.push(FileReport {
            path: path.to_path_buf(),
            result,
        });

        if failed && options.on_error == FailurePolicy::Abort {
            report.skipped = files[index + 1..]
                .iter()
                .map(|path| path.as_ref().to_path_buf())
                .collect();
            tracing::info!(skipped = report.skipped.len(), "aborting run");
            break;
        }
    }

    tracing::debug!(
        rewritten = report.rewritten(),
        unchanged = report.unchanged(),
        failed = report.failures().count(),
        "batch finished"
    );
    report
}
