//! pipeline.rs
//! Run orchestration: locate, transform each file, then persist.
//!
//! Strictly sequential and single-threaded. The only state carried across
//! files is the position counter. Persistence happens only after every
//! file has been processed, never interleaved, so a mid-run failure
//! cannot leave the summary and the disk disagreeing.

use std::path::PathBuf;

use log::{info, warn};

use crate::config::{RunConfig, TagField};
use crate::error::{FileError, LocateError};
use crate::locate;
use crate::tags::{self, TagHandle};

/// One discovered file's outcome.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Result<TagHandle, FileError>,
}

/// Outcomes for every discovered file, in processing order.
/// One report per located file; never mutated after [`run`] returns.
#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
}

impl RunResult {
    pub fn successes(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|report| report.outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.reports.iter().filter(|report| report.outcome.is_err())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Process every matching file under the configured root.
///
/// Per-file failures are logged, recorded, and skipped; only discovery
/// failures abort the run. A failed file keeps no track-number slot and is
/// never saved. On a dry run nothing is written at all.
pub fn run(config: &RunConfig) -> Result<RunResult, LocateError> {
    let paths = locate::list(&config.root, &config.suffix, &config.order)?;

    let mut reports = Vec::with_capacity(paths.len());
    let mut position: u32 = 1;

    for path in paths {
        match tags::apply(&path, position, config) {
            Ok(handle) => {
                info!(
                    "{} -> {}",
                    path.display(),
                    handle.get(TagField::Title).unwrap_or_default()
                );
                reports.push(FileReport {
                    path,
                    outcome: Ok(handle),
                });
                position += 1;
            }
            Err(e) => {
                warn!("error processing {}: {e}", path.display());
                reports.push(FileReport {
                    path,
                    outcome: Err(e),
                });
            }
        }
    }

    let mut result = RunResult { reports };

    if result.success_count() == 0 {
        warn!(
            "no files were found in `{}` with suffix `{}`",
            config.root.display(),
            config.suffix
        );
    }
    if result.failure_count() > 0 {
        warn!(
            "{} of {} files failed; failed files are left untouched",
            result.failure_count(),
            result.reports.len()
        );
    }

    if config.dry_run {
        info!("dry run, no files changed");
        return Ok(result);
    }

    for report in &mut result.reports {
        let save_error = match &report.outcome {
            Ok(handle) => handle.save().err(),
            Err(_) => None,
        };
        if let Some(e) = save_error {
            warn!("error saving {}: {e}", report.path.display());
            report.outcome = Err(e);
        }
    }

    Ok(result)
}
