//! Copy-task execution engine
//!
//! Tasks are executed in waves of bounded width: every task in a wave runs
//! concurrently, and the engine waits for the whole wave before starting
//! the next. Only one physical copy is made per task — the aggregated copy
//! count is encoded in the output file name for the print operator
//! (`+3_IMG1001.jpg` means "print this three times").
//!
//! A failing task is logged and counted; it never cancels its wave
//! siblings. Outcomes are applied to the summary on the controlling thread
//! between waves, so the summary needs no synchronization.

use crate::core::error::Result;
use crate::core::summary::Summary;
use crate::registry::CopyTask;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use tokio::task::JoinSet;

/// How many copies run concurrently within one wave.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Counters for one engine run.
#[derive(Debug, Default)]
pub struct RunStats {
    /// Tasks that copied successfully
    pub copied: usize,
    /// Tasks that failed with an I/O error
    pub failed: usize,
    /// Bytes written across all successful copies
    pub total_bytes: u64,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size_mb = self.total_bytes as f64 / 1_048_576.0;
        write!(
            f,
            "Copied: {}, Failed: {}, Total size: {:.2} MB",
            self.copied, self.failed, size_mb
        )
    }
}

/// Output file name for a task: the bare original name, or
/// `+<count>_<original>` when the aggregated count is above one.
pub fn output_name(original: &str, copies: u32) -> String {
    if copies > 1 {
        format!("+{}_{}", copies, original)
    } else {
        original.to_string()
    }
}

/// Execute all tasks in waves of `concurrency`, recording successful copies
/// into the summary.
pub fn execute(tasks: Vec<CopyTask>, summary: &mut Summary, concurrency: usize) -> Result<RunStats> {
    let mut stats = RunStats::default();
    if tasks.is_empty() {
        return Ok(stats);
    }
    let concurrency = concurrency.max(1);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let progress = ProgressBar::new(tasks.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );

    for wave in tasks.chunks(concurrency) {
        let outcomes = runtime.block_on(async {
            let mut set = JoinSet::new();
            for task in wave {
                let task = task.clone();
                set.spawn(async move {
                    let result = copy_one(&task).await;
                    (task, result)
                });
            }

            let mut outcomes = Vec::with_capacity(wave.len());
            while let Some(joined) = set.join_next().await {
                if let Ok(outcome) = joined {
                    outcomes.push(outcome);
                }
            }
            outcomes
        });

        for (task, result) in outcomes {
            progress.inc(1);
            let file_name = task
                .source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| task.number.clone());
            match result {
                Ok(bytes) => {
                    progress.suspend(|| {
                        info!(
                            "Copied '{}' to '{}'",
                            file_name,
                            task.destination.display()
                        );
                    });
                    if task.track_in_summary {
                        summary.record_copy(&task.destination, task.copies, &task.number);
                    }
                    stats.copied += 1;
                    stats.total_bytes += bytes;
                }
                Err(err) => {
                    progress.suspend(|| {
                        warn!(
                            "Failed to copy '{}' to '{}': {}",
                            file_name,
                            task.destination.display(),
                            err
                        );
                    });
                    stats.failed += 1;
                }
            }
        }
    }

    progress.finish_and_clear();
    Ok(stats)
}

/// Copy one task: read the source, ensure the destination directory, write
/// the bytes under the computed name.
async fn copy_one(task: &CopyTask) -> std::io::Result<u64> {
    let data = tokio::fs::read(&task.source).await?;
    tokio::fs::create_dir_all(&task.destination).await?;

    let original = task
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| task.number.clone());
    let out_path = task.destination.join(output_name(&original, task.copies));
    tokio::fs::write(&out_path, &data).await?;

    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn task(source: &Path, destination: &Path, number: &str, copies: u32) -> CopyTask {
        CopyTask {
            number: number.to_string(),
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            copies,
            metadata: None,
            track_in_summary: true,
        }
    }

    #[test]
    fn test_output_name_rule() {
        assert_eq!(output_name("IMG1001.jpg", 0), "IMG1001.jpg");
        assert_eq!(output_name("IMG1001.jpg", 1), "IMG1001.jpg");
        assert_eq!(output_name("IMG1001.jpg", 2), "+2_IMG1001.jpg");
        assert_eq!(output_name("IMG1001.jpg", 4), "+4_IMG1001.jpg");
    }

    #[test]
    fn test_execute_copies_with_count_naming() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("IMG1001.jpg");
        fs::write(&source, b"photo bytes").unwrap();
        let out = dir.path().join("out");

        let tasks = vec![
            task(&source, &out, "1001", 1),
            task(&source, &out.join("double"), "1001", 3),
        ];
        let mut summary = Summary::new();
        let stats = execute(tasks, &mut summary, DEFAULT_CONCURRENCY).unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(stats.failed, 0);
        assert!(out.join("IMG1001.jpg").is_file());
        assert!(out.join("double").join("+3_IMG1001.jpg").is_file());
        assert_eq!(
            fs::read(out.join("IMG1001.jpg")).unwrap(),
            b"photo bytes"
        );
    }

    #[test]
    fn test_execute_records_summary() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("1001.jpg");
        fs::write(&source, b"x").unwrap();
        let out = dir.path().join("A4");

        let mut summary = Summary::new();
        execute(vec![task(&source, &out, "1001", 2)], &mut summary, 5).unwrap();

        assert_eq!(summary.folder_counts().get(&out), Some(&2u64));
        assert_eq!(summary.unique_handled(), 1);
    }

    #[test]
    fn test_untracked_task_not_in_summary() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("1001.jpg");
        fs::write(&source, b"x").unwrap();
        let out = dir.path().join("out");

        let mut untracked = task(&source, &out, "1001", 1);
        untracked.track_in_summary = false;

        let mut summary = Summary::new();
        let stats = execute(vec![untracked], &mut summary, 5).unwrap();

        assert_eq!(stats.copied, 1);
        assert!(summary.folder_counts().is_empty());
    }

    #[test]
    fn test_failing_task_does_not_stop_the_wave() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("1001.jpg");
        fs::write(&good, b"x").unwrap();
        let missing = dir.path().join("gone.jpg");
        let out = dir.path().join("out");

        let tasks = vec![
            task(&missing, &out, "9999", 1),
            task(&good, &out, "1001", 1),
        ];
        let mut summary = Summary::new();
        let stats = execute(tasks, &mut summary, 5).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.failed, 1);
        assert!(out.join("1001.jpg").is_file());
    }

    #[test]
    fn test_more_tasks_than_one_wave() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let mut tasks = Vec::new();
        for i in 0..12 {
            let source = dir.path().join(format!("10{:02}.jpg", i));
            fs::write(&source, b"x").unwrap();
            tasks.push(task(&source, &out, &format!("10{:02}", i), 1));
        }

        let mut summary = Summary::new();
        let stats = execute(tasks, &mut summary, DEFAULT_CONCURRENCY).unwrap();
        assert_eq!(stats.copied, 12);
        assert_eq!(fs::read_dir(&out).unwrap().count(), 12);
    }

    #[test]
    fn test_empty_task_list() {
        let mut summary = Summary::new();
        let stats = execute(Vec::new(), &mut summary, 5).unwrap();
        assert_eq!(stats.copied, 0);
        assert_eq!(stats.failed, 0);
    }
}
