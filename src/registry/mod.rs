//! Copy-task registry
//!
//! Placement requests from the sorters are deduplicated here into one copy
//! task per `(number, destination)` pair, with the copy counts of repeated
//! requests summed. A number with no file in the index never becomes a
//! task; it is recorded as a miss instead. The registry is drained exactly
//! once by the execution engine at the end of the row scan.

use crate::core::summary::Summary;
use crate::index::FileIndex;
use std::collections::HashMap;
use std::path::PathBuf;

/// One request to place a photo into a destination folder, produced per
/// matched cell value.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    /// Numeric photo identifier
    pub number: String,
    /// Destination directory
    pub destination: PathBuf,
    /// Requested copies. 0 means "copy once, bare name" — see the engine's
    /// naming rule.
    pub copies: u32,
    /// Free-form label carried into the miss report
    pub metadata: Option<String>,
    /// Whether a successful copy is counted in the summary
    pub track_in_summary: bool,
}

/// A deduplicated copy task, unique per `(number, destination)`.
#[derive(Debug, Clone)]
pub struct CopyTask {
    /// Numeric photo identifier
    pub number: String,
    /// Absolute path of the source file, resolved at task creation
    pub source: PathBuf,
    /// Destination directory (created on demand by the engine)
    pub destination: PathBuf,
    /// Aggregated copy count across all requests for this key
    pub copies: u32,
    /// Metadata of the first request for this key
    pub metadata: Option<String>,
    /// Summary tracking of the first request for this key
    pub track_in_summary: bool,
}

/// Registry of pending copy tasks for one sort run.
pub struct TaskRegistry {
    index: FileIndex,
    tasks: HashMap<(String, PathBuf), CopyTask>,
}

impl TaskRegistry {
    pub fn new(index: FileIndex) -> Self {
        Self {
            index,
            tasks: HashMap::new(),
        }
    }

    /// The file index this registry resolves against.
    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    /// Submit a placement request.
    ///
    /// If the number has no source file the miss is recorded and no task is
    /// created. Otherwise the request's copies are added to the task for
    /// its `(number, destination)` key, creating it on first submission.
    pub fn add(&mut self, summary: &mut Summary, request: PlacementRequest) {
        let Some(source) = self.index.source_path(&request.number) else {
            summary.record_miss(
                &request.number,
                &request.destination,
                request.metadata.as_deref().unwrap_or(""),
            );
            return;
        };

        let copies = request.copies;
        let key = (request.number.clone(), request.destination.clone());
        let task = self.tasks.entry(key).or_insert_with(|| CopyTask {
            number: request.number,
            source,
            destination: request.destination,
            copies: 0,
            metadata: request.metadata,
            track_in_summary: request.track_in_summary,
        });
        task.copies += copies;
    }

    /// How many distinct tasks are registered.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Drain the registry into a task list, sorted by destination then
    /// number so wave composition is deterministic.
    pub fn into_tasks(self) -> (Vec<CopyTask>, FileIndex) {
        let mut tasks: Vec<CopyTask> = self.tasks.into_values().collect();
        tasks.sort_by(|a, b| {
            (&a.destination, &a.number).cmp(&(&b.destination, &b.number))
        });
        (tasks, self.index)
    }
}
