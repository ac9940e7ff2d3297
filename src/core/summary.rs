//! Run summary aggregation
//!
//! A single `Summary` is owned by each sort run. Updates are commutative
//! (count increments and set inserts keyed by destination), so the order in
//! which copy outcomes arrive does not affect the final report. The engine
//! applies outcomes on the controlling thread between waves, so no
//! synchronization is needed.

use log::{info, warn};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Aggregated results of one sort run.
#[derive(Debug, Default)]
pub struct Summary {
    folder_counts: BTreeMap<PathBuf, u64>,
    unique_numbers: HashSet<String>,
    missed: BTreeSet<(String, PathBuf, String)>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed copy task: the aggregated copy count goes into
    /// the destination's total and the number into the unique-handled set.
    pub fn record_copy(&mut self, destination: &Path, copies: u32, number: &str) {
        *self
            .folder_counts
            .entry(destination.to_path_buf())
            .or_insert(0) += u64::from(copies);
        self.unique_numbers.insert(number.to_string());
    }

    /// Record a number with no matching source file.
    ///
    /// Only numbers whose textual form is exactly 4 characters long are
    /// tracked — a deliberate filter inherited from the production workflow
    /// (see DESIGN.md). Repeated misses of the same triple collapse.
    pub fn record_miss(&mut self, number: &str, destination: &Path, metadata: &str) {
        if number.chars().count() == 4 {
            self.missed.insert((
                number.to_string(),
                destination.to_path_buf(),
                metadata.to_string(),
            ));
        }
    }

    /// Per-destination copy totals, ordered by destination path.
    pub fn folder_counts(&self) -> &BTreeMap<PathBuf, u64> {
        &self.folder_counts
    }

    /// How many distinct source numbers were successfully handled.
    pub fn unique_handled(&self) -> usize {
        self.unique_numbers.len()
    }

    /// Missed `(number, destination, metadata)` triples.
    pub fn missed(&self) -> &BTreeSet<(String, PathBuf, String)> {
        &self.missed
    }

    /// Log the per-folder photo counts, sorted by folder.
    pub fn log_folder_counts(&self) {
        for (folder, count) in &self.folder_counts {
            let name = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| folder.display().to_string());
            info!("Folder \"{}\": {} photos", name, count);
        }
    }

    /// Log the end-of-run report: processed/selected totals, then the miss
    /// list with its metadata context.
    pub fn log_report(&self, files_seen: usize) {
        info!(
            "Files processed: {}, selected: {}",
            files_seen,
            self.unique_handled()
        );
        if !self.missed.is_empty() {
            warn!("Missing source files: {}", self.missed.len());
            for (number, destination, metadata) in &self.missed {
                warn!("{} - {} ({})", metadata, number, destination.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_counts_accumulate_per_destination() {
        let mut summary = Summary::new();
        summary.record_copy(Path::new("/out/A4"), 1, "1001");
        summary.record_copy(Path::new("/out/A4"), 3, "1002");
        summary.record_copy(Path::new("/out/A5"), 2, "1001");

        assert_eq!(
            summary.folder_counts().get(Path::new("/out/A4")),
            Some(&4u64)
        );
        assert_eq!(
            summary.folder_counts().get(Path::new("/out/A5")),
            Some(&2u64)
        );
        assert_eq!(summary.unique_handled(), 2);
    }

    #[test]
    fn test_zero_copy_count_still_marks_number_handled() {
        let mut summary = Summary::new();
        summary.record_copy(Path::new("/out"), 0, "1001");
        assert_eq!(summary.folder_counts().get(Path::new("/out")), Some(&0u64));
        assert_eq!(summary.unique_handled(), 1);
    }

    #[test]
    fn test_miss_tracked_only_for_four_character_numbers() {
        let mut summary = Summary::new();
        summary.record_miss("9999", Path::new("/out/A4"), "");
        summary.record_miss("123", Path::new("/out/A4"), "");
        summary.record_miss("12345", Path::new("/out/A4"), "");

        assert_eq!(summary.missed().len(), 1);
        let (number, _, _) = summary.missed().iter().next().unwrap();
        assert_eq!(number, "9999");
    }

    #[test]
    fn test_repeated_miss_collapses() {
        let mut summary = Summary::new();
        summary.record_miss("9999", Path::new("/out/A4"), "meta");
        summary.record_miss("9999", Path::new("/out/A4"), "meta");
        assert_eq!(summary.missed().len(), 1);
    }

    #[test]
    fn test_folder_counts_sorted_by_destination() {
        let mut summary = Summary::new();
        summary.record_copy(Path::new("/out/B"), 1, "1");
        summary.record_copy(Path::new("/out/A"), 1, "2");
        let folders: Vec<_> = summary.folder_counts().keys().collect();
        assert_eq!(folders, vec![Path::new("/out/A"), Path::new("/out/B")]);
    }
}
