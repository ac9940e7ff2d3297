//! Sheet sorters
//!
//! Two sheet layouts share one distribution pipeline. A dialect only
//! decides which rows are headers and which are data (`SheetDialect`);
//! everything behind that decision — the per-column loop, grammar choice,
//! destination resolution, bonus copies, retouch routing, per-cell error
//! logging — lives in `SortContext` and is shared.
//!
//! # Dialects
//!
//! - `printing` - row-grouped layout: one header row, data rows carry an
//!   item number and a customer name
//! - `album` - flat layout: sections separated by blank rows, each section
//!   re-detects its header

use crate::core::error::{Result, SortError};
use crate::core::pattern::{extract_complex, extract_simple};
use crate::core::settings::{
    SheetSettings, SETTING_COMPLEX_FORMAT, SETTING_DISTRIBUTE, SETTING_RETOUCH,
    SETTING_THIRD_FREE,
};
use crate::core::summary::Summary;
use crate::engine::{self, RunStats};
use crate::registry::{PlacementRequest, TaskRegistry};
use crate::sheet::cell_text;
use calamine::Data;
use log::{error, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub mod album;
pub mod printing;

pub use album::AlbumDialect;
pub use printing::PrintingDialect;

/// Header rows are recognized by this marker in the second column.
pub(crate) const HEADER_MARKER: &str = "№";

/// Placeholder in a folder template replaced by the row's customer name.
const NAME_TOKEN: &str = "_name_";
/// Placeholder in a folder template replaced by the size's mapped folder.
const SIZE_TOKEN: &str = "_size_";

/// A sheet layout: fed every row in order, decides headers vs data and
/// pushes data rows through the shared distribution pipeline.
pub trait SheetDialect {
    fn resolve_row(&mut self, ctx: &mut SortContext, row_index: usize, row: &[Data]);
}

/// Everything produced by a finished sort run.
pub struct SortOutcome {
    /// Engine counters
    pub stats: RunStats,
    /// Folder counts, unique-handled set and miss list
    pub summary: Summary,
}

/// Shared state and helpers for one sort run.
pub struct SortContext {
    settings: SheetSettings,
    size_to_folder: HashMap<String, String>,
    registry: TaskRegistry,
    summary: Summary,
    output_root: PathBuf,
    retouch_mode: bool,
}

impl SortContext {
    pub fn new(
        settings: SheetSettings,
        registry: TaskRegistry,
        output_root: PathBuf,
        retouch_mode: bool,
    ) -> Self {
        let size_to_folder = settings.size_to_folder();
        Self {
            settings,
            size_to_folder,
            registry,
            summary: Summary::new(),
            output_root,
            retouch_mode,
        }
    }

    /// Distribute one data row: walk every column from index 2 across the
    /// header span and submit placement requests for the columns marked
    /// distributable. Cell-level failures are logged and never abort the
    /// row.
    fn process_columns(
        &mut self,
        row_index: usize,
        row: &[Data],
        header_len: usize,
        name: Option<&str>,
    ) {
        for col in 2..header_len {
            let Some(value) = row.get(col).and_then(cell_text) else {
                continue;
            };
            if !self.settings.flag(SETTING_DISTRIBUTE, col) {
                continue;
            }

            if self.retouch_mode {
                // Retouch mode: routed columns all land flat in the output
                // root with a forced count of 1; other columns are skipped.
                if self.settings.flag(SETTING_RETOUCH, col) {
                    let complex = self.settings.flag(SETTING_COMPLEX_FORMAT, col);
                    self.place_retouch(&value, complex);
                }
                continue;
            }

            let destination = match self.column_destination(col, name) {
                Ok(destination) => destination,
                Err(err) => {
                    log_cell_error(row_index, col, &value, &err);
                    continue;
                }
            };

            let third_free = self.settings.flag(SETTING_THIRD_FREE, col);
            let result = if self.settings.flag(SETTING_COMPLEX_FORMAT, col) {
                self.place_complex(&value, &destination, third_free)
            } else {
                self.place_simple(&value, &destination, third_free);
                Ok(())
            };
            if let Err(err) = result {
                log_cell_error(row_index, col, &value, &err);
            }
        }
    }

    /// Destination directory for a column: output root joined with the
    /// column's folder template, `_name_` substituted when a name applies.
    fn column_destination(&self, col: usize, name: Option<&str>) -> Result<PathBuf> {
        let template = self
            .settings
            .folder_template(col)
            .ok_or(SortError::MissingTemplate(col))?;
        let folder = match name {
            Some(name) => template.replace(NAME_TOKEN, name),
            None => template.to_string(),
        };
        Ok(self.output_root.join(folder))
    }

    /// Simple-grammar placement.
    fn place_simple(&mut self, value: &str, destination: &Path, third_free: bool) {
        for entry in extract_simple(value) {
            let copies = if third_free {
                with_bonus(entry.count)
            } else {
                entry.count
            };
            self.submit(entry.number, destination.to_path_buf(), copies);
        }
    }

    /// Complex-grammar placement with `_size_` substitution. An unmapped
    /// size label fails the cell; segments submitted before the failure
    /// stay submitted.
    fn place_complex(&mut self, value: &str, destination: &Path, third_free: bool) -> Result<()> {
        for entry in extract_complex(value) {
            let folder = self
                .size_to_folder
                .get(&entry.size)
                .ok_or_else(|| SortError::UnmappedSize(entry.size.clone()))?;
            let resolved =
                PathBuf::from(destination.to_string_lossy().replace(SIZE_TOKEN, folder));
            let copies = if third_free {
                with_bonus(entry.count)
            } else {
                entry.count
            };
            self.submit(entry.number, resolved, copies);
        }
        Ok(())
    }

    /// Retouch placement: everything into the output root, one copy each,
    /// whatever the cell requested.
    fn place_retouch(&mut self, value: &str, complex: bool) {
        if complex {
            for entry in extract_complex(value) {
                self.submit(entry.number, self.output_root.clone(), 1);
            }
        } else {
            for entry in extract_simple(value) {
                self.submit(entry.number, self.output_root.clone(), 1);
            }
        }
    }

    fn submit(&mut self, number: String, destination: PathBuf, copies: u32) {
        self.registry.add(
            &mut self.summary,
            PlacementRequest {
                number,
                destination,
                copies,
                metadata: None,
                track_in_summary: true,
            },
        );
    }
}

/// "Third copy free" bonus: two or more requested copies earn
/// `floor(count / 2)` extra copies.
pub fn with_bonus(count: u32) -> u32 {
    if count >= 2 {
        count + count / 2
    } else {
        count
    }
}

fn log_cell_error(row_index: usize, col: usize, value: &str, err: &SortError) {
    error!("Error while processing row {}", row_index + 1);
    error!("Column: {}", col);
    error!("Value: {}", value);
    error!("Error text: {}", err);
    error!("-------------------------------------");
}

/// Run a full sort: feed every row to the dialect, execute the registered
/// copy tasks in waves, then log the folder counts, the processed/selected
/// totals and the miss report.
pub fn run(
    dialect: &mut dyn SheetDialect,
    mut ctx: SortContext,
    rows: &[Vec<Data>],
    concurrency: usize,
) -> Result<SortOutcome> {
    for (row_index, row) in rows.iter().enumerate() {
        dialect.resolve_row(&mut ctx, row_index, row);
    }

    let SortContext {
        registry,
        mut summary,
        ..
    } = ctx;
    let (tasks, index) = registry.into_tasks();
    info!("Registered {} copy tasks", tasks.len());

    let stats = engine::execute(tasks, &mut summary, concurrency)?;

    summary.log_folder_counts();
    summary.log_report(index.files_seen());
    info!("Sort complete. {}", stats);

    Ok(SortOutcome { stats, summary })
}
