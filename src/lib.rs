//! Photo Sorting Tool Library
//!
//! Classifies a folder of numbered photo files into destination sub-folders
//! according to rules extracted from an Excel order sheet, then copies each
//! matched file into its destination with the aggregated copy count encoded
//! in the output file name.
//!
//! # Architecture
//!
//! The pipeline, in data-flow order:
//!
//! - [`sheet`] - Workbook loading (calamine) and cell value helpers
//! - [`core`] - Configuration, errors, the two cell grammars, the
//!   settings-sheet resolver and the run summary
//! - [`index`] - Number → file map over the source directory
//! - [`registry`] - Deduplication of placement requests into copy tasks
//! - [`sorter`] - The two sheet dialects (printing, album) and the shared
//!   distribution pipeline
//! - [`engine`] - Wave-bounded concurrent execution of the copy tasks
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use photo_sorting_tool::core::settings::SheetSettings;
//! use photo_sorting_tool::index::{ExtensionPolicy, FileIndex};
//! use photo_sorting_tool::registry::TaskRegistry;
//! use photo_sorting_tool::sorter::{run, PrintingDialect, SortContext};
//! use photo_sorting_tool::sheet;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let workbook = sheet::load_workbook(Path::new("orders.xlsx"), "настройки")?;
//!     let settings = SheetSettings::from_rows(&workbook.settings_rows)?;
//!
//!     let index = FileIndex::build(Path::new("./photos"), &ExtensionPolicy::Photo, false)?;
//!     let ctx = SortContext::new(
//!         settings,
//!         TaskRegistry::new(index),
//!         Path::new("./photos/Сортировка").to_path_buf(),
//!         false,
//!     );
//!
//!     let mut dialect = PrintingDialect::new();
//!     let outcome = run(&mut dialect, ctx, &workbook.data_rows, 5)?;
//!     println!("{}", outcome.stats);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod index;
pub mod registry;
pub mod sheet;
pub mod sorter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
