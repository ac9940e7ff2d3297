//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::progress::{print_header, print_info, print_success, print_warning};
use crate::cli::{Args, Commands, Layout};
use crate::core::config::{get_config_path, init_config, Config};
use crate::core::settings::SheetSettings;
use crate::index::{ExtensionPolicy, FileIndex};
use crate::registry::TaskRegistry;
use crate::sheet;
use crate::sorter::{self, AlbumDialect, PrintingDialect, SheetDialect, SortContext};
use anyhow::Result;
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Run the appropriate command based on CLI arguments
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Commands::Sort {
            layout,
            table,
            source,
            output,
            extension,
            retouch,
            include_subdirs,
            settings_sheet,
        } => sort_photos(
            config,
            *layout,
            table,
            source,
            output.clone(),
            extension,
            *retouch,
            *include_subdirs,
            settings_sheet.as_deref(),
        ),
        Commands::Settings {
            table,
            settings_sheet,
        } => show_settings(config, table, settings_sheet.as_deref()),
        Commands::Index {
            source,
            extension,
            include_subdirs,
        } => show_index(source, extension, *include_subdirs),
        Commands::Config { path, reset } => handle_config_command(*path, *reset),
        Commands::GenerateConfig { output } => generate_config_file(output.clone()),
        Commands::ShowConfig => {
            show_config(config);
            Ok(())
        }
    }
}

/// Run a full sort: workbook → settings → file index → row scan → copy
/// waves → summary report.
#[allow(clippy::too_many_arguments)]
fn sort_photos(
    config: &Config,
    layout: Layout,
    table: &Path,
    source: &Path,
    output: Option<PathBuf>,
    extension: &str,
    retouch: bool,
    include_subdirs: bool,
    settings_sheet: Option<&str>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| source.join(&config.output.subdir_name));

    info!("Table: {}", table.display());
    info!("Unsorted photos: {}", source.display());
    info!("Sorted photos: {}", output.display());

    let sheet_name = settings_sheet.unwrap_or(&config.sheet.settings_sheet);
    let workbook = sheet::load_workbook(table, sheet_name).map_err(|err| {
        error!("{}", err);
        err
    })?;
    let settings = SheetSettings::from_rows(&workbook.settings_rows).map_err(|err| {
        error!("{}", err);
        err
    })?;

    let policy = ExtensionPolicy::parse(extension);
    let index = FileIndex::build(source, &policy, include_subdirs)?;
    info!(
        "Indexed {} photos out of {} files",
        index.len(),
        index.files_seen()
    );

    fs::create_dir_all(&output)?;

    let ctx = SortContext::new(settings, TaskRegistry::new(index), output, retouch);
    let mut dialect: Box<dyn SheetDialect> = match layout {
        Layout::Printing => Box::new(PrintingDialect::new()),
        Layout::Album => Box::new(AlbumDialect::new()),
    };

    sorter::run(
        dialect.as_mut(),
        ctx,
        &workbook.data_rows,
        config.copying.concurrency,
    )?;
    Ok(())
}

/// Parse the settings sheet of a workbook and print what was recognized.
fn show_settings(config: &Config, table: &Path, settings_sheet: Option<&str>) -> Result<()> {
    let sheet_name = settings_sheet.unwrap_or(&config.sheet.settings_sheet);
    let workbook = sheet::load_workbook(table, sheet_name)?;
    let settings = SheetSettings::from_rows(&workbook.settings_rows)?;

    print_header("Settings");
    print_info(&format!("Settings sheet: {}", sheet_name));
    for name in settings.captured_names() {
        let row = settings.row(name).unwrap_or(&[]);
        let cells: Vec<String> = row
            .iter()
            .skip(1)
            .map(|cell| cell.clone().unwrap_or_else(|| "-".to_string()))
            .collect();
        print_info(&format!("{}: [{}]", name, cells.join(", ")));
    }

    let size_map = settings.size_to_folder();
    if !size_map.is_empty() {
        let mut sizes: Vec<_> = size_map.iter().collect();
        sizes.sort();
        println!();
        for (size, folder) in sizes {
            print_info(&format!("size {} → {}", size, folder));
        }
    }
    Ok(())
}

/// Build the file index of a source directory and print it.
fn show_index(source: &Path, extension: &str, include_subdirs: bool) -> Result<()> {
    let policy = ExtensionPolicy::parse(extension);
    let index = FileIndex::build(source, &policy, include_subdirs)?;

    print_header("File index");
    print_info(&format!("Source: {}", source.display()));
    print_info(&format!(
        "Indexed {} photos out of {} files",
        index.len(),
        index.files_seen()
    ));
    println!();
    for (number, path) in index.entries() {
        print_info(&format!("{} → {}", number, path.display()));
    }
    Ok(())
}

/// Handle the `config` subcommand.
fn handle_config_command(path_only: bool, reset: bool) -> Result<()> {
    if path_only {
        match get_config_path() {
            Some(path) => {
                println!("{}", path.display());
                if !path.exists() {
                    print_warning("Config file does not exist yet (run 'config' to create it)");
                }
            }
            None => print_warning("Could not determine the config file location"),
        }
        return Ok(());
    }

    if reset {
        if let Some(path) = get_config_path() {
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        let path = init_config()?;
        print_success(&format!("Config reset to defaults: {}", path.display()));
        return Ok(());
    }

    let path = init_config()?;
    print_success(&format!("Config file: {}", path.display()));
    Ok(())
}

/// Generate a config file at the given (or standard) location.
fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let path = match output {
        Some(path) => {
            fs::write(&path, Config::generate_default_config())?;
            path
        }
        None => init_config()?,
    };
    print_success(&format!("Generated config file: {}", path.display()));
    Ok(())
}

/// Print the effective configuration.
fn show_config(config: &Config) {
    print_header("Configuration");
    print_info(&format!("Output sub-directory: {}", config.output.subdir_name));
    print_info(&format!("Settings sheet: {}", config.sheet.settings_sheet));
    print_info(&format!("Copy concurrency: {}", config.copying.concurrency));
    print_info(&format!("Log level: {}", config.logging.level));
    print_info(&format!(
        "Log to file: {}",
        if config.logging.log_to_file {
            config.logging.log_file.display().to_string()
        } else {
            "no".to_string()
        }
    ));
}
