//! Source file index
//!
//! Copy tasks are matched to real files through a number → file map built
//! once per sort run. File names must end in `<digits>.<extension>` — an
//! arbitrary prefix is tolerated (`IMG_1234.jpg` and `1234.jpg` both index
//! as `1234`), so the lookup during sorting is a plain map access instead
//! of a directory probe per reference.

use crate::core::error::{Result, SortError};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Photo file extensions
pub const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "heic", "heif", "gif", "webp", "raw", "dng", "tiff", "tif", "bmp",
];

/// Video file extensions
pub const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v", "avi", "3gp"];

/// Trailing `<digits>.<extension>` at the end of a file name.
static NUMBERED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.([A-Za-z0-9]+)$").unwrap());

/// Which file extensions the index accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// Any recognized media extension
    All,
    /// Photo extensions only
    Photo,
    /// Exact case-insensitive match to one extension
    Specific(String),
}

impl ExtensionPolicy {
    /// Parse a selector token. The Russian tokens the original order forms
    /// use (`ВСЕ`, `ФОТО`) are accepted alongside `ALL`/`PHOTO`; anything
    /// else is treated as a concrete extension (leading dot tolerated).
    pub fn parse(selector: &str) -> Self {
        match selector.trim().to_uppercase().as_str() {
            "ВСЕ" | "ALL" => ExtensionPolicy::All,
            "ФОТО" | "PHOTO" => ExtensionPolicy::Photo,
            other => ExtensionPolicy::Specific(
                other.trim_start_matches('.').to_lowercase(),
            ),
        }
    }

    /// Whether a (lower-cased) extension passes this policy.
    pub fn accepts(&self, extension: &str) -> bool {
        match self {
            ExtensionPolicy::All => {
                PHOTO_EXTENSIONS.contains(&extension) || VIDEO_EXTENSIONS.contains(&extension)
            }
            ExtensionPolicy::Photo => PHOTO_EXTENSIONS.contains(&extension),
            ExtensionPolicy::Specific(wanted) => extension == wanted,
        }
    }
}

/// Split a file name into its trailing digit run and lower-cased extension.
pub fn split_numbered_name(name: &str) -> Option<(String, String)> {
    let caps = NUMBERED_NAME_RE.captures(name)?;
    Some((
        caps.get(1)?.as_str().to_string(),
        caps.get(2)?.as_str().to_lowercase(),
    ))
}

/// Number → file map over the source directory, built once per sort run.
#[derive(Debug)]
pub struct FileIndex {
    root: PathBuf,
    by_number: HashMap<String, PathBuf>,
    files_seen: usize,
}

impl FileIndex {
    /// Walk the source directory and index every file whose name parses and
    /// whose extension passes the policy. `include_subdirs` controls whether
    /// the walk descends past the top level.
    ///
    /// Two files parsing to the same number keep the last one enumerated,
    /// with a warning — directory order is filesystem-defined.
    pub fn build(dir: &Path, policy: &ExtensionPolicy, include_subdirs: bool) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SortError::IoError(format!(
                "Source directory '{}' not found",
                dir.display()
            )));
        }

        let mut by_number: HashMap<String, PathBuf> = HashMap::new();
        let mut files_seen = 0;

        let max_depth = if include_subdirs { usize::MAX } else { 1 };
        for entry in WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            files_seen += 1;

            let name = entry.file_name().to_string_lossy();
            let Some((number, extension)) = split_numbered_name(&name) else {
                continue;
            };
            if !policy.accepts(&extension) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            if let Some(previous) = by_number.insert(number.clone(), relative.clone()) {
                warn!(
                    "Photo number {} is ambiguous: '{}' replaces '{}'",
                    number,
                    relative.display(),
                    previous.display()
                );
            }
        }

        Ok(Self {
            root: dir.to_path_buf(),
            by_number,
            files_seen,
        })
    }

    /// File for a number, relative to the source root.
    pub fn lookup(&self, number: &str) -> Option<&Path> {
        self.by_number.get(number).map(PathBuf::as_path)
    }

    /// Absolute path of the file for a number.
    pub fn source_path(&self, number: &str) -> Option<PathBuf> {
        self.lookup(number).map(|rel| self.root.join(rel))
    }

    /// The indexed source root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// How many regular files the walk encountered, indexed or not.
    pub fn files_seen(&self) -> usize {
        self.files_seen
    }

    /// How many numbers are indexed.
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }

    /// Indexed `(number, relative path)` pairs, sorted by number.
    pub fn entries(&self) -> Vec<(&str, &Path)> {
        let mut entries: Vec<_> = self
            .by_number
            .iter()
            .map(|(n, p)| (n.as_str(), p.as_path()))
            .collect();
        entries.sort();
        entries
    }
}
