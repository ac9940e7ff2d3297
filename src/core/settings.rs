//! Settings-sheet resolver
//!
//! The workbook carries a dedicated settings sheet describing, per data
//! column, how that column is distributed: whether it participates at all,
//! which destination folder it maps to, which cell grammar applies, and the
//! bonus/retouch flags. Setting rows are recognized by their first cell,
//! matched case-insensitively against a fixed set of Russian names, and are
//! stored whole so the value for data column `n` is simply cell `n` of the
//! setting row.

use crate::core::error::{Result, SortError};
use crate::sheet::cell_text;
use calamine::Data;
use std::collections::HashMap;

/// Whether the column is distributed at all (`ДА` / `НЕТ`)
pub const SETTING_DISTRIBUTE: &str = "распределять";
/// Destination folder template; may embed `_name_` or `_size_`
pub const SETTING_FOLDER: &str = "папка для складывания";
/// Whether the complex cell grammar applies to the column
pub const SETTING_COMPLEX_FORMAT: &str = "сложный формат";
/// Whether the "third copy free" bonus applies to the column
pub const SETTING_THIRD_FREE: &str = "третье в подарок?";
/// Whether the column is routed in retouch mode
pub const SETTING_RETOUCH: &str = "раскладывать для ретуши";
/// Size label, paired with the folder row to build the size map
pub const SETTING_SIZE: &str = "размер";

/// All setting names the resolver recognizes.
pub const RECOGNIZED_SETTINGS: &[&str] = &[
    SETTING_DISTRIBUTE,
    SETTING_FOLDER,
    SETTING_COMPLEX_FORMAT,
    SETTING_THIRD_FREE,
    SETTING_RETOUCH,
    SETTING_SIZE,
];

/// Column-indexed settings parsed from the settings sheet.
#[derive(Debug)]
pub struct SheetSettings {
    rows: HashMap<String, Vec<Option<String>>>,
}

impl SheetSettings {
    /// Scan the settings sheet rows and capture every recognized setting.
    ///
    /// A later row with the same setting name overwrites the earlier one;
    /// rows with unrecognized first cells are ignored. Zero recognized rows
    /// is a fatal configuration error.
    pub fn from_rows(rows: &[Vec<Data>]) -> Result<Self> {
        let mut captured: HashMap<String, Vec<Option<String>>> = HashMap::new();

        for row in rows {
            let Some(first) = row.first().and_then(cell_text) else {
                continue;
            };
            let name = first.to_lowercase();
            if RECOGNIZED_SETTINGS.contains(&name.as_str()) {
                captured.insert(name, row.iter().map(cell_text).collect());
            }
        }

        if captured.is_empty() {
            return Err(SortError::EmptySettings);
        }
        Ok(Self { rows: captured })
    }

    /// Raw cell value of a setting row at the given column.
    pub fn value(&self, name: &str, col: usize) -> Option<&str> {
        self.rows.get(name)?.get(col)?.as_deref()
    }

    /// Whether a yes/no setting is `ДА` at the given column.
    pub fn flag(&self, name: &str, col: usize) -> bool {
        self.value(name, col)
            .map(|v| v.trim().to_uppercase() == "ДА")
            .unwrap_or(false)
    }

    /// Destination folder template for the given column.
    pub fn folder_template(&self, col: usize) -> Option<&str> {
        self.value(SETTING_FOLDER, col)
    }

    /// Names of the settings captured from the sheet, sorted.
    pub fn captured_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rows.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Full cell row of one captured setting.
    pub fn row(&self, name: &str) -> Option<&[Option<String>]> {
        self.rows.get(name).map(Vec::as_slice)
    }

    /// Derive the size-label → destination-folder map from the parallel
    /// `размер` / `папка для складывания` rows. Labels are upper-cased with
    /// the Cyrillic `А` normalized to Latin `A`; positions without a size
    /// or folder value are skipped.
    pub fn size_to_folder(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let Some(sizes) = self.rows.get(SETTING_SIZE) else {
            return map;
        };
        let folders = self.rows.get(SETTING_FOLDER);

        for (pos, size) in sizes.iter().enumerate() {
            let Some(size) = size else {
                continue;
            };
            let folder = folders
                .and_then(|row| row.get(pos))
                .and_then(|v| v.clone());
            if let Some(folder) = folder {
                map.insert(size.to_uppercase().replace('А', "A"), folder);
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn settings_fixture() -> Vec<Vec<Data>> {
        vec![
            vec![text("Заголовок листа")],
            vec![text("Распределять"), Data::Empty, Data::Empty, text("ДА")],
            vec![
                text("папка для складывания"),
                Data::Empty,
                Data::Empty,
                text("A4"),
            ],
            vec![
                text("сложный формат"),
                Data::Empty,
                Data::Empty,
                text("НЕТ"),
            ],
        ]
    }

    #[test]
    fn test_recognized_rows_captured() {
        let settings = SheetSettings::from_rows(&settings_fixture()).unwrap();
        assert!(settings.flag(SETTING_DISTRIBUTE, 3));
        assert_eq!(settings.folder_template(3), Some("A4"));
        assert!(!settings.flag(SETTING_COMPLEX_FORMAT, 3));
    }

    #[test]
    fn test_setting_name_case_insensitive() {
        // "Распределять" in the sheet matches the lower-cased name
        let settings = SheetSettings::from_rows(&settings_fixture()).unwrap();
        assert!(settings.value(SETTING_DISTRIBUTE, 3).is_some());
    }

    #[test]
    fn test_unrecognized_rows_ignored() {
        let settings = SheetSettings::from_rows(&settings_fixture()).unwrap();
        assert!(settings.value("заголовок листа", 0).is_none());
    }

    #[test]
    fn test_no_recognized_rows_is_fatal() {
        let rows = vec![vec![text("что-то другое")]];
        assert!(matches!(
            SheetSettings::from_rows(&rows),
            Err(SortError::EmptySettings)
        ));
    }

    #[test]
    fn test_later_row_with_same_name_overwrites() {
        let mut rows = settings_fixture();
        rows.push(vec![
            text("распределять"),
            Data::Empty,
            Data::Empty,
            text("НЕТ"),
        ]);
        let settings = SheetSettings::from_rows(&rows).unwrap();
        assert!(!settings.flag(SETTING_DISTRIBUTE, 3));
    }

    #[test]
    fn test_flag_missing_column_is_false() {
        let settings = SheetSettings::from_rows(&settings_fixture()).unwrap();
        assert!(!settings.flag(SETTING_DISTRIBUTE, 7));
        assert!(!settings.flag(SETTING_RETOUCH, 3));
    }

    #[test]
    fn test_size_to_folder_normalizes_labels() {
        let rows = vec![
            vec![
                text("размер"),
                Data::Empty,
                text("а4"), // Cyrillic а, lower case
                text("15x21"),
            ],
            vec![
                text("папка для складывания"),
                Data::Empty,
                text("Формат A4"),
                text("Формат 15x21"),
            ],
        ];
        let settings = SheetSettings::from_rows(&rows).unwrap();
        let map = settings.size_to_folder();
        assert_eq!(map.get("A4"), Some(&"Формат A4".to_string()));
        assert_eq!(map.get("15X21"), Some(&"Формат 15x21".to_string()));
        assert_eq!(map.len(), 3); // the name cell itself maps too
    }

    #[test]
    fn test_size_to_folder_skips_empty_positions() {
        let rows = vec![
            vec![text("размер"), Data::Empty, text("A4")],
            vec![text("папка для складывания"), Data::Empty, text("A4")],
        ];
        let settings = SheetSettings::from_rows(&rows).unwrap();
        let map = settings.size_to_folder();
        assert!(!map.contains_key("")); // the Empty position is skipped
    }
}
