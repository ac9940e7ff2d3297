//! Cell grammars for numeric photo references
//!
//! Order sheets reference photos by number in two dialects:
//!
//! - **Simple**: a bare number (`1234`), a number with a copy count
//!   (`1234 (2 шт)`), or a range (`1234-1244`). A cell may mix several of
//!   these forms.
//! - **Complex**: comma/newline-separated segments where each segment also
//!   carries a size label after a hyphen (`1234(2шт)-A4`).
//!
//! Both extractors fail soft: malformed segments are skipped and never abort
//! the cell. Callers are expected to log row/column context themselves.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A number with a copy count, e.g. `1234 (2 шт)`. The parenthesis is
/// optional and the count suffix is the literal `шт` (units).
static MULTI_COUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*\(?(\d+)\s*шт").unwrap());

/// A numeric range, e.g. `1234-1244`. Spaces around the hyphen are allowed.
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+) *- *(\d+)").unwrap());

/// Any maximal digit run.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// A photo number with its requested copy count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberCount {
    /// Numeric identifier as written in the cell (leading zeros preserved
    /// for standalone and multi-count forms)
    pub number: String,
    /// Requested number of copies
    pub count: u32,
}

/// A photo number with copy count and size label, from the complex grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedNumberCount {
    /// Numeric identifier as written in the cell
    pub number: String,
    /// Requested number of copies
    pub count: u32,
    /// Size label from the right side of the hyphen, whitespace-trimmed
    pub size: String,
}

/// Parse a cell under the simple grammar.
///
/// Multi-count and range forms are extracted first; digit runs already
/// consumed by either form (including counts and range endpoints) are not
/// reported again as standalone numbers.
pub fn extract_simple(text: &str) -> Vec<NumberCount> {
    let mut out = Vec::new();

    let multi: Vec<(&str, &str)> = MULTI_COUNT_RE
        .captures_iter(text)
        .map(|c| {
            (
                c.get(1).map_or("", |m| m.as_str()),
                c.get(2).map_or("", |m| m.as_str()),
            )
        })
        .collect();
    let ranges: Vec<(&str, &str)> = RANGE_RE
        .captures_iter(text)
        .map(|c| {
            (
                c.get(1).map_or("", |m| m.as_str()),
                c.get(2).map_or("", |m| m.as_str()),
            )
        })
        .collect();

    let mut consumed: HashSet<&str> = HashSet::new();
    for &(number, count) in &multi {
        consumed.insert(number);
        consumed.insert(count);
    }
    for &(start, end) in &ranges {
        consumed.insert(start);
        consumed.insert(end);
    }

    for &(number, count) in &multi {
        if let Ok(count) = count.parse::<u32>() {
            out.push(NumberCount {
                number: number.to_string(),
                count,
            });
        }
    }

    for &(start, end) in &ranges {
        let (Ok(start), Ok(end)) = (start.parse::<u64>(), end.parse::<u64>()) else {
            continue;
        };
        for value in start..=end {
            out.push(NumberCount {
                number: value.to_string(),
                count: 1,
            });
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for m in NUMBER_RE.find_iter(text) {
        let number = m.as_str();
        if consumed.contains(number) || !seen.insert(number) {
            continue;
        }
        out.push(NumberCount {
            number: number.to_string(),
            count: 1,
        });
    }

    out
}

/// Parse a cell under the complex grammar.
///
/// The cell is split on newlines, then commas; each segment splits on the
/// first hyphen into `number[(count шт)]` and a size label. The Cyrillic
/// `А` is normalized to the Latin `A` before splitting, so `А4` and `A4`
/// read as the same label. Segments without a hyphen or without any digit
/// run are skipped.
pub fn extract_complex(text: &str) -> Vec<SizedNumberCount> {
    let normalized = text.replace('А', "A");
    let mut out = Vec::new();

    for line in normalized.split('\n') {
        for segment in line.split(',') {
            let Some((left, right)) = segment.split_once('-') else {
                continue;
            };
            let size = right.trim().to_string();

            if let Some(caps) = MULTI_COUNT_RE.captures(left) {
                let number = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let Ok(count) = caps.get(2).map_or("", |m| m.as_str()).parse::<u32>() else {
                    continue;
                };
                out.push(SizedNumberCount {
                    number,
                    count,
                    size,
                });
            } else if let Some(m) = NUMBER_RE.find(left) {
                out.push(SizedNumberCount {
                    number: m.as_str().to_string(),
                    count: 1,
                    size,
                });
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(text: &str) -> Vec<(String, u32)> {
        extract_simple(text)
            .into_iter()
            .map(|n| (n.number, n.count))
            .collect()
    }

    #[test]
    fn test_simple_single_number() {
        assert_eq!(simple("1234"), vec![("1234".to_string(), 1)]);
    }

    #[test]
    fn test_simple_multi_count() {
        assert_eq!(simple("1234 (2 шт)"), vec![("1234".to_string(), 2)]);
        assert_eq!(simple("1234(2шт)"), vec![("1234".to_string(), 2)]);
    }

    #[test]
    fn test_simple_range_expands_inclusive() {
        let result = simple("1001-1004");
        assert_eq!(
            result,
            vec![
                ("1001".to_string(), 1),
                ("1002".to_string(), 1),
                ("1003".to_string(), 1),
                ("1004".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_simple_range_with_spaces() {
        assert_eq!(simple("12 - 14").len(), 3);
    }

    #[test]
    fn test_simple_mixed_cell() {
        // Standalone number plus a range: the range endpoints must not be
        // double-counted as standalone numbers.
        let mut result = simple("1001, 1002-1004");
        result.sort();
        assert_eq!(
            result,
            vec![
                ("1001".to_string(), 1),
                ("1002".to_string(), 1),
                ("1003".to_string(), 1),
                ("1004".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_simple_multi_count_not_double_counted() {
        // Neither the number nor the count may leak into the standalone set.
        assert_eq!(simple("1234 (2 шт)"), vec![("1234".to_string(), 2)]);
    }

    #[test]
    fn test_simple_duplicate_standalone_deduplicated() {
        assert_eq!(simple("1234 1234"), vec![("1234".to_string(), 1)]);
    }

    #[test]
    fn test_simple_empty_and_non_numeric() {
        assert!(simple("").is_empty());
        assert!(simple("нет фото").is_empty());
    }

    #[test]
    fn test_simple_backwards_range_yields_nothing() {
        // An inverted range expands to the empty set; the endpoints stay
        // consumed.
        assert!(simple("1004-1001").is_empty());
    }

    #[test]
    fn test_complex_full_form() {
        let result = extract_complex("1234(2шт)-A4");
        assert_eq!(
            result,
            vec![SizedNumberCount {
                number: "1234".to_string(),
                count: 2,
                size: "A4".to_string(),
            }]
        );
    }

    #[test]
    fn test_complex_bare_number_defaults_to_one_copy() {
        let result = extract_complex("1234-A5");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].number, "1234");
        assert_eq!(result[0].count, 1);
        assert_eq!(result[0].size, "A5");
    }

    #[test]
    fn test_complex_cyrillic_a_normalized() {
        let result = extract_complex("1234-А4");
        assert_eq!(result[0].size, "A4");
    }

    #[test]
    fn test_complex_comma_and_newline_segments() {
        let result = extract_complex("1001-A4, 1002(3шт)-A5\n1003-A6");
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].size, "A4");
        assert_eq!(result[1].count, 3);
        assert_eq!(result[2].number, "1003");
    }

    #[test]
    fn test_complex_size_label_trimmed() {
        let result = extract_complex("1234- A4 ");
        assert_eq!(result[0].size, "A4");
    }

    #[test]
    fn test_complex_segment_without_hyphen_skipped() {
        let result = extract_complex("1001-A4, 1002");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].number, "1001");
    }

    #[test]
    fn test_complex_segment_without_digits_skipped() {
        assert!(extract_complex("размер-A4").is_empty());
    }
}
