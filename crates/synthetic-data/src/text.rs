//! Single-line text rules for generated free-text fields.
//!
//! Warehouse columns hold one line of text each. Generated addresses and
//! paragraphs can span several lines, so they are flattened before use.
//!
//! # Rules
//!
//! - Line breaks become `", "` separators; blank lines are dropped
//! - Leading and trailing whitespace is trimmed
//! - At most [`TEXT_FIELD_MAX`] characters are kept

/// Maximum number of characters stored in a free-text column.
pub const TEXT_FIELD_MAX: usize = 255;

/// Separator inserted where a line break used to be.
const LINE_SEPARATOR: &str = ", ";

/// Flattens multi-line text into a single bounded line.
///
/// # Examples
///
/// ```
/// use synthetic_data::normalize_single_line;
///
/// assert_eq!(
///     normalize_single_line("1 Main Street\nSpringfield, IL 62704\n"),
///     "1 Main Street, Springfield, IL 62704"
/// );
/// assert_eq!(normalize_single_line("  padded  "), "padded");
/// ```
#[must_use]
pub fn normalize_single_line(raw: &str) -> String {
    let joined = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR);

    let truncated: String = joined.chars().take(TEXT_FIELD_MAX).collect();
    truncated.trim_end().to_owned()
}

/// Returns `true` if the text is a non-empty, bounded, single line.
///
/// # Examples
///
/// ```
/// use synthetic_data::is_single_line_text;
///
/// assert!(is_single_line_text("O'Brien & Sons"));
/// assert!(!is_single_line_text("two\nlines"));
/// assert!(!is_single_line_text("   "));
/// ```
#[must_use]
pub fn is_single_line_text(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if text.chars().count() > TEXT_FIELD_MAX {
        return false;
    }
    !text.contains(['\n', '\r'])
}
