/// String conversion and matching helpers
///
/// Wide strings are UTF-16 code units, the form native graphics and
/// windowing APIs use for debug names and paths.

use crate::error::{Error, Result};

/// Encode `text` as UTF-16 code units
pub fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decode UTF-16 code units
///
/// # Errors
///
/// `InvalidResource` when `wide` contains an unpaired surrogate
pub fn to_utf8(wide: &[u16]) -> Result<String> {
    String::from_utf16(wide)
        .map_err(|e| Error::InvalidResource(format!("invalid UTF-16 string: {}", e)))
}

/// True if `text` begins with `prefix`
///
/// An empty prefix matches nothing.
pub fn starts_with(text: &str, prefix: &str) -> bool {
    !prefix.is_empty() && text.starts_with(prefix)
}

/// True if `text` ends with `suffix`
///
/// An empty suffix matches nothing.
pub fn ends_with(text: &str, suffix: &str) -> bool {
    !suffix.is_empty() && text.ends_with(suffix)
}

// ===== TRIMMING =====

/// Space, tab, newline, vertical tab, form feed and carriage return
fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

fn is_blank_unit(unit: &u16) -> bool {
    char::from_u32(u32::from(*unit)).is_some_and(is_blank)
}

/// `text` without leading blanks
pub fn left_trim(text: &str) -> &str {
    text.trim_start_matches(is_blank)
}

/// `text` without trailing blanks
pub fn right_trim(text: &str) -> &str {
    text.trim_end_matches(is_blank)
}

/// `text` without leading or trailing blanks
pub fn trim(text: &str) -> &str {
    left_trim(right_trim(text))
}

pub fn left_trim_wide(wide: &[u16]) -> &[u16] {
    let start = wide.iter().position(|u| !is_blank_unit(u)).unwrap_or(wide.len());
    &wide[start..]
}

pub fn right_trim_wide(wide: &[u16]) -> &[u16] {
    let end = wide.iter().rposition(|u| !is_blank_unit(u)).map_or(0, |i| i + 1);
    &wide[..end]
}

pub fn trim_wide(wide: &[u16]) -> &[u16] {
    left_trim_wide(right_trim_wide(wide))
}

#[cfg(test)]
#[path = "strings_tests.rs"]
mod tests;
