//! Locale code pattern matching.
//!
//! A locale code is either two characters (`"es"`) or two characters, a hyphen and two more
//! characters (`"es-MX"`). Nothing beyond the shape is checked: `"zz-99"` is accepted, and
//! candidates that don't fit are rejected rather than corrected.
//!
//! Characters are counted in UTF-16 code units, so a single astral character such as `"👋"`
//! fills both positions of a two-character code.

/// Separator between the language and region parts of a locale code.
pub const REGION_SEPARATOR: char = '-';

/// Returns `true` when `candidate` has the shape of a locale code.
///
/// # Examples
/// ```
/// use localization_dictionary::dictionary::is_locale_code;
///
/// assert!(is_locale_code("en"));
/// assert!(is_locale_code("en-US"));
/// assert!(!is_locale_code("first"));
/// assert!(!is_locale_code("en_US"));
/// ```
#[must_use]
pub fn is_locale_code(candidate: &str) -> bool {
    let units: Vec<u16> = candidate.encode_utf16().collect();
    match units.as_slice() {
        [a, b] => !is_line_break(*a) && !is_line_break(*b),
        [a, b, separator, c, d] if *separator == REGION_SEPARATOR_UNIT => {
            [a, b, c, d].iter().all(|unit| !is_line_break(**unit))
        }
        _ => false,
    }
}

/// [`REGION_SEPARATOR`] as a UTF-16 code unit.
const REGION_SEPARATOR_UNIT: u16 = 0x2D;

/// Line breaks never count as a locale character.
const fn is_line_break(unit: u16) -> bool {
    matches!(unit, 0x0A | 0x0D | 0x2028 | 0x2029)
}

/// Language part of a locale: everything before the first `-`.
///
/// Returns the input unchanged when it carries no region.
#[must_use]
pub fn language_of(locale: &str) -> &str {
    locale.split(REGION_SEPARATOR).next().unwrap_or(locale)
}
