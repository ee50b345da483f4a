//! Weekday names as typed by users (Spanish, any case, accents optional).

use chrono::Weekday;

/// Three-letter stems in Monday-first order.
const STEMS: [(&str, Weekday); 7] = [
    ("lun", Weekday::Mon),
    ("mar", Weekday::Tue),
    ("mie", Weekday::Wed),
    ("jue", Weekday::Thu),
    ("vie", Weekday::Fri),
    ("sab", Weekday::Sat),
    ("dom", Weekday::Sun),
];

/// ## Summary
/// Matches a free-text day name against the known stems.
///
/// Case-insensitive, ignores surrounding whitespace and acute accents on
/// vowels. Other diacritics are kept, so `"mièrcoles"` does not match.
/// Returns `None` when no stem is a prefix of the folded text.
#[must_use]
pub fn parse_weekday(text: &str) -> Option<Weekday> {
    let folded = fold(text);
    STEMS
        .iter()
        .find(|(stem, _)| folded.starts_with(stem))
        .map(|(_, weekday)| *weekday)
}

/// ## Summary
/// Maps a free-text day name to a weekday, defaulting to Monday.
///
/// Unrecognized or empty input is not an error: it resolves to Monday.
/// Use [`parse_weekday`] to detect the fallback.
#[must_use]
pub fn normalize_weekday(text: &str) -> Weekday {
    parse_weekday(text).unwrap_or_else(|| {
        tracing::debug!(day = %text, "Unrecognized day name, defaulting to Monday");
        Weekday::Mon
    })
}

fn fold(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}
