//! Raw extracted text to clean line sequence.

/// Split extracted text into trimmed, non-empty lines.
///
/// Carriage returns are dropped and non-breaking spaces become plain spaces
/// before trimming, so every returned line is non-empty and has no leading
/// or trailing whitespace. Source order is preserved.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.replace('\r', "")
        .split('\n')
        .map(|line| line.replace('\u{00a0}', " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
