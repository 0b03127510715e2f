//! Shared helpers for the file-facing adapters.

/// Quote a CSV field when it contains a separator, quote or line break.
///
/// Numeric cells never need it; user-supplied timestamp formats might.
pub(super) fn escape_csv_field(s: &str) -> std::borrow::Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        std::borrow::Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        std::borrow::Cow::Borrowed(s)
    }
}

/// Join already-rendered cells into one CSV line (without terminator).
pub(super) fn csv_line<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|c| escape_csv_field(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
