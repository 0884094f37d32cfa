/// Folds a free-form label to lowercase ASCII with separators and BOM markers removed.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_' && *ch != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Trims a free-text cell and maps blank values to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|cleaned| !cleaned.is_empty())
}
