//! Dataset directory naming.

/// Sanitize a record title for use in a directory name: keeps alphanumerics,
/// spaces, hyphens and underscores, trims the ends, and falls back when
/// nothing survives.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let trimmed = kept.trim();
    if trimmed.is_empty() {
        "Untitled_Dataset".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Directory name for a record: `Zenodo_<id>_<sanitized title>`.
pub fn output_dir_name(record_id: &str, title: &str) -> String {
    format!("Zenodo_{}_{}", record_id, sanitize_title(title))
}
