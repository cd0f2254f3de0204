//! Record reference parsing: bare ID or Zenodo record URL.

use url::Url;

/// Extract a Zenodo record ID from user input.
///
/// Accepts a bare numeric ID, or a URL containing a `/record/<id>` or
/// `/records/<id>` path on zenodo.org (a missing scheme is tolerated).
/// Returns `None` when no record ID can be identified.
pub fn parse_record_ref(input: &str) -> Option<String> {
    let input = input.trim();
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        return Some(input.to_string());
    }

    let parsed = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{}", input)))
        .ok()?;
    let host = parsed.host_str()?;
    if host != "zenodo.org" && !host.ends_with(".zenodo.org") {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment == "record" || segment == "records" {
            let id = segments.next()?;
            if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
                return Some(id.to_string());
            }
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numeric_id() {
        assert_eq!(parse_record_ref("1234567").as_deref(), Some("1234567"));
        assert_eq!(parse_record_ref("  42  ").as_deref(), Some("42"));
    }

    #[test]
    fn record_urls_old_and_new() {
        assert_eq!(
            parse_record_ref("https://zenodo.org/record/1234567").as_deref(),
            Some("1234567")
        );
        assert_eq!(
            parse_record_ref("https://zenodo.org/records/1234567").as_deref(),
            Some("1234567")
        );
    }

    #[test]
    fn url_without_scheme() {
        assert_eq!(
            parse_record_ref("zenodo.org/records/99").as_deref(),
            Some("99")
        );
    }

    #[test]
    fn trailing_path_is_fine() {
        assert_eq!(
            parse_record_ref("https://zenodo.org/records/55/files").as_deref(),
            Some("55")
        );
    }

    #[test]
    fn rejects_other_hosts_and_garbage() {
        assert_eq!(parse_record_ref("https://example.org/records/1"), None);
        assert_eq!(parse_record_ref("not a record"), None);
        assert_eq!(parse_record_ref("https://zenodo.org/records/abc"), None);
        assert_eq!(parse_record_ref(""), None);
    }
}
