//! Conditional request handling module
//!
//! Provides `ETag` generation and `If-None-Match` / `If-Modified-Since`
//! evaluation for the static file server.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Generate `ETag` from file content using fast hashing
///
/// Returns a quoted `ETag` string, e.g., `"abc123def"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Handles comma-separated lists and the `*` wildcard. Returns true when the
/// client's cached copy is still valid (respond 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a filesystem timestamp as an HTTP-date (RFC 7231)
pub fn format_http_date(mtime: SystemTime) -> String {
    let dt: DateTime<Utc> = mtime.into();
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Check `If-Modified-Since` against the file's modification time
///
/// Returns true when the file has not changed since the client's timestamp
/// (respond 304). Unparsable header values fail open and refetch.
pub fn check_not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(client_time) = DateTime::parse_from_rfc2822(&header.replace("GMT", "+0000")) else {
        return false;
    };

    let file_time: DateTime<Utc> = mtime.into();
    // HTTP-dates have second resolution, so compare at that granularity
    file_time.timestamp() <= client_time.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        assert_eq!(generate_etag(b"same content"), generate_etag(b"same content"));
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_http_date_round_trip() {
        let now = SystemTime::now();
        let formatted = format_http_date(now);
        assert!(formatted.ends_with("GMT"));
        assert!(check_not_modified(Some(&formatted), now));
    }

    #[test]
    fn test_modified_after_client_timestamp() {
        let earlier = SystemTime::now() - Duration::from_secs(3600);
        let header = format_http_date(earlier);
        // File changed an hour after the client's copy: must refetch
        assert!(!check_not_modified(Some(&header), SystemTime::now()));
    }

    #[test]
    fn test_garbage_header_fails_open() {
        assert!(!check_not_modified(Some("not a date"), SystemTime::now()));
        assert!(!check_not_modified(None, SystemTime::now()));
    }
}
