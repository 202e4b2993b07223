//! Static file serving module
//!
//! Resolves request paths inside the configured static directory after
//! stripping the route prefix, with MIME detection and conditional request
//! support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// A file loaded from the static directory
struct StaticFile {
    content: Vec<u8>,
    content_type: &'static str,
    modified: Option<SystemTime>,
}

/// Serve a request from the static directory
pub async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &str,
    route_prefix: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match load_from_directory(dir, ctx.path, route_prefix, index_files).await {
        Some(file) => build_static_file_response(ctx, &file),
        None => http::build_404_response(),
    }
}

/// Resolve and read a file beneath `static_dir`
///
/// Strips `route_prefix` from the request path, resolves directory requests
/// to the first existing index file, and refuses any path that escapes the
/// static directory after canonicalization.
async fn load_from_directory(
    static_dir: &str,
    path: &str,
    route_prefix: &str,
    index_files: &[String],
) -> Option<StaticFile> {
    let mut file_path = resolve_path(static_dir, path, route_prefix);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Directory requests fall back to index files
    if file_path.is_dir() {
        file_path = index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())?;
    }

    // File not found is an ordinary 404, not worth a warning
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path_canonical.display(),
                e
            ));
            return None;
        }
    };

    let modified = fs::metadata(&file_path_canonical)
        .await
        .ok()
        .and_then(|m| m.modified().ok());

    let content_type = mime::get_content_type(
        file_path_canonical
            .extension()
            .and_then(|e| e.to_str()),
    );

    Some(StaticFile {
        content,
        content_type,
        modified,
    })
}

/// Map a request path to a filesystem path under the static directory
fn resolve_path(static_dir: &str, path: &str, route_prefix: &str) -> PathBuf {
    // Remove leading slash and flatten any ".." segments early
    let clean_path = path.trim_start_matches('/').replace("..", "");

    let prefix_clean = route_prefix.trim_matches('/');
    let relative_path = if prefix_clean.is_empty() {
        clean_path.as_str()
    } else {
        clean_path
            .strip_prefix(&format!("{prefix_clean}/"))
            .unwrap_or(&clean_path)
    };

    Path::new(static_dir).join(relative_path)
}

/// Build the final response, honoring conditional request headers
fn build_static_file_response(
    ctx: &RequestContext<'_>,
    file: &StaticFile,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&file.content);

    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag) {
        return http::build_304_response(&etag);
    }
    if let Some(mtime) = file.modified {
        // If-Modified-Since only applies when the client sent no ETag
        if ctx.if_none_match.is_none()
            && cache::check_not_modified(ctx.if_modified_since.as_deref(), mtime)
        {
            return http::build_304_response(&etag);
        }
    }

    let last_modified = file.modified.map(cache::format_http_date);

    http::response::build_file_response(
        Bytes::from(file.content.clone()),
        file.content_type,
        &etag,
        last_modified.as_deref(),
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Method;
    use std::io::Write;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            method: &Method::GET,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
        }
    }

    fn write_file(dir: &Path, name: &str, contents: &[u8]) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents).unwrap();
    }

    #[tokio::test]
    async fn test_serves_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "app.css", b"body { margin: 0 }");
        let dir = tmp.path().to_str().unwrap();

        let resp = serve_directory(&ctx("/static/app.css"), dir, "/static", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert!(resp.headers().contains_key("ETag"));
        assert!(resp.headers().contains_key("Last-Modified"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();

        let resp = serve_directory(&ctx("/static/nope.js"), dir, "/static", &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        let tmp = tempfile::tempdir().unwrap();
        let public = tmp.path().join("public");
        std::fs::create_dir(&public).unwrap();
        write_file(tmp.path(), "secret.txt", b"do not serve");
        let dir = public.to_str().unwrap();

        let resp =
            serve_directory(&ctx("/static/../secret.txt"), dir, "/static", &[]).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_directory_resolves_index_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "index.html", b"<h1>hi</h1>");
        let dir = tmp.path().to_str().unwrap();
        let index = vec!["index.html".to_string()];

        let resp = serve_directory(&ctx("/static/"), dir, "/static", &index).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_etag_revalidation_returns_304() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "app.js", b"console.log(1)");
        let dir = tmp.path().to_str().unwrap();

        let first = serve_directory(&ctx("/static/app.js"), dir, "/static", &[]).await;
        let etag = first.headers().get("ETag").unwrap().to_str().unwrap().to_string();

        let revalidate = RequestContext {
            path: "/static/app.js",
            method: &Method::GET,
            is_head: false,
            if_none_match: Some(etag),
            if_modified_since: None,
        };
        let resp = serve_directory(&revalidate, dir, "/static", &[]).await;
        assert_eq!(resp.status(), 304);
    }

    #[tokio::test]
    async fn test_head_gets_empty_body() {
        use http_body_util::BodyExt;

        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "a.txt", b"payload");
        let dir = tmp.path().to_str().unwrap();

        let head = RequestContext {
            path: "/static/a.txt",
            method: &Method::HEAD,
            is_head: true,
            if_none_match: None,
            if_modified_since: None,
        };
        let resp = serve_directory(&head, dir, "/static", &[]).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "7");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
