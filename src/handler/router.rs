//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: builds the request context,
//! selects a handler by path, and emits the access log line.
//!
//! The route table is fixed: `/snippet` and `/snippet/create` match exactly,
//! the static prefix matches by prefix, and everything else lands on the home
//! handler. The home handler replicates catch-all root semantics by rejecting
//! any path other than the literal `/` with 404, so `/snippet/` or
//! `/snippet/create/extra` do not silently match their shorter patterns.

use crate::config::AppState;
use crate::handler::{snippets, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub method: &'a Method,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type because no handler reads the request body.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();

    let ctx = RequestContext {
        path,
        method,
        is_head: *method == Method::HEAD,
        if_none_match: header_string(&req, "if-none-match"),
        if_modified_since: header_string(&req, "if-modified-since"),
    };

    let mut response = route_request(&ctx, &state).await;

    if let Ok(server) = hyper::header::HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(hyper::header::SERVER, server);
    }

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            remote_addr.ip().to_string(),
            method.to_string(),
            path.to_string(),
        );
        entry.http_version = version_str(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        entry.referer = header_string(&req, "referer");
        entry.user_agent = header_string(&req, "user-agent");
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path
pub async fn route_request(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let statics = &state.config.static_files;
    let prefix = statics.url_prefix.trim_end_matches('/');

    // Bare prefix redirects to the slashed form, like the original mux
    if ctx.path == prefix {
        return http::build_redirect_response(&format!("{prefix}/"));
    }

    if ctx.path.starts_with(&format!("{prefix}/")) {
        return static_files::serve_directory(ctx, &statics.dir, prefix, &statics.index_files)
            .await;
    }

    match ctx.path {
        "/snippet" => snippets::show_snippet(ctx),
        "/snippet/create" => snippets::create_snippet(ctx),
        // The root registration is a catch-all; home() rejects non-root paths
        _ => snippets::home(ctx),
    }
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
