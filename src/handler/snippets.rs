//! Snippet route handlers
//!
//! Placeholder handlers for the three snippet routes. Each is a stateless
//! string write; there is no snippet storage or templating yet.

use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

/// Home page handler
///
/// Receives every path no other route claimed, so it must check for the
/// literal root itself; anything else is a 404.
pub fn home(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    if ctx.path != "/" {
        return http::build_404_response();
    }

    http::build_text_response("Hello from Snippetbox", ctx.is_head)
}

/// Show a specific snippet (placeholder, no id parsing yet)
pub fn show_snippet(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    http::build_text_response("Display a specific snippet...", ctx.is_head)
}

/// Create a new snippet (placeholder)
///
/// POST only; any other method gets 405 with an `Allow: POST` header.
pub fn create_snippet(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    if *ctx.method != Method::POST {
        logger::log_warning(&format!(
            "Method not allowed on {}: {}",
            ctx.path, ctx.method
        ));
        return http::build_405_post_response();
    }

    http::build_text_response("Create a new snippet...", false)
}
