//! HTTP utility modules
//!
//! Response builders, MIME type detection, and conditional request handling.

pub mod cache;
pub mod mime;
pub mod response;

pub use response::{
    build_304_response, build_404_response, build_405_post_response, build_redirect_response,
    build_text_response,
};
