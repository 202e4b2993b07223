//! Request handling modules
//!
//! Routing, the snippet placeholder handlers, and the static file server.

pub mod router;
pub mod snippets;
pub mod static_files;

pub use router::handle_request;
