//! Snippetbox - a minimal web application skeleton
//!
//! Three placeholder snippet routes plus a static asset server, built on
//! Tokio and Hyper. The route table is fixed in code and immutable for the
//! process lifetime; only addresses, paths, and logging come from
//! configuration.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
