//! Preview server for a published hubsite.
//!
//! Serves the publish root under a fixed base path, with a directory
//! traversal guard and a fixed content type table.

pub mod mime;
pub mod resolve;
pub mod server;

pub use mime::content_type;
pub use resolve::{resolve_request_path, Resolution};
pub use server::{router, PreviewConfig, PreviewServer, ServerError};
