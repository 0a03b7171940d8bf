//! Web HTTP server module.
//!
//! Thin request handlers that translate HTTP requests into task store
//! calls and render a page, a redirect, or the health payload.

mod server;
pub mod templates;

pub use server::{WebServer, build_router, start_server};
