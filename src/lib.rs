//! Trimmer: translations and templates served as JavaScript.
//!
//! A middleware that answers `/trimmer` requests with JavaScript payloads
//! (locale-merged translations, a pre-rendered template tree, or both) and
//! forwards every other request to the wrapped application untouched.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ http::server (trace, request ID, timeout)
//!                        │
//!                        ▼
//!                  http::middleware::Trimmer ──── routing (classify path)
//!                        │            │
//!             not ours   │            │ /trimmer/...
//!                        ▼            ▼
//!               downstream app   i18n (locale, keys, resolver, catalog)
//!                                templates (engine, compiler, cache)
//!                                     │
//!                                     ▼
//!                              http::response (text/javascript)
//! ```

// Core subsystems
pub mod config;
pub mod error;
pub mod http;
pub mod routing;

// Payload generation
pub mod i18n;
pub mod templates;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use error::{TrimmerError, TrimmerResult};
pub use http::{HttpServer, Trimmer};
pub use lifecycle::Shutdown;
