//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID)
//!     → middleware/trimmer.rs (classify path)
//!         → trimmer route: generate payload → response.rs (text/javascript)
//!         → anything else: downstream application, untouched
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::Trimmer;
pub use request::X_REQUEST_ID;
pub use server::{downstream_app, HttpServer};
