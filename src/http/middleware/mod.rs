//! HTTP middleware.

pub mod trimmer;

pub use trimmer::{trimmer_middleware, Trimmer};
