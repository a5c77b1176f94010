//! Core types and trait definitions for the jobwatch alert engine.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod alert;
pub mod company;
pub mod error;
pub mod store;
pub mod subscription;
pub mod user;

pub use error::{Error, Result};
