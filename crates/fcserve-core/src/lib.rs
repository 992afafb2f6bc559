//! # fcserve-core
//!
//! Core crate for fcserve. Contains the configuration schema and the
//! unified error system shared by the engine pipeline and the HTTP layer.
//!
//! This crate has **no** internal dependencies on other fcserve crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::AppConfig;
pub use error::{AppError, ErrorKind};
pub use result::AppResult;
