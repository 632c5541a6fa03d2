//! Shared foundation for the hepplot histogram crates
//!
//! This crate provides the unified error type used across the hepplot
//! ecosystem. Everything else lives in the domain crates; keeping the error
//! type here lets capability implementors depend on a single small crate.

pub mod error;

pub use error::{Error, Result};
