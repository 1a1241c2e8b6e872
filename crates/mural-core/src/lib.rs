//! Mural Core - Foundational types for the Mural pipeline
//!
//! This crate provides the types that all other Mural crates depend on:
//! - `MuralError` and the `Result` alias
//! - `ContentHash` - SHA-256 based content hashing

mod error;
mod hash;

pub use error::{MuralError, Result};
pub use hash::ContentHash;
