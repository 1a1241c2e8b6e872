//! Mural Asset - reconciliation of staged files into the canonical store
//!
//! Matches staged filenames back to logical identifiers and promotes them
//! into a canonical per-identifier layout by copy.

pub mod matcher;
pub mod reconcile;

pub use matcher::{MatchStrategy, PrefixMatcher};
pub use reconcile::{reconcile, ReconcileReport};
