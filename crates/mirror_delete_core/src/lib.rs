//! Shared mirror-delete domain primitives.
//!
//! This crate owns the source-bucket event contract and the per-message
//! disposition model. It intentionally excludes AWS SDK and Lambda runtime
//! concerns. See `crates/mirror_delete_core/README.md` for ownership
//! boundaries.

pub mod contract;
pub mod disposition;
