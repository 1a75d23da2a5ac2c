//! AWS-oriented adapters and handlers for the mirror delete worker.
//!
//! This crate owns runtime integration details (the Lambda handler, SQS
//! envelope decoding, and storage adapters) and exposes a single runtime
//! module boundary for the event contract and disposition primitives.
//! See `crates/mirror_delete_lambda/README.md` for ownership boundaries.

pub mod adapters;
pub mod handlers;
pub mod runtime;
