//! Runtime module boundary over the pure domain crate.

pub use mirror_delete_core::contract;
pub use mirror_delete_core::disposition;
