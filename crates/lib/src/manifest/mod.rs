//! Patch manifest types and on-disk storage.
//!
//! A manifest is an ordered list of operations plus a version tag. The order
//! of `operations` is the order the device applies them in.

pub mod store;

mod types;

pub use types::*;
