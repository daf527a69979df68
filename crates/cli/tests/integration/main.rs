//! CLI integration tests for fwpatch.

mod common;
mod defaults_tests;
