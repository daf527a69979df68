//! fwpatch-lib: Core types and logic for the firmware patch manifest creator
//!
//! This crate provides the building blocks the `fwpatch` CLI is assembled
//! from:
//! - `manifest`: the patch manifest data model and on-disk storage
//! - `builder`: forward and restore operation list construction
//! - `paths`: target path validation against the firmware allow-list
//! - `checksum`: content digests for staged source files
//! - `defaults`: default-values entry parsing, comparison, and restore
//! - `config`: injectable device path configuration
//!
//! Everything here is synchronous, single-threaded, blocking I/O. Concurrent
//! invocations against the same manifest path are unsupported and may race.

pub mod builder;
pub mod checksum;
pub mod config;
pub mod defaults;
pub mod manifest;
pub mod paths;
