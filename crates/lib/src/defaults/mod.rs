//! Default-values handling.
//!
//! - `entries`: the `[section:]key=value` command-line grammar
//! - `file`: the device's INI-style `.defaultvalues` file
//! - `compare`: comparison documents that drive restoring the file

pub mod compare;
pub mod entries;
pub mod file;
