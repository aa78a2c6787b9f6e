//!
//! # Liberty21 Cell-Library to JSON Projection
//!
//! Reads Liberty-format (`.lib`) cell libraries and projects them into JSON documents.
//!
//! Each group projects to a single-key object, keyed by its group-type name,
//! holding its arguments (`names`), attributes, merged `define`s, and sub-`groups`.
//! The root library's fields are placed directly at the document's top level.
//!
//! ```
//! let libs = liberty21::parse_str("library (mylib) { delay_model : table_lookup ; }")?;
//! let json = libs[0].to_json()?;
//! assert_eq!(json["names"][0], "mylib");
//! assert_eq!(json["delay_model"], "table_lookup");
//! # Ok::<(), liberty21::LibertyError>(())
//! ```
//!

// Std-Lib
use std::path::Path;

// Crates.io
use serde_json::Value;

// Internal modules & re-exports
pub use liberty21utils as utils;

pub mod classify;
pub mod coerce;
pub mod data;
pub mod defines;
pub mod error;
pub mod project;
pub mod read;
#[cfg(test)]
mod tests;

pub use data::*;
pub use error::*;
pub use project::{project_group, project_into, to_json, ProjectOptions};
pub use read::{parse_file, parse_file_with, parse_str, parse_str_with};

/// Parse Liberty content `src` and project each of its libraries to JSON
pub fn convert_str(src: &str, opts: &ProjectOptions) -> LibertyResult<Vec<Value>> {
    parse_str_with(src, opts)?
        .iter()
        .map(|lib| to_json(lib, opts))
        .collect()
}
/// Parse Liberty file `fname` and project each of its libraries to JSON
pub fn convert_file(fname: impl AsRef<Path>, opts: &ProjectOptions) -> LibertyResult<Vec<Value>> {
    parse_file_with(fname, opts)?
        .iter()
        .map(|lib| to_json(lib, opts))
        .collect()
}
