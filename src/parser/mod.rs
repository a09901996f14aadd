//! Parsing: manifest deserialization and source scanning

pub mod javascript;
pub mod manifest;

pub use javascript::{RegexScanner, SourceScanner};
pub use manifest::{parse_manifest, parse_manifest_from_file, parse_manifest_from_str};
