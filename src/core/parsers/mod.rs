//! Parsers for resource files and the key reference syntax.
//!
//! - `json`: strings file parser (flattens leaves with their locations)
//! - `reference`: `[%key:...%]` recognition and key paths

pub mod json;
pub mod reference;
