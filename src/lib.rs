//! keyref - translation key reference resolver for strings.json resource trees
//!
//! Integration strings files reuse labels through key references such as
//! `[%key:component::group::config::step::user::title%]`. keyref loads the
//! core and component strings files under a resource root, resolves those
//! references (transitively, with cycle detection) and reports the ones
//! that are malformed, dangling or cyclic.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Resource trees, loading and the key reference resolver
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checks run against loaded resource trees

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
