//! Core engine: loading resource trees and resolving key references.
//!
//! ## Module Structure
//!
//! - `data`: resource trees, the collection of all trees, located string leaves
//! - `parsers`: strings file parser and key reference syntax
//! - `scanner`: resource file discovery by path convention
//! - `resolve`: the key reference resolver
//! - `context`: `CheckContext`, the loaded state commands run against

pub mod context;
pub mod data;
pub mod parsers;
pub mod resolve;
pub mod scanner;

pub use context::CheckContext;
pub use data::*;
pub use resolve::{ResolutionError, Resolver};
