//! Data types shared by loading, resolution and reporting.
//!
//! - `message`: located string leaves (`MessageLocation`, `MessageContext`)
//! - `resource`: resource trees and the collection of all loaded trees

mod message;
mod resource;

pub use message::*;
pub use resource::*;
