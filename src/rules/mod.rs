//! Checks run by `keyref check`.
//!
//! Each rule exposes a pure function over the trees it needs plus a
//! `check_*_issues` wrapper taking the loaded context.
//!
//! ## Module Structure
//!
//! - `references`: every string leaf resolves
//! - `structure`: component trees follow the strings file layout

pub mod references;
pub mod structure;

pub use references::check_reference_issues;
pub use structure::check_structure_issues;
