//! Key reference validation rule.
//!
//! Resolves every string leaf of the checked trees and turns each failure
//! into an issue located at the leaf:
//! - `malformed-reference`: `[%key:` that is not a well-formed reference
//! - `unresolved-reference`: missing key, unknown component, section target
//! - `cyclic-reference`: cycles and chains longer than `maxDepth`

use crate::{
    core::{CheckContext, ResourceTree, Resolver},
    issues::Issue,
};

pub fn check_reference_issues(ctx: &CheckContext, trees: &[&ResourceTree]) -> Vec<Issue> {
    check_references(&ctx.resolver(), trees.iter().copied())
}

/// Resolve every string leaf of `trees`, collecting one issue per failing leaf.
///
/// A leaf that is fine on its own but references a broken leaf is reported
/// too, so every place a user would see a broken label is listed.
pub fn check_references<'a>(
    resolver: &Resolver<'_>,
    trees: impl IntoIterator<Item = &'a ResourceTree>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for tree in trees {
        for entry in &tree.entries {
            if let Err(error) = resolver.resolve_entry(tree, entry) {
                issues.push(Issue::from_resolution(entry.clone(), error));
            }
        }
    }

    issues
}
