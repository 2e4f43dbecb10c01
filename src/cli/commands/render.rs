use std::fs;

use anyhow::{Context, Result};

use super::super::args::RenderCommand;
use super::{CommandResult, CommandSummary, RenderSummary, helper::finish};
use crate::{core::CheckContext, rules::references::check_references};

/// Render one component tree with every reference resolved.
///
/// Broken references are reported like `check` does and nothing is rendered,
/// so a partially resolved file is never written.
pub fn render(cmd: RenderCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;
    let tree = ctx.component_tree(&cmd.component)?;
    let resolver = ctx.resolver();

    let issues = check_references(&resolver, [tree]);

    let rendered = if issues.is_empty() {
        let value = resolver.render(tree)?;
        Some(serde_json::to_string_pretty(&value)?)
    } else {
        None
    };

    if let (Some(rendered), Some(output)) = (&rendered, &cmd.output) {
        fs::write(output, format!("{}\n", rendered))
            .with_context(|| format!("Failed to write rendered strings: {:?}", output))?;
    }

    Ok(finish(
        CommandSummary::Render(RenderSummary {
            component: cmd.component,
            rendered,
            output: cmd.output,
        }),
        issues,
        1,
        ctx.parse_errors().len(),
    ))
}
