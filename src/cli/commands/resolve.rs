use anyhow::Result;

use super::super::args::ResolveCommand;
use super::{CommandResult, CommandSummary, ResolveSummary, helper::finish};
use crate::core::CheckContext;

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;
    let resolver = ctx.resolver();

    let outcome = if cmd.key {
        resolver.resolve_key(&cmd.value)
    } else {
        resolver.resolve(&cmd.value)
    };

    Ok(finish(
        CommandSummary::Resolve(ResolveSummary {
            input: cmd.value,
            outcome,
        }),
        Vec::new(),
        ctx.collection.len(),
        ctx.parse_errors().len(),
    ))
}
