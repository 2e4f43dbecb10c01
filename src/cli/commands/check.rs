use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    core::CheckContext,
    issues::Issue,
    rules::{check_reference_issues, check_structure_issues},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;
    let trees = ctx.selected_trees(&cmd.components)?;

    let mut all_issues: Vec<Issue> = Vec::new();
    all_issues.extend(check_reference_issues(&ctx, &trees));
    all_issues.extend(check_structure_issues(&trees));

    let parse_errors = ctx.parse_errors();
    all_issues.extend(parse_errors.iter().map(|i| Issue::ParseError(i.clone())));

    let files_checked = if cmd.components.is_empty() {
        ctx.files_scanned
    } else {
        trees.len()
    };

    Ok(finish(
        CommandSummary::Check,
        all_issues,
        files_checked,
        parse_errors.len(),
    ))
}
