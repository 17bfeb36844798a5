use std::time::Instant;

use anyhow::Result;

use super::super::{args::CheckCommand, exit_status::ExitStatus, report};
use crate::{core::CheckContext, issues::Issue, rules::unwrapped::check_unwrapped_string_issues};

pub fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let start = Instant::now();
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;

    // Fixes are computed only to suggest the replacement text.
    let analysis = ctx.analyze(true);

    let mut issues: Vec<Issue> =
        check_unwrapped_string_issues(&analysis, &ctx.options.wrapper_function)
            .into_iter()
            .map(Issue::UnwrappedString)
            .collect();
    let parse_error_count = analysis.parse_errors.len();
    issues.extend(analysis.parse_errors.into_iter().map(Issue::ParseError));

    if issues.is_empty() {
        report::print_success(ctx.files.len());
    } else {
        report::report(&issues);
    }
    report::print_timing(start);

    if parse_error_count > 0 {
        Ok(ExitStatus::Error)
    } else if !issues.is_empty() {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}
