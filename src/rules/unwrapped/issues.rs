//! Conversion of rule results into reportable issues.

use crate::{
    core::{Analysis, SourceAnalysis, SourceContext},
    issues::UnwrappedStringIssue,
    utils::LineIndex,
};

/// Turn every result of the analysis pass into an issue, in path order.
pub fn check_unwrapped_string_issues(
    analysis: &Analysis,
    wrapper_function: &str,
) -> Vec<UnwrappedStringIssue> {
    analysis
        .files
        .iter()
        .flat_map(|file| file_issues(file, wrapper_function))
        .collect()
}

fn file_issues(file: &SourceAnalysis, wrapper_function: &str) -> Vec<UnwrappedStringIssue> {
    let index = LineIndex::new(&file.source);
    file.strings
        .iter()
        .map(|string| UnwrappedStringIssue {
            context: SourceContext::at(&file.file_path, &file.source, &index, string.range),
            text: string.text.clone(),
            wrapper_function: wrapper_function.to_string(),
            suggestion: string.fix.as_ref().and_then(|fix| {
                fix.edits
                    .iter()
                    .find(|edit| !edit.range.is_empty())
                    .map(|edit| edit.replacement.clone())
            }),
        })
        .collect()
}
