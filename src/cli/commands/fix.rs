//! Fix command - wrap unwrapped strings in the translation call.
//!
//! Every flagged literal that can be rewritten is replaced with a call to the
//! wrapping function; files without an import of it get one inserted.
//!
//! Use `--apply` to actually write the files (default is dry-run mode, which
//! previews the changed lines).

use std::{
    fs,
    io::{self, Write},
    time::Instant,
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{args::FixCommand, exit_status::ExitStatus, report};
use crate::{
    core::{CheckContext, Fix, FixOutcome, SourceAnalysis, TextEdit, TextRange, apply_fixes},
    utils::LineIndex,
};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let start = Instant::now();
    let args = &cmd.args;
    let ctx = CheckContext::new(&args.common)?;
    let apply = args.apply;

    let analysis = ctx.analyze(true);

    let mut string_count = 0;
    let mut file_count = 0;
    let mut skipped_count = 0;

    for file in &analysis.files {
        let Some(outcome) = fix_file(file) else {
            continue;
        };
        skipped_count += outcome.skipped;

        let rewritten = rewritten_strings(&outcome);
        if outcome.edits.is_empty() {
            continue;
        }

        if apply {
            fs::write(&file.file_path, &outcome.text)
                .with_context(|| format!("Failed to write file: {}", file.file_path))?;
            if ctx.verbose {
                eprintln!("Note: rewrote {}", file.file_path);
            }
        } else {
            preview_to(file, &outcome.edits, &mut io::stdout().lock());
        }

        string_count += rewritten;
        file_count += 1;
    }

    if file_count == 0 {
        report::print_success(ctx.files.len());
    } else if apply {
        println!(
            "{} {} string(s) in {} file(s).",
            "Rewrote".green().bold(),
            string_count,
            file_count
        );
    } else {
        println!(
            "{} {} string(s) in {} file(s).",
            "Would rewrite".yellow().bold(),
            string_count,
            file_count
        );
        println!("Run with {} to rewrite these files.", "--apply".cyan());
    }

    if skipped_count > 0 {
        println!(
            "Note: {} string(s) overlap another rewrite; run fix again to handle them.",
            skipped_count
        );
    }

    let parse_error_count = analysis.parse_errors.len();
    report::print_parse_warning(parse_error_count, ctx.verbose);
    report::print_timing(start);

    // In dry-run mode, pending rewrites are "Failure" (exit 1)
    // to signal that there's work to be done
    if parse_error_count > 0 {
        Ok(ExitStatus::Error)
    } else if file_count > 0 && !apply {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// Apply every fix of one file to its original text.
fn fix_file(file: &SourceAnalysis) -> Option<FixOutcome> {
    let fixes: Vec<&Fix> = file.strings.iter().filter_map(|s| s.fix.as_ref()).collect();
    if fixes.is_empty() {
        return None;
    }
    Some(apply_fixes(&file.source, fixes))
}

/// Replacements, as opposed to the import insertion.
fn rewritten_strings(outcome: &FixOutcome) -> usize {
    outcome
        .edits
        .iter()
        .filter(|edit| !edit.range.is_empty())
        .count()
}

/// Lines touched by one or more edits, before and after.
#[derive(Debug, PartialEq, Eq)]
struct Hunk {
    /// 1-based line of the first old line.
    line: usize,
    col: usize,
    old_lines: Vec<String>,
    new_lines: Vec<String>,
}

/// Group `edits` (sorted, non-overlapping) into hunks of whole lines.
fn hunks(source: &str, edits: &[TextEdit]) -> Vec<Hunk> {
    let index = LineIndex::new(source);

    // (first line, last line, edits) with 0-based lines
    let mut groups: Vec<(usize, usize, Vec<&TextEdit>)> = Vec::new();
    for edit in edits {
        let first = index.line_of(edit.range.start);
        let last = index.line_of(edit.range.end.saturating_sub(1).max(edit.range.start));
        match groups.last_mut() {
            Some((_, group_last, group)) if first <= *group_last => {
                *group_last = (*group_last).max(last);
                group.push(edit);
            }
            _ => groups.push((first, last, vec![edit])),
        }
    }

    groups
        .into_iter()
        .map(|(first, last, group)| {
            let (line, col) = index.position(source, group[0].range.start);
            let offset = index.line_start(first);
            let old = &source[offset..index.line_end(source, last)];

            let shifted = Fix {
                edits: group
                    .iter()
                    .map(|edit| {
                        TextEdit::replace(
                            TextRange::new(edit.range.start - offset, edit.range.end - offset),
                            edit.replacement.clone(),
                        )
                    })
                    .collect(),
            };
            let new = apply_fixes(old, [&shifted]).text;

            Hunk {
                line,
                col,
                old_lines: split_lines(old),
                new_lines: split_lines(&new),
            }
        })
        .collect()
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

fn preview_to<W: Write>(file: &SourceAnalysis, edits: &[TextEdit], writer: &mut W) {
    for hunk in hunks(&file.source, edits) {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            file.file_path,
            hunk.line,
            hunk.col
        );
        let _ = writeln!(writer, "     {}", "|".blue());
        for (i, old) in hunk.old_lines.iter().enumerate() {
            let _ = writeln!(
                writer,
                " {:>3} {} {}",
                (hunk.line + i).to_string().blue(),
                "-".red().bold(),
                old.red()
            );
        }
        for new in &hunk.new_lines {
            let _ = writeln!(writer, "     {} {}", "+".green().bold(), new.green());
        }
        let _ = writeln!(writer);
    }
}
