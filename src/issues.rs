//! Issue types produced by a check run.
//!
//! Each issue is self-contained with everything the reporter needs to print
//! it; fixes travel separately through the rule results.

use enum_dispatch::enum_dispatch;

use crate::core::SourceContext;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    UnwrappedString,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::UnwrappedString => write!(f, "unwrapped-string"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// String literal with target-script text that is not routed through the
/// wrapping function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrappedStringIssue {
    pub context: SourceContext,
    /// Reported text: trimmed, flattened, outer quotes stripped.
    pub text: String,
    /// Wrapping function named in the message.
    pub wrapper_function: String,
    /// What the literal would be rewritten to, if a rewrite is possible.
    pub suggestion: Option<String>,
}

impl UnwrappedStringIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnwrappedString
    }

    pub fn describe(&self) -> String {
        format!(
            "The string `{}` is not wrapped in {} call",
            self.text, self.wrapper_function
        )
    }
}

/// Source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnwrappedString(UnwrappedStringIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::UnwrappedString(_) => UnwrappedStringIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::UnwrappedString(_) => UnwrappedStringIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::File { path } => path,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::File { .. } => 0,
        }
    }

    pub fn col(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::File { .. } => 0,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional suggestion for the "= help:" line.
    fn help(&self) -> Option<String> {
        None
    }
}

impl Report for UnwrappedStringIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.describe())
    }

    fn help(&self) -> Option<String> {
        self.suggestion
            .as_ref()
            .map(|s| format!("replace with `{}`", s))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let a = self.location();
        let b = other.location();
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| a.col().cmp(&b.col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::SourceLocation;
    use crate::issues::*;

    fn unwrapped(path: &str, line: usize, col: usize, text: &str) -> Issue {
        Issue::UnwrappedString(UnwrappedStringIssue {
            context: SourceContext::new(SourceLocation::new(path, line, col), "src line"),
            text: text.to_string(),
            wrapper_function: "i18n".to_string(),
            suggestion: None,
        })
    }

    #[test]
    fn test_unwrapped_string_issue() {
        let issue = UnwrappedStringIssue {
            context: SourceContext::new(
                SourceLocation::new("./src/app.tsx", 3, 11),
                "const a = 'строка';",
            ),
            text: "строка".to_string(),
            wrapper_function: "i18n".to_string(),
            suggestion: Some("i18n('строка')".to_string()),
        };

        assert_eq!(UnwrappedStringIssue::severity(), Severity::Error);
        assert_eq!(
            issue.details().as_deref(),
            Some("The string `строка` is not wrapped in i18n call")
        );
        assert_eq!(
            issue.help().as_deref(),
            Some("replace with `i18n('строка')`")
        );
    }

    #[test]
    fn test_parse_error_issue() {
        let issue = ParseErrorIssue {
            file_path: "./src/broken.tsx".to_string(),
            error: "Unexpected token".to_string(),
        };

        assert_eq!(ParseErrorIssue::severity(), Severity::Error);
        assert_eq!(ParseErrorIssue::rule(), Rule::ParseError);
        assert_eq!(issue.location().file_path(), "./src/broken.tsx");
        assert!(issue.details().is_none());
    }

    #[test]
    fn test_issue_sorting() {
        let mut issues = vec![
            unwrapped("./src/b.tsx", 1, 1, "б"),
            unwrapped("./src/a.tsx", 10, 2, "в"),
            unwrapped("./src/a.tsx", 2, 5, "г"),
            unwrapped("./src/a.tsx", 2, 1, "д"),
        ];
        issues.sort();
        let order: Vec<String> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(order, vec!["д", "г", "в", "б"]);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::UnwrappedString.to_string(), "unwrapped-string");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
