//! Text edits and atomic fix application.

use crate::core::syntax::TextRange;

/// Replace `range` of the original text with `replacement`.
/// An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: TextRange,
    pub replacement: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(at), text)
    }
}

/// Edits that must be applied together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fix {
    pub edits: Vec<TextEdit>,
}

impl Fix {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub text: String,
    /// Accepted edits sorted by position in the original text.
    pub edits: Vec<TextEdit>,
    /// Number of fixes whose edits were applied.
    pub applied: usize,
    /// Number of fixes dropped because they conflicted with an earlier fix.
    pub skipped: usize,
}

/// Apply `fixes` to `source`, all relative to the original text.
///
/// Fixes are accepted in order; a fix with any edit overlapping an already
/// accepted edit (or falling outside the text) is dropped as a whole.
pub fn apply_fixes<'a>(source: &str, fixes: impl IntoIterator<Item = &'a Fix>) -> FixOutcome {
    let mut accepted: Vec<&TextEdit> = Vec::new();
    let mut applied = 0;
    let mut skipped = 0;

    for fix in fixes {
        if fix.is_empty() {
            continue;
        }
        let valid = fix.edits.iter().enumerate().all(|(i, edit)| {
            source.get(edit.range.as_range()).is_some()
                && !accepted.iter().any(|a| a.range.overlaps(&edit.range))
                && !fix.edits[..i].iter().any(|e| e.range.overlaps(&edit.range))
        });
        if valid {
            accepted.extend(fix.edits.iter());
            applied += 1;
        } else {
            skipped += 1;
        }
    }

    // Insertions sort before replacements starting at the same offset.
    accepted.sort_by_key(|edit| (edit.range.start, edit.range.end));

    let mut text = source.to_string();
    for edit in accepted.iter().rev() {
        text.replace_range(edit.range.as_range(), &edit.replacement);
    }

    FixOutcome {
        text,
        edits: accepted.into_iter().cloned().collect(),
        applied,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fix(edits: Vec<TextEdit>) -> Fix {
        Fix { edits }
    }

    #[test]
    fn test_apply_replacement_and_insertion() {
        let source = "const a = 'x';";
        let fixes = [fix(vec![
            TextEdit::insert(0, "import { i18n } from './i18n';\n\n"),
            TextEdit::replace(TextRange::new(10, 13), "i18n('x')"),
        ])];
        let outcome = apply_fixes(source, &fixes);
        assert_eq!(
            outcome.text,
            "import { i18n } from './i18n';\n\nconst a = i18n('x');"
        );
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_insertion_at_replacement_start_goes_first() {
        let source = "ab";
        let fixes = [
            fix(vec![TextEdit::replace(TextRange::new(0, 1), "X")]),
            fix(vec![TextEdit::insert(0, ">")]),
        ];
        let outcome = apply_fixes(source, &fixes);
        assert_eq!(outcome.text, ">Xb");
        assert_eq!(outcome.applied, 2);
    }

    #[test]
    fn test_overlapping_fix_is_dropped_atomically() {
        let source = "0123456789";
        let fixes = [
            fix(vec![TextEdit::replace(TextRange::new(2, 5), "A")]),
            fix(vec![
                TextEdit::insert(0, "!"),
                TextEdit::replace(TextRange::new(4, 6), "B"),
            ]),
        ];
        let outcome = apply_fixes(source, &fixes);
        assert_eq!(outcome.text, "01A56789");
        assert_eq!(outcome.edits, vec![TextEdit::replace(TextRange::new(2, 5), "A")]);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_out_of_bounds_fix_is_dropped() {
        let outcome = apply_fixes("abc", &[fix(vec![TextEdit::replace(TextRange::new(2, 9), "z")])]);
        assert_eq!(outcome.text, "abc");
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_empty_fixes_are_ignored() {
        let outcome = apply_fixes("abc", &[Fix::default()]);
        assert_eq!(outcome.text, "abc");
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 0);
    }
}
