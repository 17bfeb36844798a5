//! Unwrapped string detection rule.
//!
//! Flags string literals, JSX text and template segments that contain text in
//! the target script (Cyrillic by default) and are not already passed to a
//! wrapping function imported from the translation module. When fixes are
//! requested, each flagged literal also gets the edits that wrap it, plus a
//! one-time import of the wrapping function if the file has none yet.

mod issues;
mod wrapper;


use regex::Regex;

pub use issues::check_unwrapped_string_issues;
pub use wrapper::{LiteralContext, WrapperTemplate, flatten_lines, strip_outer_quotes};

use crate::core::{
    Fix, ImportNameTable, NodeId, NodeKind, SyntaxTree, TextEdit, TextRange, resolve_imports,
};

pub const DEFAULT_WRAPPER_FUNCTION: &str = "i18n";
pub const DEFAULT_TRANSLATION_MODULE: &str = "./i18n";
pub const DEFAULT_TRANSLATION_MODULE_PATTERN: &str = r"(^|[/.])i18n(\.[cm]?[jt]sx?)?$";
pub const DEFAULT_TARGET_SCRIPT: &str = r"[\x{0400}-\x{04FF}]";

/// Compiled rule settings.
#[derive(Debug, Clone)]
pub struct RuleOptions {
    /// Matches import paths that point at the translation module.
    pub translation_module_pattern: Regex,
    /// Name bound by inserted imports and used in synthesized calls.
    pub wrapper_function: String,
    /// Module path used by inserted imports.
    pub translation_module: String,
    /// A literal is a candidate when its raw text matches this.
    pub target_script: Regex,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            translation_module_pattern: Regex::new(DEFAULT_TRANSLATION_MODULE_PATTERN)
                .expect("default translation module pattern is valid"),
            wrapper_function: DEFAULT_WRAPPER_FUNCTION.to_string(),
            translation_module: DEFAULT_TRANSLATION_MODULE.to_string(),
            target_script: Regex::new(DEFAULT_TARGET_SCRIPT)
                .expect("default target script pattern is valid"),
        }
    }
}

impl RuleOptions {
    pub fn import_statement(&self) -> String {
        format!(
            "import {{ {} }} from '{}';",
            self.wrapper_function, self.translation_module
        )
    }
}

/// A literal that should be routed through the wrapping function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrappedString {
    pub node: NodeId,
    /// Range of the trimmed literal text.
    pub range: TextRange,
    /// Trimmed value with outer quotes stripped.
    pub text: String,
    /// Present only when fixes were requested and there is something to change.
    pub fix: Option<Fix>,
}

/// Run the rule over one file.
///
/// Results are in document order. With `with_fixes`, the first result that
/// needs it carries the import insertion; no later fix repeats it.
pub fn check_unwrapped_strings(
    tree: &SyntaxTree,
    options: &RuleOptions,
    with_fixes: bool,
) -> Vec<UnwrappedString> {
    let table = resolve_imports(tree, &options.translation_module_pattern);
    let mut checker = Checker {
        tree,
        options,
        effective_names: table.names().to_vec(),
        table,
        with_fixes,
    };

    let mut results = Vec::new();
    for (id, node) in tree.nodes() {
        if let Some(result) = checker.check_node(id, &node.kind) {
            results.push(result);
        }
    }
    results
}

struct Candidate<'t> {
    id: NodeId,
    context: LiteralContext,
    raw: &'t str,
    /// Node whose parent decides whether the literal is already wrapped.
    /// For template segments this is the template itself.
    anchor: NodeId,
}

struct Checker<'a> {
    tree: &'a SyntaxTree,
    options: &'a RuleOptions,
    table: ImportNameTable,
    /// Table as seen by fixes: grows by the default name once an import is inserted.
    effective_names: Vec<String>,
    with_fixes: bool,
}

impl<'a> Checker<'a> {
    fn check_node(&mut self, id: NodeId, kind: &'a NodeKind) -> Option<UnwrappedString> {
        let candidate = self.candidate(id, kind)?;
        let raw = candidate.raw;
        if raw.trim().is_empty() || !self.options.target_script.is_match(raw) {
            return None;
        }
        if is_wrapped(self.tree, candidate.anchor, |name| self.table.contains(name)) {
            return None;
        }

        let mut value = raw.trim().to_string();
        if candidate.context == LiteralContext::JsxText {
            value = flatten_lines(&value);
        }
        let range = self.trimmed_range(&candidate);
        let fix = if self.with_fixes {
            Some(self.build_fix(&candidate, range, &value)).filter(|fix| !fix.is_empty())
        } else {
            None
        };

        Some(UnwrappedString {
            node: id,
            range: range.unwrap_or_else(|| self.tree.range(id)),
            text: strip_outer_quotes(&value).to_string(),
            fix,
        })
    }

    fn candidate(&self, id: NodeId, kind: &'a NodeKind) -> Option<Candidate<'a>> {
        let tree = self.tree;
        match kind {
            NodeKind::StringLiteral { .. } => {
                let in_attribute = tree
                    .parent(id)
                    .is_some_and(|p| matches!(tree.kind(p), NodeKind::JsxAttribute { .. }));
                Some(Candidate {
                    id,
                    context: if in_attribute {
                        LiteralContext::JsxAttribute
                    } else {
                        LiteralContext::Expression
                    },
                    raw: tree.text(id),
                    anchor: id,
                })
            }
            NodeKind::JsxText { .. } => Some(Candidate {
                id,
                context: LiteralContext::JsxText,
                raw: tree.text(id),
                anchor: id,
            }),
            NodeKind::TemplateSegment { raw } => Some(Candidate {
                id,
                context: LiteralContext::TemplateSegment,
                raw,
                anchor: tree.parent(id)?,
            }),
            _ => None,
        }
    }

    /// Locate the trimmed raw text in the file.
    ///
    /// Template segments are searched inside their own span first and then
    /// inside the enclosing template.
    fn trimmed_range(&self, candidate: &Candidate) -> Option<TextRange> {
        let trimmed = candidate.raw.trim();
        let search_in = |node: NodeId| {
            let start = self.tree.range(node).start;
            self.tree
                .text(node)
                .find(trimmed)
                .map(|pos| TextRange::new(start + pos, start + pos + trimmed.len()))
        };
        match candidate.context {
            LiteralContext::TemplateSegment => {
                search_in(candidate.id).or_else(|| search_in(candidate.anchor))
            }
            _ => search_in(candidate.id),
        }
    }

    fn build_fix(&mut self, candidate: &Candidate, range: Option<TextRange>, value: &str) -> Fix {
        let mut edits = Vec::new();

        // The import goes with the first flagged literal, even when that
        // literal turns out to be wrapped under the extended name list.
        if self.effective_names.is_empty() {
            self.effective_names
                .push(self.options.wrapper_function.clone());
            edits.extend(self.import_edit());
        }

        let names = &self.effective_names;
        if is_wrapped(self.tree, candidate.anchor, |name| {
            names.iter().any(|n| n == name)
        }) {
            return Fix { edits };
        }

        let template = WrapperTemplate::for_context(candidate.context, &names[0]);
        if let Some(range) = range {
            edits.push(TextEdit::replace(
                range,
                template.wrap(candidate.context, value),
            ));
        }
        Fix { edits }
    }

    fn import_edit(&self) -> Option<TextEdit> {
        let tree = self.tree;
        let statement = self.options.import_statement();
        let last_import = tree
            .body()
            .iter()
            .rev()
            .find(|id| matches!(tree.kind(**id), NodeKind::ImportDeclaration { .. }));

        match last_import {
            Some(id) => Some(TextEdit::insert(
                tree.range(*id).end,
                format!("\n{statement}"),
            )),
            None => tree.body().first().map(|id| {
                TextEdit::insert(tree.range(*id).start, format!("{statement}\n\n"))
            }),
        }
    }
}

/// Whether the node's parent already routes it through a wrapping function:
/// either the parent is a wrapping call taking the node as an argument, or the
/// node is the `context` property of the object passed as second argument.
fn is_wrapped(tree: &SyntaxTree, node: NodeId, is_wrapper: impl Fn(&str) -> bool) -> bool {
    let Some(parent) = tree.parent(node) else {
        return false;
    };

    match tree.kind(parent) {
        NodeKind::CallExpression {
            callee: Some(callee),
            arguments,
        } => is_wrapper(callee) && arguments.contains(&node),
        NodeKind::ObjectProperty { key: Some(key) } if key == "context" => {
            let Some(object) = tree
                .parent(parent)
                .filter(|o| matches!(tree.kind(*o), NodeKind::ObjectLiteral))
            else {
                return false;
            };
            tree.parent(object).is_some_and(|call| {
                matches!(
                    tree.kind(call),
                    NodeKind::CallExpression { callee: Some(callee), arguments }
                        if is_wrapper(callee) && arguments.get(1) == Some(&object)
                )
            })
        }
        _ => false,
    }
}
