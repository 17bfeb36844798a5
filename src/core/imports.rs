//! Resolution of the wrapping-function names a file imports.

use regex::Regex;

use crate::core::syntax::{ImportSpecifier, NodeKind, SyntaxTree};

/// Local names that refer to a recognized wrapping function in one file.
///
/// Built once per file by [`resolve_imports`] and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportNameTable {
    names: Vec<String>,
}

impl ImportNameTable {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for ImportNameTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = ImportNameTable::default();
        for name in iter {
            let name = name.into();
            if !table.contains(&name) {
                table.names.push(name);
            }
        }
        table
    }
}

/// Collect the local bindings of every named specifier imported from a module
/// whose path matches `module_pattern`.
///
/// Default and namespace imports are ignored, as are declarations whose path
/// does not match.
pub fn resolve_imports(tree: &SyntaxTree, module_pattern: &Regex) -> ImportNameTable {
    tree.body()
        .iter()
        .filter_map(|id| match tree.kind(*id) {
            NodeKind::ImportDeclaration { source, specifiers } if module_pattern.is_match(source) => {
                Some(specifiers)
            }
            _ => None,
        })
        .flatten()
        .filter_map(|specifier| match specifier {
            ImportSpecifier::Named { local, .. } => Some(local.as_str()),
            ImportSpecifier::Default { .. } | ImportSpecifier::Namespace { .. } => None,
        })
        .collect()
}
