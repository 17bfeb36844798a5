//! Core analysis engine.
//!
//! Files are scanned, parsed with swc, lowered into a per-file [`SyntaxTree`]
//! and handed to the rules. Rules answer with diagnostics and [`Fix`]es that
//! [`apply_fixes`] splices back into the original text.
//!
//! ## Module Structure
//!
//! - `context`: configuration, file set and the parallel analysis pass
//! - `edit`: text edits and atomic fix application
//! - `file_scanner`: include/ignore aware file discovery
//! - `imports`: wrapping-function names a file imports
//! - `parsers`: swc parsing
//! - `source`: report locations
//! - `syntax`: arena syntax tree and lowering

pub mod context;
pub mod edit;
pub mod file_scanner;
pub mod imports;
pub mod parsers;
pub mod source;
pub mod syntax;

pub use context::{Analysis, CheckContext, SourceAnalysis};
pub use edit::{Fix, FixOutcome, TextEdit, apply_fixes};
pub use imports::{ImportNameTable, resolve_imports};
pub use source::{SourceContext, SourceLocation};
pub use syntax::{ImportSpecifier, NodeId, NodeKind, SyntaxNode, SyntaxTree, TextRange};
