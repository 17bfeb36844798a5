//! Per-file syntax tree handed to the rules.
//!
//! - `tree`: arena of nodes with parent indices and byte ranges
//! - `lower`: conversion from the swc AST

mod lower;
mod tree;

pub use lower::lower_module;
pub use tree::*;
