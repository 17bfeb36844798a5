//! Detection rules.
//!
//! Rules work on one lowered [`SyntaxTree`](crate::core::SyntaxTree) at a
//! time and never touch the file system.
//!
//! ## Module Structure
//!
//! - `unwrapped`: string literals in the target script that bypass the
//!   wrapping function

pub mod unwrapped;
