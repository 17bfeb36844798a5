//! Unwrapped - finds user-facing strings that bypass the translation call
//!
//! Scans JavaScript and TypeScript sources (JSX included) for string
//! literals, JSX text and template segments written in a target script
//! (Cyrillic by default) that are not passed to the wrapping function
//! imported from the translation module, and rewrites them into calls.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, syntax tree, file discovery and fix application
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Detection and rewrite rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
