//! Source file discovery.
//!
//! Includes and ignores accept either glob patterns (containing `*` or `?`) or
//! literal directory paths relative to the source root. Literal paths are
//! never interpreted as globs, so `app/[locale]` works as written.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

const SCANNABLE_EXTENSIONS: &[&str] = &["tsx", "ts", "mts", "cts", "jsx", "js", "mjs", "cjs"];

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// What to scan, relative to the source root.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
    pub verbose: bool,
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Scanned files in path order.
    pub files: BTreeSet<PathBuf>,
    /// Paths that could not be read while walking.
    pub skipped_count: usize,
}

struct IgnoreRules {
    literal_paths: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    fn new(base_dir: &Path, options: &ScanOptions) -> Self {
        let mut literal_paths = Vec::new();
        let mut patterns = Vec::new();

        for p in options.ignores {
            if !is_glob_pattern(p) {
                literal_paths.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        }

        if options.ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self {
            literal_paths,
            patterns,
        }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        if self.literal_paths.iter().any(|p| path.starts_with(p)) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Directories to walk: the whole root, or each include that exists.
fn scan_roots(base_dir: &Path, options: &ScanOptions) -> Vec<PathBuf> {
    if options.includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in options.includes {
        if !is_glob_pattern(inc) {
            let path = base_dir.join(inc);
            if path.exists() {
                roots.push(path);
            } else if options.verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
            continue;
        }

        let full_pattern = base_dir.join(inc);
        match glob(&full_pattern.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => {
                if options.verbose {
                    eprintln!(
                        "{} Invalid glob pattern '{}': {}",
                        "warning:".bold().yellow(),
                        inc,
                        e
                    );
                }
            }
        }
    }
    roots
}

pub fn scan_files(base_dir: &Path, options: &ScanOptions) -> ScanResult {
    let ignore = IgnoreRules::new(base_dir, options);
    let mut result = ScanResult::default();

    for root in scan_roots(base_dir, options) {
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| !ignore.is_ignored(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if options.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            if entry.file_type().is_file() && is_scannable_file(entry.path()) {
                result.files.insert(entry.into_path());
            }
        }
    }

    result
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext))
}
