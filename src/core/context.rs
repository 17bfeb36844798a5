use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use rayon::prelude::*;
use swc_common::{FilePathMapping, SourceMap};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        file_scanner::{ScanOptions, scan_files},
        parsers::jsx::parse_source,
    },
    issues::ParseErrorIssue,
    rules::unwrapped::{RuleOptions, UnwrappedString, check_unwrapped_strings},
};

/// Rule results for one source file, together with the text they refer to.
#[derive(Debug)]
pub struct SourceAnalysis {
    pub file_path: String,
    pub source: String,
    pub strings: Vec<UnwrappedString>,
}

/// Output of one pass over every scanned file.
#[derive(Debug, Default)]
pub struct Analysis {
    /// Files in path order.
    pub files: Vec<SourceAnalysis>,
    pub parse_errors: Vec<ParseErrorIssue>,
}

impl Analysis {
    pub fn string_count(&self) -> usize {
        self.files.iter().map(|f| f.strings.len()).sum()
    }
}

/// Configuration plus the scanned file set for one run.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (`--wrapper-function`)
/// 2. `.unwrappedrc.json` found from the source root upwards
/// 3. Built-in defaults
pub struct CheckContext {
    pub config: Config,
    pub options: RuleOptions,
    pub root_dir: PathBuf,
    pub files: BTreeSet<PathBuf>,
    pub verbose: bool,
}

impl CheckContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        if !root_dir.is_dir() {
            anyhow::bail!("Source root is not a directory: {}", root_dir.display());
        }

        let config_result = load_config(&root_dir)?;
        if verbose {
            match &config_result.path {
                Some(path) => eprintln!("Note: using configuration from {}", path.display()),
                None => eprintln!("Note: No .unwrappedrc.json found, using default configuration"),
            }
        }

        let mut config = config_result.config;
        if let Some(ref wrapper_function) = common_args.wrapper_function {
            config.wrapper_function = wrapper_function.clone();
        }
        config.validate()?;
        let options = config.rule_options()?;

        let scan_result = scan_files(
            &root_dir,
            &ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_test_files: config.ignore_test_files,
                verbose,
            },
        );

        if scan_result.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors{}",
                "warning:".bold().yellow(),
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            options,
            root_dir,
            files: scan_result.files,
            verbose,
        })
    }

    /// Read, parse and check every scanned file in parallel.
    ///
    /// With `with_fixes`, each result carries the edits that rewrite it.
    /// Files that cannot be read or parsed become parse errors; the rest of
    /// the run is unaffected.
    pub fn analyze(&self, with_fixes: bool) -> Analysis {
        let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));

        let results: Vec<(String, Result<SourceAnalysis>)> = self
            .files
            .par_iter()
            .map(|path| {
                let file_path = path.to_string_lossy().to_string();
                let result = analyze_file(
                    path,
                    &file_path,
                    &self.options,
                    source_map.clone(),
                    with_fixes,
                );
                (file_path, result)
            })
            .collect();

        let mut analysis = Analysis::default();
        for (file_path, result) in results {
            match result {
                Ok(file) => analysis.files.push(file),
                Err(e) => {
                    if self.verbose {
                        eprintln!("{} {} - {}", "warning:".bold().yellow(), file_path, e);
                    }
                    analysis.parse_errors.push(ParseErrorIssue {
                        file_path,
                        error: e.to_string(),
                    });
                }
            }
        }
        analysis
    }
}

fn analyze_file(
    path: &Path,
    file_path: &str,
    options: &RuleOptions,
    source_map: Arc<SourceMap>,
    with_fixes: bool,
) -> Result<SourceAnalysis> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", file_path))?;
    let tree = parse_source(code, file_path, source_map)?.into_tree();
    let strings = check_unwrapped_strings(&tree, options, with_fixes);

    Ok(SourceAnalysis {
        file_path: file_path.to_string(),
        source: tree.source().to_string(),
        strings,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn args(root: &Path) -> CommonArgs {
        CommonArgs {
            source_root: Some(root.to_path_buf()),
            wrapper_function: None,
            verbose: false,
        }
    }

    #[test]
    fn test_analyze_collects_strings_and_parse_errors() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("a.tsx"), "const a = 'строка';\nconst b = 'ok';").unwrap();
        fs::write(dir.path().join("b.ts"), "const = ;").unwrap();
        fs::write(dir.path().join("c.ts"), "export const c = 1;").unwrap();

        let ctx = CheckContext::new(&args(dir.path())).unwrap();
        assert_eq!(ctx.files.len(), 3);

        let analysis = ctx.analyze(false);
        assert_eq!(analysis.files.len(), 2);
        assert_eq!(analysis.string_count(), 1);
        assert_eq!(analysis.files[0].strings[0].text, "строка");
        assert_eq!(analysis.parse_errors.len(), 1);
        assert!(analysis.parse_errors[0].file_path.ends_with("b.ts"));
    }

    #[test]
    fn test_wrapper_function_override() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(
            dir.path().join(".unwrappedrc.json"),
            r#"{ "wrapperFunction": "tr" }"#,
        )
        .unwrap();

        let ctx = CheckContext::new(&args(dir.path())).unwrap();
        assert_eq!(ctx.options.wrapper_function, "tr");

        let mut overridden = args(dir.path());
        overridden.wrapper_function = Some("t".to_string());
        let ctx = CheckContext::new(&overridden).unwrap();
        assert_eq!(ctx.options.wrapper_function, "t");
    }

    #[test]
    fn test_missing_source_root_fails() {
        let dir = tempdir().unwrap();
        let result = CheckContext::new(&args(&dir.path().join("missing")));
        assert!(result.is_err());
    }
}
