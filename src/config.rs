use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::rules::unwrapped::{
    DEFAULT_TARGET_SCRIPT, DEFAULT_TRANSLATION_MODULE, DEFAULT_TRANSLATION_MODULE_PATTERN,
    DEFAULT_WRAPPER_FUNCTION, RuleOptions,
};

pub const CONFIG_FILE_NAME: &str = ".unwrappedrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Name bound by inserted imports and used in generated calls.
    #[serde(default = "default_wrapper_function")]
    pub wrapper_function: String,
    /// Module path written into inserted imports.
    #[serde(default = "default_translation_module")]
    pub translation_module: String,
    /// Regex matched against import paths to recognize the translation module.
    #[serde(default = "default_translation_module_pattern")]
    pub translation_module_pattern: String,
    /// Regex a literal must match to be reported.
    #[serde(default = "default_target_script")]
    pub target_script: String,
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/build/**"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_wrapper_function() -> String {
    DEFAULT_WRAPPER_FUNCTION.to_string()
}

fn default_translation_module() -> String {
    DEFAULT_TRANSLATION_MODULE.to_string()
}

fn default_translation_module_pattern() -> String {
    DEFAULT_TRANSLATION_MODULE_PATTERN.to_string()
}

fn default_target_script() -> String {
    DEFAULT_TARGET_SCRIPT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            wrapper_function: default_wrapper_function(),
            translation_module: default_translation_module(),
            translation_module_pattern: default_translation_module_pattern(),
            target_script: default_target_script(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid globs in `ignores`/`includes`, invalid regexes and an
    /// empty wrapper function name.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directories, so [locale] is valid.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.wrapper_function.trim().is_empty() {
            bail!("'wrapperFunction' must not be empty");
        }

        self.rule_options().map(|_| ())
    }

    /// Compile the rule settings.
    pub fn rule_options(&self) -> Result<RuleOptions> {
        let translation_module_pattern = Regex::new(&self.translation_module_pattern)
            .with_context(|| {
                format!(
                    "Invalid regex in 'translationModulePattern': \"{}\"",
                    self.translation_module_pattern
                )
            })?;
        let target_script = Regex::new(&self.target_script).with_context(|| {
            format!("Invalid regex in 'targetScript': \"{}\"", self.target_script)
        })?;

        Ok(RuleOptions {
            translation_module_pattern,
            wrapper_function: self.wrapper_function.clone(),
            translation_module: self.translation_module.clone(),
            target_script,
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Look for the config file in `start_dir` and its ancestors, stopping at the
/// first directory that contains `.git`.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config was read from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(ConfigLoadResult {
        config,
        path: Some(path),
    })
}
