use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::ExtractionError;
use crate::core::extract::CallPattern;

pub const CONFIG_FILE_NAME: &str = ".fluentextractrc.json";

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

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Fluent resource written by `extract`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_import_source")]
    pub import_source: String,
    #[serde(default = "default_hook_name")]
    pub hook_name: String,
    #[serde(default = "default_trigger_method")]
    pub trigger_method: String,
    #[serde(default = "default_lookup_method")]
    pub lookup_method: String,
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_import_source() -> String {
    CallPattern::default().import_source
}

fn default_hook_name() -> String {
    CallPattern::default().hook_name
}

fn default_trigger_method() -> String {
    CallPattern::default().trigger_method
}

fn default_lookup_method() -> String {
    CallPattern::default().lookup_method
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: None,
            ignores: default_ignores(),
            includes: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            import_source: default_import_source(),
            hook_name: default_hook_name(),
            trigger_method: default_trigger_method(),
            lookup_method: default_lookup_method(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob patterns in `ignores` or `includes` are invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for (field, value) in [
            ("importSource", &self.import_source),
            ("hookName", &self.hook_name),
            ("triggerMethod", &self.trigger_method),
            ("lookupMethod", &self.lookup_method),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("'{}' must not be empty", field);
            }
        }

        Ok(())
    }

    /// Configured output path. Extraction cannot start without one.
    pub fn output_path(&self) -> std::result::Result<&str, ExtractionError> {
        self.output
            .as_deref()
            .filter(|path| !path.is_empty())
            .ok_or(ExtractionError::MissingOutputPath)
    }

    pub fn call_pattern(&self) -> CallPattern {
        CallPattern {
            import_source: self.import_source.clone(),
            hook_name: self.hook_name.clone(),
            trigger_method: self.trigger_method.clone(),
            lookup_method: self.lookup_method.clone(),
        }
    }
}

/// Config written by `init`: the defaults plus an output path.
pub fn default_config_json() -> Result<String> {
    let config = Config {
        output: Some("./messages.ftl".to_string()),
        ..Default::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

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
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
