use std::{
    cell::OnceCell,
    collections::BTreeMap,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        CallSiteError,
        extract::{ModuleExtraction, extract_module},
        file_scanner::scan_files,
        parsers::jsx::{ParsedJSX, parse_jsx_source},
    },
    issues::ParseErrorIssue,
};

/// Extraction outcome of one module.
pub type ModuleResult = Result<ModuleExtraction, CallSiteError>;

/// Shared state for a single `extract` or `rewrite` run.
///
/// Source files are scanned when the context is created; parsing and extraction run
/// lazily on first access, each file in parallel.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--output`)
/// 2. `.fluentextractrc.json`
/// 3. Built-in defaults
pub struct ExtractContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    /// Source files to process, in path order.
    pub files: Vec<String>,

    /// Parsed AST for each source file, keyed by path.
    parsed_files: OnceCell<BTreeMap<String, ParsedJSX>>,

    /// Populated alongside `parsed_files`.
    parsed_files_errors: OnceCell<Vec<ParseErrorIssue>>,

    /// Extraction result per parsed file, keyed by path.
    extractions: OnceCell<BTreeMap<String, ModuleResult>>,
}

impl ExtractContext {
    /// Load configuration and scan source files.
    ///
    /// # Errors
    ///
    /// Returns error if the source root is not valid UTF-8 or the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = root_dir
            .to_str()
            .with_context(|| anyhow!("Invalid path: {:?}", root_dir))?;

        let config_result = load_config(Path::new(path))?;
        if !config_result.from_file {
            tracing::debug!("no config file found, using defaults");
        }
        let config = config_result.config;

        let scan_result = scan_files(
            path,
            &config.includes,
            &config.ignores,
            config.ignore_test_files,
        );
        if scan_result.skipped_count > 0 {
            tracing::warn!(
                skipped = scan_result.skipped_count,
                "paths skipped due to access errors"
            );
        }
        let files = scan_result.files;
        tracing::debug!(files = files.len(), root = path, "scanned source files");

        Ok(Self {
            config,
            root_dir,
            files,
            parsed_files: OnceCell::new(),
            parsed_files_errors: OnceCell::new(),
            extractions: OnceCell::new(),
        })
    }

    /// Resolve a configured path against the project root.
    ///
    /// Absolute paths are kept; relative ones are joined onto `root_dir` unless it is the
    /// current directory.
    pub fn resolve_path(&self, configured: &str) -> PathBuf {
        let p = Path::new(configured);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        let is_cur_dir = self
            .root_dir
            .components()
            .all(|c| matches!(c, Component::CurDir));
        if is_cur_dir {
            p.to_path_buf()
        } else {
            let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
            self.root_dir.join(rel)
        }
    }

    /// Get parsed AST for all source files (lazy initialization).
    ///
    /// Reading and parsing both run in parallel, with a per-file `SourceMap`. Parse
    /// errors are collected separately and can be retrieved via `parsed_files_errors()`.
    pub fn parsed_files(&self) -> &BTreeMap<String, ParsedJSX> {
        self.parsed_files.get_or_init(|| {
            let parse_results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let parse_result = std::fs::read_to_string(file_path)
                        .map_err(|e| anyhow!("Failed to read file: {}", e))
                        .and_then(|code| {
                            let source_map = Arc::new(swc_common::SourceMap::default());
                            parse_jsx_source(code, file_path, source_map)
                        });
                    (file_path.clone(), parse_result)
                })
                .collect();

            let mut parsed = BTreeMap::new();
            let mut errors = Vec::new();

            for (file_path, result) in parse_results {
                match result {
                    Ok(p) => {
                        parsed.insert(file_path, p);
                    }
                    Err(e) => {
                        tracing::warn!(file = %file_path, "{}", e);
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: e.to_string(),
                        });
                    }
                }
            }

            let _ = self.parsed_files_errors.set(errors);
            parsed
        })
    }

    /// Parse errors from source files. Populated when `parsed_files()` is first called.
    pub fn parsed_files_errors(&self) -> &Vec<ParseErrorIssue> {
        self.parsed_files();
        self.parsed_files_errors.get_or_init(Vec::new)
    }

    /// Extract every parsed module (lazy initialization).
    pub fn extractions(&self) -> &BTreeMap<String, ModuleResult> {
        self.extractions.get_or_init(|| {
            let pattern = self.config.call_pattern();
            self.parsed_files()
                .par_iter()
                .map(|(file_path, parsed)| {
                    let result = extract_module(parsed, file_path, &pattern);
                    if let Err(err) = &result {
                        tracing::debug!(file = %file_path, "extraction failed: {}", err.error);
                    }
                    (file_path.clone(), result)
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::core::ExtractionError;

    fn create_test_context(root_dir: &str) -> ExtractContext {
        ExtractContext {
            config: Config::default(),
            root_dir: PathBuf::from(root_dir),
            files: Vec::new(),
            parsed_files: OnceCell::new(),
            parsed_files_errors: OnceCell::new(),
            extractions: OnceCell::new(),
        }
    }

    fn common_args(root: &Path) -> CommonArgs {
        CommonArgs {
            source_root: Some(root.to_path_buf()),
            verbose: false,
        }
    }

    #[test]
    fn test_resolve_path_absolute() {
        let ctx = create_test_context("/project");
        assert_eq!(
            ctx.resolve_path("/abs/messages.ftl"),
            PathBuf::from("/abs/messages.ftl")
        );
    }

    #[test]
    fn test_resolve_path_relative_with_dot_root() {
        let ctx = create_test_context(".");
        assert_eq!(
            ctx.resolve_path("./messages.ftl"),
            PathBuf::from("./messages.ftl")
        );
    }

    #[test]
    fn test_resolve_path_relative_with_root() {
        let ctx = create_test_context("/project/app");
        assert_eq!(
            ctx.resolve_path("./locales/en.ftl"),
            PathBuf::from("/project/app/locales/en.ftl")
        );
        assert_eq!(
            ctx.resolve_path("en.ftl"),
            PathBuf::from("/project/app/en.ftl")
        );
    }

    #[test]
    fn test_pipeline_over_project() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();

        fs::write(
            src.join("a.tsx"),
            r#"import { useLocalization } from "fluent-react";
l10n.createMessage("Hello");
"#,
        )
        .unwrap();
        fs::write(
            src.join("b.tsx"),
            r#"import { useLocalization } from "fluent-react";
l10n.createMessage(status, { a: "A" });
"#,
        )
        .unwrap();
        fs::write(src.join("broken.ts"), "const = ;").unwrap();

        let ctx = ExtractContext::new(&common_args(dir.path())).unwrap();
        assert_eq!(ctx.files.len(), 3);
        assert_eq!(ctx.parsed_files().len(), 2);
        assert_eq!(ctx.parsed_files_errors().len(), 1);

        let results: Vec<_> = ctx.extractions().values().collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().calls.len(), 1);
        assert_eq!(
            results[1].as_ref().unwrap_err().error,
            ExtractionError::MissingDefaultVariant
        );
    }
}
