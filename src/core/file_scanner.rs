//! Source module discovery for `extract` and `rewrite`.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use walkdir::{DirEntry, WalkDir};

use crate::config::TEST_FILE_PATTERNS;

/// Extensions of the modules handed to the parser.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

pub struct ScanResult {
    /// Source files in path order, each listed once.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Paths left out of a scan.
struct IgnoreSet {
    /// Literal paths; everything below them is skipped.
    prefixes: Vec<PathBuf>,
    files: Vec<Pattern>,
    /// Directory part of `<dir>/**` patterns. Matching directories are not walked.
    dirs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, ignores: &[String], ignore_test_files: bool) -> Self {
        let mut set = Self {
            prefixes: Vec::new(),
            files: Vec::new(),
            dirs: Vec::new(),
        };

        let test_patterns = TEST_FILE_PATTERNS
            .iter()
            .copied()
            .filter(|_| ignore_test_files);
        for raw in ignores.iter().map(String::as_str).chain(test_patterns) {
            if !is_glob(raw) {
                set.prefixes.push(base_dir.join(raw));
                continue;
            }
            match Pattern::new(raw) {
                Ok(pattern) => {
                    if let Some(dir) = raw.strip_suffix("/**")
                        && let Ok(dir_pattern) = Pattern::new(dir)
                    {
                        set.dirs.push(dir_pattern);
                    }
                    set.files.push(pattern);
                }
                Err(e) => tracing::warn!(pattern = %raw, "invalid ignore pattern: {}", e),
            }
        }
        set
    }

    fn prunes(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        if self.prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        entry.file_type().is_dir() && self.dirs.iter().any(|p| p.matches_path(path))
    }

    fn skips_file(&self, path: &Path) -> bool {
        self.files.iter().any(|p| p.matches_path(path))
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Collect the source modules under `base_dir`.
///
/// `includes` narrows the walk to literal or glob-matched directories (all of
/// `base_dir` when empty). `ignores` are literal path prefixes or globs; with
/// `ignore_test_files` the test-file globs are added to them.
pub fn scan_files(
    base_dir: &str,
    includes: &[String],
    ignores: &[String],
    ignore_test_files: bool,
) -> ScanResult {
    let base = Path::new(base_dir);
    let ignore = IgnoreSet::new(base, ignores, ignore_test_files);
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for root in include_roots(base, includes) {
        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !ignore.prunes(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    skipped_count += 1;
                    tracing::warn!("cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_source_file(path) && !ignore.skips_file(path) {
                files.insert(path.to_string_lossy().into_owned());
            }
        }
    }

    tracing::debug!(files = files.len(), skipped = skipped_count, "scanned source files");
    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn include_roots(base: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let path = base.join(include);
        if !is_glob(include) {
            if path.exists() {
                roots.push(path);
            } else {
                tracing::warn!(path = %path.display(), "include path does not exist");
            }
            continue;
        }
        match glob(&path.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => tracing::warn!(pattern = %include, "invalid include pattern: {}", e),
        }
    }
    roots
}

/// A module with a source extension. Type declaration files (`*.d.ts`) have no
/// call sites and are skipped.
fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    match name.rsplit_once('.') {
        Some((stem, ext)) => SOURCE_EXTENSIONS.contains(&ext) && !stem.ends_with(".d"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use super::*;

    fn project(files: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    fn scan(dir: &TempDir, includes: &[&str], ignores: &[&str], ignore_tests: bool) -> Vec<String> {
        let includes: Vec<String> = includes.iter().map(|s| s.to_string()).collect();
        let ignores: Vec<String> = ignores.iter().map(|s| s.to_string()).collect();
        let result = scan_files(dir.path().to_str().unwrap(), &includes, &ignores, ignore_tests);
        assert_eq!(result.skipped_count, 0);
        result
            .files
            .iter()
            .map(|f| {
                Path::new(f)
                    .strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scans_modules_in_path_order() {
        let dir = project(&[
            "src/b.tsx",
            "src/a.ts",
            "lib/c.mjs",
            "lib/d.cts",
            "src/style.css",
            "src/types.d.ts",
            "README.md",
        ]);
        assert_eq!(
            scan(&dir, &[], &[], false),
            vec!["lib/c.mjs", "lib/d.cts", "src/a.ts", "src/b.tsx"]
        );
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("app.jsx")));
        assert!(is_source_file(Path::new("server.mts")));
        assert!(is_source_file(Path::new("d.ts")));
        assert!(!is_source_file(Path::new("env.d.ts")));
        assert!(!is_source_file(Path::new("messages.ftl")));
        assert!(!is_source_file(Path::new("Makefile")));
    }

    #[test]
    fn test_dependencies_are_ignored() {
        let dir = project(&["node_modules/fluent-react/index.js", "src/app.tsx"]);
        assert_eq!(
            scan(&dir, &[], &["**/node_modules/**"], false),
            vec!["src/app.tsx"]
        );
    }

    #[test]
    fn test_literal_ignore_skips_everything_below() {
        let dir = project(&["src/generated/strings.ts", "src/generated.ts", "src/app.tsx"]);
        assert_eq!(
            scan(&dir, &[], &["src/generated"], false),
            vec!["src/app.tsx", "src/generated.ts"]
        );
    }

    #[test]
    fn test_test_files_follow_flag() {
        let dir = project(&["src/app.tsx", "src/app.test.tsx", "src/__tests__/helper.ts"]);
        assert_eq!(scan(&dir, &[], &[], true), vec!["src/app.tsx"]);
        assert_eq!(scan(&dir, &[], &[], false).len(), 3);
    }

    #[test]
    fn test_overlapping_includes_list_files_once() {
        let dir = project(&["src/app.tsx", "src/components/Button.tsx", "scripts/build.js"]);
        assert_eq!(
            scan(&dir, &["src", "src/*"], &[], false),
            vec!["src/app.tsx", "src/components/Button.tsx"]
        );
    }

    #[test]
    fn test_missing_include_is_skipped() {
        let dir = project(&["src/app.tsx"]);
        assert_eq!(scan(&dir, &["missing", "src"], &[], false), vec!["src/app.tsx"]);
    }
}
