use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::rewrite::CallRewrite;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Rewrite(RewriteSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub output: PathBuf,
    pub message_count: usize,
    /// Modules that imported the hook and contributed messages.
    pub module_count: usize,
    /// Modules left out because they failed to parse or extract.
    pub skipped_modules: usize,
    /// False when errors aborted the run or there was nothing to write.
    pub written: bool,
}

/// Rewrites planned (or applied) for one source file.
#[derive(Debug)]
pub struct FileRewrite {
    pub file_path: String,
    pub rewrites: Vec<CallRewrite>,
}

#[derive(Debug)]
pub struct RewriteSummary {
    pub files: Vec<FileRewrite>,
    pub is_apply: bool,
}

impl RewriteSummary {
    pub fn call_count(&self) -> usize {
        self.files.iter().map(|file| file.rewrites.len()).sum()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running a command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Issues found during the run, sorted for display.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Dry-run found work to do.
    pub pending: bool,
    /// Number of source files that were scanned.
    pub source_files_checked: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut issues: Vec<Issue>, source_files_checked: usize) -> Self {
        issues.sort();

        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;
        let pending = matches!(
            &summary,
            CommandSummary::Rewrite(rewrite) if !rewrite.is_apply && rewrite.call_count() > 0
        );

        Self {
            summary,
            issues,
            error_count,
            warning_count,
            pending,
            source_files_checked,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 || self.pending {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
