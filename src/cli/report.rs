//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo-style format. Kept apart from the core so the
//! extractor can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, FileRewrite, InitSummary, RewriteSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);
    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult) {
    let stdout = &mut io::stdout().lock();
    report_to(&result.issues, stdout);
    match &result.summary {
        CommandSummary::Extract(summary) => print_extract_to(summary, result, stdout),
        CommandSummary::Rewrite(summary) => print_rewrite_to(summary, result, stdout),
        CommandSummary::Init(summary) => print_init_to(summary, stdout),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_extract_to<W: Write>(summary: &ExtractSummary, result: &CommandResult, writer: &mut W) {
    if summary.written {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Extracted {} from {} to {}",
                plural(summary.message_count, "message"),
                plural(summary.module_count, "module"),
                summary.output.display()
            )
            .green()
        );
        if summary.skipped_modules > 0 {
            let _ = writeln!(
                writer,
                "  - skipped: {}",
                plural(summary.skipped_modules, "module")
            );
        }
    } else if result.error_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} was not written. Fix the errors above or run with {}.",
            FAILURE_MARK.red(),
            summary.output.display(),
            "--skip-errors".cyan()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} - no messages found",
                plural(result.source_files_checked, "source file")
            )
            .green()
        );
    }
}

fn print_rewrite_to<W: Write>(summary: &RewriteSummary, result: &CommandResult, writer: &mut W) {
    let calls = summary.call_count();
    if calls == 0 {
        if result.issues.is_empty() {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Checked {} - nothing to rewrite",
                    plural(result.source_files_checked, "source file")
                )
                .green()
            );
        }
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} in {}.",
            "Rewrote".green().bold(),
            plural(calls, "call"),
            plural(summary.files.len(), "file")
        );
    } else {
        for file in &summary.files {
            preview_file(file, writer);
        }
        let _ = writeln!(
            writer,
            "{} {} in {}.",
            "Would rewrite".yellow().bold(),
            plural(calls, "call"),
            plural(summary.files.len(), "file")
        );
        let _ = writeln!(writer, "Run with {} to rewrite these calls.", "--apply".cyan());
    }
}

fn preview_file<W: Write>(file: &FileRewrite, writer: &mut W) {
    for rewrite in &file.rewrites {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            rewrite.context.file_path(),
            rewrite.context.line(),
            rewrite.context.col()
        );
        let _ = writeln!(writer, "  {} {}", "-".red(), rewrite.original);
        let _ = writeln!(writer, "  {} {}", "+".green(), rewrite.replacement);
        let _ = writeln!(writer);
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
