//! Extract command - Collect `createMessage` calls into one Fluent resource.
//!
//! Modules are merged in file-path order. By default any parse or extraction error,
//! or two different messages sharing an id, aborts the run before the output is
//! written; `--skip-errors` leaves failing modules and conflicting calls out and writes
//! the rest.

use anyhow::Result;

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::{
    core::{
        ExtractContext,
        emit::{merge_extractions, write_resource},
        extract::ExtractionState,
    },
    issues::{ConflictingMessageIssue, InvalidMessageIssue, Issue},
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let mut ctx = ExtractContext::new(&args.common)?;
    if let Some(output) = &args.output {
        ctx.config.output = Some(output.clone());
    }

    // Checked before anything is parsed
    let output = ctx.resolve_path(ctx.config.output_path()?);

    let mut issues: Vec<Issue> = ctx
        .parsed_files_errors()
        .iter()
        .cloned()
        .map(Issue::ParseError)
        .collect();
    let mut skipped_modules = issues.len();

    let mut modules = Vec::new();
    for (file_path, result) in ctx.extractions() {
        match result {
            Ok(extraction) if extraction.state == ExtractionState::Active => {
                if !extraction.calls.is_empty() {
                    modules.push(extraction);
                }
            }
            Ok(_) => {}
            Err(err) => {
                if args.skip_errors {
                    tracing::warn!(file = %file_path, "skipping module: {}", err.error);
                }
                skipped_modules += 1;
                issues.push(Issue::InvalidMessage(InvalidMessageIssue::from(err.clone())));
            }
        }
    }

    let merged = merge_extractions(modules.iter().copied());
    let conflicts = merged.conflicts.len();
    issues.extend(
        merged
            .conflicts
            .into_iter()
            .map(|conflict| Issue::ConflictingMessage(ConflictingMessageIssue::from(conflict))),
    );
    let merged = merged.resource;

    let aborted = (skipped_modules > 0 || conflicts > 0) && !args.skip_errors;
    let written = !aborted && !merged.is_empty();
    if written {
        write_resource(&output, &merged)?;
    } else if aborted {
        tracing::debug!(
            errors = skipped_modules + conflicts,
            "extraction aborted, nothing written"
        );
    }

    let summary = ExtractSummary {
        output,
        message_count: merged.len(),
        module_count: modules.len(),
        skipped_modules,
        written,
    };

    Ok(CommandResult::new(
        CommandSummary::Extract(summary),
        issues,
        ctx.files.len(),
    ))
}
