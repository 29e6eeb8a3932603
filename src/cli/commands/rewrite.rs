//! Rewrite command - Replace `createMessage` calls with lookups of the extracted ids.
//!
//! Use `--apply` to write the files (default is dry-run mode). Modules that fail to
//! extract, or hold a call whose id belongs to a different message, are reported and
//! left untouched.

use std::{collections::BTreeSet, fs};

use anyhow::{Context, Result};

use super::super::args::RewriteCommand;
use super::{CommandResult, CommandSummary, FileRewrite, RewriteSummary};
use crate::{
    core::{ExtractContext, emit::merge_extractions, rewrite::rewrite_module},
    issues::{ConflictingMessageIssue, InvalidMessageIssue, Issue, NestedCallIssue},
};

pub fn rewrite(cmd: RewriteCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = ExtractContext::new(&args.common)?;
    let lookup_method = ctx.config.lookup_method.as_str();

    let mut issues: Vec<Issue> = ctx
        .parsed_files_errors()
        .iter()
        .cloned()
        .map(Issue::ParseError)
        .collect();
    let mut files = Vec::new();

    let merged = merge_extractions(ctx.extractions().values().filter_map(|r| r.as_ref().ok()));
    let conflicting: BTreeSet<String> = merged
        .conflicts
        .iter()
        .map(|conflict| conflict.context.location.file_path.clone())
        .collect();
    issues.extend(
        merged
            .conflicts
            .into_iter()
            .map(|conflict| Issue::ConflictingMessage(ConflictingMessageIssue::from(conflict))),
    );

    let parsed_files = ctx.parsed_files();
    for (file_path, result) in ctx.extractions() {
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(err) => {
                issues.push(Issue::InvalidMessage(InvalidMessageIssue::from(err.clone())));
                continue;
            }
        };
        let Some(parsed) = parsed_files.get(file_path) else {
            continue;
        };
        if extraction.calls.is_empty() || conflicting.contains(file_path) {
            continue;
        }

        let plan = rewrite_module(parsed, extraction, lookup_method);
        issues.extend(plan.nested.iter().map(|nested| {
            Issue::NestedCall(NestedCallIssue {
                context: nested.context.clone(),
                outer: nested.outer.clone(),
            })
        }));

        if args.apply {
            fs::write(file_path, plan.apply(&parsed.source))
                .with_context(|| format!("Failed to write file: {}", file_path))?;
            tracing::info!(file = %file_path, calls = plan.rewrites.len(), "rewrote module");
        }

        files.push(FileRewrite {
            file_path: file_path.clone(),
            rewrites: plan.rewrites,
        });
    }

    let summary = RewriteSummary {
        files,
        is_apply: args.apply,
    };

    Ok(CommandResult::new(
        CommandSummary::Rewrite(summary),
        issues,
        ctx.files.len(),
    ))
}
