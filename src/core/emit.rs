//! Merging per-module extractions and writing the output file.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::extract::ModuleExtraction;
use crate::core::fluent::{Identifier, Resource, serialize};
use crate::core::{SourceContext, SourceLocation};

/// A call whose message id is already taken by a different message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageConflict {
    pub id: Identifier,
    pub context: SourceContext,
    /// The call that first produced the id.
    pub first: SourceLocation,
}

#[derive(Debug, Default)]
pub struct MergedMessages {
    pub resource: Resource,
    pub conflicts: Vec<MessageConflict>,
}

/// Merge the messages of `extractions`, in order.
///
/// A message identical to one already merged is dropped. A different message under an
/// id already merged is a conflict; the first message keeps the id.
pub fn merge_extractions<'a>(
    extractions: impl IntoIterator<Item = &'a ModuleExtraction>,
) -> MergedMessages {
    let mut merged = MergedMessages::default();
    let mut first_seen: Vec<SourceLocation> = Vec::new();

    for call in extractions.into_iter().flat_map(|e| &e.calls) {
        let message = &call.extracted.message;
        let existing = merged
            .resource
            .body
            .iter()
            .position(|seen| seen.id == message.id);
        match existing {
            None => {
                merged.resource.body.push(message.clone());
                first_seen.push(call.context.location.clone());
            }
            Some(index) if merged.resource.body[index] == *message => {
                tracing::debug!(id = %message.id, "skipping duplicate message");
            }
            Some(index) => {
                tracing::debug!(id = %message.id, "conflicting message");
                merged.conflicts.push(MessageConflict {
                    id: message.id.clone(),
                    context: call.context.clone(),
                    first: first_seen[index].clone(),
                });
            }
        }
    }
    merged
}

/// Serialize `resource` and write it to `path`, creating parent directories as needed.
pub fn write_resource(path: &Path, resource: &Resource) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, serialize(resource))
        .with_context(|| format!("Failed to write Fluent resource: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        messages = resource.len(),
        "wrote resource"
    );
    Ok(())
}
