//! Change-set application.
//!
//! Mutates the working tree from an ordered list of file operations. A single
//! failing operation aborts the whole batch; effects up to that point remain
//! on disk and the surrounding version-control layer is expected to discard
//! them. There is no rollback here.

use std::path::{Component, Path, PathBuf};

use renova_core::{FileAction, FileOperation};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("path escapes working root: {path}")]
    PathEscape { path: String },

    #[error("missing content for {action} of {path}")]
    MissingContent { path: String, action: &'static str },

    #[error("{action} failed for {path}: {source}")]
    Io {
        path: String,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Apply `changes` in list order under `working_root`. Returns the number of
/// operations applied. Deleting a nonexistent path is a no-op that still
/// counts as applied; create/modify overwrite whatever is there.
pub fn apply_changes(working_root: &Path, changes: &[FileOperation]) -> Result<usize, ApplyError> {
    let mut applied = 0usize;

    for op in changes {
        let target = resolve_within(working_root, &op.path)?;

        match op.action {
            FileAction::Delete => {
                if target.exists() {
                    std::fs::remove_file(&target).map_err(|source| ApplyError::Io {
                        path: op.path.clone(),
                        action: op.action.as_str(),
                        source,
                    })?;
                    debug!(path = %op.path, "deleted");
                } else {
                    debug!(path = %op.path, "delete target absent, skipping");
                }
            }
            FileAction::Create | FileAction::Modify => {
                let content = op.content.as_deref().ok_or_else(|| ApplyError::MissingContent {
                    path: op.path.clone(),
                    action: op.action.as_str(),
                })?;
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| ApplyError::Io {
                        path: op.path.clone(),
                        action: op.action.as_str(),
                        source,
                    })?;
                }
                std::fs::write(&target, content).map_err(|source| ApplyError::Io {
                    path: op.path.clone(),
                    action: op.action.as_str(),
                    source,
                })?;
                debug!(path = %op.path, bytes = content.len(), action = op.action.as_str(), "wrote file");
            }
        }

        applied += 1;
    }

    info!(applied, "change-set applied");
    Ok(applied)
}

/// Lexically resolve `relative` inside `root`. Absolute paths and any `..`
/// traversal that would leave the root are rejected before touching the
/// filesystem.
fn resolve_within(root: &Path, relative: &str) -> Result<PathBuf, ApplyError> {
    let escape = || ApplyError::PathEscape {
        path: relative.to_string(),
    };

    let path = Path::new(relative);
    if path.is_absolute() {
        return Err(escape());
    }

    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return Err(escape());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }

    Ok(root.join(resolved))
}
