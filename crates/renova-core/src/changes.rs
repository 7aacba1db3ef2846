use serde::{Deserialize, Serialize};

/// What a single operation does to its target path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Create,
    Modify,
    Delete,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

/// One file edit returned by the generation service.
///
/// `content` is the complete post-edit file, never a diff. It is required for
/// create/modify and ignored for delete.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileOperation {
    pub path: String,
    pub action: FileAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileOperation {
    /// Create/modify operations must carry replacement content.
    pub fn requires_content(&self) -> bool {
        matches!(self.action, FileAction::Create | FileAction::Modify)
    }
}

/// Ordered list of file operations, applied sequentially in response order.
/// Duplicate paths are allowed; the last write for a path wins.
pub type ChangeSet = Vec<FileOperation>;
