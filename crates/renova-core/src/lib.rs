pub mod changes;
pub mod context;
pub mod webhook;

pub use changes::{ChangeSet, FileAction, FileOperation};
pub use context::{
    BrandingContext, BrandingSlot, BrandingSnippet, Framework, GenerationContext, RepositoryFile,
};
pub use webhook::{JobStatus, RunInfo, WebhookPayload};
