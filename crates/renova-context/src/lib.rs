//! Repository context extraction.
//!
//! Walks an arbitrary repository, applies inclusion and priority rules, and
//! produces a bounded [`GenerationContext`] for the generation call. Every
//! read is defensive: the worst case for a hostile or empty repository is an
//! impoverished context, never a failure.

pub mod manifest;
pub mod slots;
pub mod truncate;
pub mod walker;

use std::path::Path;

use renova_core::{BrandingSlot, BrandingSnippet, GenerationContext};
use tracing::info;

use crate::truncate::{read_capped, truncate_content};

/// Byte cap for the identity slot (manifest summary or readme prefix).
const IDENTITY_CAP: usize = 4000;

const README_CANDIDATES: &[&str] = &["README.md", "README", "readme.md", "README.txt"];

/// Build the generation context for the repository at `root`.
///
/// Never fails: a malformed or empty repository yields an empty file list,
/// `Unknown` framework and absent branding slots.
pub fn extract_context(root: &Path) -> GenerationContext {
    let files = walker::collect_files(root);
    let manifest = manifest::load_manifest(root);

    let dependencies = manifest
        .as_ref()
        .map(|m| m.dependencies.clone())
        .unwrap_or_default();
    let framework = manifest::detect_framework(&dependencies);

    let mut branding = slots::extract_branding(root, &files);
    if let Some(identity) = extract_identity(root, manifest.as_ref()) {
        branding.push(identity);
    }

    info!(
        files = files.len(),
        framework = framework.label(),
        dependencies = dependencies.len(),
        branding_slots = branding.len(),
        "context extracted"
    );

    GenerationContext {
        files,
        framework,
        dependencies,
        branding,
    }
}

/// Identity comes from the manifest name/description when present, else from
/// a top-level readme prefix.
fn extract_identity(root: &Path, manifest: Option<&manifest::Manifest>) -> Option<BrandingSnippet> {
    if let Some(m) = manifest {
        let mut parts = Vec::new();
        if let Some(name) = &m.name {
            parts.push(format!("name: {name}"));
        }
        if let Some(description) = &m.description {
            parts.push(format!("description: {description}"));
        }
        if !parts.is_empty() {
            // A manifest description can be arbitrarily large; the identity
            // slot keeps the same byte cap as the readme fallback.
            let read = truncate_content(&parts.join("\n"), IDENTITY_CAP);
            return Some(BrandingSnippet {
                slot: BrandingSlot::Identity,
                source: "package.json".into(),
                content: read.content,
                truncated: read.truncated,
            });
        }
    }

    for candidate in README_CANDIDATES {
        if let Some(read) = read_capped(&root.join(candidate), IDENTITY_CAP) {
            return Some(BrandingSnippet {
                slot: BrandingSlot::Identity,
                source: (*candidate).into(),
                content: read.content,
                truncated: read.truncated,
            });
        }
    }

    None
}
