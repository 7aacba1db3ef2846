use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A file discovered during the repository walk. Path is relative to the
/// repository root; the file itself is not read at collection time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepositoryFile {
    pub path: PathBuf,
    pub extension: String,
    pub size: u64,
}

/// Named extraction targets used to preserve visual/identity consistency in
/// generated edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandingSlot {
    Identity,
    Theme,
    GlobalStyles,
    Layout,
    Navigation,
    Homepage,
}

impl BrandingSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Theme => "theme",
            Self::GlobalStyles => "global_styles",
            Self::Layout => "layout",
            Self::Navigation => "navigation",
            Self::Homepage => "homepage",
        }
    }
}

/// Extracted content for one slot, with provenance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrandingSnippet {
    pub slot: BrandingSlot,
    pub source: PathBuf,
    pub content: String,
    pub truncated: bool,
}

/// Best-effort branding signal. Every slot is optional; an empty context is
/// valid and must not fail the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BrandingContext {
    snippets: Vec<BrandingSnippet>,
}

impl BrandingContext {
    pub fn push(&mut self, snippet: BrandingSnippet) {
        self.snippets.push(snippet);
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandingSnippet> {
        self.snippets.iter()
    }

    /// Snippets extracted for a given slot, in extraction order.
    pub fn slot(&self, slot: BrandingSlot) -> impl Iterator<Item = &BrandingSnippet> {
        self.snippets.iter().filter(move |s| s.slot == slot)
    }
}

/// Detected frontend framework. Only ever narrows the branding instructions
/// given to the generation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    NextJs,
    Nuxt,
    React,
    Vue,
    Svelte,
    Angular,
    Astro,
    #[default]
    Unknown,
}

impl Framework {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NextJs => "Next.js",
            Self::Nuxt => "Nuxt",
            Self::React => "React",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
            Self::Angular => "Angular",
            Self::Astro => "Astro",
            Self::Unknown => "Unknown",
        }
    }
}

/// The bounded repository summary handed to the generation call.
///
/// Size is controlled per field at build time (file-count cap, dependency
/// cap, per-slot byte caps) so no single oversized input starves the rest of
/// the budget.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GenerationContext {
    pub files: Vec<RepositoryFile>,
    pub framework: Framework,
    pub dependencies: Vec<String>,
    pub branding: BrandingContext,
}
