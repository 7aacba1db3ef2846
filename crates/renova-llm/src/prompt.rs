//! Prompt composition from the extracted repository context.

use renova_core::{Framework, GenerationContext};

/// System prompt: role, output contract, and the branding ground rules.
pub fn system_prompt(framework: Framework) -> String {
    let mut sections = vec![
        "You are an expert web developer making precise edits to an existing repository."
            .to_string(),
        "Respond with a single JSON array of file operations and nothing else. \
         Each element is {\"path\": string, \"action\": \"create\"|\"modify\"|\"delete\", \
         \"content\": string}. `content` is the complete post-edit file (never a diff) and is \
         required for create and modify. Paths are relative to the repository root."
            .to_string(),
        "Match the repository's existing visual identity: reuse its theme tokens, global \
         styles, layout structure and navigation patterns rather than inventing new ones."
            .to_string(),
    ];

    if framework != Framework::Unknown {
        sections.push(format!(
            "The repository is a {} project; keep edits idiomatic for it.",
            framework.label()
        ));
    }

    sections.join("\n\n")
}

/// User prompt: the change request plus the bounded repository summary.
/// In fix mode the request is a build-failure description and instructions
/// bias toward minimal corrective edits.
pub fn user_prompt(request: &str, context: &GenerationContext, fix_mode: bool) -> String {
    let mut sections = Vec::new();

    if fix_mode {
        sections.push(format!(
            "The previous changes broke the build. Failure output:\n\n{request}\n\n\
             Make the smallest set of corrective edits that fixes the build. Do not add \
             features or restructure unrelated code."
        ));
    } else {
        sections.push(format!("Change request:\n\n{request}"));
    }

    sections.push(format!("Detected framework: {}", context.framework.label()));

    if !context.dependencies.is_empty() {
        sections.push(format!("Dependencies: {}", context.dependencies.join(", ")));
    }

    for snippet in context.branding.iter() {
        sections.push(format!(
            "<branding slot=\"{}\" source=\"{}\">\n{}\n</branding>",
            snippet.slot.as_str(),
            snippet.source.display(),
            snippet.content
        ));
    }

    if !context.files.is_empty() {
        let listing: Vec<String> = context
            .files
            .iter()
            .map(|f| format!("{} ({} bytes)", f.path.display(), f.size))
            .collect();
        sections.push(format!("Repository files:\n{}", listing.join("\n")));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_core::{BrandingSlot, BrandingSnippet, RepositoryFile};
    use std::path::PathBuf;

    fn context() -> GenerationContext {
        let mut ctx = GenerationContext {
            framework: Framework::NextJs,
            dependencies: vec!["next".into(), "react".into()],
            ..Default::default()
        };
        ctx.files.push(RepositoryFile {
            path: PathBuf::from("app/page.tsx"),
            extension: "tsx".into(),
            size: 120,
        });
        ctx.branding.push(BrandingSnippet {
            slot: BrandingSlot::Theme,
            source: PathBuf::from("tailwind.config.js"),
            content: "module.exports = {}".into(),
            truncated: false,
        });
        ctx
    }

    #[test]
    fn system_prompt_describes_output_contract() {
        let system = system_prompt(Framework::NextJs);
        assert!(system.contains("JSON array"));
        assert!(system.contains("\"create\"|\"modify\"|\"delete\""));
        assert!(system.contains("Next.js"));
    }

    #[test]
    fn unknown_framework_is_not_named() {
        let system = system_prompt(Framework::Unknown);
        assert!(!system.contains("Unknown project"));
    }

    #[test]
    fn user_prompt_includes_context_sections() {
        let prompt = user_prompt("Add a pricing page", &context(), false);
        assert!(prompt.contains("Change request:\n\nAdd a pricing page"));
        assert!(prompt.contains("Detected framework: Next.js"));
        assert!(prompt.contains("Dependencies: next, react"));
        assert!(prompt.contains("<branding slot=\"theme\" source=\"tailwind.config.js\">"));
        assert!(prompt.contains("app/page.tsx (120 bytes)"));
    }

    #[test]
    fn fix_mode_biases_toward_minimal_edits() {
        let prompt = user_prompt("error TS2304: Cannot find name 'foo'", &context(), true);
        assert!(prompt.contains("broke the build"));
        assert!(prompt.contains("smallest set of corrective edits"));
        assert!(!prompt.contains("Change request:"));
    }

    #[test]
    fn empty_context_still_produces_a_prompt() {
        let prompt = user_prompt("Add a page", &GenerationContext::default(), false);
        assert!(prompt.contains("Detected framework: Unknown"));
        assert!(!prompt.contains("Dependencies:"));
        assert!(!prompt.contains("Repository files:"));
    }
}
