use std::path::Path;

use renova_core::{BrandingContext, BrandingSlot, BrandingSnippet, RepositoryFile};
use tracing::debug;

use crate::truncate::read_capped;

/// How a candidate pattern is matched.
#[derive(Clone, Copy, Debug)]
enum MatchKind {
    /// Exact path relative to the repository root.
    ExactPath,
    /// Case-insensitive substring of the file stem, checked against the
    /// collected file list.
    StemFragment,
}

/// One slot's extraction rule: an ordered candidate list plus its budget.
/// The rule table is data so the priority/tie-break order is independently
/// testable per slot.
struct SlotRule {
    slot: BrandingSlot,
    kind: MatchKind,
    candidates: &'static [&'static str],
    max_matches: usize,
    byte_cap: usize,
    /// Maximum directory depth below the root, if restricted.
    max_depth: Option<usize>,
}

const THEME_CANDIDATES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.ts",
    "tailwind.config.mjs",
    "tailwind.config.cjs",
    "theme.config.js",
    "theme.config.ts",
    "theme.json",
    "src/theme.ts",
    "src/theme.js",
];

const GLOBAL_STYLE_CANDIDATES: &[&str] = &[
    "app/globals.css",
    "src/app/globals.css",
    "styles/globals.css",
    "src/styles/globals.css",
    "src/index.css",
    "src/global.css",
    "src/styles/main.scss",
    "css/style.css",
    "style.css",
];

const LAYOUT_CANDIDATES: &[&str] = &[
    "app/layout.tsx",
    "app/layout.jsx",
    "src/app/layout.tsx",
    "src/app/layout.jsx",
    "src/layouts/Layout.astro",
    "src/routes/+layout.svelte",
    "layouts/default.vue",
    "src/components/Layout.tsx",
    "components/Layout.tsx",
    "src/App.tsx",
    "src/App.jsx",
    "src/App.vue",
];

const NAVIGATION_FRAGMENTS: &[&str] = &["navbar", "navigation", "header", "menu", "sidebar"];

const HOMEPAGE_CANDIDATES: &[&str] = &[
    "app/page.tsx",
    "app/page.jsx",
    "src/app/page.tsx",
    "pages/index.tsx",
    "pages/index.js",
    "src/pages/index.tsx",
    "src/pages/index.js",
    "src/pages/index.astro",
    "src/routes/+page.svelte",
    "index.html",
];

/// Ordered rule table. Identity is handled separately (manifest first, then
/// readme fallback) in `extract_context`.
const SLOT_RULES: &[SlotRule] = &[
    SlotRule {
        slot: BrandingSlot::Theme,
        kind: MatchKind::ExactPath,
        candidates: THEME_CANDIDATES,
        max_matches: 1,
        byte_cap: 4000,
        max_depth: None,
    },
    SlotRule {
        slot: BrandingSlot::GlobalStyles,
        kind: MatchKind::ExactPath,
        candidates: GLOBAL_STYLE_CANDIDATES,
        max_matches: 1,
        byte_cap: 4000,
        max_depth: None,
    },
    SlotRule {
        slot: BrandingSlot::Layout,
        kind: MatchKind::ExactPath,
        candidates: LAYOUT_CANDIDATES,
        max_matches: 2,
        byte_cap: 6000,
        max_depth: None,
    },
    SlotRule {
        slot: BrandingSlot::Navigation,
        kind: MatchKind::StemFragment,
        candidates: NAVIGATION_FRAGMENTS,
        max_matches: 2,
        byte_cap: 4000,
        max_depth: None,
    },
    SlotRule {
        slot: BrandingSlot::Homepage,
        kind: MatchKind::ExactPath,
        candidates: HOMEPAGE_CANDIDATES,
        max_matches: 1,
        byte_cap: 6000,
        // Avoid picking a nested route page as the homepage.
        max_depth: Some(2),
    },
];

/// Run the ordered rule table against the repository. Best-effort: slots with
/// no readable match are simply absent.
pub fn extract_branding(root: &Path, files: &[RepositoryFile]) -> BrandingContext {
    let mut branding = BrandingContext::default();

    for rule in SLOT_RULES {
        let mut matched = 0usize;
        for &candidate in rule.candidates {
            if matched >= rule.max_matches {
                break;
            }
            match rule.kind {
                MatchKind::ExactPath => {
                    if let Some(snippet) = try_exact(root, candidate, rule) {
                        matched += 1;
                        branding.push(snippet);
                    }
                }
                MatchKind::StemFragment => {
                    for file in files {
                        if matched >= rule.max_matches {
                            break;
                        }
                        if !stem_matches(&file.path, candidate) {
                            continue;
                        }
                        if branding.slot(rule.slot).any(|s| s.source == file.path) {
                            continue;
                        }
                        if let Some(read) = read_capped(&root.join(&file.path), rule.byte_cap) {
                            matched += 1;
                            debug!(slot = rule.slot.as_str(), source = %file.path.display(), "slot populated");
                            branding.push(BrandingSnippet {
                                slot: rule.slot,
                                source: file.path.clone(),
                                content: read.content,
                                truncated: read.truncated,
                            });
                        }
                    }
                }
            }
        }
    }

    branding
}

fn try_exact(root: &Path, candidate: &str, rule: &SlotRule) -> Option<BrandingSnippet> {
    if let Some(max_depth) = rule.max_depth {
        // Depth counts directories only; "src/app/page.tsx" sits at depth 2.
        if Path::new(candidate).components().count() > max_depth + 1 {
            return None;
        }
    }
    let path = root.join(candidate);
    let read = read_capped(&path, rule.byte_cap)?;
    debug!(slot = rule.slot.as_str(), source = candidate, "slot populated");
    Some(BrandingSnippet {
        slot: rule.slot,
        source: candidate.into(),
        content: read.content,
        truncated: read.truncated,
    })
}

fn stem_matches(path: &Path, fragment: &str) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase().contains(fragment))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::collect_files;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("renova_slots_{}", uuid::Uuid::now_v7()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn empty_repository_has_empty_branding() {
        let dir = temp_dir();
        let branding = extract_branding(&dir, &[]);
        assert!(branding.is_empty());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn first_theme_candidate_wins() {
        let dir = temp_dir();
        fs::write(dir.join("tailwind.config.js"), "module.exports = {}").unwrap();
        fs::write(dir.join("theme.json"), "{}").unwrap();

        let branding = extract_branding(&dir, &[]);
        let themes: Vec<_> = branding.slot(BrandingSlot::Theme).collect();
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].source, PathBuf::from("tailwind.config.js"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn layout_collects_up_to_two() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("app")).unwrap();
        fs::create_dir_all(dir.join("src/components")).unwrap();
        fs::create_dir_all(dir.join("components")).unwrap();
        fs::write(dir.join("app/layout.tsx"), "a").unwrap();
        fs::write(dir.join("src/components/Layout.tsx"), "b").unwrap();
        fs::write(dir.join("components/Layout.tsx"), "c").unwrap();

        let branding = extract_branding(&dir, &[]);
        assert_eq!(branding.slot(BrandingSlot::Layout).count(), 2);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn navigation_matches_stem_fragments() {
        let dir = temp_dir();
        let comp = dir.join("src").join("components");
        fs::create_dir_all(&comp).unwrap();
        fs::write(comp.join("NavBar.tsx"), "export const NavBar = () => null").unwrap();
        fs::write(comp.join("SiteHeader.tsx"), "export const SiteHeader = () => null").unwrap();
        fs::write(comp.join("Button.tsx"), "export const Button = () => null").unwrap();

        let files = collect_files(&dir);
        let branding = extract_branding(&dir, &files);

        let nav: Vec<_> = branding.slot(BrandingSlot::Navigation).collect();
        assert_eq!(nav.len(), 2);
        assert!(nav.iter().all(|s| !s.source.ends_with("Button.tsx")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn navigation_does_not_duplicate_one_file() {
        let dir = temp_dir();
        let comp = dir.join("components");
        fs::create_dir_all(&comp).unwrap();
        // Stem matches both "navbar" and "header" fragments? No single word
        // does, but "NavigationMenu" matches "navigation" and "menu".
        fs::write(comp.join("NavigationMenu.tsx"), "x").unwrap();

        let files = collect_files(&dir);
        let branding = extract_branding(&dir, &files);
        assert_eq!(branding.slot(BrandingSlot::Navigation).count(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn homepage_prefers_earlier_candidate() {
        let dir = temp_dir();
        fs::create_dir_all(dir.join("app")).unwrap();
        fs::create_dir_all(dir.join("pages")).unwrap();
        fs::write(dir.join("app/page.tsx"), "app router").unwrap();
        fs::write(dir.join("pages/index.tsx"), "pages router").unwrap();

        let branding = extract_branding(&dir, &[]);
        let home: Vec<_> = branding.slot(BrandingSlot::Homepage).collect();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].content, "app router");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn depth_restriction_rejects_nested_route_pages() {
        let dir = temp_dir();
        let nested = dir.join("app").join("blog").join("post");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("page.tsx"), "nested route").unwrap();

        let rule = SlotRule {
            slot: BrandingSlot::Homepage,
            kind: MatchKind::ExactPath,
            candidates: &[],
            max_matches: 1,
            byte_cap: 6000,
            max_depth: Some(2),
        };
        assert!(try_exact(&dir, "app/blog/post/page.tsx", &rule).is_none());
        // Within the depth limit the same rule matches.
        fs::create_dir_all(dir.join("app")).unwrap();
        fs::write(dir.join("app/page.tsx"), "home").unwrap();
        assert!(try_exact(&dir, "app/page.tsx", &rule).is_some());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn oversized_slot_file_is_truncated() {
        let dir = temp_dir();
        fs::write(dir.join("style.css"), "c".repeat(10_000)).unwrap();

        let branding = extract_branding(&dir, &[]);
        let styles: Vec<_> = branding.slot(BrandingSlot::GlobalStyles).collect();
        assert_eq!(styles.len(), 1);
        assert!(styles[0].truncated);
        assert!(styles[0].content.contains("[truncated: 10000 bytes -> 4000 bytes]"));

        fs::remove_dir_all(&dir).ok();
    }
}
