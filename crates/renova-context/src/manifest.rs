use std::path::Path;

use renova_core::Framework;

/// Cap on the dependency-name list sent to the generation service.
pub const MAX_DEPENDENCIES: usize = 40;

/// Fixed priority list mapping dependency names to framework labels. First
/// match wins, so meta-frameworks must precede the libraries they wrap.
const FRAMEWORK_RULES: &[(&str, Framework)] = &[
    ("next", Framework::NextJs),
    ("nuxt", Framework::Nuxt),
    ("@angular/core", Framework::Angular),
    ("astro", Framework::Astro),
    ("svelte", Framework::Svelte),
    ("vue", Framework::Vue),
    ("react", Framework::React),
];

/// The slice of `package.json` this pipeline cares about.
#[derive(Clone, Debug, Default)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
}

/// Parse `package.json` leniently. Any missing or malformed manifest yields
/// `None`; a present manifest with missing fields yields empty options.
pub fn load_manifest(root: &Path) -> Option<Manifest> {
    let raw = std::fs::read_to_string(root.join("package.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;

    let mut dependencies = Vec::new();
    for key in ["dependencies", "devDependencies"] {
        if let Some(map) = value.get(key).and_then(|v| v.as_object()) {
            for name in map.keys() {
                if dependencies.len() >= MAX_DEPENDENCIES {
                    break;
                }
                if !dependencies.contains(name) {
                    dependencies.push(name.clone());
                }
            }
        }
    }

    Some(Manifest {
        name: value.get("name").and_then(|v| v.as_str()).map(String::from),
        description: value
            .get("description")
            .and_then(|v| v.as_str())
            .map(String::from),
        dependencies,
    })
}

/// Pure function over the dependency-name set; no match yields `Unknown`.
pub fn detect_framework(dependencies: &[String]) -> Framework {
    for (name, framework) in FRAMEWORK_RULES {
        if dependencies.iter().any(|d| d == name) {
            return *framework;
        }
    }
    Framework::Unknown
}
