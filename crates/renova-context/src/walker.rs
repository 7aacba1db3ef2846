use std::path::Path;

use renova_core::RepositoryFile;

/// Hard depth limit for the repository walk.
pub const MAX_DEPTH: usize = 4;

/// Global file-count ceiling. A hard cap, not a per-directory quota: early
/// directories can exhaust the budget on very large repositories. Known
/// limitation, accepted for simplicity.
pub const MAX_FILES: usize = 200;

/// Directories never descended into. Hidden entries (leading dot) are pruned
/// separately, which already covers `.git`, `.next`, `.venv` and friends.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    "dist",
    "build",
    "out",
    "__pycache__",
    "vendor",
    "coverage",
];

/// Extensions worth showing to the generation service.
const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "vue", "svelte", "astro", "html", "css", "scss", "sass", "less",
    "json", "md", "mdx", "yml", "yaml", "toml",
];

/// Collect up to [`MAX_FILES`] source files under `root`, depth-bounded and
/// pruned. Paths in the result are relative to `root`.
pub fn collect_files(root: &Path) -> Vec<RepositoryFile> {
    let mut files = Vec::new();
    walk_directory(root, root, 0, &mut files);
    files
}

fn walk_directory(root: &Path, dir: &Path, depth: usize, files: &mut Vec<RepositoryFile>) {
    if depth >= MAX_DEPTH || files.len() >= MAX_FILES {
        return;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        if files.len() >= MAX_FILES {
            return;
        }

        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            if SKIP_DIRS.contains(&name.as_str()) {
                continue;
            }
            walk_directory(root, &path, depth + 1, files);
            continue;
        }

        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(e) => e.to_ascii_lowercase(),
            None => continue,
        };
        if !SOURCE_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(RepositoryFile {
            path: path.strip_prefix(root).unwrap_or(&path).to_path_buf(),
            extension,
            size,
        });
    }
}
