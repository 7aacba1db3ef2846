use std::path::Path;

/// A defensive file read: capped content plus whether the cap was hit.
#[derive(Clone, Debug)]
pub struct CappedRead {
    pub content: String,
    pub truncated: bool,
}

/// Truncate `content` to at most `max_bytes` of the original text, cut at a
/// char boundary, with a marker showing original vs kept size.
pub fn truncate_content(content: &str, max_bytes: usize) -> CappedRead {
    if content.len() <= max_bytes {
        return CappedRead {
            content: content.to_string(),
            truncated: false,
        };
    }
    let boundary = floor_char_boundary(content, max_bytes);
    CappedRead {
        content: format!(
            "{}\n\n[truncated: {} bytes -> {} bytes]",
            &content[..boundary],
            content.len(),
            boundary
        ),
        truncated: true,
    }
}

/// Read a file with a byte cap. Returns `None` for nonexistent or unreadable
/// files — extraction degrades instead of failing.
pub fn read_capped(path: &Path, max_bytes: usize) -> Option<CappedRead> {
    let content = std::fs::read_to_string(path).ok()?;
    Some(truncate_content(&content, max_bytes))
}

/// Largest index <= `index` that lies on a UTF-8 char boundary.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
