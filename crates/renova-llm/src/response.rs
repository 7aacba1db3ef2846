//! Change-set recovery from free-text generation responses.
//!
//! The service is asked for a bare JSON array but routinely wraps it in
//! prose or a code fence. This is the most fragile boundary in the pipeline,
//! so it gets its own named failure kinds instead of a generic parse error.

use renova_core::ChangeSet;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// No syntactically valid top-level JSON array anywhere in the text.
    #[error("no change-set array found in response")]
    MissingChangeSet,

    /// An array was found but does not match the change-set wire shape.
    #[error("change-set array does not match the expected schema: {0}")]
    InvalidChangeSet(String),

    /// A create/modify operation arrived without replacement content.
    #[error("operation for {path} is missing content")]
    MissingContent { path: String },
}

/// Locate the first syntactically valid top-level JSON array in `text` and
/// parse it as a change-set.
///
/// The first valid array is authoritative: if it parses as JSON but not as a
/// change-set, that is an [`InvalidChangeSet`](ResponseError::InvalidChangeSet)
/// error rather than a cue to keep scanning, since silently skipping it would
/// mask format drift in the generation service.
pub fn extract_change_set(text: &str) -> Result<ChangeSet, ResponseError> {
    let candidate = first_json_array(text).ok_or(ResponseError::MissingChangeSet)?;

    let changes: ChangeSet = serde_json::from_str(candidate)
        .map_err(|e| ResponseError::InvalidChangeSet(e.to_string()))?;

    for op in &changes {
        if op.requires_content() && op.content.is_none() {
            return Err(ResponseError::MissingContent {
                path: op.path.clone(),
            });
        }
    }

    Ok(changes)
}

/// Scan for the first balanced `[...]` slice that is valid JSON. Bracket
/// matching is string- and escape-aware so brackets inside file content do
/// not derail it.
fn first_json_array(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('[') {
        let start = search_from + offset;
        if let Some(end) = balanced_array_end(bytes, start) {
            let slice = &text[start..=end];
            if serde_json::from_str::<serde_json::Value>(slice)
                .map(|v| v.is_array())
                .unwrap_or(false)
            {
                return Some(slice);
            }
        }
        search_from = start + 1;
    }

    None
}

/// Index of the `]` closing the array opened at `start`, or `None` if the
/// array never closes.
fn balanced_array_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'[' | b'{' => depth += 1,
            b']' | b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return if b == b']' { Some(i) } else { None };
                }
            }
            _ => {}
        }
    }

    None
}
