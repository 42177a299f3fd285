use crate::PatchError;

/// Splits a JSON Pointer into its unescaped reference tokens.
///
/// The empty string addresses the whole document and yields no tokens. Any
/// other pointer must start with `/`, and `~` may only appear as `~0` or `~1`.
pub fn parse_pointer(pointer: &str) -> Result<Vec<String>, PatchError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }

    let invalid = || PatchError::InvalidPointer {
        pointer: pointer.to_string(),
    };
    pointer
        .strip_prefix('/')
        .ok_or_else(invalid)?
        .split('/')
        .map(|segment| unescape_segment(segment).ok_or_else(invalid))
        .collect()
}

fn unescape_segment(segment: &str) -> Option<String> {
    let mut s = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '~' => match chars.next()? {
                '0' => s.push('~'),
                '1' => s.push('/'),
                _ => return None,
            },
            ch => s.push(ch),
        }
    }

    Some(s)
}
