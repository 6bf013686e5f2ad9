//! Path glob matching for history filtering.
//!
//! Patterns have the shape `<dir>/<namespace|*>/<name|*>`; `*` inside a
//! segment matches any run of characters within that segment, never across a
//! `/`. Segment counts must agree, so a three-segment pattern does not match
//! a cluster-scoped two-segment path.

/// Build the glob pattern for a `(resource, namespace, name)` query triple.
/// Empty fields widen to `*`.
pub fn path_pattern(resource: &str, namespace: &str, name: &str) -> String {
    let star = |s: &str| {
        if s.is_empty() {
            "*".to_string()
        } else {
            s.to_string()
        }
    };
    format!("{}/{}/{}", star(resource), star(namespace), star(name))
}

/// Match `path` against `pattern`, segment by segment.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return false;
    }
    pattern_segments
        .iter()
        .zip(path_segments.iter())
        .all(|(pat, seg)| segment_match(pat, seg))
}

/// Match one segment: literal characters plus `*` wildcards.
fn segment_match(pattern: &str, segment: &str) -> bool {
    // Split on '*'; the pieces must appear in order, with the first anchored
    // at the start and the last at the end.
    let pieces: Vec<&str> = pattern.split('*').collect();
    if pieces.len() == 1 {
        return pattern == segment;
    }
    let mut rest = segment;
    for (i, piece) in pieces.iter().enumerate() {
        if piece.is_empty() {
            continue;
        }
        if i == 0 {
            match rest.strip_prefix(piece) {
                Some(r) => rest = r,
                None => return false,
            }
        } else if i == pieces.len() - 1 {
            return rest.ends_with(piece);
        } else {
            match rest.find(piece) {
                Some(at) => rest = &rest[at + piece.len()..],
                None => return false,
            }
        }
    }
    // Pattern ends with '*' (last piece empty): anything left matches.
    true
}
