//! Canonical endpoint paths.
//!
//! Registry keys are built from these paths, so the function must stay pure:
//! the same `(version, root, url)` always yields the same string.

/// Build `/v<version>/<root>/<url>` (or `/<root>/<url>` without a version).
///
/// Repeated separators collapse, trailing separators are dropped and the
/// result always starts with exactly one `/`. A version already written as
/// `v1` is not prefixed again.
pub fn canonicalize(version: &str, root: &str, url: &str) -> String {
    let version = version.trim_matches('/');
    let version = if version.is_empty() || version.starts_with(['v', 'V']) {
        version.to_string()
    } else {
        format!("v{version}")
    };

    let mut path = String::with_capacity(version.len() + root.len() + url.len() + 3);
    for segment in [version.as_str(), root, url]
        .into_iter()
        .flat_map(|part| part.split('/'))
        .filter(|segment| !segment.is_empty())
    {
        path.push('/');
        path.push_str(segment);
    }

    if path.is_empty() {
        path.push('/');
    }
    path
}

/// Join two url fragments with a single separator, ignoring empty ones.
pub fn join_segments(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    match (base.is_empty(), segment.is_empty()) {
        (true, _) => segment.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base}/{segment}"),
    }
}
