//! Slash-delimited path keys for the virtual file store.
//!
//! All comparisons are exact and case-sensitive, and every relationship
//! (parent, ancestor, rebase) is computed on whole segments so that `step1`
//! never matches `step10`.

pub const SEPARATOR: char = '/';

/// Trims surrounding separators and collapses empty segments.
pub fn normalize(path: &str) -> String {
    join(segments(path))
}

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty())
}

pub fn join<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for seg in segments {
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(seg);
    }
    out
}

/// Parent of a normalized path; `None` for top-level entries and the root.
pub fn parent(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|idx| &path[..idx])
}

/// Last segment of a normalized path.
pub fn name(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Composes `parent/name`; the root is the empty string.
pub fn child(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

/// Strict, segment-wise ancestor test. The root `""` is an ancestor of every
/// non-root path.
pub fn is_ancestor(ancestor: &str, path: &str) -> bool {
    if ancestor.is_empty() {
        return !path.is_empty();
    }
    let mut outer = segments(ancestor);
    let mut inner = segments(path);
    loop {
        match (outer.next(), inner.next()) {
            (Some(a), Some(b)) if a == b => continue,
            (Some(_), _) => return false,
            (None, Some(_)) => return true,
            (None, None) => return false,
        }
    }
}

/// Re-roots `path` from `from` onto `to` when `path` is `from` itself or lies
/// beneath it.
pub fn rebase(path: &str, from: &str, to: &str) -> Option<String> {
    if path == from {
        return Some(to.to_string());
    }
    if !is_ancestor(from, path) {
        return None;
    }
    let depth = segments(from).count();
    let rest: Vec<&str> = segments(path).skip(depth).collect();
    Some(join(segments(to).chain(rest)))
}

/// Extension of a file name, without the dot. Leading-dot names such as
/// `.env` have no extension.
pub fn extension(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}

pub fn depth(path: &str) -> usize {
    segments(path).count()
}

#[cfg(test)]
#[path = "../../tests/unit/models/path_key.rs"]
mod tests;
