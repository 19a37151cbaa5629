#![deny(missing_docs)]

//! # Route Patterns
//!
//! Scans WordPress route patterns for named capture groups such as
//! `(?P<id>[\d]+)` and rewrites them.
//!
//! Group bodies are regular expressions themselves and may nest groups
//! (`(?P<plugin>[^.\/]+(?:\/[^.\/]+)?)`), so the scanner balances
//! parentheses, skips escapes and ignores parentheses inside character classes.

/// Token that stands in for every capture group when comparing route shapes.
pub const WILDCARD: &str = "*";

/// A named capture group located in a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureGroup<'a> {
    /// Group name.
    pub name: &'a str,
    /// Byte offset of the opening parenthesis.
    pub start: usize,
    /// Byte offset one past the closing parenthesis.
    pub end: usize,
}

/// Finds every named capture group, left to right.
pub fn capture_groups(route: &str) -> Vec<CaptureGroup<'_>> {
    let bytes = route.as_bytes();
    let mut groups = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let Some(name_start) = group_name_start(&bytes[i..]).map(|offset| i + offset) else {
            i += 1;
            continue;
        };
        let Some(name_len) = route[name_start..].find('>') else {
            break;
        };
        let name = &route[name_start..name_start + name_len];
        let end = group_end(bytes, name_start + name_len + 1);

        if !name.is_empty() {
            groups.push(CaptureGroup {
                name,
                start: i,
                end,
            });
        }
        i = end;
    }

    groups
}

/// Returns the offset of the group name if `s` starts with `(?P<` or `(?<`.
fn group_name_start(s: &[u8]) -> Option<usize> {
    if s.starts_with(b"(?P<") {
        Some(4)
    } else if s.starts_with(b"(?<") && !s.starts_with(b"(?<=") && !s.starts_with(b"(?<!") {
        Some(3)
    } else {
        None
    }
}

/// Finds the byte offset one past the `)` closing the group whose body starts at `from`.
/// An unterminated group runs to the end of the route.
fn group_end(bytes: &[u8], from: usize) -> usize {
    let mut depth = 1usize;
    let mut in_class = false;
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class => depth += 1,
            b')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    bytes.len()
}

/// Replaces each capture group with the string returned by `f`.
fn rewrite_groups(route: &str, f: impl Fn(&CaptureGroup<'_>) -> String) -> String {
    let mut out = String::with_capacity(route.len());
    let mut cursor = 0;
    for group in capture_groups(route) {
        out.push_str(&route[cursor..group.start]);
        out.push_str(&f(&group));
        cursor = group.end;
    }
    out.push_str(&route[cursor..]);
    out
}

/// Path parameter names in route order, without duplicates.
pub fn path_param_names(route: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for group in capture_groups(route) {
        if !names.iter().any(|n| n == group.name) {
            names.push(group.name.to_string());
        }
    }
    names
}

/// Rewrites capture groups into `:name` path variables.
///
/// e.g. `/wp/v2/posts/(?P<id>[\d]+)` -> `/wp/v2/posts/:id`
pub fn to_path_template(route: &str) -> String {
    rewrite_groups(route, |group| format!(":{}", group.name))
}

/// Rewrites every capture group into [`WILDCARD`].
///
/// e.g. `/wp/v2/posts/(?P<parent>[\d]+)/revisions` -> `/wp/v2/posts/*/revisions`
pub fn to_wildcard_shape(route: &str) -> String {
    rewrite_groups(route, |_| WILDCARD.to_string())
}

/// True when the route has at least one capture group.
pub fn has_capture_group(route: &str) -> bool {
    !capture_groups(route).is_empty()
}

/// True when the route's final segment is a capture group.
pub fn ends_with_capture_group(route: &str) -> bool {
    let trimmed = route.trim_end_matches('/');
    capture_groups(trimmed)
        .last()
        .is_some_and(|group| group.end == trimmed.len())
}
