//! Textual start-tag truncation of finished paths.
//!
//! Legacy alternative to rooted traversal: a full path is cut at the first
//! segment whose local name matches the start tag and re-prefixed with `//`.

use crate::xml::{local_name, tag_matches_ignore_case};

/// Split a path into segments.
///
/// Slashes inside predicate brackets or quoted values do not split, so
/// `d:a[@href="x/y"]` stays one segment. Leading slashes are dropped.
///
/// # Examples
/// ```
/// use leafpath::path::split_segments;
///
/// let segments = split_segments(r#"/d:a[1]/d:b[@href="x/y"][2]"#);
/// assert_eq!(segments, vec!["d:a[1]", r#"d:b[@href="x/y"][2]"#]);
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut start = 0;

    for (i, ch) in path.char_indices() {
        match ch {
            // An escaped quote ("") toggles twice and leaves the state unchanged
            '"' if depth > 0 => in_quotes = !in_quotes,
            '[' if !in_quotes => depth += 1,
            ']' if !in_quotes => depth = depth.saturating_sub(1),
            '/' if depth == 0 && !in_quotes => {
                if i > start {
                    segments.push(&path[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < path.len() {
        segments.push(&path[start..]);
    }

    segments
}

/// Name part of a segment (everything before the first predicate).
fn segment_name(segment: &str) -> &str {
    segment
        .split_once('[')
        .map_or(segment, |(name, _)| name)
}

fn qualify_segment(segment: &str, namespace: &str) -> String {
    if namespace.is_empty() || segment_name(segment).contains(':') {
        segment.to_string()
    } else {
        format!("{namespace}:{segment}")
    }
}

/// Re-root a path at the first segment whose local name is `start_tag`.
///
/// Exact matches win over case-insensitive ones. Segments without a prefix
/// receive `namespace`. A path without a matching segment is returned
/// unchanged.
///
/// # Examples
/// ```
/// use leafpath::path::truncate_path;
///
/// let path = r#"/d:root[1]/d:body[1]/d:p[d:p="x"][1]"#;
/// assert_eq!(truncate_path(path, "body", "d"), r#"//d:body[1]/d:p[d:p="x"][1]"#);
/// assert_eq!(truncate_path(path, "missing", "d"), path);
/// ```
pub fn truncate_path(path: &str, start_tag: &str, namespace: &str) -> String {
    let wanted = local_name(start_tag);
    let segments = split_segments(path);

    let position = segments
        .iter()
        .position(|segment| local_name(segment_name(segment)) == wanted)
        .or_else(|| {
            segments.iter().position(|segment| {
                tag_matches_ignore_case(local_name(segment_name(segment)), wanted)
            })
        });

    let Some(position) = position else {
        return path.to_string();
    };

    let rebuilt: Vec<String> = segments[position..]
        .iter()
        .map(|segment| qualify_segment(segment, namespace))
        .collect();

    format!("//{}", rebuilt.join("/"))
}
