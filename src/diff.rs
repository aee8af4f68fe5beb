//! Unified diff rendering for overwrite previews

use similar::TextDiff;

/// Render a unified diff between on-disk content and incoming content
///
/// Returns an empty string when the two sides are identical. The header
/// labels the sides `a/<name>` and `b/<name>` like git does.
pub fn unified_diff(old: &str, new: &str, name: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", name), &format!("b/{}", name))
        .to_string()
}
