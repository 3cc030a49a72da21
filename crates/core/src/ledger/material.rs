//! Material name normalization for grouping.
//!
//! Every place that groups deliveries by material goes through
//! [`normalize_material`] so summary cards and statements agree on buckets.

/// Bucket for deliveries with no material name.
pub const UNSPECIFIED_MATERIAL: &str = "unspecified";

/// Grade prefix written both as "سن1" and "سن 1".
const GRADE_PREFIX: &str = "سن";

/// Canonical grouping key for a material name.
///
/// Trims and collapses whitespace, then splits a compact grade such as
/// `"سن1"` into `"سن 1"`. Blank names map to [`UNSPECIFIED_MATERIAL`].
#[must_use]
pub fn normalize_material(name: &str) -> String {
    let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return UNSPECIFIED_MATERIAL.to_string();
    }

    if let Some(rest) = collapsed.strip_prefix(GRADE_PREFIX)
        && rest.chars().next().is_some_and(|c| c.is_ascii_digit())
    {
        return format!("{GRADE_PREFIX} {rest}");
    }

    collapsed
}
