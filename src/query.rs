//! Dot-separated paths into a document, e.g. `fuga.0`.

use arbor::{AccessError, Value};

/// Walk `path` from `root`. A segment that is a decimal number indexes into an array; every other
/// segment (and a numeric one applied to an object) is an object key. The empty path selects
/// `root` itself.
pub fn select<'v>(root: &'v Value, path: &str) -> Result<&'v Value, AccessError> {
    if path.is_empty() {
        return Ok(root);
    }

    path.split('.')
        .try_fold(root, |node, segment| match segment.parse::<usize>() {
            Ok(index) if node.is_array() => node.get(index),
            _ => node.get(segment),
        })
}
