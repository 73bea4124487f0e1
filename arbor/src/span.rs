use std::ops::Range;

/// A [`Span`] represents a contiguous region of the input, as a half-open range of byte offsets.
/// It points a [`ParseError`][crate::ParseError] at the part of the source that caused it. An
/// invariant to be maintained is that `lo <= hi`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Span {
    /// Construct a new span. Will panic if `lo > hi`. Prefer this constructor to construct a new
    /// [`Span`] over using direct struct initialization.
    pub const fn new(lo: usize, hi: usize) -> Self {
        assert!(lo <= hi, "`lo` must not be larger than `hi`");
        Span { lo, hi }
    }

    /// The same region as a range of `char` offsets into `src`, for consumers that count
    /// characters rather than bytes. Bounds past the end or inside a multi-byte character are
    /// clamped like [`Location::of`] clamps them.
    pub fn char_range(self, src: &str) -> Range<usize> {
        let to_char = |offset| src[..floor_char_boundary(src, offset)].chars().count();
        to_char(self.lo)..to_char(self.hi)
    }
}

/// The greatest `char` boundary in `src` at or before `offset`.
fn floor_char_boundary(src: &str, offset: usize) -> usize {
    let mut offset = offset.min(src.len());
    while !src.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// A 1-based line and column. Columns count `char`s, not bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Resolve a byte offset into `src`. Offsets past the end (or inside a multi-byte character)
    /// are clamped to the nearest preceding character boundary.
    pub fn of(src: &str, offset: usize) -> Self {
        let before = &src[..floor_char_boundary(src, offset)];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        let column = before[line_start..].chars().count() + 1;
        Location { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_of_first_byte() {
        assert_eq!(Location::of("[1, 2]", 0), Location { line: 1, column: 1 });
    }

    #[test]
    fn location_after_newlines() {
        let src = "{\n  \"a\": 1,\n  \"b\": x\n}";
        let offset = src.find('x').unwrap();
        assert_eq!(Location::of(src, offset), Location { line: 3, column: 8 });
    }

    #[test]
    fn location_counts_chars_not_bytes() {
        let src = "\"été\" x";
        let offset = src.find('x').unwrap();
        assert_eq!(Location::of(src, offset), Location { line: 1, column: 7 });
    }

    #[test]
    fn location_clamps_out_of_range_offsets() {
        assert_eq!(Location::of("ab", 99), Location { line: 1, column: 3 });
    }

    #[test]
    fn char_range_counts_chars() {
        let src = "[\"日本\", x]";
        let lo = src.find('x').unwrap();
        assert_eq!(Span::new(lo, lo + 1).char_range(src), 6..7);
        assert_eq!(Span::new(0, 1).char_range(src), 0..1);
    }

    #[test]
    fn char_range_clamps() {
        assert_eq!(Span::new(1, 10).char_range("ab"), 1..2);
        // Byte 2 is inside the two-byte `é`.
        assert_eq!(Span::new(2, 3).char_range("\"é\""), 1..2);
    }

    #[test]
    #[should_panic]
    fn span_rejects_inverted_bounds() {
        let _ = Span::new(3, 1);
    }
}
