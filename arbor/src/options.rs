/// Nesting limit applied by [`ParseOptions::default`]. Deep enough for real documents, shallow
/// enough that the recursive parser cannot exhaust the stack on hostile input.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for [`parse_with_options`][crate::parse_with_options].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of arrays/objects open at once. Scalars do not count, so a limit of `0`
    /// accepts only scalar documents.
    pub max_depth: usize,
    /// Accept (and ignore) whatever follows the first complete value. Off by default: a
    /// document is exactly one value surrounded by optional whitespace.
    pub allow_trailing_input: bool,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_input: false,
        }
    }

    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    pub const fn with_trailing_input(self, allow_trailing_input: bool) -> Self {
        Self {
            allow_trailing_input,
            ..self
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
