use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// The deepest nesting of groups, filters, function arguments and scoped
    /// selectors the parser will follow before failing with
    /// [`ParseError::DepthExceeded`](crate::ParseError::DepthExceeded).
    /// Each filter level counts as four, every other form as one.
    ///
    /// Keeps pathological inputs such as ten thousand opening parentheses from
    /// overflowing the call stack.
    ///
    /// Defaults to `256`.
    pub max_depth: usize,
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}
