//! Parser limits.
//!
//! The defaults are safe for files written by real exporters. Hosts can
//! embed [`ParserConfig`] in their own configuration since it is serde
//! (de)serializable and every field is optional.

use serde::{Deserialize, Serialize};

/// Default cap on simultaneously open braces.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Default cap on any `*_COUNT` declaration.
///
/// A presized face list at this cap is already over 100 MB.
pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 1 << 20;

/// Limits applied while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of braces open at once (the top level itself does not
    /// count). Exceeding it aborts the parse.
    pub max_nesting_depth: usize,

    /// Maximum element count a `*_COUNT` declaration may presize.
    /// Larger declarations are clamped with a warning.
    pub max_element_count: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_element_count: DEFAULT_MAX_ELEMENT_COUNT,
        }
    }
}
