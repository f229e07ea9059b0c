//! Source spans for Griddy syntax nodes

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A byte offset span in a Griddy source file
#[derive(Copy, Clone, Debug, Default, Display, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[display("{start}..{end}")]
pub struct Span {
    /// First byte covered by the node
    pub start: u32,
    /// One past the last byte covered by the node
    pub end: u32,
}

impl Span {
    /// Create a span from byte offsets
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Placeholder span for nodes synthesized without source text
    pub fn detached() -> Self {
        Self::default()
    }

    /// Byte range for slicing source text
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Number of bytes covered
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`
    #[must_use]
    pub fn cover(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_and_display() {
        let joined = Span::new(4, 9).cover(Span::new(2, 6));
        assert_eq!(joined, Span::new(2, 9));
        assert_eq!(joined.len(), 7);
        assert_eq!(joined.to_string(), "2..9");
        assert!(Span::detached().is_empty());
    }
}
