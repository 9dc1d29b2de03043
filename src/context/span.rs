//! Span - half-open byte interval shared by every context component
//!
//! All offsets are UTF-8 byte offsets. Sentence-level components work with
//! offsets relative to the sentence start; document-level components work with
//! offsets relative to the document start.

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. `end` is clamped so that `end >= start`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// True if `offset` lies inside the span
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// True if this span fully covers `other`
    #[inline]
    pub fn covers(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// True if the two spans share at least one position
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both ends left by `base` (document offsets → sentence offsets)
    #[inline]
    pub fn relative_to(&self, base: usize) -> Span {
        Span::new(self.start - base, self.end - base)
    }

    /// Shift both ends right by `base` (sentence offsets → document offsets)
    #[inline]
    pub fn offset_by(&self, base: usize) -> Span {
        Span::new(self.start + base, self.end + base)
    }

    /// The text covered by this span
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Span::new(0, 5);
        assert!(a.overlaps(&Span::new(4, 8)));
        assert!(!a.overlaps(&Span::new(5, 8)));
        assert!(!Span::new(5, 8).overlaps(&a));
    }

    #[test]
    fn test_covers_and_contains() {
        let outer = Span::new(2, 10);
        assert!(outer.covers(&Span::new(2, 10)));
        assert!(outer.covers(&Span::new(3, 4)));
        assert!(!outer.covers(&Span::new(1, 4)));
        assert!(outer.contains(2));
        assert!(!outer.contains(10));
    }

    #[test]
    fn test_relative_round_trip() {
        let s = Span::new(12, 20);
        assert_eq!(s.relative_to(10), Span::new(2, 10));
        assert_eq!(s.relative_to(10).offset_by(10), s);
    }
}
