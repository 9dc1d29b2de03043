//! IntervalIndex - sorted-array interval structure
//!
//! Holds spans ordered by `(start, end)`. Built, populated, queried and
//! dropped within a single sentence, so a flat sorted vector with binary
//! search bounds is enough. Duplicate spans are kept as separate entries.

use super::span::Span;

/// Spatial index over spans supporting covering / covered / collision queries
#[derive(Debug, Default, Clone)]
pub struct IntervalIndex {
    /// Sorted by (start, end)
    spans: Vec<Span>,
}

impl IntervalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            spans: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Add a span, keeping the backing array sorted
    pub fn insert(&mut self, span: Span) {
        let at = self.spans.partition_point(|s| *s <= span);
        self.spans.insert(at, span);
    }

    /// Remove one instance of `span`. Returns false if it was not present.
    pub fn remove(&mut self, span: &Span) -> bool {
        match self.spans.binary_search(span) {
            Ok(at) => {
                self.spans.remove(at);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    /// Spans that fully contain `[start, end)`, ordered by start
    pub fn covering(&self, start: usize, end: usize) -> Vec<Span> {
        let upper = self.spans.partition_point(|s| s.start <= start);
        self.spans[..upper]
            .iter()
            .filter(|s| s.end >= end)
            .copied()
            .collect()
    }

    /// Spans fully contained within `[start, end)`, ordered by start
    pub fn covered(&self, start: usize, end: usize) -> Vec<Span> {
        let lower = self.spans.partition_point(|s| s.start < start);
        self.spans[lower..]
            .iter()
            .take_while(|s| s.start <= end)
            .filter(|s| s.end <= end)
            .copied()
            .collect()
    }

    /// Spans sharing at least one position with `[start, end)`, ordered by start
    pub fn collisions(&self, start: usize, end: usize) -> Vec<Span> {
        let query = Span::new(start, end);
        let upper = self.spans.partition_point(|s| s.start < end);
        self.spans[..upper]
            .iter()
            .filter(|s| s.overlaps(&query))
            .copied()
            .collect()
    }

    /// Cheaper form of `!collisions(..).is_empty()`
    pub fn collides(&self, span: &Span) -> bool {
        let upper = self.spans.partition_point(|s| s.start < span.end);
        self.spans[..upper].iter().any(|s| s.overlaps(span))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }
}

impl FromIterator<Span> for IntervalIndex {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        let mut spans: Vec<Span> = iter.into_iter().collect();
        spans.sort();
        Self { spans }
    }
}
