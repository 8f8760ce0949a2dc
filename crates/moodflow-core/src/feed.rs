use crate::color::Color;
use crate::constants::FEED_CAPACITY;
use std::collections::VecDeque;

#[derive(Clone, Debug, PartialEq)]
pub struct FeedEntry {
    pub glyph: String,
    pub label: String,
    pub color: Color,
    pub timestamp: f64,
}

impl FeedEntry {
    /// Line text shown next to the glyph.
    pub fn caption(&self) -> String {
        format!("{} vibe", self.label)
    }
}

/// Recent broadcasts, newest first, capped.
#[derive(Clone, Debug)]
pub struct MoodFeed {
    entries: VecDeque<FeedEntry>,
    capacity: usize,
}

impl Default for MoodFeed {
    fn default() -> Self {
        Self::new(FEED_CAPACITY)
    }
}

impl MoodFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: FeedEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&FeedEntry> {
        self.entries.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
