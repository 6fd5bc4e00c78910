//! Fixed-size window over an ordered sequence, moved one item at a time and
//! clamped to `[0, max_start]`.

use std::ops::Range;

use thiserror::Error;

pub const DEFAULT_PAGE_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    page_size: usize,
    total: usize,
    start_index: usize,
}

impl Carousel {
    pub fn new(page_size: usize) -> Result<Self, CarouselError> {
        Self::with_total(page_size, 0)
    }

    pub fn with_total(page_size: usize, total: usize) -> Result<Self, CarouselError> {
        if page_size == 0 {
            return Err(CarouselError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            total,
            start_index: 0,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn max_start(&self) -> usize {
        self.total.saturating_sub(self.page_size)
    }

    pub fn can_prev(&self) -> bool {
        self.start_index > 0
    }

    pub fn can_next(&self) -> bool {
        self.start_index < self.max_start()
    }

    /// Returns whether the window moved.
    pub fn prev(&mut self) -> bool {
        self.slide(Direction::Prev)
    }

    /// Returns whether the window moved.
    pub fn next(&mut self) -> bool {
        self.slide(Direction::Next)
    }

    pub fn slide(&mut self, direction: Direction) -> bool {
        let before = self.start_index;
        self.start_index = match direction {
            Direction::Prev => before.saturating_sub(1),
            Direction::Next => (before + 1).min(self.max_start()),
        };
        self.start_index != before
    }

    /// Replaces the sequence length and pulls the window back inside it.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.start_index = self.start_index.min(self.max_start());
    }

    pub fn reset(&mut self) {
        self.start_index = 0;
    }

    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.start_index + self.page_size).min(self.total);
        self.start_index.min(end)..end
    }

    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }

    /// Track offset in percent; each item occupies `100 / page_size`.
    pub fn offset_percent(&self) -> f64 {
        self.start_index as f64 * (100.0 / self.page_size as f64)
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
