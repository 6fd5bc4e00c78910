use shared::domain::Work;
use tracing::debug;

use crate::{
    carousel::{Carousel, CarouselError},
    source::WorkSource,
};

/// Works sharing at least one tag with `current`, in the order of `all`.
/// `current` itself is excluded by id.
pub fn select_related(current: &Work, all: &[Work]) -> Vec<Work> {
    if all.is_empty() {
        return Vec::new();
    }

    let current_tags = current.tag_set();
    all.iter()
        .filter(|work| work.id != current.id && work.shares_tag_with(&current_tags))
        .cloned()
        .collect()
}

/// Identifies one load started by a [`RelatedPanel`]. Only the most recent
/// ticket is accepted when results arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum RelatedView<'a> {
    /// No works loaded at all; nothing is rendered.
    Hidden,
    /// Works exist but none share a tag with the current one.
    Empty,
    Window {
        items: &'a [Work],
        total: usize,
        start_index: usize,
        offset_percent: f64,
        can_prev: bool,
        can_next: bool,
    },
}

/// Related-works panel for one current work: the loaded pool, the related
/// subset and the carousel over it.
#[derive(Debug, Clone)]
pub struct RelatedPanel {
    current: Work,
    pool: Vec<Work>,
    related: Vec<Work>,
    carousel: Carousel,
    generation: u64,
}

impl RelatedPanel {
    pub fn new(current: Work, page_size: usize) -> Result<Self, CarouselError> {
        Ok(Self {
            current,
            pool: Vec::new(),
            related: Vec::new(),
            carousel: Carousel::new(page_size)?,
            generation: 0,
        })
    }

    pub fn current(&self) -> &Work {
        &self.current
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn related(&self) -> &[Work] {
        &self.related
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// Starts a load; any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    /// Applies loaded works if `ticket` is still current. Returns whether the
    /// result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, works: Vec<Work>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                work_id = %self.current.id,
                "discarding works loaded for a superseded request"
            );
            return false;
        }
        self.pool = works;
        self.recompute();
        true
    }

    /// Loads and applies in one step. The panel stays borrowed for the whole
    /// load, so nothing can supersede it; callers that need to switch works
    /// mid-load use [`begin_load`](Self::begin_load) and
    /// [`finish_load`](Self::finish_load) instead.
    pub async fn load_from(&mut self, source: &dyn WorkSource) -> bool {
        let ticket = self.begin_load();
        let works = source.load_all_works().await;
        self.finish_load(ticket, works)
    }

    /// Switches to another work. The window starts over and loads still in
    /// flight for the previous work are discarded on arrival.
    pub fn set_current(&mut self, current: Work) {
        self.generation += 1;
        self.current = current;
        self.carousel.reset();
        self.recompute();
    }

    pub fn prev(&mut self) -> bool {
        self.carousel.prev()
    }

    pub fn next(&mut self) -> bool {
        self.carousel.next()
    }

    pub fn view(&self) -> RelatedView<'_> {
        if self.pool.is_empty() {
            return RelatedView::Hidden;
        }
        if self.related.is_empty() {
            return RelatedView::Empty;
        }
        RelatedView::Window {
            items: self.carousel.window(&self.related),
            total: self.related.len(),
            start_index: self.carousel.start_index(),
            offset_percent: self.carousel.offset_percent(),
            can_prev: self.carousel.can_prev(),
            can_next: self.carousel.can_next(),
        }
    }

    fn recompute(&mut self) {
        self.related = select_related(&self.current, &self.pool);
        self.carousel.set_total(self.related.len());
    }
}

#[cfg(test)]
#[path = "tests/related_tests.rs"]
mod tests;
