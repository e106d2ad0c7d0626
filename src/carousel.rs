//! Auto-advancing hero carousel.
//!
//! A recurring timer on the same caller-driven clock as
//! [`crate::timer`]. The deadline is always derived from the current slide
//! list: replacing the list restarts the cycle from slide 0, so a deadline
//! computed for an old list length never fires against a new one.

use tracing::debug;

#[derive(Debug, Clone)]
pub struct HeroCarousel {
    slide_count: usize,
    current: usize,
    interval_ms: u64,
    next_advance_ms: Option<u64>,
}

impl HeroCarousel {
    /// A carousel over `slide_count` slides, first advance one interval
    /// after `now_ms`.
    pub fn new(slide_count: usize, interval_ms: u64, now_ms: u64) -> Self {
        let mut carousel = Self {
            slide_count: 0,
            current: 0,
            interval_ms: interval_ms.max(1),
            next_advance_ms: None,
        };
        carousel.replace_slides(slide_count, now_ms);
        carousel
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.next_advance_ms.is_some()
    }

    /// Swap in a new slide list. Restarts from slide 0 with a fresh timer.
    pub fn replace_slides(&mut self, slide_count: usize, now_ms: u64) {
        debug!(slide_count, "carousel slides replaced");
        self.slide_count = slide_count;
        self.current = 0;
        self.next_advance_ms = (slide_count > 1).then(|| now_ms.saturating_add(self.interval_ms));
    }

    /// Advance once for every interval that has elapsed by `now_ms`.
    ///
    /// Constant time however long the gap since the last tick.
    pub fn tick(&mut self, now_ms: u64) {
        let Some(due) = self.next_advance_ms else {
            return;
        };
        if due > now_ms {
            return;
        }
        let steps = (now_ms - due) / self.interval_ms + 1;
        let count = self.slide_count as u64;
        self.current = ((self.current as u64 + steps % count) % count) as usize;
        self.next_advance_ms = Some(due.saturating_add(steps.saturating_mul(self.interval_ms)));
    }

    /// Jump to a slide (dot navigation). The running timer is kept.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.slide_count {
            return false;
        }
        self.current = index;
        true
    }

    /// Stop advancing for good.
    pub fn teardown(&mut self) {
        self.next_advance_ms = None;
    }
}
