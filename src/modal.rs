//! Category and project overlays.
//!
//! Two overlays can be layered: a category summary listing its projects,
//! and a project detail view with an image gallery. Selection and
//! visibility are tracked separately so an overlay can animate out before
//! its data is cleared:
//!
//! ```text
//!                open_category(C)                 open_project_from_category(P)
//!   Closed ─────────────────────▶ CategoryOpen(C) ───────────────────────────▶ ProjectOpenFromCategory(C, P)
//!     ▲  ▲                            │    ▲                                          │
//!     │  └──── close_category ────────┘    └────────── close_project (back) ──────────┘
//!     │
//!     │   open_project(P)
//!     └──────────────────▶ ProjectOpen(P) ── close_project ──▶ Closed
//! ```
//!
//! ## Delayed mutations
//!
//! Every close, and the hop from a category to one of its projects, is two
//! steps: the visibility flag drops immediately, and the data change is
//! scheduled `exit_delay_ms` later on a [`Scheduler`]. The owner drives
//! time through [`ModalMachine::tick`]. While a mutation is pending the
//! machine reports [`ModalMachine::is_transitioning`] and ignores further
//! navigation, so both overlays are never visible at once.
//!
//! ## Scroll lock
//!
//! While anything is selected the page behind the overlays must not scroll.
//! The machine drives a [`ScrollHost`] and restores scrolling on teardown,
//! including when dropped mid-transition.

use crate::timer::Scheduler;
use crate::types::{Category, ProjectRecord};
use tracing::debug;

/// The page whose scrolling is suspended while an overlay is open.
pub trait ScrollHost {
    fn set_scroll_locked(&mut self, locked: bool);
}

impl<T: ScrollHost + ?Sized> ScrollHost for &mut T {
    fn set_scroll_locked(&mut self, locked: bool) {
        (**self).set_scroll_locked(locked);
    }
}

/// Scroll state of a page body, for owners without a real page behind them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyScroll {
    pub locked: bool,
}

impl ScrollHost for BodyScroll {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// Top-level state, derived from the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    CategoryOpen,
    ProjectOpen,
    /// Project opened from a category; the category is remembered for "back".
    ProjectOpenFromCategory,
}

/// What a navigation event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed immediately.
    Applied,
    /// Visibility changed now; data follows after the exit delay.
    Scheduled,
    /// Not valid from the current state, or a transition is in flight.
    Ignored,
}

#[derive(Debug)]
enum Deferred {
    RevealProject(Box<ProjectRecord>),
    ReturnToCategory,
    ClearProject,
    ClearCategory,
}

/// Overlay navigation for one page.
#[derive(Debug)]
pub struct ModalMachine<H: ScrollHost> {
    host: H,
    exit_delay_ms: u64,
    selected_project: Option<ProjectRecord>,
    selected_category: Option<Category>,
    category_visible: bool,
    project_visible: bool,
    image_index: usize,
    scheduler: Scheduler<Deferred>,
    scroll_locked: bool,
    torn_down: bool,
}

impl<H: ScrollHost> ModalMachine<H> {
    pub fn new(host: H, exit_delay_ms: u64) -> Self {
        Self {
            host,
            exit_delay_ms,
            selected_project: None,
            selected_category: None,
            category_visible: false,
            project_visible: false,
            image_index: 0,
            scheduler: Scheduler::new(),
            scroll_locked: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> ModalState {
        match (&self.selected_project, &self.selected_category) {
            (Some(_), Some(_)) => ModalState::ProjectOpenFromCategory,
            (Some(_), None) => ModalState::ProjectOpen,
            (None, Some(_)) => ModalState::CategoryOpen,
            (None, None) => ModalState::Closed,
        }
    }

    pub fn selected_project(&self) -> Option<&ProjectRecord> {
        self.selected_project.as_ref()
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.as_ref()
    }

    pub fn category_modal_visible(&self) -> bool {
        self.category_visible
    }

    pub fn project_modal_visible(&self) -> bool {
        self.project_visible
    }

    pub fn current_image_index(&self) -> usize {
        self.image_index
    }

    /// URL of the gallery image currently shown.
    pub fn current_image(&self) -> Option<&str> {
        self.selected_project
            .as_ref()
            .and_then(|p| p.images.get(self.image_index))
            .map(String::as_str)
    }

    pub fn is_transitioning(&self) -> bool {
        !self.scheduler.is_idle()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn accepts_navigation(&self) -> bool {
        !self.torn_down && !self.is_transitioning()
    }

    // =========================================================================
    // Navigation events
    // =========================================================================

    /// Open the summary overlay for `category`. Only valid from `Closed`.
    pub fn open_category(&mut self, category: Category) -> Outcome {
        if !self.accepts_navigation() || self.state() != ModalState::Closed {
            return Outcome::Ignored;
        }
        debug!(category = %category, "open category");
        self.selected_category = Some(category);
        self.category_visible = true;
        self.sync_scroll();
        Outcome::Applied
    }

    /// Open `project` directly, or switch to it from another direct project.
    ///
    /// With a category open this takes the category path instead.
    pub fn open_project(&mut self, project: ProjectRecord, now_ms: u64) -> Outcome {
        if !self.accepts_navigation() {
            return Outcome::Ignored;
        }
        match self.state() {
            ModalState::Closed | ModalState::ProjectOpen => {
                debug!(project = %project.id, "open project");
                self.selected_project = Some(project);
                self.image_index = 0;
                self.project_visible = true;
                self.sync_scroll();
                Outcome::Applied
            }
            ModalState::CategoryOpen => self.open_project_from_category(project, now_ms),
            ModalState::ProjectOpenFromCategory => Outcome::Ignored,
        }
    }

    /// Hide the category overlay, then reveal `project` once it has exited.
    pub fn open_project_from_category(&mut self, project: ProjectRecord, now_ms: u64) -> Outcome {
        if !self.accepts_navigation()
            || self.state() != ModalState::CategoryOpen
            || !self.category_visible
        {
            return Outcome::Ignored;
        }
        debug!(project = %project.id, "open project from category");
        self.category_visible = false;
        self.scheduler.schedule(
            now_ms,
            self.exit_delay_ms,
            Deferred::RevealProject(Box::new(project)),
        );
        Outcome::Scheduled
    }

    /// Hide the project overlay; afterwards clear it and, if it was opened
    /// from a category, bring that category back.
    pub fn close_project(&mut self, now_ms: u64) -> Outcome {
        if !self.accepts_navigation() || self.selected_project.is_none() {
            return Outcome::Ignored;
        }
        debug!("close project");
        self.project_visible = false;
        let follow_up = if self.selected_category.is_some() {
            Deferred::ReturnToCategory
        } else {
            Deferred::ClearProject
        };
        self.scheduler.schedule(now_ms, self.exit_delay_ms, follow_up);
        Outcome::Scheduled
    }

    /// Hide the category overlay, then clear the category.
    pub fn close_category(&mut self, now_ms: u64) -> Outcome {
        if !self.accepts_navigation() || self.state() != ModalState::CategoryOpen {
            return Outcome::Ignored;
        }
        debug!("close category");
        self.category_visible = false;
        self.scheduler
            .schedule(now_ms, self.exit_delay_ms, Deferred::ClearCategory);
        Outcome::Scheduled
    }

    /// ESC: close the innermost overlay.
    pub fn escape(&mut self, now_ms: u64) -> Outcome {
        if self.selected_project.is_some() {
            self.close_project(now_ms)
        } else if self.selected_category.is_some() {
            self.close_category(now_ms)
        } else {
            Outcome::Ignored
        }
    }

    /// Apply every delayed mutation due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        for action in self.scheduler.take_due(now_ms) {
            match action {
                Deferred::RevealProject(project) => {
                    self.selected_project = Some(*project);
                    self.image_index = 0;
                    self.project_visible = true;
                }
                Deferred::ReturnToCategory => {
                    self.selected_project = None;
                    self.image_index = 0;
                    self.category_visible = self.selected_category.is_some();
                }
                Deferred::ClearProject => {
                    self.selected_project = None;
                    self.image_index = 0;
                }
                Deferred::ClearCategory => {
                    self.selected_category = None;
                }
            }
        }
        self.sync_scroll();
    }

    /// Stop the machine: cancel pending mutations and release the scroll
    /// lock. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.scheduler.cancel_all();
        self.scroll_locked = false;
        self.host.set_scroll_locked(false);
    }

    fn sync_scroll(&mut self) {
        let wanted = self.selected_project.is_some() || self.selected_category.is_some();
        if wanted != self.scroll_locked {
            self.scroll_locked = wanted;
            self.host.set_scroll_locked(wanted);
        }
    }

    // =========================================================================
    // Gallery
    // =========================================================================

    fn gallery_len(&self) -> usize {
        self.selected_project.as_ref().map_or(0, |p| p.images.len())
    }

    /// Advance to the next image, wrapping. No-op with fewer than two images.
    pub fn next_image(&mut self) -> bool {
        let len = self.gallery_len();
        if len <= 1 {
            return false;
        }
        self.image_index = (self.image_index + 1) % len;
        true
    }

    /// Step back one image, wrapping. No-op with fewer than two images.
    pub fn previous_image(&mut self) -> bool {
        let len = self.gallery_len();
        if len <= 1 {
            return false;
        }
        self.image_index = (self.image_index + len - 1) % len;
        true
    }

    /// Jump to a thumbnail. Out-of-range indices are ignored.
    pub fn select_image(&mut self, index: usize) -> bool {
        let len = self.gallery_len();
        if len <= 1 || index >= len {
            return false;
        }
        self.image_index = index;
        true
    }
}

impl<H: ScrollHost> Drop for ModalMachine<H> {
    fn drop(&mut self) {
        if !self.torn_down {
            self.teardown();
        }
    }
}
