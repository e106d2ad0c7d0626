//! Pages and routing.
//!
//! Two routes share one set of machinery. A [`PageSession`] owns a page's
//! filter state, its overlay machine, and (on the home page) the hero
//! carousel, all reading from one catalog snapshot. What differs between
//! pages is which [`Affordances`] they switch on:
//!
//! | Route       | search | sort | list view | category modal | carousel |
//! |-------------|--------|------|-----------|----------------|----------|
//! | `/`         | no     | no   | no        | yes            | yes      |
//! | `/projects` | yes    | yes  | yes       | no             | no       |
//!
//! Requests for an affordance the page does not offer are ignored.

use crate::carousel::HeroCarousel;
use crate::catalog::{Catalog, CatalogStore};
use crate::config::TimingConfig;
use crate::modal::{BodyScroll, ModalMachine, Outcome, ScrollHost};
use crate::query::{
    self, CategoryCount, CategoryFilter, FilterState, QuerySummary, SortOrder, ViewMode,
    YearFilter,
};
use crate::types::{Category, CategoryRecord, HeroSlide, ProjectRecord};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
}

impl Route {
    /// Route for a location path. `#section` anchors and a trailing slash
    /// are ignored; unknown paths give `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split('#').next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Route::Home),
            "/projects" => Some(Route::Projects),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Projects => "/projects",
        }
    }

    pub fn affordances(&self) -> Affordances {
        match self {
            Route::Home => Affordances {
                search: false,
                sort: false,
                list_view: false,
                category_modal: true,
                carousel: true,
            },
            Route::Projects => Affordances {
                search: true,
                sort: true,
                list_view: true,
                category_modal: false,
                carousel: false,
            },
        }
    }
}

/// Page-level capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub search: bool,
    pub sort: bool,
    pub list_view: bool,
    pub category_modal: bool,
    pub carousel: bool,
}

/// Live state of one page.
pub struct PageSession<H: ScrollHost = BodyScroll> {
    route: Route,
    affordances: Affordances,
    catalog: Arc<Catalog>,
    revision: u64,
    filters: FilterState,
    modal: ModalMachine<H>,
    carousel: Option<HeroCarousel>,
}

impl PageSession<BodyScroll> {
    pub fn open(route: Route, store: &CatalogStore, timing: &TimingConfig, now_ms: u64) -> Self {
        Self::with_host(route, store, timing, BodyScroll::default(), now_ms)
    }
}

impl<H: ScrollHost> PageSession<H> {
    pub fn with_host(
        route: Route,
        store: &CatalogStore,
        timing: &TimingConfig,
        host: H,
        now_ms: u64,
    ) -> Self {
        let affordances = route.affordances();
        let catalog = store.snapshot();
        let carousel = affordances.carousel.then(|| {
            HeroCarousel::new(
                catalog.hero_slides.len(),
                timing.carousel_interval_ms,
                now_ms,
            )
        });
        Self {
            route,
            affordances,
            catalog,
            revision: store.revision(),
            filters: FilterState::default(),
            modal: ModalMachine::new(host, timing.exit_delay_ms),
            carousel,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Pick up a newer catalog snapshot, if the store has one. The carousel
    /// restarts over the new slides.
    pub fn refresh(&mut self, store: &CatalogStore, now_ms: u64) -> bool {
        if store.revision() == self.revision {
            return false;
        }
        self.catalog = store.snapshot();
        self.revision = store.revision();
        if let Some(carousel) = &mut self.carousel {
            carousel.replace_slides(self.catalog.hero_slides.len(), now_ms);
        }
        debug!(revision = self.revision, route = self.route.path(), "page refreshed");
        true
    }

    // =========================================================================
    // Filters
    // =========================================================================

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        if !self.affordances.search {
            return false;
        }
        self.filters.search_term = term.into();
        true
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filters.category = category;
    }

    pub fn set_year_filter(&mut self, year: YearFilter) {
        self.filters.year = year;
    }

    pub fn set_sort(&mut self, sort_by: SortOrder) -> bool {
        if !self.affordances.sort {
            return false;
        }
        self.filters.sort_by = sort_by;
        true
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> bool {
        if !self.affordances.list_view && view_mode == ViewMode::List {
            return false;
        }
        self.filters.view_mode = view_mode;
        true
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    pub fn visible(&self) -> Vec<&ProjectRecord> {
        query::visible_projects(&self.catalog.projects, &self.filters)
    }

    pub fn summary(&self) -> QuerySummary {
        QuerySummary {
            shown: self.visible().len(),
            total: self.catalog.projects.len(),
        }
    }

    pub fn category_counts(&self) -> Vec<CategoryCount> {
        query::category_counts(&self.catalog.projects, &self.catalog.categories)
    }

    pub fn available_years(&self) -> Vec<YearFilter> {
        query::available_years(&self.catalog.projects)
    }

    pub fn featured(&self) -> Vec<&ProjectRecord> {
        query::featured_projects(&self.catalog.projects)
    }

    pub fn projects_in_category(&self, category: &Category) -> Vec<&ProjectRecord> {
        query::projects_in_category(&self.catalog.projects, category)
    }

    /// Category card content; unregistered categories get a placeholder.
    pub fn category_card(&self, category: &Category) -> CategoryRecord {
        self.catalog.categories.lookup(category)
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    pub fn modal(&self) -> &ModalMachine<H> {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalMachine<H> {
        &mut self.modal
    }

    pub fn open_category(&mut self, category: Category) -> Outcome {
        if !self.affordances.category_modal {
            return Outcome::Ignored;
        }
        self.modal.open_category(category)
    }

    /// Open a project by id. Unknown ids are ignored.
    pub fn open_project(&mut self, id: &str, now_ms: u64) -> Outcome {
        match self.catalog.project(id) {
            Some(project) => {
                let project = project.clone();
                self.modal.open_project(project, now_ms)
            }
            None => Outcome::Ignored,
        }
    }

    pub fn close_project(&mut self, now_ms: u64) -> Outcome {
        self.modal.close_project(now_ms)
    }

    pub fn close_category(&mut self, now_ms: u64) -> Outcome {
        self.modal.close_category(now_ms)
    }

    pub fn escape(&mut self, now_ms: u64) -> Outcome {
        self.modal.escape(now_ms)
    }

    // =========================================================================
    // Carousel
    // =========================================================================

    pub fn carousel(&self) -> Option<&HeroCarousel> {
        self.carousel.as_ref()
    }

    pub fn current_slide(&self) -> Option<&HeroSlide> {
        let carousel = self.carousel.as_ref()?;
        self.catalog.hero_slides.get(carousel.current())
    }

    pub fn select_slide(&mut self, index: usize) -> bool {
        self.carousel
            .as_mut()
            .is_some_and(|carousel| carousel.select(index))
    }

    // =========================================================================
    // Clock
    // =========================================================================

    pub fn tick(&mut self, now_ms: u64) {
        self.modal.tick(now_ms);
        if let Some(carousel) = &mut self.carousel {
            carousel.tick(now_ms);
        }
    }

    /// Cancel pending work and release the page.
    pub fn teardown(&mut self) {
        self.modal.teardown();
        if let Some(carousel) = &mut self.carousel {
            carousel.teardown();
        }
    }
}
