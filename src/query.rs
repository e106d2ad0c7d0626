//! Project query pipeline.
//!
//! Derives what the gallery shows from the full project list and the
//! page's filter state:
//!
//! ```text
//! projects ──filter(search ∧ category ∧ year)──▶ matches ──sort──▶ visible set
//! projects ──────────────────────────────────────▶ category counts, years
//! ```
//!
//! Everything here is a pure function over borrowed records. The lists are
//! a few dozen items, so counts and year lists are recomputed from scratch
//! whenever they are needed.
//!
//! ## Search
//!
//! Case-insensitive substring match against `title`, `location`, or
//! `description`. Category, features, and budget are not searched.
//!
//! ## Sorting
//!
//! | Order | Key |
//! |---|---|
//! | `newest` | `year` descending (string order) |
//! | `oldest` | `year` ascending |
//! | `alphabetical` | `title` ascending, ignoring case and accents |
//! | `size` | leading number in `area`, descending |
//!
//! All sorts are stable. An unrecognized sort key leaves the filtered
//! order untouched.

use crate::types::{Category, CategoryRegistry, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort order for the visible set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
    Size,
    /// Any other key. Sorts as identity.
    Unrecognized(String),
}

impl SortOrder {
    pub fn key(&self) -> &str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Alphabetical => "alphabetical",
            SortOrder::Size => "size",
            SortOrder::Unrecognized(key) => key,
        }
    }
}

impl From<&str> for SortOrder {
    fn from(key: &str) -> Self {
        match key {
            "newest" => SortOrder::Newest,
            "oldest" => SortOrder::Oldest,
            "alphabetical" => SortOrder::Alphabetical,
            "size" => SortOrder::Size,
            other => SortOrder::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SortOrder {
    fn from(key: String) -> Self {
        SortOrder::from(key.as_str())
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.key().to_string()
    }
}

/// Grid or list presentation. Has no effect on the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Category filter: everything, or exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    fn admits(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        match label {
            "All" => CategoryFilter::All,
            other => CategoryFilter::Only(Category::from(other)),
        }
    }
}

/// Year filter: every year, or one exact year label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum YearFilter {
    #[default]
    All,
    Only(String),
}

impl YearFilter {
    pub fn label(&self) -> &str {
        match self {
            YearFilter::All => "All",
            YearFilter::Only(y) => y,
        }
    }

    fn admits(&self, year: &str) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Only(y) => y == year,
        }
    }
}

impl From<&str> for YearFilter {
    fn from(label: &str) -> Self {
        match label {
            "All" => YearFilter::All,
            other => YearFilter::Only(other.to_string()),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Filter and sort state owned by a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub category: CategoryFilter,
    pub year: YearFilter,
    pub sort_by: SortOrder,
    pub view_mode: ViewMode,
}

impl FilterState {
    /// Reset search, category, and year in one step.
    ///
    /// Sort order and view mode are kept.
    pub fn clear(&mut self) {
        *self = Self {
            sort_by: std::mem::take(&mut self.sort_by),
            view_mode: self.view_mode,
            ..Self::default()
        };
    }

    /// Whether any of search, category, or year narrows the list.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty()
            || self.category != CategoryFilter::All
            || self.year != YearFilter::All
    }
}

/// Whether `project` passes all three predicates.
pub fn matches(project: &ProjectRecord, filters: &FilterState) -> bool {
    matches_search(project, &filters.search_term)
        && filters.category.admits(&project.category)
        && filters.year.admits(&project.year)
}

fn matches_search(project: &ProjectRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [&project.title, &project.location, &project.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Stable in-place sort of `projects` by `order`.
pub fn sort_projects(projects: &mut [&ProjectRecord], order: &SortOrder) {
    match order {
        SortOrder::Newest => projects.sort_by(|a, b| b.year.cmp(&a.year)),
        SortOrder::Oldest => projects.sort_by(|a, b| a.year.cmp(&b.year)),
        SortOrder::Alphabetical => projects.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::Size => projects.sort_by(|a, b| {
            leading_area(&b.area)
                .partial_cmp(&leading_area(&a.area))
                .unwrap_or(Ordering::Equal)
        }),
        SortOrder::Unrecognized(_) => {}
    }
}

/// Title order ignoring case and accents, with the raw string as
/// tie-break. "École" files under E, before "Zebra".
fn compare_titles(a: &str, b: &str) -> Ordering {
    fold_title(a)
        .cmp(&fold_title(b))
        .then_with(|| a.cmp(b))
}

/// Decompose to NFD, drop combining marks, lowercase.
fn fold_title(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Leading numeric token of an area string, `0.0` when there is none.
///
/// Anything before the first digit is skipped and `,` thousands separators
/// inside the token are dropped. Parsing does not stop at the first comma,
/// so `"2,500 sqm"` is 2500 rather than 2:
///
/// - `"350 sqm"` → 350
/// - `"2,500 sqm"` → 2500
/// - `"approx. 80.5 m²"` → 80.5
/// - `"TBC"` → 0
pub fn leading_area(area: &str) -> f64 {
    let Some(start) = area.find(|c: char| c.is_ascii_digit()) else {
        return 0.0;
    };
    let token: String = area[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .filter(|c| *c != ',')
        .collect();
    token.trim_end_matches('.').parse().unwrap_or(0.0)
}

/// Filter then sort: the projects a page displays.
pub fn visible_projects<'a>(
    projects: &'a [ProjectRecord],
    filters: &FilterState,
) -> Vec<&'a ProjectRecord> {
    let mut visible: Vec<&ProjectRecord> =
        projects.iter().filter(|p| matches(p, filters)).collect();
    sort_projects(&mut visible, &filters.sort_by);
    visible
}

/// Projects listed inside a category modal, in source order.
pub fn projects_in_category<'a>(
    projects: &'a [ProjectRecord],
    category: &Category,
) -> Vec<&'a ProjectRecord> {
    projects.iter().filter(|p| &p.category == category).collect()
}

/// Projects flagged for featured placement, in source order.
pub fn featured_projects(projects: &[ProjectRecord]) -> Vec<&ProjectRecord> {
    projects.iter().filter(|p| p.is_featured).collect()
}

/// Number of projects under one category filter button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub filter: CategoryFilter,
    pub count: usize,
}

/// `All` with the total, then each registry key with its exact-match count.
pub fn category_counts(
    projects: &[ProjectRecord],
    registry: &CategoryRegistry,
) -> Vec<CategoryCount> {
    let mut counts = vec![CategoryCount {
        filter: CategoryFilter::All,
        count: projects.len(),
    }];
    counts.extend(registry.keys().map(|key| CategoryCount {
        filter: CategoryFilter::Only(key.clone()),
        count: projects.iter().filter(|p| &p.category == key).count(),
    }));
    counts
}

/// `All` first, then each distinct year, newest first.
pub fn available_years(projects: &[ProjectRecord]) -> Vec<YearFilter> {
    let mut years: Vec<&str> = projects.iter().map(|p| p.year.as_str()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();

    let mut out = Vec::with_capacity(years.len() + 1);
    out.push(YearFilter::All);
    out.extend(years.into_iter().map(|y| YearFilter::Only(y.to_string())));
    out
}

/// Counts behind the "Showing N of M projects" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySummary {
    pub shown: usize,
    pub total: usize,
}

impl QuerySummary {
    /// No project matched; the page shows its "no results" state.
    pub fn is_empty(&self) -> bool {
        self.shown == 0
    }
}

impl fmt::Display for QuerySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} projects", self.shown, self.total)
    }
}
