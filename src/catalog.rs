//! Loading projects, categories, and hero slides.
//!
//! ## Sources
//!
//! A [`DataSource`] is anything that can produce the three collections. The
//! hosted backend is one; [`JsonFileSource`] reads a dataset from disk, and
//! [`crate::fallback::FallbackSource`] serves the built-in data.
//!
//! ## Loading
//!
//! [`load_catalog`] asks the source for all three collections at once
//! through [`DataSource::fetch_all`], which by default runs the three fetches
//! in parallel. Each collection that fails is replaced by its fallback and a warning is
//! logged; loading itself never fails, so the site always renders.
//!
//! ## Updates
//!
//! A loaded [`Catalog`] is an immutable snapshot. [`CatalogStore`] swaps in
//! whole snapshots, so a reader never sees projects from one load next to
//! categories from another. When two loads race, the one applied last wins.

use crate::fallback;
use crate::rows::{ProjectRow, RowMapper};
use crate::types::{CategoryRegistry, HeroSlide, ProjectRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Dataset has no {0} section")]
    MissingSection(&'static str),
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of fetching every collection for one load.
#[derive(Debug)]
pub struct Fetched {
    pub projects: Result<Vec<ProjectRecord>, SourceError>,
    pub categories: Result<CategoryRegistry, SourceError>,
    pub hero_slides: Result<Vec<HeroSlide>, SourceError>,
}

/// Producer of the three collections the site needs.
pub trait DataSource: Sync {
    fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, SourceError>;
    fn fetch_categories(&self) -> Result<CategoryRegistry, SourceError>;
    fn fetch_hero_slides(&self) -> Result<Vec<HeroSlide>, SourceError>;

    /// Fetch all three collections for one load.
    ///
    /// The default runs the three fetches in parallel. Sources that hold
    /// every collection in a single document override this so one load
    /// reads one version of it.
    fn fetch_all(&self) -> Fetched {
        let (projects, (categories, hero_slides)) = rayon::join(
            || self.fetch_projects(),
            || {
                rayon::join(
                    || self.fetch_categories(),
                    || self.fetch_hero_slides(),
                )
            },
        );
        Fetched {
            projects,
            categories,
            hero_slides,
        }
    }
}

/// One consistent snapshot of everything the pages render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub projects: Vec<ProjectRecord>,
    pub categories: CategoryRegistry,
    pub hero_slides: Vec<HeroSlide>,
}

impl Catalog {
    /// Build a snapshot. Featured projects, when there are any, replace
    /// the fetched hero slides.
    pub fn assemble(
        projects: Vec<ProjectRecord>,
        categories: CategoryRegistry,
        hero_slides: Vec<HeroSlide>,
    ) -> Self {
        let featured: Vec<HeroSlide> = projects
            .iter()
            .filter(|p| p.is_featured)
            .map(HeroSlide::from)
            .collect();
        let hero_slides = if featured.is_empty() {
            hero_slides
        } else {
            featured
        };
        Self {
            projects,
            categories,
            hero_slides,
        }
    }

    pub fn project(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Fetch all three collections, substituting fallback data for any
/// collection whose fetch fails.
pub fn load_catalog(source: &dyn DataSource) -> Catalog {
    let Fetched {
        projects,
        categories,
        hero_slides,
    } = source.fetch_all();

    let projects = projects.unwrap_or_else(|e| {
        warn!(error = %e, "project fetch failed, using fallback projects");
        fallback::projects()
    });
    let categories = categories.unwrap_or_else(|e| {
        warn!(error = %e, "category fetch failed, using fallback categories");
        fallback::categories()
    });
    let hero_slides = hero_slides.unwrap_or_else(|e| {
        warn!(error = %e, "hero slide fetch failed, using fallback slides");
        fallback::hero_slides()
    });

    debug!(
        projects = projects.len(),
        categories = categories.len(),
        "catalog loaded"
    );
    Catalog::assemble(projects, categories, hero_slides)
}

/// Holder of the current catalog snapshot.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    current: Arc<Catalog>,
    revision: u64,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(catalog),
            revision: 0,
        }
    }

    /// Replace the snapshot wholesale. Returns the new revision.
    pub fn apply(&mut self, catalog: Catalog) -> u64 {
        self.current = Arc::new(catalog);
        self.revision += 1;
        self.revision
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current)
    }

    /// Incremented by every [`apply`](Self::apply).
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// =============================================================================
// JSON file source
// =============================================================================

/// On-disk dataset document.
///
/// Projects come either as ready records (`projects`) or as raw backend rows
/// (`project_rows`), which are mapped through a [`RowMapper`].
#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    projects: Option<Vec<ProjectRecord>>,
    #[serde(default)]
    project_rows: Option<Vec<ProjectRow>>,
    #[serde(default)]
    categories: Option<CategoryRegistry>,
    #[serde(default)]
    hero_slides: Option<Vec<HeroSlide>>,
}

impl Document {
    fn into_fetched(self, mapper: &RowMapper) -> Fetched {
        let projects = match (self.projects, self.project_rows) {
            (Some(projects), _) => Ok(projects),
            (None, Some(rows)) => Ok(mapper.map_rows(rows)),
            (None, None) => Err(SourceError::MissingSection("projects")),
        };
        Fetched {
            projects,
            categories: self
                .categories
                .ok_or(SourceError::MissingSection("categories")),
            hero_slides: self
                .hero_slides
                .ok_or(SourceError::MissingSection("hero_slides")),
        }
    }
}

/// Reads a dataset document from a JSON file.
///
/// Each [`fetch_all`](DataSource::fetch_all) reads and parses the file once,
/// so a load never mixes sections from two versions of the file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    mapper: RowMapper,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, mapper: RowMapper) -> Self {
        Self {
            path: path.into(),
            mapper,
        }
    }

    fn read(&self) -> Result<Document, SourceError> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl DataSource for JsonFileSource {
    fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        self.read()?.into_fetched(&self.mapper).projects
    }

    fn fetch_categories(&self) -> Result<CategoryRegistry, SourceError> {
        self.read()?.into_fetched(&self.mapper).categories
    }

    fn fetch_hero_slides(&self) -> Result<Vec<HeroSlide>, SourceError> {
        self.read()?.into_fetched(&self.mapper).hero_slides
    }

    fn fetch_all(&self) -> Fetched {
        match self.read() {
            Ok(doc) => doc.into_fetched(&self.mapper),
            Err(e) => {
                // The read error itself goes to projects; the other
                // collections carry its message.
                let reason = format!("{}: {e}", self.path.display());
                Fetched {
                    projects: Err(e),
                    categories: Err(SourceError::Unavailable(reason.clone())),
                    hero_slides: Err(SourceError::Unavailable(reason)),
                }
            }
        }
    }
}

// =============================================================================
// Dataset audit
// =============================================================================

/// A data problem the pages would paper over with defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    DuplicateId(String),
    EmptyGallery { id: String },
    UnregisteredCategory { id: String, category: String },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateId(id) => write!(f, "duplicate project id {id}"),
            CatalogIssue::EmptyGallery { id } => write!(f, "project {id} has no gallery images"),
            CatalogIssue::UnregisteredCategory { id, category } => {
                write!(f, "project {id} uses unregistered category \"{category}\"")
            }
        }
    }
}

/// List every issue in `catalog`, in project order.
pub fn audit(catalog: &Catalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    for p in &catalog.projects {
        if !seen.insert(p.id.as_str()) {
            issues.push(CatalogIssue::DuplicateId(p.id.clone()));
        }
        if p.images.is_empty() {
            issues.push(CatalogIssue::EmptyGallery { id: p.id.clone() });
        }
        if catalog.categories.get(&p.category).is_none() {
            issues.push(CatalogIssue::UnregisteredCategory {
                id: p.id.clone(),
                category: p.category.label().to_string(),
            });
        }
    }
    issues
}
