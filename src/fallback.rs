//! Built-in dataset used whenever a data source cannot deliver.
//!
//! The dataset lives in `data/fallback.json` and is embedded at compile
//! time, so the site always has something to show: eight projects across
//! the four categories, the category registry, and three hero slides.

use crate::catalog::{Catalog, DataSource, SourceError};
use crate::types::{CategoryRegistry, HeroSlide, ProjectRecord};
use serde::Deserialize;
use std::sync::LazyLock;

const FALLBACK_JSON: &str = include_str!("../data/fallback.json");

#[derive(Deserialize)]
struct Dataset {
    projects: Vec<ProjectRecord>,
    categories: CategoryRegistry,
    hero_slides: Vec<HeroSlide>,
}

static DATASET: LazyLock<Dataset> = LazyLock::new(|| {
    serde_json::from_str(FALLBACK_JSON).expect("embedded fallback dataset must parse")
});

pub fn projects() -> Vec<ProjectRecord> {
    DATASET.projects.clone()
}

pub fn categories() -> CategoryRegistry {
    DATASET.categories.clone()
}

pub fn hero_slides() -> Vec<HeroSlide> {
    DATASET.hero_slides.clone()
}

/// The complete fallback catalog.
pub fn catalog() -> Catalog {
    Catalog::assemble(projects(), categories(), hero_slides())
}

/// A [`DataSource`] that always serves the built-in dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSource;

impl DataSource for FallbackSource {
    fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        Ok(projects())
    }

    fn fetch_categories(&self) -> Result<CategoryRegistry, SourceError> {
        Ok(categories())
    }

    fn fetch_hero_slides(&self) -> Result<Vec<HeroSlide>, SourceError> {
        Ok(hero_slides())
    }
}
