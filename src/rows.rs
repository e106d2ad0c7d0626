//! Backend row mapping.
//!
//! The hosted backend returns one row per project with its category and
//! gallery joined in. Rows carry storage-relative image paths, a full
//! completion timestamp, and optional joins; [`RowMapper`] turns them into
//! the [`ProjectRecord`]s the pages render.
//!
//! | Record field | Taken from                                         |
//! |--------------|----------------------------------------------------|
//! | `image`      | `featured_image_url`, first gallery image, placeholder |
//! | `year`       | year of `actual_completion_date`, else current year |
//! | `category`   | joined category name, else "Uncategorized"         |
//! | `images`     | gallery rows, resolved against the storage base URL |
//! | `features`   | feature rows ordered by `sort_order`               |

use crate::types::{Category, ProjectRecord};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RowError {
    #[error("Project row is missing its {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryJoin {
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageRow {
    pub image_url: String,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureRow {
    pub feature_name: String,
    #[serde(default)]
    pub sort_order: i64,
}

/// One project as the backend returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub budget: Option<String>,
    pub status: Option<String>,
    pub is_featured: bool,
    pub featured_image_url: Option<String>,
    pub actual_completion_date: Option<String>,
    pub project_categories: Option<CategoryJoin>,
    pub project_images: Vec<ImageRow>,
    pub project_features: Vec<FeatureRow>,
}

/// Maps [`ProjectRow`]s to [`ProjectRecord`]s.
#[derive(Debug, Clone)]
pub struct RowMapper {
    storage_base_url: String,
    current_year: String,
}

impl RowMapper {
    /// A mapper resolving relative image paths against `storage_base_url`.
    /// An empty base leaves paths untouched.
    pub fn new(storage_base_url: &str) -> Self {
        Self::with_current_year(storage_base_url, Local::now().year().to_string())
    }

    /// Like [`new`](Self::new) with a fixed year for rows without a
    /// completion date.
    pub fn with_current_year(storage_base_url: &str, current_year: impl Into<String>) -> Self {
        Self {
            storage_base_url: storage_base_url.trim_end_matches('/').to_string(),
            current_year: current_year.into(),
        }
    }

    pub fn resolve_image(&self, path: &str) -> String {
        if path.starts_with("http://")
            || path.starts_with("https://")
            || self.storage_base_url.is_empty()
        {
            return path.to_string();
        }
        format!("{}/{}", self.storage_base_url, path.trim_start_matches('/'))
    }

    pub fn map_row(&self, row: ProjectRow) -> Result<ProjectRecord, RowError> {
        if row.id.trim().is_empty() {
            return Err(RowError::MissingField("id"));
        }
        if row.title.trim().is_empty() {
            return Err(RowError::MissingField("title"));
        }

        let images: Vec<String> = row
            .project_images
            .iter()
            .filter(|img| !img.image_url.is_empty())
            .map(|img| self.resolve_image(&img.image_url))
            .collect();

        let image = row
            .featured_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| self.resolve_image(url))
            .or_else(|| images.first().cloned())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        // The modal gallery needs at least one image.
        let images = if images.is_empty() {
            vec![image.clone()]
        } else {
            images
        };

        let year = row
            .actual_completion_date
            .as_deref()
            .and_then(completion_year)
            .unwrap_or_else(|| self.current_year.clone());

        let category = row
            .project_categories
            .and_then(|c| c.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        let mut features = row.project_features;
        features.sort_by_key(|f| f.sort_order);

        Ok(ProjectRecord {
            id: row.id,
            title: row.title,
            description: row.description,
            category: Category::from(category),
            year,
            location: row.location.unwrap_or_default(),
            area: row.area.unwrap_or_default(),
            budget: row.budget.unwrap_or_default(),
            status: row.status.unwrap_or_default(),
            image,
            images,
            features: features.into_iter().map(|f| f.feature_name).collect(),
            is_featured: row.is_featured,
            slug: row.slug,
        })
    }

    /// Map every row, skipping (and logging) rows that cannot be shown.
    pub fn map_rows(&self, rows: Vec<ProjectRow>) -> Vec<ProjectRecord> {
        rows.into_iter()
            .filter_map(|row| match self.map_row(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "skipping project row");
                    None
                }
            })
            .collect()
    }
}

/// Year of a completion timestamp: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a
/// bare `YYYY-MM-DD`.
fn completion_year(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let year = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.year())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.year()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(|d| d.year()))
        .ok()?;
    Some(year.to_string())
}
