//! Shared records used by every part of the crate.
//!
//! These are the shapes a data source hands over (see [`crate::catalog`]):
//! projects, category metadata, and hero slides. They are immutable once
//! loaded; a reload replaces the whole snapshot.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A service category a project belongs to.
///
/// The firm's four categories are closed variants. Anything else a data
/// source produces (e.g. `"Uncategorized"` from row mapping) lands in
/// [`Category::Other`] instead of failing deserialization.
///
/// Variant order is the canonical display order of the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Residential,
    Commercial,
    Education,
    ContainerArchitecture,
    Other(String),
}

impl Category {
    /// Display label, identical to the key used in source data.
    pub fn label(&self) -> &str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
            Category::Education => "Education",
            Category::ContainerArchitecture => "Container Architecture",
            Category::Other(label) => label,
        }
    }

    /// Icon used when the registry has no record for this category.
    pub fn default_icon(&self) -> CategoryIcon {
        match self {
            Category::Residential => CategoryIcon::Home,
            Category::Commercial => CategoryIcon::Building,
            Category::Education => CategoryIcon::GraduationCap,
            Category::ContainerArchitecture => CategoryIcon::Container,
            Category::Other(_) => CategoryIcon::Placeholder,
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        // Legacy exports carry a double space in this one.
        match label.trim() {
            "Residential" => Category::Residential,
            "Commercial" => Category::Commercial,
            "Education" => Category::Education,
            "Container Architecture" | "Container  Architecture" => {
                Category::ContainerArchitecture
            }
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from(label.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Glyph drawn next to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryIcon {
    Home,
    #[serde(alias = "Building2")]
    Building,
    GraduationCap,
    Container,
    /// Drawn for unregistered categories and unknown icon names.
    #[serde(other)]
    Placeholder,
}

/// One portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Stable identifier. Source data uses numbers or UUID strings.
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    /// Display label, compared as a string for sorting and filtering.
    pub year: String,
    #[serde(default)]
    pub location: String,
    /// Free text with units, e.g. `"2,500 sqm"`.
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub status: String,
    /// Primary thumbnail URL.
    pub image: String,
    /// Gallery in display order. Index 0 is the default detail view.
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// Headline figures shown on a category card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryStats {
    /// e.g. `"15+"`.
    pub completed: String,
    /// Years active, e.g. `"20"`.
    pub years: String,
    pub specialty: String,
}

/// Descriptive metadata for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub title: String,
    pub description: String,
    pub icon: CategoryIcon,
    #[serde(default)]
    pub stats: CategoryStats,
}

impl CategoryRecord {
    /// Stand-in for a category the registry does not know.
    pub fn placeholder(category: &Category) -> Self {
        Self {
            title: category.label().to_string(),
            description: String::new(),
            icon: CategoryIcon::Placeholder,
            stats: CategoryStats::default(),
        }
    }
}

/// Category metadata keyed by category, iterated in canonical order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRegistry {
    records: BTreeMap<Category, CategoryRecord>,
}

impl CategoryRegistry {
    pub fn new(records: impl IntoIterator<Item = (Category, CategoryRecord)>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Registered record, or `None` for an unknown category.
    pub fn get(&self, category: &Category) -> Option<&CategoryRecord> {
        self.records.get(category)
    }

    /// Record for `category`, falling back to a placeholder.
    pub fn lookup(&self, category: &Category) -> CategoryRecord {
        self.records
            .get(category)
            .cloned()
            .unwrap_or_else(|| CategoryRecord::placeholder(category))
    }

    /// Icon for `category`; unregistered categories get the placeholder.
    pub fn icon_for(&self, category: &Category) -> CategoryIcon {
        self.records
            .get(category)
            .map(|r| r.icon)
            .unwrap_or(CategoryIcon::Placeholder)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Category> {
        self.records.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One slide of the home page hero carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub image: String,
    pub title: String,
    pub category: Category,
}

impl From<&ProjectRecord> for HeroSlide {
    fn from(project: &ProjectRecord) -> Self {
        Self {
            image: project.image.clone(),
            title: project.title.clone(),
            category: project.category.clone(),
        }
    }
}
