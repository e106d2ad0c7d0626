//! Shared test utilities.
//!
//! Builders for project records, stand-ins for the external collaborators
//! ([`StubSource`], [`RecordingMailer`], [`RecordingHost`]), and dataset
//! fixtures on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let p = project("a", "Hillside House", Category::Residential, "2024");
//! let catalog = load_catalog(&StubSource::healthy(vec![p]));
//! ```

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::catalog::{DataSource, SourceError};
use crate::contact::{MailError, Mailer, OutgoingEmail};
use crate::fallback;
use crate::modal::ScrollHost;
use crate::types::{Category, CategoryRegistry, HeroSlide, ProjectRecord};

// =========================================================================
// Records
// =========================================================================

/// A project with one gallery image and otherwise empty detail fields.
pub fn project(id: &str, title: &str, category: Category, year: &str) -> ProjectRecord {
    let image = format!("{id}-0.jpg");
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("Description of {title}"),
        category,
        year: year.to_string(),
        location: String::new(),
        area: String::new(),
        budget: String::new(),
        status: String::new(),
        image: image.clone(),
        images: vec![image],
        features: Vec::new(),
        is_featured: false,
        slug: None,
    }
}

/// A project whose gallery holds `images` files named `{id}-{i}.jpg`.
pub fn gallery_project(id: &str, images: usize) -> ProjectRecord {
    let mut p = project(id, &format!("Project {id}"), Category::Residential, "2024");
    p.images = (0..images).map(|i| format!("{id}-{i}.jpg")).collect();
    p
}

/// The built-in eight-project dataset.
pub fn sample_projects() -> Vec<ProjectRecord> {
    fallback::projects()
}

/// The built-in four-category registry.
pub fn sample_registry() -> CategoryRegistry {
    fallback::categories()
}

// =========================================================================
// Collaborators
// =========================================================================

/// Records every scroll-lock call it receives.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Vec<bool>,
}

impl RecordingHost {
    /// Lock state after the last call (unlocked if never called).
    pub fn locked(&self) -> bool {
        self.calls.last().copied().unwrap_or(false)
    }
}

impl ScrollHost for RecordingHost {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.calls.push(locked);
    }
}

/// A data source with per-collection failure switches.
#[derive(Debug, Clone, Default)]
pub struct StubSource {
    pub projects: Vec<ProjectRecord>,
    pub fail_projects: bool,
    pub fail_categories: bool,
    pub fail_slides: bool,
}

impl StubSource {
    /// Serves `projects`, the sample registry, and the built-in slides.
    pub fn healthy(projects: Vec<ProjectRecord>) -> Self {
        Self {
            projects,
            ..Default::default()
        }
    }

    /// Every fetch fails.
    pub fn down() -> Self {
        Self {
            projects: Vec::new(),
            fail_projects: true,
            fail_categories: true,
            fail_slides: true,
        }
    }
}

fn unavailable(what: &str) -> SourceError {
    SourceError::Unavailable(format!("{what} endpoint down"))
}

impl DataSource for StubSource {
    fn fetch_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        if self.fail_projects {
            return Err(unavailable("projects"));
        }
        Ok(self.projects.clone())
    }

    fn fetch_categories(&self) -> Result<CategoryRegistry, SourceError> {
        if self.fail_categories {
            return Err(unavailable("categories"));
        }
        Ok(sample_registry())
    }

    fn fetch_hero_slides(&self) -> Result<Vec<HeroSlide>, SourceError> {
        if self.fail_slides {
            return Err(unavailable("hero slides"));
        }
        Ok(fallback::hero_slides())
    }
}

/// Keeps every email handed to it; optionally fails each send.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: RefCell<Vec<OutgoingEmail>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: RefCell::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.borrow().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.borrow_mut().push(email.clone());
        if self.fail {
            return Err(MailError::Transport("connection reset".into()));
        }
        Ok(())
    }
}

// =========================================================================
// Datasets on disk
// =========================================================================

/// Contents of `fixtures/projects.json`.
pub fn fixture_dataset() -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/projects.json");
    std::fs::read_to_string(path).unwrap()
}

/// Write `json` as `projects.json` in `tmp` and return its path.
pub fn write_dataset(tmp: &TempDir, json: &str) -> PathBuf {
    let path = tmp.path().join("projects.json");
    std::fs::write(&path, json).unwrap();
    path
}
