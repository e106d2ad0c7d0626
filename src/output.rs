//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every project is shown by its positional index and title first, with
//! location, area, and description as indented context lines. The grid
//! view shows the context; the list view keeps one line per project.
//!
//! # Output Format
//!
//! ## Projects (grid)
//!
//! ```text
//! Showing 1 of 8 projects
//! 001 Urban Residential Tower (Residential, 2024)
//!     Location: Johannesburg CBD
//!     Area: 8,500 sqm
//!     A luxury residential tower that redefines urban living with...
//! ```
//!
//! ## Projects (list)
//!
//! ```text
//! Showing 1 of 8 projects
//! 001 Urban Residential Tower | Residential | 2024 | Johannesburg CBD
//! ```
//!
//! ## Categories
//!
//! ```text
//! All (8)
//! 001 Residential (3) [home]
//!     Custom homes and residential developments that enhance livin...
//!     15+ completed · 20 years · Sustainable Family Homes
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::catalog::{Catalog, CatalogIssue};
use crate::contact::OutgoingEmail;
use crate::query::{CategoryCount, CategoryFilter, QuerySummary, ViewMode, YearFilter};
use crate::types::{CategoryIcon, CategoryRegistry, ProjectRecord};

const DESCRIPTION_WIDTH: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

fn icon_name(icon: CategoryIcon) -> &'static str {
    match icon {
        CategoryIcon::Home => "home",
        CategoryIcon::Building => "building",
        CategoryIcon::GraduationCap => "graduation-cap",
        CategoryIcon::Container => "container",
        CategoryIcon::Placeholder => "placeholder",
    }
}

// ============================================================================
// Projects
// ============================================================================

/// Format the visible projects under their summary line.
pub fn format_project_list(
    visible: &[&ProjectRecord],
    summary: QuerySummary,
    view_mode: ViewMode,
) -> Vec<String> {
    let mut lines = vec![summary.to_string()];
    if summary.is_empty() {
        lines.push("No projects match the current filters.".to_string());
        return lines;
    }

    for (i, p) in visible.iter().enumerate() {
        match view_mode {
            ViewMode::List => {
                let mut cols = vec![p.title.as_str(), p.category.label(), p.year.as_str()];
                if !p.location.is_empty() {
                    cols.push(p.location.as_str());
                }
                lines.push(format!("{} {}", format_index(i + 1), cols.join(" | ")));
            }
            ViewMode::Grid => {
                lines.push(format!(
                    "{} {} ({}, {})",
                    format_index(i + 1),
                    p.title,
                    p.category,
                    p.year
                ));
                if !p.location.is_empty() {
                    lines.push(format!("{}Location: {}", indent(1), p.location));
                }
                if !p.area.is_empty() {
                    lines.push(format!("{}Area: {}", indent(1), p.area));
                }
                if !p.description.is_empty() {
                    lines.push(format!(
                        "{}{}",
                        indent(1),
                        truncate_desc(&p.description, DESCRIPTION_WIDTH)
                    ));
                }
            }
        }
    }
    lines
}

pub fn print_project_list(visible: &[&ProjectRecord], summary: QuerySummary, view_mode: ViewMode) {
    for line in format_project_list(visible, summary, view_mode) {
        println!("{}", line);
    }
}

// ============================================================================
// Categories and years
// ============================================================================

/// Format category filter buttons with their counts and registry cards.
pub fn format_category_counts(counts: &[CategoryCount], registry: &CategoryRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    let mut position = 0;
    for count in counts {
        match &count.filter {
            CategoryFilter::All => lines.push(format!("All ({})", count.count)),
            CategoryFilter::Only(category) => {
                position += 1;
                let card = registry.lookup(category);
                lines.push(format!(
                    "{} {} ({}) [{}]",
                    format_index(position),
                    category,
                    count.count,
                    icon_name(card.icon)
                ));
                if !card.description.is_empty() {
                    lines.push(format!(
                        "{}{}",
                        indent(1),
                        truncate_desc(&card.description, DESCRIPTION_WIDTH)
                    ));
                }
                let stats: Vec<String> = [
                    (card.stats.completed.as_str(), " completed"),
                    (card.stats.years.as_str(), " years"),
                    (card.stats.specialty.as_str(), ""),
                ]
                .iter()
                .filter(|(value, _)| !value.is_empty())
                .map(|(value, suffix)| format!("{value}{suffix}"))
                .collect();
                if !stats.is_empty() {
                    lines.push(format!("{}{}", indent(1), stats.join(" · ")));
                }
            }
        }
    }
    lines
}

pub fn print_category_counts(counts: &[CategoryCount], registry: &CategoryRegistry) {
    for line in format_category_counts(counts, registry) {
        println!("{}", line);
    }
}

pub fn format_years(years: &[YearFilter]) -> Vec<String> {
    years.iter().map(|y| y.label().to_string()).collect()
}

pub fn print_years(years: &[YearFilter]) {
    for line in format_years(years) {
        println!("{}", line);
    }
}

// ============================================================================
// Dataset check
// ============================================================================

/// Format a dataset summary followed by any issues found in it.
pub fn format_check_report(source: &str, catalog: &Catalog, issues: &[CatalogIssue]) -> Vec<String> {
    let mut lines = vec![
        format!("Source: {source}"),
        format!("Projects: {}", catalog.projects.len()),
        format!("Categories: {}", catalog.categories.len()),
        format!("Hero slides: {}", catalog.hero_slides.len()),
    ];
    if issues.is_empty() {
        lines.push("No issues found".to_string());
    } else {
        lines.push(format!("Issues ({})", issues.len()));
        lines.extend(issues.iter().map(|issue| format!("{}{}", indent(1), issue)));
    }
    lines
}

pub fn print_check_report(source: &str, catalog: &Catalog, issues: &[CatalogIssue]) {
    for line in format_check_report(source, catalog, issues) {
        println!("{}", line);
    }
}

// ============================================================================
// Contact
// ============================================================================

pub fn format_email_preview(email: &OutgoingEmail) -> Vec<String> {
    vec![
        format!("From: {}", email.from),
        format!("To: {}", email.to),
        format!("Reply-To: {}", email.reply_to),
        format!("Subject: {}", email.subject),
        String::new(),
        email.html.clone(),
    ]
}

pub fn print_email_preview(email: &OutgoingEmail) {
    for line in format_email_preview(email) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::audit;
    use crate::fallback;
    use crate::query::{FilterState, available_years, category_counts, visible_projects};
    use crate::test_helpers::*;
    use crate::types::Category;

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("hello", 10), "hello");
    }

    #[test]
    fn truncate_desc_long() {
        assert_eq!(truncate_desc("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("80 m² floor", 4), "80 m...");
        assert_eq!(truncate_desc("m²m²m²", 3), "m²m...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
    }

    // =========================================================================
    // Projects
    // =========================================================================

    #[test]
    fn grid_view_shows_context_lines() {
        let mut p = project("1", "Clinic", Category::Commercial, "2021");
        p.location = "Soweto".into();
        p.area = "900 sqm".into();
        let lines = format_project_list(&[&p], QuerySummary { shown: 1, total: 3 }, ViewMode::Grid);
        assert_eq!(
            lines,
            vec![
                "Showing 1 of 3 projects",
                "001 Clinic (Commercial, 2021)",
                "    Location: Soweto",
                "    Area: 900 sqm",
                "    Description of Clinic",
            ]
        );
    }

    #[test]
    fn list_view_is_one_line_per_project() {
        let a = project("1", "Clinic", Category::Commercial, "2021");
        let b = project("2", "School", Category::Education, "2019");
        let lines = format_project_list(
            &[&a, &b],
            QuerySummary { shown: 2, total: 2 },
            ViewMode::List,
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "002 School | Education | 2019");
    }

    #[test]
    fn empty_result_explains_itself() {
        let lines = format_project_list(&[], QuerySummary { shown: 0, total: 8 }, ViewMode::Grid);
        assert_eq!(lines[0], "Showing 0 of 8 projects");
        assert_eq!(lines[1], "No projects match the current filters.");
    }

    // =========================================================================
    // Categories, years, check, contact
    // =========================================================================

    #[test]
    fn category_lines_include_counts_and_icons() {
        let projects = fallback::projects();
        let registry = fallback::categories();
        let lines = format_category_counts(&category_counts(&projects, &registry), &registry);
        assert_eq!(lines[0], "All (8)");
        assert!(lines.iter().any(|l| l.starts_with("001 Residential (3) [home]")));
        assert!(lines.iter().any(|l| l.contains("Container Architecture (1) [container]")));
    }

    #[test]
    fn residential_card_lines_match_the_builtin_registry() {
        let projects = fallback::projects();
        let registry = fallback::categories();
        let lines = format_category_counts(&category_counts(&projects, &registry), &registry);
        assert_eq!(
            &lines[..4],
            &[
                "All (8)",
                "001 Residential (3) [home]",
                "    Custom homes and residential developments that enhance livin...",
                "    15+ completed · 20 years · Sustainable Family Homes",
            ]
        );
    }

    #[test]
    fn search_listing_matches_documented_lines() {
        let projects = fallback::projects();
        let filters = FilterState {
            search_term: "tower".into(),
            ..FilterState::default()
        };
        let visible = visible_projects(&projects, &filters);
        let summary = QuerySummary {
            shown: visible.len(),
            total: projects.len(),
        };
        assert_eq!(
            format_project_list(&visible, summary, ViewMode::List),
            vec![
                "Showing 1 of 8 projects",
                "001 Urban Residential Tower | Residential | 2024 | Johannesburg CBD",
            ]
        );
        let grid = format_project_list(&visible, summary, ViewMode::Grid);
        assert_eq!(grid[1], "001 Urban Residential Tower (Residential, 2024)");
        assert_eq!(grid[2], "    Location: Johannesburg CBD");
        assert_eq!(grid[3], "    Area: 8,500 sqm");
        assert_eq!(
            grid[4],
            "    A luxury residential tower that redefines urban living with..."
        );
    }

    #[test]
    fn years_list_starts_with_all() {
        let lines = format_years(&available_years(&fallback::projects()));
        assert_eq!(lines, vec!["All", "2024", "2023", "2022"]);
    }

    #[test]
    fn check_report_lists_issues() {
        let catalog = fallback::catalog();
        let clean = format_check_report("built-in", &catalog, &audit(&catalog));
        assert_eq!(clean.last().map(String::as_str), Some("No issues found"));

        let issues = vec![CatalogIssue::DuplicateId("7".into())];
        let lines = format_check_report("projects.json", &catalog, &issues);
        assert_eq!(lines[0], "Source: projects.json");
        assert_eq!(lines[4], "Issues (1)");
        assert_eq!(lines[5], "    duplicate project id 7");
    }

    #[test]
    fn email_preview_has_headers_then_body() {
        let email = OutgoingEmail {
            from: "a@b.co".into(),
            to: "c@d.co".into(),
            reply_to: "e@f.co".into(),
            subject: "Hello".into(),
            html: "<p>x</p>".into(),
        };
        let lines = format_email_preview(&email);
        assert_eq!(lines[3], "Subject: Hello");
        assert_eq!(lines[5], "<p>x</p>");
    }
}
