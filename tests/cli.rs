//! End-to-end tests driving the `archfolio` binary.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/projects.json")
}

/// Run the binary inside `dir` so the default `--config .` sees only what
/// the test put there.
fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_archfolio"))
        .current_dir(dir.path())
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run archfolio")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn with_fixture(args: &[&str]) -> Output {
    let tmp = TempDir::new().unwrap();
    let data = fixture();
    let mut full = vec!["--data", data.to_str().unwrap()];
    full.extend_from_slice(args);
    run(&tmp, &full)
}

// =============================================================================
// projects
// =============================================================================

#[test]
fn search_narrows_the_listing() {
    let out = with_fixture(&["projects", "--search", "tower"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.starts_with("Showing 1 of 4 projects\n"));
    assert!(text.contains("001 Riverside Tower (Residential, 2023)"));
}

#[test]
fn category_filter_in_list_view_sorted_newest_first() {
    let out = with_fixture(&["projects", "--category", "Commercial", "--list"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let lines: Vec<String> = stdout(&out).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "Showing 2 of 4 projects",
            "001 Market Hall | Commercial | 2024 | Maboneng",
            "002 Office Park | Commercial | 2022 | Midrand",
        ]
    );
}

#[test]
fn size_sort_puts_largest_first() {
    let out = with_fixture(&["projects", "--sort", "size", "--list"]);
    let text = stdout(&out);
    assert!(text.lines().nth(1).unwrap().starts_with("001 Riverside Tower"));
    assert!(text.lines().nth(4).unwrap().starts_with("004 Hillside House"));
}

#[test]
fn no_match_prints_empty_state() {
    let out = with_fixture(&["projects", "--search", "zzz"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No projects match the current filters."));
}

#[test]
fn builtin_dataset_without_data_flag() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["projects", "--list"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).starts_with("Showing 8 of 8 projects"));
}

#[test]
fn unreadable_dataset_falls_back_with_warning() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["--data", "missing.json", "projects"]);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("Showing 8 of 8 projects"));
    assert!(stderr(&out).contains("using fallback projects"));
}

// =============================================================================
// categories, years, check
// =============================================================================

#[test]
fn categories_show_counts_in_registry_order() {
    let out = with_fixture(&["categories"]);
    let text = stdout(&out);
    assert!(text.starts_with("All (4)\n"));
    assert!(text.contains("001 Residential (2) [home]"));
    assert!(text.contains("002 Commercial (2) [building]"));
    assert!(text.contains("003 Education (0) [graduation-cap]"));
}

#[test]
fn years_are_listed_newest_first() {
    let out = with_fixture(&["years"]);
    assert_eq!(stdout(&out), "All\n2024\n2023\n2022\n");
}

#[test]
fn check_passes_on_clean_dataset() {
    let out = with_fixture(&["check"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Projects: 4"));
    // One project is featured, so it is the only slide.
    assert!(text.contains("Hero slides: 1"));
    assert!(text.contains("No issues found"));
}

#[test]
fn check_fails_on_problems() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("bad.json"),
        r#"{"projects": [
            {"id": 1, "title": "A", "category": "Landscape", "year": "2020", "image": "a.jpg", "images": []},
            {"id": 1, "title": "B", "category": "Residential", "year": "2021", "image": "b.jpg", "images": ["b.jpg"]}
        ]}"#,
    )
    .unwrap();
    let out = run(&tmp, &["--data", "bad.json", "check"]);
    assert!(!out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Issues (3)"));
    assert!(text.contains("unregistered category \"Landscape\""));
    assert!(text.contains("duplicate project id 1"));
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_names_the_dataset() {
    let tmp = TempDir::new().unwrap();
    std::fs::copy(fixture(), tmp.path().join("portfolio.json")).unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "[data]\nprojects_file = \"portfolio.json\"\n",
    )
    .unwrap();
    let out = run(&tmp, &["projects"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).starts_with("Showing 4 of 4 projects"));
}

#[test]
fn invalid_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "[timing]\nexit_delay = 3\n").unwrap();
    let out = run(&tmp, &["projects"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("unknown field"));
}

#[test]
fn gen_config_prints_every_section() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["gen-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    for section in ["[data]", "[timing]", "[contact]"] {
        assert!(text.contains(section), "missing {section}");
    }
}

// =============================================================================
// contact
// =============================================================================

#[test]
fn contact_previews_the_email() {
    let tmp = TempDir::new().unwrap();
    let out = run(
        &tmp,
        &[
            "contact",
            "--name",
            "Sipho",
            "--email",
            "sipho@example.com",
            "--message",
            "Quote for <b>two</b> classrooms",
        ],
    );
    assert!(out.status.success(), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Subject: New Contact Form Submission from Sipho"));
    assert!(text.contains("To: hla@hla.co.za"));
    assert!(text.contains("&lt;b&gt;two&lt;/b&gt;"));
    assert!(text.contains("Message sent successfully! We will get back to you soon."));
}

#[test]
fn contact_rejects_invalid_email() {
    let tmp = TempDir::new().unwrap();
    let out = run(
        &tmp,
        &["contact", "--name", "Sipho", "--email", "sipho@", "--message", "Hi"],
    );
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Please enter a valid email address"));
    assert!(stdout(&out).is_empty());
}
