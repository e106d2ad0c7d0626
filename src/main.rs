use archfolio::catalog::{self, CatalogStore, DataSource, JsonFileSource};
use archfolio::config::{self, SiteConfig};
use archfolio::contact::{ContactForm, MailError, Mailer, OutgoingEmail};
use archfolio::fallback::FallbackSource;
use archfolio::output;
use archfolio::query::{CategoryFilter, SortOrder, ViewMode, YearFilter};
use archfolio::rows::RowMapper;
use archfolio::session::{PageSession, Route};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "archfolio")]
#[command(about = "Portfolio catalog for an architecture studio")]
#[command(long_about = "\
Portfolio catalog for an architecture studio

Browse the studio's projects the way the website presents them: search,
filter by category and year, sort, and inspect the category registry.

Data comes from a JSON dataset:

  {
    \"projects\":    [ ... ],          # or \"project_rows\" from the backend
    \"categories\":  { \"Residential\": { ... }, ... },
    \"hero_slides\": [ ... ]
  }

Any section that is missing or unreadable is replaced by the built-in
dataset, so every command always has something to show.

Run 'archfolio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// JSON dataset (overrides data.projects_file)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Filters for the projects listing.
#[derive(clap::Args, Clone)]
struct QueryArgs {
    /// Match title, location, or description (case-insensitive)
    #[arg(long)]
    search: Option<String>,

    /// Category label, or "All"
    #[arg(long)]
    category: Option<String>,

    /// Completion year, or "All"
    #[arg(long)]
    year: Option<String>,

    /// newest, oldest, alphabetical, or size
    #[arg(long, default_value = "newest")]
    sort: String,

    /// One line per project instead of cards
    #[arg(long)]
    list: bool,
}

#[derive(clap::Args, Clone)]
struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    message: String,

    /// Kind of project the enquiry is about
    #[arg(long)]
    project_type: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// List projects matching the given filters
    Projects(QueryArgs),
    /// Show category filters with counts and registry details
    Categories,
    /// List the year filter options
    Years,
    /// Validate the dataset
    Check,
    /// Compose a contact message and print it instead of sending
    Contact(ContactArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Prints the composed email rather than delivering it.
struct PreviewMailer;

impl Mailer for PreviewMailer {
    fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        output::print_email_preview(email);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Projects(args) => {
            let (site_config, store, _) = open_store(&cli.data, &cli.config)?;
            let mut page = PageSession::open(Route::Projects, &store, &site_config.timing, 0);
            if let Some(term) = args.search {
                page.set_search_term(term);
            }
            if let Some(category) = args.category.as_deref() {
                page.set_category_filter(CategoryFilter::from(category));
            }
            if let Some(year) = args.year.as_deref() {
                page.set_year_filter(YearFilter::from(year));
            }
            page.set_sort(SortOrder::from(args.sort.as_str()));
            if args.list {
                page.set_view_mode(ViewMode::List);
            }
            output::print_project_list(&page.visible(), page.summary(), page.filters().view_mode);
        }
        Command::Categories => {
            let (site_config, store, _) = open_store(&cli.data, &cli.config)?;
            let page = PageSession::open(Route::Home, &store, &site_config.timing, 0);
            output::print_category_counts(&page.category_counts(), &page.catalog().categories);
        }
        Command::Years => {
            let (site_config, store, _) = open_store(&cli.data, &cli.config)?;
            let page = PageSession::open(Route::Projects, &store, &site_config.timing, 0);
            output::print_years(&page.available_years());
        }
        Command::Check => {
            let (_, store, data_path) = open_store(&cli.data, &cli.config)?;
            let snapshot = store.snapshot();
            let issues = catalog::audit(&snapshot);
            let label = data_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string());
            output::print_check_report(&label, &snapshot, &issues);
            if !issues.is_empty() {
                return Err(format!("{} issue(s) found", issues.len()).into());
            }
        }
        Command::Contact(args) => {
            let site_config = config::load_config(&cli.config)?;
            let mut form = ContactForm::new();
            form.set_name(args.name);
            form.set_email(args.email);
            form.set_message(args.message);
            if let Some(project_type) = args.project_type {
                form.set_project_type(project_type);
            }
            if let Some(error) = form.email_error() {
                return Err(error.into());
            }
            if !form.can_submit() {
                return Err("name, email and message are required".into());
            }
            let status = form.submit(&PreviewMailer, &site_config.contact);
            if let Some(message) = status.message() {
                println!();
                println!("{}", message);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and the catalog it points at.
fn open_store(
    cli_data: &Option<PathBuf>,
    config_dir: &Path,
) -> Result<(SiteConfig, CatalogStore, Option<PathBuf>), config::ConfigError> {
    let site_config = config::load_config(config_dir)?;
    let data_path = resolve_data_path(cli_data.as_deref(), config_dir, &site_config);
    let source: Box<dyn DataSource> = match &data_path {
        Some(path) => Box::new(JsonFileSource::new(
            path,
            RowMapper::new(&site_config.data.storage_base_url),
        )),
        None => Box::new(FallbackSource),
    };
    let store = CatalogStore::new(catalog::load_catalog(source.as_ref()));
    Ok((site_config, store, data_path))
}

/// `--data` wins; otherwise `data.projects_file` relative to the config
/// directory; otherwise the built-in dataset.
fn resolve_data_path(cli_data: Option<&Path>, config_dir: &Path, config: &SiteConfig) -> Option<PathBuf> {
    cli_data.map(Path::to_path_buf).or_else(|| {
        config
            .data
            .projects_file
            .as_ref()
            .map(|file| config_dir.join(file))
    })
}
