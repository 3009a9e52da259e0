use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use scout::api::creators::CreatorListResponse;
use scout::api::BackendClient;
use scout::config::Config;
use scout::creators::CreatorRecord;
use scout::db::Database;
use scout::history::{HistoryStore, QueryType};
use scout::refine::{FilterCriteria, FilterInput, SearchView, SortKey};
use scout::session::{self, AuthAction, AuthState};

/// Scout: creator discovery for influencer campaigns.
///
/// Fetches creators from the backend, narrows and orders them locally, and
/// remembers your recent searches.
#[derive(Parser)]
#[command(name = "scout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the local database
    Init,

    /// Sign in to the backend and store the session
    Login {
        /// Account email
        email: String,

        /// Account password (falls back to SCOUT_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Search creators and refine the results locally
    Search {
        /// What to search for
        query: String,

        /// Use the AI semantic matcher instead of keyword search
        #[arg(long)]
        ai: bool,

        /// Narrow the fetched results further by text
        #[arg(long)]
        text: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Browse the creator listing with local filters
    Browse {
        /// Free-text match on name, bio, niche and categories
        #[arg(long)]
        text: Option<String>,

        /// Listing page to fetch (default: 1)
        #[arg(long, default_value = "1")]
        page: u32,

        #[command(flatten)]
        filters: FilterArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show, search, or clear recent searches
    History {
        /// Remove all saved searches
        #[arg(long)]
        clear: bool,

        /// Only show searches containing this text
        #[arg(long)]
        suggest: Option<String>,
    },

    /// Show system status (database, session, recent searches)
    Status,
}

/// Local filter flags. Numeric values are taken as text and parsed
/// leniently; anything unparseable is ignored with a warning.
#[derive(Args, Default)]
struct FilterArgs {
    /// Niche, exact match ignoring case (e.g. "Fitness & Health")
    #[arg(long)]
    niche: Option<String>,

    /// Audience tier: nano, micro, macro, mega
    #[arg(long)]
    tier: Option<String>,

    /// Primary platform (e.g. instagram, tiktok, youtube)
    #[arg(long)]
    platform: Option<String>,

    #[arg(long)]
    min_followers: Option<String>,

    #[arg(long)]
    max_followers: Option<String>,

    /// Minimum engagement rate in percent
    #[arg(long)]
    min_engagement: Option<String>,

    /// Maximum engagement rate in percent
    #[arg(long)]
    max_engagement: Option<String>,

    #[arg(long)]
    country: Option<String>,

    /// City, substring match ignoring case
    #[arg(long)]
    city: Option<String>,

    /// Only verified creators
    #[arg(long, conflicts_with = "unverified")]
    verified: bool,

    /// Only unverified creators
    #[arg(long)]
    unverified: bool,

    #[arg(long)]
    min_collaborations: Option<String>,

    /// Minimum satisfaction score (0-5)
    #[arg(long)]
    min_satisfaction: Option<String>,
}

impl FilterArgs {
    fn to_criteria(&self) -> FilterCriteria {
        let verification = if self.verified {
            Some("verified".to_string())
        } else if self.unverified {
            Some("unverified".to_string())
        } else {
            None
        };
        FilterCriteria::from_input(&FilterInput {
            niche: self.niche.clone(),
            tier: self.tier.clone(),
            platform: self.platform.clone(),
            min_followers: self.min_followers.clone(),
            max_followers: self.max_followers.clone(),
            min_engagement: self.min_engagement.clone(),
            max_engagement: self.max_engagement.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            verification,
            min_collaborations: self.min_collaborations.clone(),
            min_satisfaction: self.min_satisfaction.clone(),
        })
    }
}

#[derive(Args)]
struct DisplayArgs {
    /// Ordering: relevance, followers-desc, followers-asc, engagement-desc,
    /// satisfaction-desc, recent-activity
    #[arg(long, default_value = "relevance")]
    sort: SortKey,

    /// Max rows to display (default: 25)
    #[arg(long, default_value = "25")]
    limit: usize,

    /// Max creators to fetch from the backend (default: 100)
    #[arg(long, default_value = "100")]
    fetch: u32,

    /// Read creators from a JSON file instead of the backend
    #[arg(long)]
    input: Option<PathBuf>,

    /// Also print tier / niche / platform counts
    #[arg(long)]
    facets: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scout=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Scout database...");
            let db = scout::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: run `scout login <email>` or set SCOUT_API_TOKEN.");
        }

        Commands::Login { email, password } => {
            let password = config.require_password(password)?;
            let db = scout::db::initialize_sqlite(&config.db_path)?;
            let client = BackendClient::new(&config.api_url, None)?;

            let state = session::reduce(AuthState::default(), AuthAction::Start);
            let state = match scout::api::auth::login(&client, &email, &password).await {
                Ok(resp) => session::reduce(
                    state,
                    AuthAction::Success {
                        user: resp.user,
                        token: resp.token,
                    },
                ),
                Err(e) => {
                    let failed = session::reduce(state, AuthAction::Failure(format!("{e:#}")));
                    session::save(&db, &failed).await?;
                    return Err(e);
                }
            };
            session::save(&db, &state).await?;

            let name = state
                .user
                .as_ref()
                .map(|u| if u.name.is_empty() { email.clone() } else { u.name.clone() })
                .unwrap_or(email);
            println!("{}", format!("Signed in as {name}.").green());
        }

        Commands::Logout => {
            let db = scout::db::initialize_sqlite(&config.db_path)?;
            let state = session::reduce(session::load(&db).await, AuthAction::Logout);
            session::save(&db, &state).await?;
            println!("Signed out.");
        }

        Commands::Search {
            query,
            ai,
            text,
            filters,
            display,
        } => {
            let db = scout::db::initialize_sqlite(&config.db_path)?;
            let query_type = if ai {
                QueryType::AiSemantic
            } else {
                QueryType::FreeText
            };
            let criteria = filters.to_criteria();

            // Offline, the query itself is the only text match available.
            let (records, local_text) = match &display.input {
                Some(path) => (load_records(path)?, text.unwrap_or_else(|| query.clone())),
                None => {
                    let client = backend_client(&config, &db).await?;
                    let spinner = spinner(&format!("Searching for \"{query}\"..."));
                    let result = if ai {
                        scout::api::creators::ai_search(&client, &query, display.fetch).await
                    } else {
                        scout::api::creators::search_creators(&client, &query, display.fetch).await
                    };
                    spinner.finish_and_clear();
                    (result?.creators, text.unwrap_or_default())
                }
            };

            let view = build_view(records, criteria, local_text, display.sort);
            render(&view, &display);

            let store = HistoryStore::new(db.clone(), config.history_capacity);
            store.record(&query, query_type, view.criteria()).await?;
            db.insert_search_log(
                &query,
                query_type.as_str(),
                view.total_len() as u32,
                view.visible_len() as u32,
            )
            .await?;
        }

        Commands::Browse {
            text,
            page,
            filters,
            display,
        } => {
            let records = match &display.input {
                Some(path) => load_records(path)?,
                None => {
                    let db = scout::db::initialize_sqlite(&config.db_path)?;
                    let client = backend_client(&config, &db).await?;
                    let spinner = spinner("Fetching creators...");
                    let result =
                        scout::api::creators::list_creators(&client, page, display.fetch).await;
                    spinner.finish_and_clear();
                    result?.creators
                }
            };

            let view = build_view(
                records,
                filters.to_criteria(),
                text.unwrap_or_default(),
                display.sort,
            );
            render(&view, &display);
        }

        Commands::History { clear, suggest } => {
            let db = scout::db::initialize_sqlite(&config.db_path)?;
            let store = HistoryStore::new(db, config.history_capacity);

            if clear {
                store.clear().await?;
                println!("Search history cleared.");
                return Ok(());
            }

            let history = store.load().await;
            let entries = history.suggestions(suggest.as_deref().unwrap_or(""), history.capacity());
            scout::output::terminal::display_history(&entries);
        }

        Commands::Status => {
            if !scout::status::is_initialized(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `scout init` to set up the database.");
                return Ok(());
            }
            let db = scout::db::open_sqlite(&config.db_path)?;
            scout::status::show(&db, &config.db_path, &config.api_url, config.history_capacity)
                .await?;
        }
    }

    Ok(())
}

/// Build a backend client, preferring the stored login session over a
/// static SCOUT_API_TOKEN.
async fn backend_client(config: &Config, db: &Arc<dyn Database>) -> Result<BackendClient> {
    let state = session::load(db).await;
    let token = if state.is_signed_in() {
        state.token
    } else {
        config.api_token.clone()
    };
    let client = BackendClient::new(&config.api_url, token)?;
    if !client.is_authenticated() {
        warn!("No session or SCOUT_API_TOKEN; calling the backend anonymously");
    }
    Ok(client)
}

/// Load creators from a JSON file: either a bare array or a response envelope.
fn load_records(path: &Path) -> Result<Vec<CreatorRecord>> {
    let path = expand_home(path);
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let value = match value {
        serde_json::Value::Array(_) => serde_json::json!({ "creators": value }),
        other => other,
    };
    let resp: CreatorListResponse = serde_json::from_value(value)
        .with_context(|| format!("{} does not contain a creator list", path.display()))?;
    info!(count = resp.creators.len(), path = %path.display(), "Loaded creators from file");
    Ok(resp.creators)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn build_view(
    records: Vec<CreatorRecord>,
    criteria: FilterCriteria,
    text: String,
    sort: SortKey,
) -> SearchView {
    let mut view = SearchView::new(records);
    view.set_criteria(criteria);
    view.set_free_text(text);
    view.set_sort_key(sort);
    view
}

fn render(view: &SearchView, display: &DisplayArgs) {
    if let Some(filters) = scout::output::terminal::describe_criteria(view.criteria()) {
        let active = view.criteria().active_count();
        println!("{}", format!("Filters ({active}): {filters}").dimmed());
    }
    if !view.free_text().trim().is_empty() {
        println!("{}", format!("Text: \"{}\"", view.free_text().trim()).dimmed());
    }
    scout::output::terminal::display_creator_table(view, display.limit);
    if display.facets && view.visible_len() > 0 {
        scout::output::terminal::display_facets(&view.facets());
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
