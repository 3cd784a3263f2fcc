//! sukhan: Command-line interface for the poetry search helpers and MCP server

use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::{
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use sukhan::auth::{hash_password, Role, UserStore};
use sukhan::config::{path_resolver::resolve_lossy, path_resolver, AppConfig, SearchConfig};
use sukhan::index::{BuildOutcome, IndexBuilder};
use sukhan::rewriter::{rewrite_query, Lang};
use sukhan::search::Searcher;
use sukhan::site::{poetry_sitemap, poets_sitemap, robots_txt, sitemap_index, SitemapKind};
use sukhan::SukhanError;
use tokio::io::{stdin, stdout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// ============================================================================
// MCP Server Implementation
// ============================================================================

/// MCP Server for poetry search
#[derive(Clone)]
struct SukhanMcpServer {
    searcher: Arc<Searcher>,
    default_lang: Lang,
    default_top_k: usize,
}

/// Request parameters for rewrite_query tool
#[derive(Debug, Deserialize, JsonSchema)]
struct RewriteQueryParams {
    /// Free-text query
    #[serde(default)]
    query: String,
    /// Query language: "sd" or "en" (default: server language)
    lang: Option<String>,
}

/// Request parameters for search_poetry tool
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchPoetryParams {
    /// Free-text query
    #[serde(default)]
    query: String,
    /// Query language: "sd" or "en" (default: server language)
    lang: Option<String>,
    /// Number of results to return (default: server setting)
    top_k: Option<usize>,
    /// Optional theme filter, e.g. "love"
    theme: Option<String>,
    /// Optional form filter, e.g. "ghazal"
    form: Option<String>,
    /// Apply query rewriting (default: true)
    #[serde(default = "default_rewrite")]
    rewrite: bool,
}

fn default_rewrite() -> bool {
    true
}

/// Request parameters for list_themes tool
#[derive(Debug, Deserialize, JsonSchema)]
struct ListThemesParams {
    /// Language for theme labels (default: server language)
    lang: Option<String>,
}

/// Map a boundary error onto the MCP error space
fn to_mcp_error(err: SukhanError) -> rmcp::Error {
    if err.is_client_error() {
        rmcp::Error::invalid_params(err.to_string(), Some(err.to_json()))
    } else {
        rmcp::Error::internal_error(err.to_string(), Some(err.to_json()))
    }
}

fn parse_lang(lang: Option<&str>, fallback: Lang) -> Result<Lang, SukhanError> {
    match lang {
        Some(tag) => tag
            .parse()
            .map_err(|e: anyhow::Error| SukhanError::BadRequest(e.to_string())),
        None => Ok(fallback),
    }
}

#[tool(tool_box)]
impl SukhanMcpServer {
    fn new(index_dir: &str, config: &AppConfig) -> Result<Self> {
        let searcher = Searcher::new(index_dir)?;
        Ok(Self {
            searcher: Arc::new(searcher),
            default_lang: config.default_lang(),
            default_top_k: config.default_top_k(),
        })
    }

    /// Rewrite a query into filters, expansions and pills
    #[tool(description = "Normalize a poetry search query and extract century, theme and form filters")]
    fn rewrite_query(
        &self,
        #[tool(aggr)] params: RewriteQueryParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let lang = parse_lang(params.lang.as_deref(), self.default_lang).map_err(to_mcp_error)?;
        let rewritten = rewrite_query(&params.query, lang);
        let json = serde_json::to_string_pretty(&rewritten)
            .map_err(|e| rmcp::Error::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Search the poem index
    #[tool(description = "Search Sindhi and English poetry with query rewriting and filters")]
    fn search_poetry(
        &self,
        #[tool(aggr)] params: SearchPoetryParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let lang = parse_lang(params.lang.as_deref(), self.default_lang).map_err(to_mcp_error)?;
        let top_k = params.top_k.unwrap_or(self.default_top_k);
        if top_k == 0 {
            return Err(to_mcp_error(SukhanError::BadRequest(
                "top_k must be greater than 0".to_string(),
            )));
        }

        let config = SearchConfig::new()
            .with_lang(lang)
            .with_top_k(top_k)
            .with_rewrite(params.rewrite)
            .with_theme_filter(params.theme)
            .with_form_filter(params.form);

        let outcome = self.searcher.search(&params.query, &config);

        let mut output = format!(
            "Found {} results for '{}'",
            outcome.results.len(),
            params.query
        );
        if !outcome.query.pills.is_empty() {
            output.push_str(&format!(" [{}]", outcome.query.pills.join(", ")));
        }
        output.push_str(":\n\n");

        for (i, result) in outcome.results.iter().enumerate() {
            output.push_str(&format!(
                "{}. [score: {:.4}] {} ({})\n   /{}/poetry/{}\n   {}\n\n",
                i + 1,
                result.score,
                result.title,
                result.poet,
                result.lang,
                result.slug,
                result.snippet
            ));
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// List the known themes
    #[tool(description = "List poetry themes with their labels and poem counts")]
    fn list_themes(
        &self,
        #[tool(aggr)] params: ListThemesParams,
    ) -> Result<CallToolResult, rmcp::Error> {
        let lang = parse_lang(params.lang.as_deref(), self.default_lang).map_err(to_mcp_error)?;
        let themes = self.searcher.theme_counts();
        let mut output = format!("Found {} themes:\n\n", themes.len());

        for (theme, count) in &themes {
            output.push_str(&format!("- {} [{}] ({})\n", theme.label(lang), theme.key, count));
        }

        let docstore = self.searcher.docstore();
        let forms = docstore.list_forms();
        if !forms.is_empty() {
            output.push_str(&format!("\nForms in the archive: {}\n", forms.join(", ")));
        }
        let tags: Vec<String> = docstore
            .list_tags()
            .into_iter()
            .map(|(tag, count)| format!("{} ({})", tag, count))
            .collect();
        if !tags.is_empty() {
            output.push_str(&format!("Tags in the archive: {}\n", tags.join(", ")));
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    /// List the poets in the index
    #[tool(description = "List poets in the archive with their poem counts")]
    fn list_poets(&self) -> Result<CallToolResult, rmcp::Error> {
        let poets = self.searcher.docstore().list_poets();
        let mut output = format!("Found {} poets:\n\n", poets.len());

        for (poet, count) in &poets {
            let lifespan = match (poet.birth_year, poet.death_year) {
                (Some(b), Some(d)) => format!(" {}-{}", b, d),
                (Some(b), None) => format!(" b. {}", b),
                (None, Some(d)) => format!(" d. {}", d),
                (None, None) => String::new(),
            };
            output.push_str(&format!("- {}{} ({})\n", poet.name, lifespan, count));
        }

        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

#[tool(tool_box)]
impl ServerHandler for SukhanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Sindhi/English poetry search server with century, theme and form query rewriting"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// CLI Implementation
// ============================================================================

/// sukhan: query rewriting and search for a Sindhi/English poetry archive
#[derive(Parser)]
#[command(name = "sukhan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize sukhan configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Rewrite a query and print the result as JSON
    Rewrite {
        /// Search query
        query: String,

        /// Query language: sd or en
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Build the search index from a JSONL corpus
    Build {
        /// Path to the JSONL corpus file
        #[arg(short, long)]
        input: String,

        /// Path to the output index directory
        #[arg(short, long)]
        output: Option<String>,

        /// Rebuild even if the corpus is unchanged
        #[arg(short, long)]
        force: bool,
    },
    /// Search the index
    Search {
        /// Search query
        query: String,

        /// Path to the index directory
        #[arg(short, long)]
        index_dir: Option<String>,

        /// Query language: sd or en
        #[arg(short, long)]
        lang: Option<String>,

        /// Number of results to return
        #[arg(short, long)]
        top_k: Option<usize>,

        /// Filter by theme
        #[arg(long)]
        theme: Option<String>,

        /// Filter by form
        #[arg(long)]
        form: Option<String>,

        /// Search the raw query without rewriting
        #[arg(long)]
        no_rewrite: bool,
    },
    /// Start the MCP server
    Serve {
        /// Path to the index directory
        #[arg(short, long)]
        index_dir: Option<String>,
    },
    /// Hash a password in the stored format
    HashPassword {
        /// Plain-text password
        password: String,
    },
    /// Manage admin users
    User {
        /// Path to the users database
        #[arg(long, global = true)]
        db: Option<String>,

        #[command(subcommand)]
        action: UserAction,
    },
    /// Print robots.txt
    Robots {
        /// Public base URL of the site
        #[arg(short, long)]
        base_url: Option<String>,
    },
    /// Print an XML sitemap
    Sitemap {
        /// Public base URL of the site
        #[arg(short, long)]
        base_url: Option<String>,

        /// Path to the index directory
        #[arg(short, long)]
        index_dir: Option<String>,

        /// Sitemap kind: index, poetry or poets
        #[arg(short, long, default_value = "index")]
        kind: String,

        /// Language of the poetry or poets sitemap
        #[arg(short, long)]
        lang: Option<String>,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user
    Add {
        username: String,
        password: String,
        /// Role: admin or editor
        #[arg(short, long, default_value = "editor")]
        role: String,
    },
    /// Verify a username/password pair
    Check { username: String, password: String },
    /// Soft-delete a user
    Remove { username: String },
    /// List active users
    List,
}

fn resolve_lang(lang: Option<String>, config: &AppConfig) -> Result<Lang> {
    match lang {
        Some(tag) => tag.parse(),
        None => Ok(config.default_lang()),
    }
}

fn run_user_action(store: &UserStore, action: UserAction) -> Result<()> {
    match action {
        UserAction::Add {
            username,
            password,
            role,
        } => {
            let role: Role = role.parse()?;
            let user = store.create_user(&username, &password, role)?;
            println!("Created {} '{}' ({})", user.role, user.username, user.id);
        }
        UserAction::Check { username, password } => {
            let user = store.authenticate(&username, &password)?;
            println!("OK: '{}' is {}", user.username, user.role);
        }
        UserAction::Remove { username } => {
            store.soft_delete(&username)?;
            println!("Removed '{}'", username.trim());
        }
        UserAction::List => {
            let users = store.list()?;
            if users.is_empty() {
                println!("No users");
            }
            for user in users {
                println!(
                    "{}\t{}\t{}",
                    user.username,
                    user.role,
                    user.created_at.format("%Y-%m-%d")
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (to stderr to not interfere with MCP stdio)
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Init and HashPassword must work even when the config file is broken
    match cli.command {
        Commands::Init { force } => run_init(
            &path_resolver::get_config_dir(),
            &path_resolver::get_default_config_path(),
            force,
        ),
        Commands::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
        command => {
            let config = AppConfig::load()?;
            run_command(command, &config).await
        }
    }
}

/// Write the default configuration file, keeping an existing one unless forced
fn run_init(config_dir: &Path, config_path: &Path, force: bool) -> Result<()> {
    eprintln!("Initializing sukhan configuration...");
    eprintln!("Config directory: {}", config_dir.display());

    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)?;
        eprintln!("Created config directory");
    }

    if config_path.exists() && !force {
        eprintln!("Configuration file already exists: {}", config_path.display());
        eprintln!("Use --force to overwrite");
        return Ok(());
    }

    std::fs::write(config_path, AppConfig::default().to_toml()?)?;

    eprintln!("Created configuration file: {}", config_path.display());
    eprintln!("Edit {} to customize settings.", config_path.display());
    Ok(())
}

async fn run_command(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Rewrite { query, lang } => {
            let lang = resolve_lang(lang, config)?;
            let rewritten = rewrite_query(&query, lang);
            println!("{}", serde_json::to_string_pretty(&rewritten)?);
            Ok(())
        }
        Commands::Build {
            input,
            output,
            force,
        } => {
            let resolved_input = resolve_lossy(&input);
            let resolved_output =
                resolve_lossy(output.as_deref().unwrap_or_else(|| config.index_dir()));

            eprintln!("Building index from {} to {}", resolved_input, resolved_output);

            let builder = IndexBuilder::new().with_force(force);
            let outcome = builder.build_with_progress(
                Path::new(&resolved_input),
                Path::new(&resolved_output),
                |step, total, msg| {
                    eprintln!("[{}/{}] {}", step, total, msg);
                },
            )?;

            match outcome {
                BuildOutcome::Built { doc_count } => {
                    eprintln!("\nIndex build complete! ({} poems)", doc_count)
                }
                BuildOutcome::UpToDate { doc_count } => eprintln!(
                    "\nIndex already up to date ({} poems). Use --force to rebuild.",
                    doc_count
                ),
            }
            Ok(())
        }
        Commands::Search {
            query,
            index_dir,
            lang,
            top_k,
            theme,
            form,
            no_rewrite,
        } => {
            let resolved_index_dir =
                resolve_lossy(index_dir.as_deref().unwrap_or_else(|| config.index_dir()));
            let searcher = Searcher::new(&resolved_index_dir)?;

            let search_config = SearchConfig::new()
                .with_lang(resolve_lang(lang, config)?)
                .with_top_k(top_k.unwrap_or_else(|| config.default_top_k()))
                .with_rewrite(!no_rewrite)
                .with_theme_filter(theme)
                .with_form_filter(form);

            let outcome = searcher.search(&query, &search_config);

            if !outcome.query.pills.is_empty() {
                println!("Filters: {}", outcome.query.pills.join(" | "));
            }
            if outcome.results.is_empty() {
                println!("No results found for '{}'", query);
            } else {
                println!("Found {} results for '{}':\n", outcome.results.len(), query);
                for (i, result) in outcome.results.iter().enumerate() {
                    println!("{}. [score: {:.4}] {}", i + 1, result.score, result.title);
                    println!("   Poet: {}", result.poet);
                    println!("   URL: /{}/poetry/{}", result.lang, result.slug);
                    println!("   {}", result.snippet);
                    println!();
                }
            }
            Ok(())
        }
        Commands::Serve { index_dir } => {
            let resolved_index_dir =
                resolve_lossy(index_dir.as_deref().unwrap_or_else(|| config.index_dir()));
            tracing::info!("Starting MCP server with index directory: {}", resolved_index_dir);
            eprintln!("sukhan MCP server starting... (index_dir: {})", resolved_index_dir);

            let server = SukhanMcpServer::new(&resolved_index_dir, config)?;
            eprintln!("Index loaded. Starting MCP stdio transport...");

            let transport = (stdin(), stdout());
            let service = server.serve(transport).await?;

            let _quit_reason = service.waiting().await?;
            Ok(())
        }
        Commands::User { db, action } => {
            let db_path = resolve_lossy(db.as_deref().unwrap_or_else(|| config.users_db()));
            let store = UserStore::open(&db_path)?;
            run_user_action(&store, action)
        }
        Commands::Robots { base_url } => {
            let base_url = base_url.unwrap_or_else(|| config.site_url().to_string());
            print!("{}", robots_txt(&base_url));
            Ok(())
        }
        Commands::Sitemap {
            base_url,
            index_dir,
            kind,
            lang,
        } => {
            let base_url = base_url.unwrap_or_else(|| config.site_url().to_string());
            let kind: SitemapKind = kind.parse()?;

            let xml = match kind {
                SitemapKind::Index => sitemap_index(&base_url, chrono::Utc::now()),
                SitemapKind::Poetry | SitemapKind::Poets => {
                    let lang = resolve_lang(lang, config)?;
                    let resolved_index_dir =
                        resolve_lossy(index_dir.as_deref().unwrap_or_else(|| config.index_dir()));
                    let searcher = Searcher::new(&resolved_index_dir)?;
                    if kind == SitemapKind::Poetry {
                        poetry_sitemap(&base_url, lang, searcher.docstore())
                    } else {
                        poets_sitemap(&base_url, lang, searcher.docstore())
                    }
                }
            };
            print!("{}", xml);
            Ok(())
        }
        Commands::Init { .. } | Commands::HashPassword { .. } => {
            unreachable!("handled before the config is loaded")
        }
    }
}
