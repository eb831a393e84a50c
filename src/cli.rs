// CLI Interface
//
// Command-line shell over the recommendation and graph crates.

use crate::config::ConsoleConfig;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lecatalogue::{Category, EndpointCatalog};
use legraphe::{derive_activity, AgentNode};
use lerecommandation::{format_url, validate, CategoryFilter, RankRequest, ScoredCandidate, SuggestionRanker};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// LeConsole - endpoint suggestions and agent topology
#[derive(Parser, Debug)]
#[command(name = "leconsole")]
#[command(author = "LeConsole Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Suggest LLM endpoints for a model and lay out agent hierarchies", long_about = None)]
pub struct Cli {
    /// Project directory holding `.leconsole/config.toml`
    #[arg(global = true, long = "project", short = 'p')]
    pub project_path: Option<PathBuf>,

    /// Explicit configuration file (takes precedence over --project)
    #[arg(global = true, long = "config", short = 'c')]
    pub config_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(global = true, long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank catalog endpoints for a model
    Suggest {
        /// Requested model name
        #[arg(value_name = "MODEL")]
        model: String,

        /// Category filter: cloud, local or all (defaults to the config)
        #[arg(long = "category", value_parser = parse_filter)]
        category: Option<CategoryFilter>,

        /// Server key of the provider already selected
        #[arg(long = "provider")]
        provider: Option<String>,

        /// Maximum number of suggestions
        #[arg(long = "limit")]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// List catalog endpoints
    Catalog {
        /// Only show one category
        #[arg(long = "category", value_parser = parse_category)]
        category: Option<Category>,

        /// Print JSON instead of a table
        #[arg(long = "json")]
        json: bool,
    },

    /// Print the canonical URL for a host/port/path
    Url {
        /// Host name
        host: String,
        /// Port
        port: String,
        /// Request path
        path: String,
        /// Force HTTPS
        #[arg(long = "https")]
        https: bool,
    },

    /// Validate a host/port/path triplet
    Validate {
        /// Host name
        #[arg(default_value = "")]
        host: String,
        /// Port
        #[arg(default_value = "")]
        port: String,
        /// Request path
        #[arg(default_value = "")]
        path: String,
    },

    /// Lay out an agent list (JSON array) and print edges and activity
    Graph {
        /// Path to the agent list
        #[arg(value_name = "AGENTS_JSON")]
        agents: PathBuf,

        /// Print JSON instead of text
        #[arg(long = "json")]
        json: bool,
    },
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> Result<()> {
        let config = self.load_config()?;
        init_logging_impl(&config.log_level(), self.verbose);
        debug!("Loaded configuration: {:?}", config);

        match self.command {
            Commands::Suggest {
                model,
                category,
                provider,
                limit,
                json,
            } => cmd_suggest_impl(&config, &model, category, provider.as_deref(), limit, json),
            Commands::Catalog { category, json } => cmd_catalog_impl(&config, category, json),
            Commands::Url {
                host,
                port,
                path,
                https,
            } => {
                println!("{}", format_url(&host, &port, &path, https));
                Ok(())
            }
            Commands::Validate { host, port, path } => cmd_validate_impl(&host, &port, &path),
            Commands::Graph { agents, json } => cmd_graph_impl(&config, agents, json),
        }
    }

    fn load_config(&self) -> Result<ConsoleConfig> {
        if let Some(path) = &self.config_path {
            return ConsoleConfig::load_file(path);
        }
        let project = match &self.project_path {
            Some(path) => path.clone(),
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };
        ConsoleConfig::load(project)
    }
}

fn parse_filter(value: &str) -> std::result::Result<CategoryFilter, String> {
    CategoryFilter::parse(value).ok_or_else(|| format!("expected cloud, local or all, got '{value}'"))
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    Category::parse(value).ok_or_else(|| format!("expected cloud or local, got '{value}'"))
}

/// Initialize logging to stderr; `RUST_LOG` wins over the configured level
fn init_logging_impl(level: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Suggest command implementation
fn cmd_suggest_impl(
    config: &ConsoleConfig,
    model: &str,
    category: Option<CategoryFilter>,
    provider: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let request = RankRequest {
        model,
        filter: category.unwrap_or(config.ranking.default_filter),
        selected_provider: provider,
        limit: limit.or(config.ranking.limit),
    };

    let candidates = SuggestionRanker::new().rank_with(&catalog, &request);
    info!("{} suggestions for '{}'", candidates.len(), model);

    if json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No suggestions for '{}'", model);
        return Ok(());
    }

    for (rank, candidate) in candidates.iter().enumerate() {
        println!("{:>2}. {}", rank + 1, describe_candidate(candidate));
    }
    Ok(())
}

fn describe_candidate(candidate: &ScoredCandidate) -> String {
    let d = &candidate.descriptor;
    let mut tags = Vec::new();
    if candidate.is_recommended {
        tags.push("recommended");
    }
    if candidate.is_best_match {
        tags.push("best match");
    }
    if candidate.is_fallback {
        tags.push("fallback");
    }
    format!(
        "{:<24} [{}, {}] score {:>6.1}  {}",
        format!("{} ({})", d.label(), d.server_key),
        d.category,
        d.difficulty,
        candidate.compatibility_score,
        tags.join(", ")
    )
}

/// Catalog command implementation
fn cmd_catalog_impl(config: &ConsoleConfig, category: Option<Category>, json: bool) -> Result<()> {
    let catalog: EndpointCatalog = config.catalog()?;
    let entries: Vec<_> = catalog
        .iter()
        .filter(|d| category.map_or(true, |c| d.category == c))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for d in entries {
        let recommended = if catalog.is_recommended(d) { " *" } else { "" };
        println!(
            "{:<12} {:<24} {:<5} {:<6} {}{}",
            d.server_key,
            d.label(),
            d.category,
            d.difficulty,
            format_url(&d.default_host, &d.default_port, &d.default_endpoint_path, false),
            recommended
        );
    }
    Ok(())
}

/// Validate command implementation
fn cmd_validate_impl(host: &str, port: &str, path: &str) -> Result<()> {
    let result = validate(host, port, path);
    if result.is_valid {
        println!("OK {}", format_url(host, port, path, false));
        return Ok(());
    }
    for message in result.messages() {
        println!("- {}", message);
    }
    bail!("{} validation error(s)", result.errors.len())
}

/// Graph command implementation
fn cmd_graph_impl(config: &ConsoleConfig, agents_path: PathBuf, json: bool) -> Result<()> {
    let raw = fs::read_to_string(&agents_path)
        .with_context(|| format!("Failed to read agent list: {:?}", agents_path))?;
    let agents: Vec<AgentNode> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse agent list: {:?}", agents_path))?;

    let graph = config.graph_builder().build(&agents);
    let activity: Vec<_> = derive_activity(graph.edges()).collect();
    let stats = graph.stats();
    info!(
        "Graph: {} main, {} child, {} edges ({} active)",
        stats.main_count, stats.child_count, stats.edge_count, stats.active_edge_count
    );

    if json {
        let payload = serde_json::json!({
            "nodes": graph.nodes(),
            "edges": graph.edges(),
            "activity": activity,
            "stats": stats,
            "bounds": graph.bounds(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for node in graph.nodes() {
        println!(
            "{:<6} {:<20} {:<6} at ({:.0}, {:.0})",
            format!("{:?}", node.kind).to_lowercase(),
            node.label(),
            node.status.as_str(),
            node.position.x,
            node.position.y
        );
    }
    println!();
    for entry in &activity {
        println!("[{}] {}", entry.time, entry.text);
    }
    if !stats.orphan_children.is_empty() {
        println!();
        println!("Unlinked children: {}", stats.orphan_children.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_suggest_arguments() {
        let cli = Cli::try_parse_from([
            "leconsole",
            "suggest",
            "llama3.2",
            "--category",
            "local",
            "--provider",
            "ollama",
            "--limit",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Suggest {
                model,
                category,
                provider,
                limit,
                json,
            } => {
                assert_eq!(model, "llama3.2");
                assert_eq!(category, Some(CategoryFilter::Local));
                assert_eq!(provider.as_deref(), Some("ollama"));
                assert_eq!(limit, Some(3));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[rstest]
    #[case("cloud", Some(CategoryFilter::Cloud))]
    #[case("LOCAL", Some(CategoryFilter::Local))]
    #[case("all", Some(CategoryFilter::All))]
    #[case("edge", None)]
    fn suggest_category_flag(#[case] value: &str, #[case] expected: Option<CategoryFilter>) {
        let parsed = Cli::try_parse_from(["leconsole", "suggest", "gpt-4o", "--category", value]);
        match (parsed, expected) {
            (Ok(cli), Some(filter)) => match cli.command {
                Commands::Suggest { category, .. } => assert_eq!(category, Some(filter)),
                other => panic!("unexpected command {other:?}"),
            },
            (Err(_), None) => {}
            (parsed, expected) => panic!("'{value}' gave {parsed:?}, expected {expected:?}"),
        }
    }

    #[rstest]
    #[case("cloud", true)]
    #[case("local", true)]
    #[case("all", false)]
    fn catalog_category_flag(#[case] value: &str, #[case] accepted: bool) {
        let parsed = Cli::try_parse_from(["leconsole", "catalog", "--category", value]);
        assert_eq!(parsed.is_ok(), accepted, "catalog --category {value}");
    }

    #[rstest]
    #[case("localhost", "11434", "/v1/chat/completions", true)]
    #[case("api.openai.com", "443", "/v1/chat/completions", true)]
    #[case("localhost", "999999", "/v1/x", false)]
    #[case("", "", "", false)]
    fn validate_reports_errors_as_failure(
        #[case] host: &str,
        #[case] port: &str,
        #[case] path: &str,
        #[case] ok: bool,
    ) {
        assert_eq!(cmd_validate_impl(host, port, path).is_ok(), ok);
    }
}
