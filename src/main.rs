use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use symptomatch_api::RestApi;
use symptomatch_core::Catalog;
use symptomatch_similarity::{MatchConfig, MatchResponse, Matcher, RankingStrategy, Scorer};
use symptomatch_storage::{
    default_catalog_paths, resolve_catalog_path, write_records, CatalogManager, CatalogSource,
};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Match symptom descriptions against a disease catalog
#[derive(Parser, Debug)]
#[command(name = "symptomatch")]
#[command(about = "Symptom-to-disease matching engine", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// JSON file with default match settings (scorer, strategy, top_n, floor)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank diseases for a symptom description
    Match {
        /// Free-text symptoms, e.g. "headache, fever, fatigue"
        #[arg(short, long)]
        symptoms: String,

        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        matching: MatchArgs,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog statistics
    Info {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Print a sample catalog in the expected CSV layout
    Sample,
    /// Serve the REST API
    Serve {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        matching: MatchArgs,

        /// HTTP API port
        #[arg(long, default_value_t = 6340)]
        http_port: u16,
    },
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Catalog CSV file (Code, Name, Symptoms, Treatments); searched for if omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Maximum number of results
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Ranking strategy: strict_floor or category_biased
    #[arg(long)]
    strategy: Option<RankingStrategy>,

    /// Similarity scorer: weighted or jaccard
    #[arg(long)]
    scorer: Option<Scorer>,
}

impl MatchArgs {
    fn apply(&self, mut config: MatchConfig) -> anyhow::Result<MatchConfig> {
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(scorer) = self.scorer {
            config.scorer = scorer;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = Some(top_n);
        }
        config.validate()?;
        Ok(config)
    }
}

fn base_config(path: Option<&Path>) -> anyhow::Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: MatchConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn open_catalog(args: &CatalogArgs) -> anyhow::Result<CatalogManager> {
    let path = resolve_catalog_path(args.catalog.as_deref())?;
    let manager = CatalogManager::with_source(CatalogSource::Path(path))?;
    Ok(manager)
}

/// Like [`open_catalog`], but with no `--catalog` and no fallback file the
/// manager starts empty so a catalog can be uploaded over HTTP
fn open_catalog_or_empty(args: &CatalogArgs) -> anyhow::Result<CatalogManager> {
    if args.catalog.is_some() {
        return open_catalog(args);
    }
    let manager = CatalogManager::from_search(&default_catalog_paths())?;
    if manager.catalog().is_none() {
        warn!("No catalog loaded; upload one to /catalog/upload");
    }
    Ok(manager)
}

fn print_matches(response: &MatchResponse) {
    if let Some(category) = response.predicted_category {
        println!("Predicted category: {}", category);
    }
    if response.result.is_empty() {
        println!("No matching diseases found.");
        return;
    }
    for (rank, m) in response.result.iter().enumerate() {
        println!("{}. {} [{}] ({:.1}% match)", rank + 1, m.disease_name, m.category, m.percent());
        println!("   Symptoms: {}", m.symptoms_text);
        println!("   Treatments: {}", m.treatments_text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let defaults = base_config(cli.config.as_deref())?;

    match cli.command {
        Command::Match { symptoms, catalog, matching, json } => {
            let config = matching.apply(defaults)?;
            let manager = open_catalog(&catalog)?;
            let catalog = manager.catalog().context("catalog not loaded")?;

            let response = Matcher::new(config).explain(&symptoms, &catalog);
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print_matches(&response);
            }
        }
        Command::Info { catalog } => {
            let manager = open_catalog(&catalog)?;
            let info = manager.info().context("catalog not loaded")?;
            println!("Source: {}", info.source);
            println!("Diseases in database: {}", info.diseases);
            for (category, count) in &info.categories {
                println!("  {:<18} {}", category, count);
            }
        }
        Command::Sample => {
            let catalog = Catalog::sample();
            write_records(std::io::stdout().lock(), catalog.iter().map(|e| e.record()))?;
        }
        Command::Serve { catalog, matching, http_port } => {
            let config = matching.apply(defaults)?;
            let manager = Arc::new(open_catalog_or_empty(&catalog)?);

            info!("Starting symptomatch v{}", env!("CARGO_PKG_VERSION"));
            info!("Scorer: {}, strategy: {}", config.scorer, config.strategy);

            let http_handle = std::thread::spawn(move || {
                info!("Starting HTTP server on port {}", http_port);
                let sys = actix_web::rt::System::new();
                sys.block_on(async {
                    if let Err(e) = RestApi::start(manager, config, http_port).await {
                        tracing::error!("HTTP server error: {}", e);
                    }
                })
            });

            info!("HTTP API: http://localhost:{}/", http_port);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
                _ = tokio::task::spawn_blocking(move || {
                    http_handle.join().ok();
                }) => {
                    info!("HTTP server stopped");
                }
            }

            info!("Shutting down...");
        }
    }

    Ok(())
}
