//! sga-site-crawler main entry point
//!
//! Command-line interface: run the HTTP API, crawl a site once, or scrape a
//! single page.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};
use sga_site_crawler::api::serve;
use sga_site_crawler::config::{load_config_or_default, Config, CrawlRequest};
use sga_site_crawler::crawler::{crawl_site, scrape_page, HttpFetcher};
use sga_site_crawler::output::{
    format_markdown_report, format_report_summary, print_report_summary, write_markdown_report,
    CrawlReport,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// sga-site-crawler: bounded single-site crawler with query ranking
///
/// Crawls one site breadth-first while respecting robots.txt, extracts
/// readable content and ranks pages against a free-text query.
#[derive(Parser, Debug)]
#[command(name = "sga-site-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Bounded single-site crawler with query ranking", long_about = None)]
struct Cli {
    /// Path to TOML service configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address, overrides the config file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Crawl one site and print the report
    Crawl(CrawlArgs),

    /// Scrape a single page and print it as JSON
    Scrape {
        #[arg(value_name = "URL")]
        url: String,
    },
}

#[derive(clap::Args, Debug)]
struct CrawlArgs {
    /// Root URL of the site
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Free-text query used to rank pages
    #[arg(long)]
    query: Option<String>,

    /// Link depth to follow from the root (0-5)
    #[arg(long)]
    max_depth: Option<i64>,

    /// Pages to accept (1-100)
    #[arg(long)]
    max_pages: Option<i64>,

    /// URLs the frontier may ever hold (50-2000)
    #[arg(long)]
    max_discovered: Option<i64>,

    /// Comma-separated path prefixes to include
    #[arg(long, value_name = "PATHS")]
    include: Option<String>,

    /// Comma-separated path prefixes to exclude
    #[arg(long, value_name = "PATHS")]
    exclude: Option<String>,

    /// Also crawl subdomains of the root host
    #[arg(long)]
    allow_subdomains: bool,

    /// Do not consult robots.txt
    #[arg(long)]
    ignore_robots: bool,

    /// Requested rendering mode
    #[arg(long)]
    mode: Option<String>,

    /// Per-page timeout in milliseconds (3000-60000)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<i64>,

    /// User agent presented to robots.txt
    #[arg(long)]
    user_agent: Option<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    Json,
    Markdown,
    Summary,
}

impl CrawlArgs {
    /// Builds the same permissive request the API accepts
    fn to_request_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("start_url".to_string(), json!(self.start_url));

        let optional = [
            ("query", self.query.as_ref().map(|v| json!(v))),
            ("max_depth", self.max_depth.map(|v| json!(v))),
            ("max_pages", self.max_pages.map(|v| json!(v))),
            ("max_discovered", self.max_discovered.map(|v| json!(v))),
            ("include_paths", self.include.as_ref().map(|v| json!(v))),
            ("exclude_paths", self.exclude.as_ref().map(|v| json!(v))),
            ("mode", self.mode.as_ref().map(|v| json!(v))),
            ("request_timeout_ms", self.timeout_ms.map(|v| json!(v))),
            ("user_agent", self.user_agent.as_ref().map(|v| json!(v))),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        }

        body.insert("allow_subdomains".to_string(), json!(self.allow_subdomains));
        body.insert("respect_robots".to_string(), json!(!self.ignore_robots));

        Value::Object(body)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<defaults>".to_string())
        )
    })?;

    match cli.command {
        Command::Serve { bind } => handle_serve(config, bind).await,
        Command::Crawl(args) => handle_crawl(&config, &args).await,
        Command::Scrape { url } => handle_scrape(&config, &url).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sga_site_crawler=info,warn"),
            1 => EnvFilter::new("sga_site_crawler=debug,info"),
            2 => EnvFilter::new("sga_site_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the HTTP API until the process is stopped
async fn handle_serve(mut config: Config, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }
    sga_site_crawler::config::validate_config(&config)?;

    let bind_address = config.server.bind_address.clone();
    serve(config)
        .await
        .with_context(|| format!("API server on {} failed", bind_address))
}

/// Runs one crawl and emits the report in the requested format
async fn handle_crawl(config: &Config, args: &CrawlArgs) -> anyhow::Result<()> {
    let options = CrawlRequest::from_json(args.to_request_body())?.into_options()?;
    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;

    let report = match crawl_site(&options, &fetcher).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl rejected [{}]: {}", e.error_code(), e);
            return Err(e.into());
        }
    };

    match (args.format, args.output.as_deref()) {
        (ReportFormat::Summary, None) => {
            print_report_summary(&report);
            Ok(())
        }
        (ReportFormat::Markdown, Some(path)) => {
            write_markdown_report(&report, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Markdown report written to {}", path.display());
            Ok(())
        }
        (format, output) => emit(&render_report(&report, format)?, output),
    }
}

fn render_report(report: &CrawlReport, format: ReportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Json => serde_json::to_string_pretty(report)?,
        ReportFormat::Markdown => format_markdown_report(report),
        ReportFormat::Summary => format_report_summary(report),
    })
}

/// Scrapes one page and prints the result as JSON
async fn handle_scrape(config: &Config, url: &str) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&config.fetch).context("Failed to build HTTP client")?;
    let result = scrape_page(&fetcher, url, config.fetch.scrape_timeout())
        .await
        .with_context(|| format!("Failed to scrape {}", url))?;

    emit(&serde_json::to_string_pretty(&result)?, None)
}

fn emit(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
