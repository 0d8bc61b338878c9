//! Command-line front end for the VSD query layer.
//!
//! Loads a query configuration from a JSON file, applies the search, sort
//! and paging options given on the command line, and prints the fetched
//! rows as JSON.

mod args;
mod transforms;

use std::fs::File;
use std::path::Path;

use anyhow::Context as _;
use anyhow::bail;
use clap::Parser;
use log::LevelFilter;
use serde::de::DeserializeOwned;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;
use vsd_lib::VsdService;
use vsd_lib::api::query::SearchToken;
use vsd_lib::api::query::request_id;
use vsd_lib::model::QueryConfiguration;
use vsd_lib::template::PlaceholderResolver;
use vsd_lib::template::TemplateResolver;
use vsd_lib::transform::TransformRegistry;
use vsd_lib::transport::Credentials;
use vsd_lib::transport::HttpTransport;

use args::Args;

const UNRESOLVED: &str = "query configuration has placeholders missing from --context";

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    match &args.log_file {
        Some(path) => {
            let log_file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), log_file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Reads the configuration template and applies the command-line mutators.
fn load_config(args: &Args) -> anyhow::Result<QueryConfiguration> {
    let mut config: QueryConfiguration = read_json(&args.config)?;

    if let Some(path) = &args.search {
        let tokens: Vec<SearchToken> = read_json(path)?;
        config = config.with_search(&tokens);
    }

    config = config.with_sorting(args.sort()?.as_ref());
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if let Some(page) = args.page {
        config = config.with_next_page(page);
    }

    Ok(config)
}

/// Fails before any request is made when `tabify` names no known transform.
fn check_tabify(config: &QueryConfiguration, registry: &TransformRegistry) -> anyhow::Result<()> {
    match config.tabify.as_deref() {
        Some(name) if !name.is_empty() && !registry.contains(name) => {
            let mut names: Vec<_> = registry.names().collect();
            names.sort_unstable();
            bail!("unknown transform {:?}, expected one of: {}", name, names.join(", "))
        }
        _ => Ok(()),
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    init_logging(&args)?;
    if transforms::registry().install().is_err() {
        bail!("transform registry was already installed");
    }

    let template = load_config(&args)?;
    let context = args.context()?;

    if args.request_id {
        let Some(id) = request_id(&template, &context, &PlaceholderResolver) else {
            bail!(UNRESOLVED);
        };
        println!("{}", id);
        return Ok(());
    }

    let Some(config) = PlaceholderResolver.resolve(&template, &context) else {
        bail!(UNRESOLVED);
    };
    check_tabify(&config, &TransformRegistry::global())?;

    let mut transport = HttpTransport::builder()
        .url(args.url()?)
        .credentials(Credentials::new(&args.username, &args.password, &args.organization))
        .api_version(&args.api_version);
    if let Some(page_size) = args.default_page_size {
        transport = transport.page_size(page_size);
    }

    let service = VsdService::builder().transport(transport.build()?).build();

    if args.all {
        let rows = service.fetch_all(config).await?;
        eprintln!("{} rows", rows.len());
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        let page = service.fetch(&config).await?;
        match &page.next_query {
            Some(next) => eprintln!(
                "{} of {} rows, next page {}",
                page.response.len(),
                page.length,
                next.query.next_page.unwrap_or_default()
            ),
            None => eprintln!("{} of {} rows", page.response.len(), page.length),
        }
        println!("{}", serde_json::to_string_pretty(&page.response)?);
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
