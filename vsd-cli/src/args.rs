//! Command-line arguments

use std::path::PathBuf;

use anyhow::Context as _;
use anyhow::anyhow;
use clap::Parser;
use serde_json::Value;
use vsd_lib::api::query::Sort;
use vsd_lib::template::Context;

/// Fetch VSD resources described by a query configuration file.
#[derive(Debug, Parser)]
#[command(name = "vsd-cli", version)]
pub struct Args {
    /// Query configuration (JSON).
    pub config: PathBuf,

    /// VSD endpoint, e.g. https://vsd.example.com:8443
    #[arg(long, env = "VSD_URL")]
    pub url: Option<String>,

    /// Login name.
    #[arg(long, env = "VSD_USERNAME", default_value = "")]
    pub username: String,

    /// Password or API key.
    #[arg(long, env = "VSD_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Organization (enterprise) to log into.
    #[arg(long, env = "VSD_ORGANIZATION", default_value = "csp")]
    pub organization: String,

    /// REST API version.
    #[arg(long, default_value = "v6")]
    pub api_version: String,

    /// Page size used when the configuration sets none.
    #[arg(long)]
    pub default_page_size: Option<u32>,

    /// Placeholder value, `key=value`. Values that parse as JSON are used as such.
    #[arg(long = "context", value_name = "KEY=VALUE")]
    pub context: Vec<String>,

    /// Search tokens (JSON array) to conjoin with the configured filter.
    #[arg(long)]
    pub search: Option<PathBuf>,

    /// Sort, `column:asc` or `column:desc`.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page size override.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Zero-based page to fetch.
    #[arg(long)]
    pub page: Option<u32>,

    /// Fetch every page instead of one.
    #[arg(long, conflicts_with = "request_id")]
    pub all: bool,

    /// Print the request identity and exit.
    #[arg(long)]
    pub request_id: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns the endpoint URL, which fetching requires.
    pub fn url(&self) -> anyhow::Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| anyhow!("--url (or VSD_URL) is required to fetch"))
    }

    /// Builds the template context from the `--context` pairs.
    pub fn context(&self) -> anyhow::Result<Context> {
        let mut context = Context::new();
        for pair in &self.context {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("--context expects KEY=VALUE, got {:?}", pair))?;
            let value = serde_json::from_str(value)
                .unwrap_or_else(|_| Value::String(value.to_string()));
            context.insert(key.to_string(), value);
        }
        Ok(context)
    }

    /// Parses `--sort`.
    pub fn sort(&self) -> anyhow::Result<Option<Sort>> {
        let Some(sort) = &self.sort else {
            return Ok(None);
        };
        let (column, order) = sort.split_once(':').unwrap_or((sort.as_str(), "asc"));
        match order {
            "asc" | "desc" => Ok(Some(Sort {
                column: column.to_string(),
                order: order.to_string(),
            })),
            other => Err(anyhow!("unknown sort order {:?}, expected asc or desc", other)),
        }
    }
}
