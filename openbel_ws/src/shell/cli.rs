//! # OpenBEL Web API CLI
//!
//! This module contains the command-line interface definition and main entry point.

use super::modes::{
    self, SummarizeOptions, find_edge::EdgeQuery, find_equivalence, find_nodes_for_parameter,
    map_data,
};
use crate::config::{AppConfig, ConfigOverrides, URL_ENV};
use crate::output::OutputFormat;
use crate::utils::logging::init_logging;
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::client::SoapClient;
use openbel_ws_client::loader::KamLoader;
use std::io::Write;
use std::path::PathBuf;

/// OpenBEL Web API examples: load KAMs and query them over SOAP.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about,
    long_about = "openbel_ws talks to a running OpenBEL Framework Web API.

Every subcommand loads a KAM (waiting while the service reports it in
process) and then exercises one part of the API.

Examples:
  openbel_ws list-kams
  openbel_ws find-node small 'p(HGNC:AKT1)'
  openbel_ws find-edge small 'p(HGNC:AKT1)' increases 'r(HGNC:FOS)'
  openbel_ws mechanism-edges small > mechanisms.csv
  openbel_ws summarize -l -k small
  openbel_ws find-equivalence AKT1
  openbel_ws find-nodes-for-parameter small JAK3"
)]
pub struct Cli {
    /// WSDL URL of the Web API
    #[arg(long, global = true, env = URL_ENV)]
    pub url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Delay between KAM load status polls, in milliseconds
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    /// Give up waiting for a KAM load after this many seconds (0 waits forever)
    #[arg(long, global = true)]
    pub poll_timeout_secs: Option<u64>,

    /// Give up waiting for a KAM load after this many polls (0 for no limit)
    #[arg(long, global = true)]
    pub max_polls: Option<u32>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log to a daily rolling file instead of stderr
    #[arg(long, global = true)]
    pub log_to_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the KAM catalog and the BEL documents of every KAM
    ListKams,

    /// Resolve a BEL term to a KAM node and print its supporting terms
    FindNode {
        kam: String,
        /// BEL term label, e.g. 'p(HGNC:AKT1)'
        term: String,
    },

    /// Resolve an edge and print its supporting evidence
    FindEdge {
        kam: String,
        source: String,
        relationship: String,
        target: String,
    },

    /// Write increase/decrease edges onto RNA abundances as CSV
    MechanismEdges { kam: String },

    /// Load a KAM, then release it
    Release { kam: String },

    /// List the catalog and/or summarize one KAM
    #[command(group(
        ArgGroup::new("selection")
            .required(true)
            .multiple(true)
            .args(["list_catalog", "kam_name"])
    ))]
    Summarize {
        /// List the KAMs in the catalog
        #[arg(short = 'l', long)]
        list_catalog: bool,

        /// The KAM to summarize
        #[arg(short = 'k', long)]
        kam_name: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Count the causal edges of a KAM (the first catalog KAM by default)
    CausalEdges { kam: Option<String> },

    /// Map an HGNC symbol to KAM nodes and print their supporting terms
    MapData {
        kam: String,
        #[arg(default_value = map_data::DEFAULT_SYMBOL)]
        symbol: String,
    },

    /// Print every edge of a KAM
    Edges { kam: String },

    /// Print the Entrez Gene equivalent of an HGNC symbol
    FindEquivalence {
        #[arg(default_value = find_equivalence::DEFAULT_SYMBOL)]
        symbol: String,
    },

    /// Count the KAM nodes whose terms mention an HGNC symbol or its equivalents
    FindNodesForParameter {
        kam: String,
        #[arg(default_value = find_nodes_for_parameter::DEFAULT_SYMBOL)]
        symbol: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            wsdl_url: self.url.clone(),
            poll_interval_ms: self.poll_interval_ms,
            poll_timeout_secs: self.poll_timeout_secs,
            max_polls: self.max_polls,
        }
    }
}

/// Exit code for a failed parse: 0 for `--help`/`--version`, 1 for usage errors.
pub fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() { 1 } else { 0 }
}

/// Print a parse error or the help/version text and return the exit code.
pub fn report_usage(error: &clap::Error) -> Result<i32> {
    error.print().context("Failed to print usage")?;
    Ok(usage_exit_code(error))
}

pub async fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => std::process::exit(report_usage(&e)?),
    };

    let log_level = if cli.debug { "debug" } else { "warn" };
    init_logging(log_level, cli.log_to_file)?;

    let config = AppConfig::resolve(cli.config.as_deref(), &cli.overrides())?;
    tracing::debug!(?config, "Resolved configuration");

    let client = SoapClient::connect(&config.client_config()?)
        .await
        .context("Failed to reach the OpenBEL Web API")?;
    let loader = KamLoader::new(config.load_policy());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &client, &loader, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Run one subcommand against `api`, writing its output to `out`.
pub async fn execute<A, W>(
    command: &Command,
    api: &A,
    loader: &KamLoader,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    match command {
        Command::ListKams => modes::run_list_kams_mode(api, loader, out).await,
        Command::FindNode { kam, term } => {
            modes::run_find_node_mode(api, loader, kam, term, out).await
        }
        Command::FindEdge {
            kam,
            source,
            relationship,
            target,
        } => {
            let query = EdgeQuery {
                source,
                relationship,
                target,
            };
            modes::run_find_edge_mode(api, loader, kam, &query, out).await
        }
        Command::MechanismEdges { kam } => {
            modes::run_mechanism_edges_mode(api, loader, kam, out).await
        }
        Command::Release { kam } => modes::run_release_mode(api, loader, kam, out).await,
        Command::Summarize {
            list_catalog,
            kam_name,
            format,
        } => {
            let options = SummarizeOptions {
                list_catalog: *list_catalog,
                kam_name: kam_name.clone(),
                format: *format,
            };
            modes::run_summarize_mode(api, loader, &options, out).await
        }
        Command::CausalEdges { kam } => {
            modes::run_causal_edges_mode(api, loader, kam.as_deref(), out).await
        }
        Command::MapData { kam, symbol } => {
            modes::run_map_data_mode(api, loader, kam, symbol, out).await
        }
        Command::Edges { kam } => modes::run_edges_mode(api, loader, kam, out).await,
        Command::FindEquivalence { symbol } => {
            modes::run_find_equivalence_mode(api, symbol, out).await
        }
        Command::FindNodesForParameter { kam, symbol } => {
            modes::run_find_nodes_for_parameter_mode(api, loader, kam, symbol, out).await
        }
    }
}
