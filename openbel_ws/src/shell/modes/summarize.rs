//! # Summarize Mode
//!
//! Lists the KAM catalog and/or reports the size of one KAM: namespaces,
//! documents, all nodes, protein nodes and RNA nodes. The summarized KAM is
//! released afterwards.

use super::wait_for_load;
use crate::output::{
    CatalogEntry, KamSummary, OutputFormat, SummaryReport, print_json_summary,
    print_text_summary,
};
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::{Kam, KamHandle};
use openbel_ws_client::requests::{FindKamNodesByPatternsRequest, LoadKamRequest};
use std::io::Write;

pub const ALL_NODES: &str = ".*";
pub const PROTEIN_NODES: &str = "proteinAbundance(.*)";
pub const RNA_NODES: &str = "rnaAbundance(.*)";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeOptions {
    pub list_catalog: bool,
    pub kam_name: Option<String>,
    pub format: OutputFormat,
}

/// Run in summarize mode.
///
/// A KAM name missing from the catalog is reported and is not an error.
pub async fn run_summarize_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    options: &SummarizeOptions,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let catalog = api
        .get_catalog()
        .await
        .context("Failed to fetch KAM catalog")?;

    let mut report = SummaryReport::default();
    if options.list_catalog {
        report.catalog = Some(catalog.iter().map(CatalogEntry::from).collect());
    }
    if let Some(name) = &options.kam_name {
        match catalog.into_iter().find(|kam| &kam.name == name) {
            Some(kam) => report.summary = Some(summarize_kam(api, loader, kam, out).await?),
            None => report.missing_kam = Some(name.clone()),
        }
    }

    match options.format {
        OutputFormat::Text => print_text_summary(out, &report),
        OutputFormat::Json => print_json_summary(out, &report),
    }
}

/// Load a catalog entry, count its contents and release it.
pub async fn summarize_kam<A, W>(
    api: &A,
    loader: &KamLoader,
    kam: Kam,
    out: &mut W,
) -> Result<KamSummary>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = wait_for_load(api, loader, &LoadKamRequest::for_kam(kam.clone())?, out).await?;

    let summary = KamSummary {
        namespaces: api.get_namespaces(&handle).await?.len(),
        documents: api.get_bel_documents(&handle).await?.len(),
        nodes: count_nodes(api, &handle, ALL_NODES).await?,
        protein_nodes: count_nodes(api, &handle, PROTEIN_NODES).await?,
        rna_nodes: count_nodes(api, &handle, RNA_NODES).await?,
        last_compiled: kam.last_compiled_date(),
        name: kam.name,
        description: kam.description,
    };

    api.release_kam(&handle)
        .await
        .with_context(|| format!("Failed to release KAM '{}'", summary.name))?;
    Ok(summary)
}

async fn count_nodes<A>(api: &A, handle: &KamHandle, pattern: &str) -> Result<usize>
where
    A: WebApi + ?Sized,
{
    let request = FindKamNodesByPatternsRequest::builder()
        .handle(handle)
        .pattern(pattern)
        .build()?;
    Ok(api.find_kam_nodes_by_patterns(&request).await?.len())
}
