//! # Find Nodes For Parameter Mode
//!
//! Counts the KAM nodes backed by a BEL term that mentions an HGNC symbol or
//! any value equivalent to it in another namespace.

use super::load_kam;
use super::map_data::HGNC_RESOURCE;
use super::summarize::ALL_NODES;
use anyhow::{Context, Result, anyhow};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::{BelTerm, NamespaceValue};
use openbel_ws_client::requests::{FindEquivalencesRequest, FindKamNodesByPatternsRequest};
use std::io::Write;
use tracing::debug;

pub const DEFAULT_SYMBOL: &str = "JAK3";

/// Whether any term label contains any of the parameters.
pub fn mentions_any(terms: &[BelTerm], parameters: &[String]) -> bool {
    terms
        .iter()
        .any(|term| parameters.iter().any(|p| term.label.contains(p.as_str())))
}

/// Run in find-nodes-for-parameter mode.
///
/// Each node is counted once, however many of its terms match.
///
/// # Errors
/// Fails when the KAM has no HGNC namespace to search from.
pub async fn run_find_nodes_for_parameter_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    symbol: &str,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = load_kam(api, loader, kam_name, out).await?;

    let hgnc = api
        .get_namespaces(&handle)
        .await
        .with_context(|| format!("Failed to list namespaces of KAM '{kam_name}'"))?
        .into_iter()
        .find(|ns| ns.resource_location == HGNC_RESOURCE)
        .ok_or_else(|| anyhow!("Cannot find HGNC namespace in KAM '{kam_name}'"))?;

    let request = FindEquivalencesRequest::new(NamespaceValue::new(hgnc, symbol))?;
    let equivalents = api
        .find_equivalences(&request)
        .await
        .with_context(|| format!("Failed to find equivalences of {symbol}"))?;
    let mut parameters = vec![symbol.to_string()];
    parameters.extend(equivalents.into_iter().map(|nv| nv.value));
    debug!(?parameters, "Searching supporting terms");

    let all_nodes = FindKamNodesByPatternsRequest::builder()
        .handle(&handle)
        .pattern(ALL_NODES)
        .build()?;
    let mut found = 0;
    for node in api.find_kam_nodes_by_patterns(&all_nodes).await? {
        let terms = api.get_supporting_terms(&node).await?;
        if mentions_any(&terms, &parameters) {
            found += 1;
        }
    }

    writeln!(out, "Found {found} KAM nodes containing {symbol} or equivalent.")?;
    Ok(())
}
