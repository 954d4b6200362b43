//! # Map Data Mode
//!
//! Maps an HGNC gene symbol onto KAM nodes and prints the BEL terms behind
//! each node.

use super::load_kam;
use anyhow::Result;
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::{Namespace, NamespaceValue};
use openbel_ws_client::requests::FindKamNodesByNamespaceValuesRequest;
use std::io::Write;

pub const HGNC_PREFIX: &str = "HGNC";
pub const HGNC_RESOURCE: &str =
    "http://resource.belframework.org/belframework/1.0/namespace/hgnc-approved-symbols.belns";
pub const DEFAULT_SYMBOL: &str = "PPARG";

pub fn hgnc_namespace() -> Namespace {
    Namespace {
        id: None,
        prefix: Some(HGNC_PREFIX.to_string()),
        resource_location: HGNC_RESOURCE.to_string(),
    }
}

pub fn hgnc_value(symbol: &str) -> NamespaceValue {
    NamespaceValue::new(hgnc_namespace(), symbol)
}

pub async fn run_map_data_mode<A, W>(
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

    let request = FindKamNodesByNamespaceValuesRequest::builder()
        .handle(&handle)
        .namespace_value(hgnc_value(symbol))
        .build()?;
    let nodes = api.find_kam_nodes_by_namespace_values(&request).await?;
    writeln!(out, "{} KAM nodes were found.", nodes.len())?;

    for node in nodes {
        writeln!(out, "KAM node label:")?;
        writeln!(out, "    {}", node.label)?;
        for term in api.get_supporting_terms(&node).await? {
            writeln!(out, "    BEL term label:")?;
            writeln!(out, "        {}", term.label)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
