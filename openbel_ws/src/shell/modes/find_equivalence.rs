//! # Find Equivalence Mode
//!
//! Looks up the Entrez Gene identifier equivalent to an HGNC symbol. No KAM is
//! loaded; equivalences come from the service's namespace resources.

use super::map_data::hgnc_namespace;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::model::{Namespace, NamespaceValue};
use openbel_ws_client::requests::FindNamespaceEquivalenceRequest;
use std::io::Write;
use tracing::debug;

pub const DEFAULT_SYMBOL: &str = "AKT1";

pub const HGNC_NAMESPACE_ID: &str = "m80Uzc2rk+J7iWRI4xhYxA==";
pub const EG_PREFIX: &str = "EG";
pub const EG_NAMESPACE_ID: &str = "m80Uzc2rk+ILu/P78PeOpg==";
pub const EG_RESOURCE: &str =
    "http://resource.belframework.org/belframework/1.0/namespace/entrez-gene-ids-hmr.belns";

pub fn entrez_gene_namespace() -> Namespace {
    Namespace {
        id: Some(EG_NAMESPACE_ID.to_string()),
        prefix: Some(EG_PREFIX.to_string()),
        resource_location: EG_RESOURCE.to_string(),
    }
}

/// Run in find-equivalence mode. A symbol without an equivalent is reported
/// and is not an error.
pub async fn run_find_equivalence_mode<A, W>(api: &A, symbol: &str, out: &mut W) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let source = NamespaceValue::new(
        Namespace {
            id: Some(HGNC_NAMESPACE_ID.to_string()),
            ..hgnc_namespace()
        },
        symbol,
    );
    let request = FindNamespaceEquivalenceRequest::builder()
        .namespace_value(source.clone())
        .target_namespace(entrez_gene_namespace())
        .build()?;

    let equivalent = api
        .find_namespace_equivalence(&request)
        .await
        .with_context(|| format!("Failed to find the equivalent of {}", source.qualified()))?;
    debug!(source = %source.qualified(), found = equivalent.is_some(), "Searched equivalence");

    match equivalent {
        Some(equivalent) => writeln!(
            out,
            "{} is equivalent to {}",
            source.qualified(),
            equivalent.qualified()
        )?,
        None => writeln!(out, "{} has no {EG_PREFIX} equivalent", source.qualified())?,
    }
    Ok(())
}
