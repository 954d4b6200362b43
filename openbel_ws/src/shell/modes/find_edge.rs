//! # Find Edge Mode
//!
//! Resolves a `source relationship target` triple to a KAM edge and prints its
//! supporting statements with their citations and annotations.

use super::load_kam;
use crate::output::write_evidence;
use anyhow::Result;
use openbel_ws_client::api::{WebApi, resolve_edge};
use openbel_ws_client::loader::KamLoader;
use std::io::Write;

/// The edge to look up, by node labels and relationship name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeQuery<'a> {
    pub source: &'a str,
    pub relationship: &'a str,
    pub target: &'a str,
}

/// Run in find-edge mode. An unresolved edge prints `edge not found` and succeeds.
pub async fn run_find_edge_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    query: &EdgeQuery<'_>,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = load_kam(api, loader, kam_name, out).await?;

    let edge = resolve_edge(
        api,
        &handle,
        query.source,
        query.relationship,
        query.target,
    )
    .await?;
    match edge {
        Some(edge) => {
            writeln!(out, "found edge, id: {}", edge.id)?;
            let statements = api.get_supporting_evidence(&edge).await?;
            write_evidence(out, &statements)?;
        }
        None => writeln!(out, "edge not found")?,
    }
    Ok(())
}
