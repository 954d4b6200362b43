//! # Find Node Mode
//!
//! Resolves a BEL term to a KAM node and prints the terms supporting it.

use super::load_kam;
use anyhow::Result;
use openbel_ws_client::api::{WebApi, resolve_node};
use openbel_ws_client::loader::KamLoader;
use std::io::Write;

/// Run in find-node mode. An unresolved term prints `node not found` and succeeds.
pub async fn run_find_node_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    term: &str,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = load_kam(api, loader, kam_name, out).await?;

    match resolve_node(api, &handle, term).await? {
        Some(node) => {
            writeln!(out, "found node, id: {}", node.id)?;
            for term in api.get_supporting_terms(&node).await? {
                writeln!(out, "{}", term.label)?;
            }
        }
        None => writeln!(out, "node not found")?,
    }
    Ok(())
}
