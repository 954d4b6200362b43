//! # Causal Edges Mode
//!
//! Counts the edges of a KAM with a causal relationship type.

use super::wait_for_load;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::relationship;
use openbel_ws_client::requests::{FindKamEdgesRequest, LoadKamRequest};
use std::io::Write;

/// Run in causal-edges mode on `kam_name`, or on the first catalog KAM when unset.
pub async fn run_causal_edges_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: Option<&str>,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let request = match kam_name {
        Some(name) => LoadKamRequest::new(name)?,
        None => {
            let first = api
                .get_catalog()
                .await
                .context("Failed to fetch KAM catalog")?
                .into_iter()
                .next();
            match first {
                Some(kam) => LoadKamRequest::for_kam(kam)?,
                None => {
                    writeln!(out, "No KAMs in catalog.")?;
                    return Ok(());
                }
            }
        }
    };

    writeln!(out, "Loading KAM.")?;
    let handle = wait_for_load(api, loader, &request, out).await?;
    writeln!(out, "Loaded KAM (handle: {handle})")?;

    let find = FindKamEdgesRequest::builder()
        .handle(&handle)
        .relationships(relationship::CAUSAL.iter().copied())
        .build()?;
    writeln!(out, "Finding edges.")?;
    let edges = api.find_kam_edges(&find).await?;
    writeln!(out, "Found {} edges.", edges.len())?;

    writeln!(out, "Releasing KAM.")?;
    api.release_kam(&handle).await?;
    writeln!(out, "KAM released.")?;
    Ok(())
}
