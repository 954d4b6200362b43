//! # Edges Mode
//!
//! Prints the catalog KAM names, then every edge of one KAM over all
//! relationship types.

use super::wait_for_load;
use crate::output::edge_line;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::relationship;
use openbel_ws_client::requests::{FindKamEdgesRequest, LoadKamRequest};
use std::io::Write;

pub async fn run_edges_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    for kam in api
        .get_catalog()
        .await
        .context("Failed to fetch KAM catalog")?
    {
        writeln!(out, "{}", kam.name)?;
    }

    let handle = wait_for_load(api, loader, &LoadKamRequest::new(kam_name)?, out).await?;

    let request = FindKamEdgesRequest::builder()
        .handle(&handle)
        .relationships(relationship::ALL.iter().copied())
        .build()?;
    for edge in api.find_kam_edges(&request).await? {
        writeln!(out, "{}", edge_line(&edge))?;
    }
    Ok(())
}
