//! # Mechanism Edges Mode
//!
//! Exports, as CSV, the edges of a KAM whose relationship is one of the
//! increase/decrease types and whose target is an RNA abundance.

use super::wait_for_load;
use crate::output::EdgeCsvWriter;
use anyhow::Result;
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::{KamEdge, function, relationship};
use openbel_ws_client::requests::{FindKamEdgesRequest, LoadKamRequest};
use std::io::Write;
use tracing::{debug, info};

pub fn is_mechanism_edge(edge: &KamEdge) -> bool {
    edge.target.function == function::RNA_ABUNDANCE
}

/// Run in mechanism-edges mode, writing `source,relationship,target` rows to `out`.
///
/// Edges are searched one relationship type at a time, in a fixed order. A
/// load that fails writes `FAILED!` and the reason instead of any CSV.
pub async fn run_mechanism_edges_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = wait_for_load(api, loader, &LoadKamRequest::new(kam_name)?, out).await?;
    info!(kam = kam_name, handle = %handle, "KAM loaded");

    let mut csv = EdgeCsvWriter::new(out)?;
    for rel in relationship::MECHANISM {
        let request = FindKamEdgesRequest::builder()
            .handle(&handle)
            .relationships([*rel])
            .build()?;
        let edges = api.find_kam_edges(&request).await?;
        debug!(relationship = *rel, found = edges.len(), "Searched edges");
        for edge in edges.iter().filter(|e| is_mechanism_edge(e)) {
            csv.write_edge(edge)?;
        }
    }
    csv.finish()
}
