//! # Command Modes
//!
//! One module per `openbel_ws` subcommand. Every mode takes the Web API as a
//! generic [`WebApi`], waits for KAM loads through a [`KamLoader`] and writes
//! its report to the given writer, so modes run unchanged against a fake
//! service in tests.

pub mod causal_edges;
pub mod edges;
pub mod find_edge;
pub mod find_equivalence;
pub mod find_node;
pub mod find_nodes_for_parameter;
pub mod list_kams;
pub mod map_data;
pub mod mechanism_edges;
pub mod release;
pub mod summarize;

// Re-export mode functions for convenience
pub use causal_edges::run_causal_edges_mode;
pub use edges::run_edges_mode;
pub use find_edge::run_find_edge_mode;
pub use find_equivalence::run_find_equivalence_mode;
pub use find_node::run_find_node_mode;
pub use find_nodes_for_parameter::run_find_nodes_for_parameter_mode;
pub use list_kams::run_list_kams_mode;
pub use map_data::run_map_data_mode;
pub use mechanism_edges::run_mechanism_edges_mode;
pub use release::run_release_mode;
pub use summarize::{SummarizeOptions, run_summarize_mode};

use crate::output::loaded_line;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::model::KamHandle;
use openbel_ws_client::requests::LoadKamRequest;
use std::io::Write;

/// Load `kam_name`, wait until it is ready and print the `loaded kam` line.
pub async fn load_kam<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    out: &mut W,
) -> Result<KamHandle>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = wait_for_load(api, loader, &LoadKamRequest::new(kam_name)?, out).await?;
    writeln!(out, "{}", loaded_line(kam_name, &handle))?;
    Ok(handle)
}

/// Wait for `request` to load.
///
/// When the service ends the load without a KAM (`FAILED` or the poll limit
/// is hit), `FAILED!` and the reason are written to `out` and the load error
/// is returned as is. Other errors are wrapped with the KAM name.
pub async fn wait_for_load<A, W>(
    api: &A,
    loader: &KamLoader,
    request: &LoadKamRequest,
    out: &mut W,
) -> Result<KamHandle>
where
    A: WebApi + ?Sized,
    W: Write,
{
    match loader.load_request(api, request).await {
        Ok(handle) => Ok(handle),
        Err(e) if e.is_load_outcome() => {
            writeln!(out, "FAILED!")?;
            writeln!(out, "{e}")?;
            Err(e.into())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to load KAM '{}'", request.kam_name()))
        }
    }
}
