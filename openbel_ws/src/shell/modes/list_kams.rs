//! # List KAMs Mode
//!
//! Prints the KAM catalog, then loads every KAM and lists its BEL documents.

use super::wait_for_load;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use openbel_ws_client::requests::LoadKamRequest;
use std::io::Write;

/// Run in list-kams mode.
///
/// # Errors
/// A catalog transport fault is printed as `FAILED!` followed by the fault and
/// returned. A failed or timed out load of any KAM is reported the same way
/// and ends the run.
pub async fn run_list_kams_mode<A, W>(api: &A, loader: &KamLoader, out: &mut W) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    writeln!(out)?;
    writeln!(
        out,
        "OpenBEL Framework Web API Client {}: List KAMs",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;

    let catalog = match api.get_catalog().await {
        Ok(catalog) => catalog,
        Err(e) => {
            if e.is_transport() {
                writeln!(out, "FAILED!")?;
                writeln!(out, "{e}")?;
            }
            return Err(e).context("Failed to fetch KAM catalog");
        }
    };

    writeln!(out, "   === LISTING KAMs ===   ")?;
    for kam in &catalog {
        writeln!(out, "   {}", kam.name)?;
    }
    writeln!(out)?;

    for kam in catalog {
        let name = kam.name.clone();
        writeln!(out, "   === LOADING KAM ===   ")?;
        writeln!(out, "   KAM: \"{name}\"")?;
        let handle = wait_for_load(api, loader, &LoadKamRequest::for_kam(kam)?, out).await?;
        writeln!(out, "   KAM loaded")?;
        writeln!(out)?;

        let documents = api
            .get_bel_documents(&handle)
            .await
            .with_context(|| format!("Failed to list documents of KAM '{name}'"))?;
        writeln!(out, "   === LISTING DOCUMENTS ===   ")?;
        for document in documents {
            writeln!(out, "   Name: {}", document.name)?;
            writeln!(
                out,
                "   Description: {}",
                document.description.as_deref().unwrap_or_default()
            )?;
            writeln!(out, "   ID: {}", document.id.as_deref().unwrap_or_default())?;
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Success!")?;
    Ok(())
}
