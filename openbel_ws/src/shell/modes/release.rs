//! # Release Mode
//!
//! Loads a KAM and immediately releases its handle.

use super::load_kam;
use anyhow::{Context, Result};
use openbel_ws_client::api::WebApi;
use openbel_ws_client::loader::KamLoader;
use std::io::Write;

pub async fn run_release_mode<A, W>(
    api: &A,
    loader: &KamLoader,
    kam_name: &str,
    out: &mut W,
) -> Result<()>
where
    A: WebApi + ?Sized,
    W: Write,
{
    let handle = load_kam(api, loader, kam_name, out).await?;
    api.release_kam(&handle)
        .await
        .with_context(|| format!("Failed to release KAM '{kam_name}'"))?;
    writeln!(out, "released kam '{kam_name}', handle '{handle}'")?;
    Ok(())
}
