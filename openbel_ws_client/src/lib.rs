//! # OpenBEL Web API Client
//!
//! This crate is a typed client for the OpenBEL Framework Web API, a SOAP/WSDL
//! service that loads knowledge-assembly models (KAMs) and answers queries
//! about their nodes, edges and supporting BEL evidence.
//!
//! ## Key Features
//!
//! - **SOAP Transport**: [`client::SoapClient`] discovers the endpoint from the WSDL and
//!   exchanges SOAP 1.1 envelopes over HTTP.
//! - **Typed Requests**: every operation has a request type; multi-field requests are
//!   assembled with builders that validate before anything is sent.
//! - **Bounded Loading**: [`loader::KamLoader`] polls `LoadKam` until the KAM is ready,
//!   within a configurable [`loader::LoadPolicy`].
//! - **Pluggable Service**: operations are exposed through the [`api::WebApi`] trait, so
//!   callers can be exercised against in-memory fakes.
//!
//! ## Usage
//!
//! ```no_run
//! use openbel_ws_client::api::{WebApi, resolve_node};
//! use openbel_ws_client::client::{ClientConfig, SoapClient};
//! use openbel_ws_client::loader::{KamLoader, LoadPolicy};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = Url::parse("http://localhost:8080/openbel-ws/belframework.wsdl")?;
//! let client = SoapClient::connect(&ClientConfig::new(url)).await?;
//!
//! let handle = KamLoader::new(LoadPolicy::default())
//!     .load(&client, "small")
//!     .await?;
//! if let Some(node) = resolve_node(&client, &handle, "p(HGNC:AKT1)").await? {
//!     for term in client.get_supporting_terms(&node).await? {
//!         println!("{}", term.label);
//!     }
//! }
//! client.release_kam(&handle).await?;
//! # Ok(())
//! # }
//! ```

/// Web API operations as an async trait, plus resolve helpers.
pub mod api;
/// SOAP-over-HTTP implementation of the Web API.
pub mod client;
/// SOAP envelope encoding and decoding.
pub mod envelope;
/// Error types for Web API client operations.
pub mod error;
/// KAM load orchestration with bounded polling.
pub mod loader;
/// Typed data model of the Web API schema.
pub mod model;
/// Request messages for each operation.
pub mod requests;
/// Response payloads for each operation.
pub mod responses;
/// In-memory Web API for exercising callers in tests.
pub mod test_utils;
/// XML element tree for envelopes, faults and WSDL documents.
pub mod xml;

pub use error::{Result, WsError};
