//! The Web API operations as an async trait.
//!
//! [`crate::client::SoapClient`] implements this over HTTP. Anything else
//! implementing it (in-memory fakes in tests, for instance) can drive the
//! loader and the higher-level helpers below.

use crate::error::Result;
use crate::model::{
    BelDocument, BelStatement, BelTerm, Edge, Kam, KamEdge, KamHandle, KamNode, LoadKamResponse,
    Namespace, NamespaceValue,
};
use crate::requests::{
    FindEquivalencesRequest, FindKamEdgesRequest, FindKamNodesByNamespaceValuesRequest,
    FindKamNodesByPatternsRequest, FindNamespaceEquivalenceRequest, LoadKamRequest,
    ResolveEdgesRequest, ResolveNodesRequest,
};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
pub trait WebApi: Send + Sync {
    async fn get_catalog(&self) -> Result<Vec<Kam>>;

    /// Issue one `LoadKam` call. Use [`crate::loader::KamLoader`] to wait for completion.
    async fn load_kam(&self, request: &LoadKamRequest) -> Result<LoadKamResponse>;

    async fn release_kam(&self, handle: &KamHandle) -> Result<()>;

    /// One entry per requested node, `None` where the node did not resolve.
    async fn resolve_nodes(&self, request: &ResolveNodesRequest) -> Result<Vec<Option<KamNode>>>;

    /// One entry per requested edge, `None` where the edge did not resolve.
    async fn resolve_edges(&self, request: &ResolveEdgesRequest) -> Result<Vec<Option<KamEdge>>>;

    async fn find_kam_edges(&self, request: &FindKamEdgesRequest) -> Result<Vec<KamEdge>>;

    async fn get_supporting_evidence(&self, edge: &KamEdge) -> Result<Vec<BelStatement>>;

    async fn get_supporting_terms(&self, node: &KamNode) -> Result<Vec<BelTerm>>;

    async fn get_bel_documents(&self, handle: &KamHandle) -> Result<Vec<BelDocument>>;

    async fn get_namespaces(&self, handle: &KamHandle) -> Result<Vec<Namespace>>;

    async fn find_kam_nodes_by_patterns(
        &self,
        request: &FindKamNodesByPatternsRequest,
    ) -> Result<Vec<KamNode>>;

    async fn find_kam_nodes_by_namespace_values(
        &self,
        request: &FindKamNodesByNamespaceValuesRequest,
    ) -> Result<Vec<KamNode>>;

    /// The equivalent value in the target namespace, `None` when there is none.
    async fn find_namespace_equivalence(
        &self,
        request: &FindNamespaceEquivalenceRequest,
    ) -> Result<Option<NamespaceValue>>;

    /// Every known equivalent of a value, across all namespaces.
    async fn find_equivalences(
        &self,
        request: &FindEquivalencesRequest,
    ) -> Result<Vec<NamespaceValue>>;
}

/// Resolve a single node by its BEL term label.
///
/// Returns `Ok(None)` when the service finds no match.
pub async fn resolve_node<A>(api: &A, handle: &KamHandle, label: &str) -> Result<Option<KamNode>>
where
    A: WebApi + ?Sized,
{
    let request = ResolveNodesRequest::builder()
        .handle(handle)
        .node(label)
        .build()?;
    let resolved = api.resolve_nodes(&request).await?;
    debug!(label, matches = resolved.len(), "Resolved node");
    Ok(single(resolved))
}

/// Resolve a single edge from source label, relationship and target label.
///
/// Returns `Ok(None)` when the service finds no match.
pub async fn resolve_edge<A>(
    api: &A,
    handle: &KamHandle,
    source: &str,
    relationship: &str,
    target: &str,
) -> Result<Option<KamEdge>>
where
    A: WebApi + ?Sized,
{
    let request = ResolveEdgesRequest::builder()
        .handle(handle)
        .edge(Edge::new(source, relationship, target))
        .build()?;
    let resolved = api.resolve_edges(&request).await?;
    debug!(source, relationship, target, matches = resolved.len(), "Resolved edge");
    Ok(single(resolved))
}

// Exactly one non-null result counts as found.
fn single<T>(mut resolved: Vec<Option<T>>) -> Option<T> {
    if resolved.len() == 1 {
        resolved.pop().flatten()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::single;

    #[test]
    fn single_requires_exactly_one_match() {
        assert_eq!(single::<u8>(vec![]), None);
        assert_eq!(single::<u8>(vec![None]), None);
        assert_eq!(single(vec![Some(1)]), Some(1));
        assert_eq!(single(vec![Some(1), Some(2)]), None);
    }
}
