//! Response payloads, one per operation.
//!
//! Repeated elements become `Vec` fields and default to empty when the
//! service sends none.

use crate::model::{
    BelDocument, BelStatement, BelTerm, Kam, KamEdge, KamNode, Namespace, NamespaceValue,
};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetCatalogResponse {
    #[serde(default)]
    pub kams: Vec<Kam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseKamResponse {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetBelDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<BelDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetNamespacesResponse {
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetSupportingEvidenceResponse {
    #[serde(default)]
    pub statements: Vec<BelStatement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetSupportingTermsResponse {
    #[serde(default)]
    pub terms: Vec<BelTerm>,
}

/// One entry per requested node, in request order.
///
/// Unresolved entries come back as `xsi:nil` or empty elements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveNodesResponse {
    #[serde(default)]
    kam_nodes: Vec<NullableKamNode>,
}

impl ResolveNodesResponse {
    pub fn into_nodes(self) -> Vec<Option<KamNode>> {
        self.kam_nodes
            .into_iter()
            .map(NullableKamNode::resolved)
            .collect()
    }
}

/// One entry per requested edge, in request order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveEdgesResponse {
    #[serde(default)]
    kam_edges: Vec<NullableKamEdge>,
}

impl ResolveEdgesResponse {
    pub fn into_edges(self) -> Vec<Option<KamEdge>> {
        self.kam_edges
            .into_iter()
            .map(NullableKamEdge::resolved)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NullableKamNode {
    id: Option<String>,
    function: Option<String>,
    label: Option<String>,
}

impl NullableKamNode {
    fn resolved(self) -> Option<KamNode> {
        Some(KamNode {
            id: self.id?,
            function: self.function.unwrap_or_default(),
            label: self.label?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NullableKamEdge {
    id: Option<String>,
    source: Option<KamNode>,
    target: Option<KamNode>,
    relationship: Option<String>,
}

impl NullableKamEdge {
    fn resolved(self) -> Option<KamEdge> {
        Some(KamEdge {
            id: self.id?,
            source: self.source?,
            target: self.target?,
            relationship: self.relationship?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamEdgesResponse {
    #[serde(default)]
    pub kam_edges: Vec<KamEdge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamNodesByPatternsResponse {
    #[serde(default)]
    pub kam_nodes: Vec<KamNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamNodesByNamespaceValuesResponse {
    #[serde(default)]
    pub kam_nodes: Vec<KamNode>,
}

/// The equivalent value, absent or nil when there is none.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNamespaceEquivalenceResponse {
    pub namespace_value: Option<NamespaceValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEquivalencesResponse {
    #[serde(default)]
    pub namespace_values: Vec<NamespaceValue>,
}
