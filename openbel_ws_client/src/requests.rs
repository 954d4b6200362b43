//! Typed request messages for each Web API operation.
//!
//! Requests with more than one field are assembled with a builder whose
//! `build()` validates the request before anything is sent. Field order is
//! the schema's element order.

use crate::error::{Result, WsError};
use crate::model::{
    Edge, EdgeFilter, Kam, KamEdge, KamHandle, KamNode, LoadKamResponse, Namespace,
    NamespaceValue, Node,
};
use crate::responses::{
    FindEquivalencesResponse, FindKamEdgesResponse, FindKamNodesByNamespaceValuesResponse,
    FindKamNodesByPatternsResponse, FindNamespaceEquivalenceResponse, GetBelDocumentsResponse,
    GetCatalogResponse, GetNamespacesResponse, GetSupportingEvidenceResponse,
    GetSupportingTermsResponse, ReleaseKamResponse, ResolveEdgesResponse, ResolveNodesResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A request message with its SOAP payload element names and response type.
pub trait SoapRequest: Serialize {
    /// Local name of the request payload element.
    const ELEMENT: &'static str;
    /// Local name of the matching response payload element.
    const RESPONSE: &'static str;

    type Response: DeserializeOwned + Send;
}

fn non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(WsError::InvalidRequest(format!("{what} must not be empty")))
    } else {
        Ok(())
    }
}

fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| WsError::InvalidRequest(format!("{what} is required")))
}

fn validate_namespace_value(nv: &NamespaceValue) -> Result<()> {
    non_empty(&nv.namespace.resource_location, "namespace resource location")?;
    non_empty(&nv.value, "namespace value")
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCatalogRequest;

impl SoapRequest for GetCatalogRequest {
    const ELEMENT: &'static str = "GetCatalogRequest";
    const RESPONSE: &'static str = "GetCatalogResponse";

    type Response = GetCatalogResponse;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadKamRequest {
    kam: Kam,
}

impl LoadKamRequest {
    pub fn new(kam_name: &str) -> Result<Self> {
        Self::for_kam(Kam::named(kam_name))
    }

    /// Load a catalog entry as returned by `GetCatalog`.
    pub fn for_kam(kam: Kam) -> Result<Self> {
        non_empty(&kam.name, "KAM name")?;
        Ok(Self { kam })
    }

    pub fn kam_name(&self) -> &str {
        &self.kam.name
    }
}

impl SoapRequest for LoadKamRequest {
    const ELEMENT: &'static str = "LoadKamRequest";
    const RESPONSE: &'static str = "LoadKamResponse";

    type Response = LoadKamResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseKamRequest {
    pub kam: KamHandle,
}

impl SoapRequest for ReleaseKamRequest {
    const ELEMENT: &'static str = "ReleaseKamRequest";
    const RESPONSE: &'static str = "ReleaseKamResponse";

    type Response = ReleaseKamResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBelDocumentsRequest {
    pub handle: KamHandle,
}

impl SoapRequest for GetBelDocumentsRequest {
    const ELEMENT: &'static str = "GetBelDocumentsRequest";
    const RESPONSE: &'static str = "GetBelDocumentsResponse";

    type Response = GetBelDocumentsResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNamespacesRequest {
    pub handle: KamHandle,
}

impl SoapRequest for GetNamespacesRequest {
    const ELEMENT: &'static str = "GetNamespacesRequest";
    const RESPONSE: &'static str = "GetNamespacesResponse";

    type Response = GetNamespacesResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSupportingEvidenceRequest {
    pub kam_edge: KamEdge,
}

impl SoapRequest for GetSupportingEvidenceRequest {
    const ELEMENT: &'static str = "GetSupportingEvidenceRequest";
    const RESPONSE: &'static str = "GetSupportingEvidenceResponse";

    type Response = GetSupportingEvidenceResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSupportingTermsRequest {
    pub kam_node: KamNode,
}

impl SoapRequest for GetSupportingTermsRequest {
    const ELEMENT: &'static str = "GetSupportingTermsRequest";
    const RESPONSE: &'static str = "GetSupportingTermsResponse";

    type Response = GetSupportingTermsResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveNodesRequest {
    handle: KamHandle,
    nodes: Vec<Node>,
}

impl ResolveNodesRequest {
    pub fn builder() -> ResolveNodesRequestBuilder {
        ResolveNodesRequestBuilder::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[derive(Debug, Default)]
pub struct ResolveNodesRequestBuilder {
    handle: Option<KamHandle>,
    nodes: Vec<Node>,
}

impl ResolveNodesRequestBuilder {
    pub fn handle(mut self, handle: &KamHandle) -> Self {
        self.handle = Some(handle.clone());
        self
    }

    pub fn node(mut self, label: impl Into<String>) -> Self {
        self.nodes.push(Node::new(label));
        self
    }

    pub fn build(self) -> Result<ResolveNodesRequest> {
        let handle = required(self.handle, "KAM handle")?;
        if self.nodes.is_empty() {
            return Err(WsError::InvalidRequest(
                "at least one node is required".to_string(),
            ));
        }
        for node in &self.nodes {
            non_empty(&node.label, "node label")?;
        }
        Ok(ResolveNodesRequest {
            handle,
            nodes: self.nodes,
        })
    }
}

impl SoapRequest for ResolveNodesRequest {
    const ELEMENT: &'static str = "ResolveNodesRequest";
    const RESPONSE: &'static str = "ResolveNodesResponse";

    type Response = ResolveNodesResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveEdgesRequest {
    handle: KamHandle,
    edges: Vec<Edge>,
}

impl ResolveEdgesRequest {
    pub fn builder() -> ResolveEdgesRequestBuilder {
        ResolveEdgesRequestBuilder::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

#[derive(Debug, Default)]
pub struct ResolveEdgesRequestBuilder {
    handle: Option<KamHandle>,
    edges: Vec<Edge>,
}

impl ResolveEdgesRequestBuilder {
    pub fn handle(mut self, handle: &KamHandle) -> Self {
        self.handle = Some(handle.clone());
        self
    }

    pub fn edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn build(self) -> Result<ResolveEdgesRequest> {
        let handle = required(self.handle, "KAM handle")?;
        if self.edges.is_empty() {
            return Err(WsError::InvalidRequest(
                "at least one edge is required".to_string(),
            ));
        }
        for edge in &self.edges {
            non_empty(&edge.source.label, "edge source label")?;
            non_empty(&edge.relationship, "edge relationship")?;
            non_empty(&edge.target.label, "edge target label")?;
        }
        Ok(ResolveEdgesRequest {
            handle,
            edges: self.edges,
        })
    }
}

impl SoapRequest for ResolveEdgesRequest {
    const ELEMENT: &'static str = "ResolveEdgesRequest";
    const RESPONSE: &'static str = "ResolveEdgesResponse";

    type Response = ResolveEdgesResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamEdgesRequest {
    handle: KamHandle,
    filter: EdgeFilter,
}

impl FindKamEdgesRequest {
    pub fn builder() -> FindKamEdgesRequestBuilder {
        FindKamEdgesRequestBuilder::default()
    }

    pub fn filter(&self) -> &EdgeFilter {
        &self.filter
    }
}

#[derive(Debug, Default)]
pub struct FindKamEdgesRequestBuilder {
    handle: Option<KamHandle>,
    filter: Option<EdgeFilter>,
}

impl FindKamEdgesRequestBuilder {
    pub fn handle(mut self, handle: &KamHandle) -> Self {
        self.handle = Some(handle.clone());
        self
    }

    pub fn filter(mut self, filter: EdgeFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Shorthand for a filter including the given relationship types.
    pub fn relationships<I, S>(self, relationships: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(EdgeFilter::relationships(relationships))
    }

    pub fn build(self) -> Result<FindKamEdgesRequest> {
        let handle = required(self.handle, "KAM handle")?;
        let filter = required(self.filter, "edge filter")?;
        if filter.is_empty() {
            return Err(WsError::InvalidRequest(
                "edge filter must name at least one relationship type".to_string(),
            ));
        }
        Ok(FindKamEdgesRequest { handle, filter })
    }
}

impl SoapRequest for FindKamEdgesRequest {
    const ELEMENT: &'static str = "FindKamEdgesRequest";
    const RESPONSE: &'static str = "FindKamEdgesResponse";

    type Response = FindKamEdgesResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamNodesByPatternsRequest {
    handle: KamHandle,
    patterns: Vec<String>,
}

impl FindKamNodesByPatternsRequest {
    pub fn builder() -> FindKamNodesByPatternsRequestBuilder {
        FindKamNodesByPatternsRequestBuilder::default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

#[derive(Debug, Default)]
pub struct FindKamNodesByPatternsRequestBuilder {
    handle: Option<KamHandle>,
    patterns: Vec<String>,
}

impl FindKamNodesByPatternsRequestBuilder {
    pub fn handle(mut self, handle: &KamHandle) -> Self {
        self.handle = Some(handle.clone());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn build(self) -> Result<FindKamNodesByPatternsRequest> {
        let handle = required(self.handle, "KAM handle")?;
        if self.patterns.is_empty() {
            return Err(WsError::InvalidRequest(
                "at least one pattern is required".to_string(),
            ));
        }
        for pattern in &self.patterns {
            non_empty(pattern, "pattern")?;
        }
        Ok(FindKamNodesByPatternsRequest {
            handle,
            patterns: self.patterns,
        })
    }
}

impl SoapRequest for FindKamNodesByPatternsRequest {
    const ELEMENT: &'static str = "FindKamNodesByPatternsRequest";
    const RESPONSE: &'static str = "FindKamNodesByPatternsResponse";

    type Response = FindKamNodesByPatternsResponse;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindKamNodesByNamespaceValuesRequest {
    handle: KamHandle,
    namespace_values: Vec<NamespaceValue>,
}

impl FindKamNodesByNamespaceValuesRequest {
    pub fn builder() -> FindKamNodesByNamespaceValuesRequestBuilder {
        FindKamNodesByNamespaceValuesRequestBuilder::default()
    }

    pub fn namespace_values(&self) -> &[NamespaceValue] {
        &self.namespace_values
    }
}

#[derive(Debug, Default)]
pub struct FindKamNodesByNamespaceValuesRequestBuilder {
    handle: Option<KamHandle>,
    namespace_values: Vec<NamespaceValue>,
}

impl FindKamNodesByNamespaceValuesRequestBuilder {
    pub fn handle(mut self, handle: &KamHandle) -> Self {
        self.handle = Some(handle.clone());
        self
    }

    pub fn namespace_value(mut self, value: NamespaceValue) -> Self {
        self.namespace_values.push(value);
        self
    }

    pub fn build(self) -> Result<FindKamNodesByNamespaceValuesRequest> {
        let handle = required(self.handle, "KAM handle")?;
        if self.namespace_values.is_empty() {
            return Err(WsError::InvalidRequest(
                "at least one namespace value is required".to_string(),
            ));
        }
        for nv in &self.namespace_values {
            validate_namespace_value(nv)?;
        }
        Ok(FindKamNodesByNamespaceValuesRequest {
            handle,
            namespace_values: self.namespace_values,
        })
    }
}

impl SoapRequest for FindKamNodesByNamespaceValuesRequest {
    const ELEMENT: &'static str = "FindKamNodesByNamespaceValuesRequest";
    const RESPONSE: &'static str = "FindKamNodesByNamespaceValuesResponse";

    type Response = FindKamNodesByNamespaceValuesResponse;
}

/// Looks up the value equivalent to `namespace_value` in `target_namespace`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindNamespaceEquivalenceRequest {
    namespace_value: NamespaceValue,
    target_namespace: Namespace,
}

impl FindNamespaceEquivalenceRequest {
    pub fn builder() -> FindNamespaceEquivalenceRequestBuilder {
        FindNamespaceEquivalenceRequestBuilder::default()
    }

    pub fn namespace_value(&self) -> &NamespaceValue {
        &self.namespace_value
    }

    pub fn target_namespace(&self) -> &Namespace {
        &self.target_namespace
    }
}

#[derive(Debug, Default)]
pub struct FindNamespaceEquivalenceRequestBuilder {
    namespace_value: Option<NamespaceValue>,
    target_namespace: Option<Namespace>,
}

impl FindNamespaceEquivalenceRequestBuilder {
    pub fn namespace_value(mut self, value: NamespaceValue) -> Self {
        self.namespace_value = Some(value);
        self
    }

    pub fn target_namespace(mut self, namespace: Namespace) -> Self {
        self.target_namespace = Some(namespace);
        self
    }

    pub fn build(self) -> Result<FindNamespaceEquivalenceRequest> {
        let namespace_value = required(self.namespace_value, "namespace value")?;
        let target_namespace = required(self.target_namespace, "target namespace")?;
        validate_namespace_value(&namespace_value)?;
        non_empty(
            &target_namespace.resource_location,
            "target namespace resource location",
        )?;
        Ok(FindNamespaceEquivalenceRequest {
            namespace_value,
            target_namespace,
        })
    }
}

impl SoapRequest for FindNamespaceEquivalenceRequest {
    const ELEMENT: &'static str = "FindNamespaceEquivalenceRequest";
    const RESPONSE: &'static str = "FindNamespaceEquivalenceResponse";

    type Response = FindNamespaceEquivalenceResponse;
}

/// Lists every value equivalent to `namespace_value` across namespaces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindEquivalencesRequest {
    namespace_value: NamespaceValue,
}

impl FindEquivalencesRequest {
    pub fn new(namespace_value: NamespaceValue) -> Result<Self> {
        validate_namespace_value(&namespace_value)?;
        Ok(Self { namespace_value })
    }

    pub fn namespace_value(&self) -> &NamespaceValue {
        &self.namespace_value
    }
}

impl SoapRequest for FindEquivalencesRequest {
    const ELEMENT: &'static str = "FindEquivalencesRequest";
    const RESPONSE: &'static str = "FindEquivalencesResponse";

    type Response = FindEquivalencesResponse;
}
