//! In-memory Web API for tests.
//!
//! [`FakeWebApi`] answers every operation from fixtures and records the calls
//! that matter for assertions (load polls, releases, edge searches). These
//! APIs are intended for test-only code paths.

use crate::api::WebApi;
use crate::error::{Result, WsError};
use crate::model::{
    BelDocument, BelStatement, BelTerm, Kam, KamEdge, KamHandle, KamLoadStatus, KamNode,
    LoadKamResponse, Namespace, NamespaceValue,
};
use crate::requests::{
    FindEquivalencesRequest, FindKamEdgesRequest, FindKamNodesByNamespaceValuesRequest,
    FindKamNodesByPatternsRequest, FindNamespaceEquivalenceRequest, LoadKamRequest,
    ResolveEdgesRequest, ResolveNodesRequest,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Scriptable in-memory implementation of [`WebApi`].
#[derive(Debug, Default)]
pub struct FakeWebApi {
    catalog: Vec<Kam>,
    catalog_fault: Option<String>,
    load_script: Mutex<VecDeque<KamLoadStatus>>,
    load_calls: Mutex<Vec<String>>,
    released: Mutex<Vec<KamHandle>>,
    edge_searches: Mutex<Vec<Vec<String>>>,
    nodes: Vec<KamNode>,
    edges: Vec<KamEdge>,
    terms: HashMap<String, Vec<BelTerm>>,
    evidence: HashMap<String, Vec<BelStatement>>,
    documents: Vec<BelDocument>,
    namespaces: Vec<Namespace>,
    equivalents: HashMap<String, Vec<NamespaceValue>>,
}

impl FakeWebApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.catalog = names.into_iter().map(Kam::named).collect();
        self
    }

    pub fn with_catalog_entries(mut self, kams: Vec<Kam>) -> Self {
        self.catalog = kams;
        self
    }

    /// Make `GetCatalog` fail with a SOAP fault.
    pub fn with_catalog_fault(mut self, message: impl Into<String>) -> Self {
        self.catalog_fault = Some(message.into());
        self
    }

    /// Statuses returned by successive `LoadKam` calls. Once the script runs
    /// out every further call reports `COMPLETE`.
    pub fn with_load_statuses<I>(self, statuses: I) -> Self
    where
        I: IntoIterator<Item = KamLoadStatus>,
    {
        *lock(&self.load_script) = statuses.into_iter().collect();
        self
    }

    pub fn with_node(mut self, node: KamNode, terms: Vec<BelTerm>) -> Self {
        self.terms.insert(node.id.clone(), terms);
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: KamEdge, statements: Vec<BelStatement>) -> Self {
        self.evidence.insert(edge.id.clone(), statements);
        self.edges.push(edge);
        self
    }

    pub fn with_documents(mut self, documents: Vec<BelDocument>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_namespaces(mut self, namespaces: Vec<Namespace>) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Values equivalent to `value`, whatever namespace it is asked in.
    pub fn with_equivalents(mut self, value: &str, equivalents: Vec<NamespaceValue>) -> Self {
        self.equivalents.insert(value.to_string(), equivalents);
        self
    }

    fn equivalents_of(&self, value: &NamespaceValue) -> &[NamespaceValue] {
        self.equivalents
            .get(&value.value)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of `LoadKam` calls received so far.
    pub fn load_calls(&self) -> usize {
        lock(&self.load_calls).len()
    }

    /// KAM names of every `LoadKam` call, in order.
    pub fn loaded_names(&self) -> Vec<String> {
        lock(&self.load_calls).clone()
    }

    pub fn released(&self) -> Vec<KamHandle> {
        lock(&self.released).clone()
    }

    /// Relationship sets of every `FindKamEdges` call, in order.
    pub fn edge_searches(&self) -> Vec<Vec<String>> {
        lock(&self.edge_searches).clone()
    }

    /// The handle the fake hands out for the given attempt of a KAM load.
    pub fn handle_for(kam_name: &str, attempt: usize) -> KamHandle {
        KamHandle::new(format!("{kam_name}-handle-{attempt}"))
    }
}

/// Convenience constructor for fixture nodes.
pub fn kam_node(id: &str, function: &str, label: &str) -> KamNode {
    KamNode {
        id: id.to_string(),
        function: function.to_string(),
        label: label.to_string(),
    }
}

/// Convenience constructor for fixture edges.
pub fn kam_edge(id: &str, source: KamNode, relationship: &str, target: KamNode) -> KamEdge {
    KamEdge {
        id: id.to_string(),
        source,
        relationship: relationship.to_string(),
        target,
    }
}

// Supports a single `.*` wildcard; anything else must match exactly.
fn pattern_matches(pattern: &str, label: &str) -> bool {
    match pattern.split_once(".*") {
        Some((prefix, suffix)) => {
            label.len() >= prefix.len() + suffix.len()
                && label.starts_with(prefix)
                && label.ends_with(suffix)
        }
        None => label == pattern,
    }
}

#[async_trait]
impl WebApi for FakeWebApi {
    async fn get_catalog(&self) -> Result<Vec<Kam>> {
        if let Some(message) = &self.catalog_fault {
            return Err(WsError::Fault {
                code: "SOAP-ENV:Server".to_string(),
                message: message.clone(),
            });
        }
        Ok(self.catalog.clone())
    }

    async fn load_kam(&self, request: &LoadKamRequest) -> Result<LoadKamResponse> {
        let attempt = {
            let mut calls = lock(&self.load_calls);
            calls.push(request.kam_name().to_string());
            calls.len()
        };
        let status = lock(&self.load_script)
            .pop_front()
            .unwrap_or(KamLoadStatus::Complete);
        let message = match status {
            KamLoadStatus::Failed => Some(format!("KAM '{}' failed to load", request.kam_name())),
            _ => None,
        };
        // Every response carries a handle so callers that ignore the status would be caught.
        Ok(LoadKamResponse {
            status,
            handle: Some(Self::handle_for(request.kam_name(), attempt)),
            message,
        })
    }

    async fn release_kam(&self, handle: &KamHandle) -> Result<()> {
        lock(&self.released).push(handle.clone());
        Ok(())
    }

    async fn resolve_nodes(&self, request: &ResolveNodesRequest) -> Result<Vec<Option<KamNode>>> {
        Ok(request
            .nodes()
            .iter()
            .map(|n| self.nodes.iter().find(|k| k.label == n.label).cloned())
            .collect())
    }

    async fn resolve_edges(&self, request: &ResolveEdgesRequest) -> Result<Vec<Option<KamEdge>>> {
        Ok(request
            .edges()
            .iter()
            .map(|e| {
                self.edges
                    .iter()
                    .find(|k| {
                        k.source.label == e.source.label
                            && k.relationship == e.relationship
                            && k.target.label == e.target.label
                    })
                    .cloned()
            })
            .collect())
    }

    async fn find_kam_edges(&self, request: &FindKamEdgesRequest) -> Result<Vec<KamEdge>> {
        let wanted: Vec<String> = request
            .filter()
            .relationship_criteria
            .iter()
            .flat_map(|c| c.value_set.iter().cloned())
            .collect();
        lock(&self.edge_searches).push(wanted.clone());
        Ok(self
            .edges
            .iter()
            .filter(|e| wanted.contains(&e.relationship))
            .cloned()
            .collect())
    }

    async fn get_supporting_evidence(&self, edge: &KamEdge) -> Result<Vec<BelStatement>> {
        Ok(self.evidence.get(&edge.id).cloned().unwrap_or_default())
    }

    async fn get_supporting_terms(&self, node: &KamNode) -> Result<Vec<BelTerm>> {
        Ok(self.terms.get(&node.id).cloned().unwrap_or_default())
    }

    async fn get_bel_documents(&self, _handle: &KamHandle) -> Result<Vec<BelDocument>> {
        Ok(self.documents.clone())
    }

    async fn get_namespaces(&self, _handle: &KamHandle) -> Result<Vec<Namespace>> {
        Ok(self.namespaces.clone())
    }

    async fn find_kam_nodes_by_patterns(
        &self,
        request: &FindKamNodesByPatternsRequest,
    ) -> Result<Vec<KamNode>> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| request.patterns().iter().any(|p| pattern_matches(p, &n.label)))
            .cloned()
            .collect())
    }

    async fn find_kam_nodes_by_namespace_values(
        &self,
        request: &FindKamNodesByNamespaceValuesRequest,
    ) -> Result<Vec<KamNode>> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| {
                request.namespace_values().iter().any(|nv| {
                    let prefix = nv.namespace.prefix.as_deref().unwrap_or_default();
                    n.label.contains(&format!("{}:{}", prefix, nv.value))
                })
            })
            .cloned()
            .collect())
    }

    async fn find_namespace_equivalence(
        &self,
        request: &FindNamespaceEquivalenceRequest,
    ) -> Result<Option<NamespaceValue>> {
        let target = &request.target_namespace().resource_location;
        Ok(self
            .equivalents_of(request.namespace_value())
            .iter()
            .find(|nv| &nv.namespace.resource_location == target)
            .cloned())
    }

    async fn find_equivalences(
        &self,
        request: &FindEquivalencesRequest,
    ) -> Result<Vec<NamespaceValue>> {
        Ok(self.equivalents_of(request.namespace_value()).to_vec())
    }
}
