//! Typed data model of the OpenBEL Web API schema.
//!
//! Types derive serde and go through quick-xml's serializer. Field names
//! follow the `http://belframework.org/ws/schemas` schema; elements are
//! matched by local name, so response prefixes do not matter. Types the
//! service expects back in a request also implement `Serialize`.

use crate::error::WsError;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// BEL function types referenced by the examples.
pub mod function {
    pub const PROTEIN_ABUNDANCE: &str = "PROTEIN_ABUNDANCE";
    pub const RNA_ABUNDANCE: &str = "RNA_ABUNDANCE";
}

/// BEL relationship types as named by the Web API.
pub mod relationship {
    pub const CAUSES_NO_CHANGE: &str = "CAUSES_NO_CHANGE";
    pub const DECREASES: &str = "DECREASES";
    pub const DIRECTLY_DECREASES: &str = "DIRECTLY_DECREASES";
    pub const DIRECTLY_INCREASES: &str = "DIRECTLY_INCREASES";
    pub const INCREASES: &str = "INCREASES";

    /// Relationships that assert a causal effect.
    pub const CAUSAL: &[&str] = &[
        CAUSES_NO_CHANGE,
        DECREASES,
        DIRECTLY_DECREASES,
        DIRECTLY_INCREASES,
        INCREASES,
    ];

    /// Increase/decrease relationships used to find transcriptional mechanisms.
    pub const MECHANISM: &[&str] = &[DECREASES, DIRECTLY_DECREASES, DIRECTLY_INCREASES, INCREASES];

    pub const ALL: &[&str] = &[
        "ACTS_IN",
        "ANALOGOUS",
        "ASSOCIATION",
        "BIOMARKER_FOR",
        CAUSES_NO_CHANGE,
        DECREASES,
        DIRECTLY_DECREASES,
        DIRECTLY_INCREASES,
        "HAS_COMPONENT",
        "HAS_COMPONENTS",
        "HAS_MEMBER",
        "HAS_MEMBERS",
        "HAS_MODIFICATION",
        "HAS_PRODUCT",
        "HAS_VARIANT",
        "INCLUDES",
        INCREASES,
        "IS_A",
        "NEGATIVE_CORRELATION",
        "ORTHOLOGOUS",
        "POSITIVE_CORRELATION",
        "PROGNOSTIC_BIOMARKER_FOR",
        "RATE_LIMITING_STEP_OF",
        "REACTANT_IN",
        "SUBPROCESS_OF",
        "TRANSCRIBED_TO",
        "TRANSLATED_TO",
        "TRANSLOCATES",
    ];
}

// Empty text elements carry no value.
fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// A catalog entry describing a KAM available on the service.
///
/// Only `id` and `name` are sent back when the entry is used in a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kam {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing, deserialize_with = "non_empty_text")]
    pub description: Option<String>,
    #[serde(default, skip_serializing, deserialize_with = "non_empty_text")]
    pub last_compiled: Option<String>,
}

impl Kam {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Calendar date of the last compilation, when the service reports one.
    pub fn last_compiled_date(&self) -> Option<NaiveDate> {
        let raw = self.last_compiled.as_deref()?;
        NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
    }
}

/// Opaque token naming a loaded KAM instance on the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KamHandle {
    pub handle: String,
}

impl KamHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

impl fmt::Display for KamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.handle)
    }
}

/// Load status reported by `LoadKam`.
///
/// `IN_PROCESS` and any value the client does not recognise are `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum KamLoadStatus {
    Pending,
    Failed,
    Complete,
}

impl KamLoadStatus {
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "COMPLETE" => KamLoadStatus::Complete,
            "FAILED" => KamLoadStatus::Failed,
            _ => KamLoadStatus::Pending,
        }
    }
}

impl From<String> for KamLoadStatus {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl fmt::Display for KamLoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KamLoadStatus::Pending => "PENDING",
            KamLoadStatus::Failed => "FAILED",
            KamLoadStatus::Complete => "COMPLETE",
        };
        f.write_str(s)
    }
}

/// Result of a single `LoadKam` poll.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoadKamResponse {
    #[serde(rename = "loadStatus")]
    pub status: KamLoadStatus,
    pub handle: Option<KamHandle>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub message: Option<String>,
}

impl LoadKamResponse {
    /// The handle, only when the load is complete.
    pub fn into_handle(self) -> Option<KamHandle> {
        match self.status {
            KamLoadStatus::Complete => self.handle,
            _ => None,
        }
    }
}

/// Caller-built node reference resolved against a KAM by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub label: String,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Caller-built edge reference: source and target labels plus a relationship.
///
/// Field order is the schema's element order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: Node,
    pub target: Node,
    pub relationship: String,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        relationship: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: Node::new(source),
            target: Node::new(target),
            relationship: relationship.into(),
        }
    }
}

/// A node of a loaded KAM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KamNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub function: String,
    pub label: String,
}

/// An edge of a loaded KAM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KamEdge {
    pub id: String,
    pub source: KamNode,
    pub target: KamNode,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BelTerm {
    pub id: Option<String>,
    pub label: String,
}

impl BelTerm {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BelDocument {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub citation_type: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

/// An annotation on a statement. The wire form nests the type name as
/// `annotationType/name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "AnnotationWire")]
pub struct Annotation {
    pub annotation_type: String,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotationWire {
    annotation_type: AnnotationTypeWire,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct AnnotationTypeWire {
    name: String,
}

impl From<AnnotationWire> for Annotation {
    fn from(wire: AnnotationWire) -> Self {
        Self {
            annotation_type: wire.annotation_type.name,
            value: wire.value,
        }
    }
}

/// The simple subject/relationship/object statement nested as an object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NestedStatement {
    #[serde(rename = "subjectTerm")]
    pub subject: BelTerm,
    pub relationship: String,
    #[serde(rename = "objectTerm")]
    pub object: BelTerm,
}

/// What follows the subject of a BEL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementObject {
    SubjectOnly,
    Term {
        relationship: String,
        object: BelTerm,
    },
    Nested {
        relationship: String,
        statement: Box<NestedStatement>,
    },
}

/// A supporting BEL statement with its citation and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "StatementWire")]
pub struct BelStatement {
    pub id: Option<String>,
    pub subject: BelTerm,
    pub object: StatementObject,
    pub citation: Option<Citation>,
    pub annotations: Vec<Annotation>,
}

impl BelStatement {
    pub fn subject_only(subject: BelTerm) -> Self {
        Self {
            id: None,
            subject,
            object: StatementObject::SubjectOnly,
            citation: None,
            annotations: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementWire {
    id: Option<String>,
    subject_term: BelTerm,
    relationship: Option<String>,
    object_term: Option<BelTerm>,
    object_statement: Option<NestedStatement>,
    citation: Option<Citation>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

impl TryFrom<StatementWire> for BelStatement {
    type Error = WsError;

    fn try_from(wire: StatementWire) -> Result<Self, Self::Error> {
        let object = match (wire.object_term, wire.object_statement) {
            (Some(object), _) => StatementObject::Term {
                relationship: wire
                    .relationship
                    .ok_or_else(|| WsError::missing("statements", "relationship"))?,
                object,
            },
            (None, Some(nested)) => StatementObject::Nested {
                relationship: wire
                    .relationship
                    .ok_or_else(|| WsError::missing("statements", "relationship"))?,
                statement: Box::new(nested),
            },
            (None, None) => StatementObject::SubjectOnly,
        };

        Ok(Self {
            id: wire.id,
            subject: wire.subject_term,
            object,
            citation: wire.citation,
            annotations: wire.annotations,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub resource_location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceValue {
    pub namespace: Namespace,
    pub value: String,
}

impl NamespaceValue {
    pub fn new(namespace: Namespace, value: impl Into<String>) -> Self {
        Self {
            namespace,
            value: value.into(),
        }
    }

    /// `PREFIX:value`, falling back to the resource location without a prefix.
    pub fn qualified(&self) -> String {
        match &self.namespace.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.value),
            None => format!("{}:{}", self.namespace.resource_location, self.value),
        }
    }
}

/// Restricts an edge search to a set of relationship types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipTypeFilterCriteria {
    pub is_include: bool,
    pub value_set: Vec<String>,
}

impl RelationshipTypeFilterCriteria {
    pub fn including<I, S>(relationships: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            is_include: true,
            value_set: relationships.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFilter {
    pub relationship_criteria: Vec<RelationshipTypeFilterCriteria>,
}

impl EdgeFilter {
    pub fn relationships<I, S>(relationships: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relationship_criteria: vec![RelationshipTypeFilterCriteria::including(relationships)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.relationship_criteria
            .iter()
            .all(|c| c.value_set.is_empty())
    }
}
