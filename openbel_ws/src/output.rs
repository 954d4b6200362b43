//! Text, CSV and JSON renderings of Web API results.

use anyhow::Result;
use chrono::NaiveDate;
use openbel_ws_client::model::{
    Annotation, BelStatement, Citation, Kam, KamEdge, KamHandle, StatementObject,
};
use serde::Serialize;
use std::io::Write;

/// Output format for commands that produce a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn loaded_line(kam_name: &str, handle: &KamHandle) -> String {
    format!("loaded kam '{kam_name}', handle '{handle}'")
}

/// One-line BEL rendering of a supporting statement.
pub fn statement_line(statement: &BelStatement) -> String {
    let subject = &statement.subject.label;
    match &statement.object {
        StatementObject::SubjectOnly => format!("statement: {subject}"),
        StatementObject::Term {
            relationship,
            object,
        } => format!("statement: {subject} {relationship} {}", object.label),
        StatementObject::Nested {
            relationship,
            statement: nested,
        } => format!(
            "statement: {subject} {relationship} ({} {} {})",
            nested.subject.label, nested.relationship, nested.object.label
        ),
    }
}

pub fn citation_line(citation: &Citation) -> String {
    format!(
        "citation - type: {}, id: {}, name: {}",
        citation.citation_type.as_deref().unwrap_or_default(),
        citation.id.as_deref().unwrap_or_default(),
        citation.name.as_deref().unwrap_or_default()
    )
}

pub fn annotation_line(annotation: &Annotation) -> String {
    format!(
        "annotation - name: {}, value: {}",
        annotation.annotation_type, annotation.value
    )
}

/// Write each statement followed by its citation and annotations.
pub fn write_evidence<W: Write>(out: &mut W, statements: &[BelStatement]) -> Result<()> {
    for statement in statements {
        writeln!(out, "{}", statement_line(statement))?;
        if let Some(citation) = &statement.citation {
            writeln!(out, "{}", citation_line(citation))?;
        }
        for annotation in &statement.annotations {
            writeln!(out, "{}", annotation_line(annotation))?;
        }
    }
    Ok(())
}

/// `source REL target`
pub fn edge_line(edge: &KamEdge) -> String {
    format!(
        "{} {} {}",
        edge.source.label, edge.relationship, edge.target.label
    )
}

/// CSV sink for mechanism edges with a `source,relationship,target` header.
pub struct EdgeCsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EdgeCsvWriter<W> {
    pub fn new(out: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(["source", "relationship", "target"])?;
        Ok(Self { writer })
    }

    pub fn write_edge(&mut self, edge: &KamEdge) -> Result<()> {
        self.writer.write_record([
            edge.source.label.as_str(),
            edge.relationship.as_str(),
            edge.target.label.as_str(),
        ])?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub last_compiled: Option<NaiveDate>,
    pub description: Option<String>,
}

impl From<&Kam> for CatalogEntry {
    fn from(kam: &Kam) -> Self {
        Self {
            name: kam.name.clone(),
            last_compiled: kam.last_compiled_date(),
            description: kam.description.clone(),
        }
    }
}

/// Size figures for one loaded KAM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KamSummary {
    pub name: String,
    pub description: Option<String>,
    pub last_compiled: Option<NaiveDate>,
    pub namespaces: usize,
    pub documents: usize,
    pub nodes: usize,
    pub protein_nodes: usize,
    pub rna_nodes: usize,
}

/// Everything `summarize` reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<CatalogEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<KamSummary>,
    /// Requested KAM that the catalog does not contain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_kam: Option<String>,
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn print_text_summary<W: Write>(out: &mut W, report: &SummaryReport) -> Result<()> {
    if let Some(catalog) = &report.catalog {
        writeln!(out, "Available KAMS:")?;
        writeln!(out, "\tName\tLast Compiled\tDescription")?;
        writeln!(out, "\t------\t-------------\t-----------")?;
        for entry in catalog {
            writeln!(
                out,
                "\t{}\t{}\t{}",
                entry.name,
                date_text(entry.last_compiled),
                entry.description.as_deref().unwrap_or_default()
            )?;
        }
        writeln!(out)?;
    }

    if let Some(summary) = &report.summary {
        writeln!(out, "Summarizing KAM: {}", summary.name)?;
        writeln!(
            out,
            "\tDescription: {}",
            summary.description.as_deref().unwrap_or_default()
        )?;
        writeln!(out, "\tLast compiled: {}", date_text(summary.last_compiled))?;
        writeln!(out)?;
        writeln!(out, "\tNumber of namespaces: {}", summary.namespaces)?;
        writeln!(out, "\tNumber of documents: {}", summary.documents)?;
        writeln!(out, "\tTotal number of nodes: {}", summary.nodes)?;
        writeln!(out, "\tNumber of protein nodes: {}", summary.protein_nodes)?;
        writeln!(out, "\tNumber of RNA nodes: {}", summary.rna_nodes)?;
        writeln!(out)?;
        writeln!(out, "KAM is released from server's memory successfully.")?;
    }

    if let Some(name) = &report.missing_kam {
        writeln!(out, "Unable to find specified KAM: {name}")?;
    }
    Ok(())
}

pub fn print_json_summary<W: Write>(out: &mut W, report: &SummaryReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use openbel_ws_client::model::BelTerm;

    #[test]
    fn missing_citation_fields_render_empty() {
        let citation = Citation {
            citation_type: Some("PUBMED".to_string()),
            id: None,
            name: None,
        };
        assert_eq!(
            citation_line(&citation),
            "citation - type: PUBMED, id: , name: "
        );
    }

    #[test]
    fn term_statement_line() {
        let statement = BelStatement {
            object: StatementObject::Term {
                relationship: "increases".to_string(),
                object: BelTerm::new("r(HGNC:B)"),
            },
            ..BelStatement::subject_only(BelTerm::new("p(HGNC:A)"))
        };
        assert_eq!(
            statement_line(&statement),
            "statement: p(HGNC:A) increases r(HGNC:B)"
        );
    }
}
