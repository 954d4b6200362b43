//! Tests for output.rs - statement, citation, annotation and CSV renderings.

use openbel_ws::output::{
    CatalogEntry, EdgeCsvWriter, KamSummary, SummaryReport, annotation_line, edge_line,
    print_json_summary, print_text_summary, statement_line, write_evidence,
};
use openbel_ws_client::model::{
    Annotation, BelStatement, BelTerm, Citation, Kam, NestedStatement, StatementObject,
};
use openbel_ws_client::test_utils::{kam_edge, kam_node};

fn nested_statement() -> BelStatement {
    BelStatement {
        object: StatementObject::Nested {
            relationship: "increases".to_string(),
            statement: Box::new(NestedStatement {
                subject: BelTerm::new("p(HGNC:B)"),
                relationship: "decreases".to_string(),
                object: BelTerm::new("r(HGNC:C)"),
            }),
        },
        ..BelStatement::subject_only(BelTerm::new("p(HGNC:A)"))
    }
}

// ============= Statement Lines =============

/// Test: subject-only statements print just the subject
#[test]
fn subject_only_statement_prints_subject() {
    let statement = BelStatement::subject_only(BelTerm::new("p(HGNC:AKT1)"));
    assert_eq!(statement_line(&statement), "statement: p(HGNC:AKT1)");
}

/// Test: nested statements are parenthesised
#[test]
fn nested_statement_is_parenthesised() {
    assert_eq!(
        statement_line(&nested_statement()),
        "statement: p(HGNC:A) increases (p(HGNC:B) decreases r(HGNC:C))"
    );
}

#[test]
fn annotation_line_names_type_and_value() {
    let annotation = Annotation {
        annotation_type: "Species".to_string(),
        value: "9606".to_string(),
    };
    assert_eq!(
        annotation_line(&annotation),
        "annotation - name: Species, value: 9606"
    );
}

/// Test: evidence lists each statement, then its citation and annotations
#[test]
fn evidence_block_order() {
    let mut statement = nested_statement();
    statement.citation = Some(Citation {
        citation_type: Some("PUBMED".to_string()),
        id: Some("10229200".to_string()),
        name: Some("Science".to_string()),
    });
    statement.annotations = vec![
        Annotation {
            annotation_type: "Species".to_string(),
            value: "9606".to_string(),
        },
        Annotation {
            annotation_type: "Tissue".to_string(),
            value: "liver".to_string(),
        },
    ];
    let plain = BelStatement::subject_only(BelTerm::new("p(HGNC:X)"));

    let mut out = Vec::new();
    write_evidence(&mut out, &[statement, plain]).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "statement: p(HGNC:A) increases (p(HGNC:B) decreases r(HGNC:C))\n\
         citation - type: PUBMED, id: 10229200, name: Science\n\
         annotation - name: Species, value: 9606\n\
         annotation - name: Tissue, value: liver\n\
         statement: p(HGNC:X)\n"
    );
}

// ============= Edges =============

#[test]
fn edge_line_is_space_separated() {
    let edge = kam_edge(
        "1",
        kam_node("10", "PROTEIN_ABUNDANCE", "p(HGNC:A)"),
        "INCREASES",
        kam_node("11", "RNA_ABUNDANCE", "r(HGNC:B)"),
    );
    assert_eq!(edge_line(&edge), "p(HGNC:A) INCREASES r(HGNC:B)");
}

/// Test: CSV output quotes labels that contain commas
#[test]
fn csv_writer_emits_header_and_quotes() {
    let edge = kam_edge(
        "1",
        kam_node("10", "COMPLEX_ABUNDANCE", "complex(p(HGNC:A),p(HGNC:B))"),
        "DIRECTLY_INCREASES",
        kam_node("11", "RNA_ABUNDANCE", "r(HGNC:C)"),
    );

    let mut out = Vec::new();
    let mut csv = EdgeCsvWriter::new(&mut out).unwrap();
    csv.write_edge(&edge).unwrap();
    csv.finish().unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "source,relationship,target\n\
         \"complex(p(HGNC:A),p(HGNC:B))\",DIRECTLY_INCREASES,r(HGNC:C)\n"
    );
}

// ============= Summary Reports =============

fn sample_report() -> SummaryReport {
    let kam = Kam {
        id: Some("1".to_string()),
        name: "small".to_string(),
        description: Some("Small corpus".to_string()),
        last_compiled: Some("2012-03-14T10:00:00.000-04:00".to_string()),
    };
    SummaryReport {
        catalog: Some(vec![CatalogEntry::from(&kam)]),
        summary: Some(KamSummary {
            name: "small".to_string(),
            description: Some("Small corpus".to_string()),
            last_compiled: kam.last_compiled_date(),
            namespaces: 3,
            documents: 2,
            nodes: 10,
            protein_nodes: 6,
            rna_nodes: 4,
        }),
        missing_kam: None,
    }
}

#[test]
fn text_summary_lists_catalog_and_counts() {
    let mut out = Vec::new();
    print_text_summary(&mut out, &sample_report()).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("\tsmall\t2012-03-14\tSmall corpus\n"), "{text}");
    assert!(text.contains("Summarizing KAM: small\n"));
    assert!(text.contains("\tNumber of namespaces: 3\n"));
    assert!(text.contains("\tTotal number of nodes: 10\n"));
    assert!(text.contains("\tNumber of RNA nodes: 4\n"));
    assert!(text.contains("KAM is released from server's memory successfully."));
}

#[test]
fn json_summary_serializes_dates_as_iso() {
    let mut out = Vec::new();
    print_json_summary(&mut out, &sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(value["summary"]["protein_nodes"], 6);
    assert_eq!(value["catalog"][0]["last_compiled"], "2012-03-14");
    assert!(value.get("missing_kam").is_none());
}
