//! Integration tests for SoapClient covering WSDL discovery, envelope
//! exchange, SOAP faults and bounded KAM loading using wiremock.

use openbel_ws_client::WsError;
use openbel_ws_client::api::{WebApi, resolve_edge, resolve_node};
use openbel_ws_client::client::{ClientConfig, SoapClient};
use openbel_ws_client::loader::{KamLoader, LoadPolicy};
use openbel_ws_client::model::{
    KamHandle, Namespace, NamespaceValue, StatementObject, relationship,
};
use openbel_ws_client::requests::{
    FindEquivalencesRequest, FindKamEdgesRequest, FindNamespaceEquivalenceRequest,
};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENVELOPE_START: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<SOAP-ENV:Header/><SOAP-ENV:Body>"#;
const ENVELOPE_END: &str = "</SOAP-ENV:Body></SOAP-ENV:Envelope>";

fn soap(payload: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "text/xml; charset=utf-8")
        .set_body_string(format!("{ENVELOPE_START}{payload}{ENVELOPE_END}"))
}

fn load_response(status: &str, handle: Option<&str>) -> ResponseTemplate {
    let handle = handle
        .map(|h| format!("<ns2:handle><ns2:handle>{h}</ns2:handle></ns2:handle>"))
        .unwrap_or_default();
    soap(&format!(
        r#"<ns2:LoadKamResponse xmlns:ns2="http://belframework.org/ws/schemas">
            <ns2:loadStatus>{status}</ns2:loadStatus>{handle}
        </ns2:LoadKamResponse>"#
    ))
}

async fn client_for(server: &MockServer) -> SoapClient {
    let endpoint = Url::parse(&format!("{}/openbel-ws/belframework", server.uri())).unwrap();
    SoapClient::with_endpoint(endpoint, Duration::from_secs(5)).unwrap()
}

mod discovery {
    use super::*;

    /// Test: connect reads the endpoint from soap:address
    #[tokio::test]
    async fn connect_uses_wsdl_address() {
        let server = MockServer::start().await;
        let wsdl = format!(
            r#"<?xml version="1.0"?>
            <wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/">
              <wsdl:service name="WebAPIService">
                <wsdl:port name="WebAPISoap11" binding="tns:WebAPISoap11">
                  <soap:address location="{}/openbel-ws/belframework/"/>
                </wsdl:port>
              </wsdl:service>
            </wsdl:definitions>"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/openbel-ws/belframework.wsdl"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wsdl))
            .expect(1)
            .mount(&server)
            .await;

        let wsdl_url =
            Url::parse(&format!("{}/openbel-ws/belframework.wsdl", server.uri())).unwrap();
        let client = SoapClient::connect(&ClientConfig::new(wsdl_url)).await.unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            format!("{}/openbel-ws/belframework/", server.uri())
        );
    }

    /// Test: a configured service URL skips the WSDL fetch
    #[tokio::test]
    async fn service_url_skips_wsdl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let wsdl_url = Url::parse(&format!("{}/missing.wsdl", server.uri())).unwrap();
        let service_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
        let config = ClientConfig::new(wsdl_url).with_service_url(service_url.clone());

        let client = SoapClient::connect(&config).await.unwrap();
        assert_eq!(client.endpoint(), &service_url);
    }

    /// Test: an unreachable WSDL is a transport error
    #[tokio::test]
    async fn wsdl_http_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let wsdl_url = Url::parse(&format!("{}/belframework.wsdl", server.uri())).unwrap();
        let err = SoapClient::connect(&ClientConfig::new(wsdl_url))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        match err {
            WsError::HttpStatus { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "not here");
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }
}

mod operations {
    use super::*;

    /// Test: requests are SOAP 1.1 POSTs and the catalog decodes every KAM
    #[tokio::test]
    async fn get_catalog_sends_soap_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("SOAPAction", "\"\""))
            .and(header("Content-Type", "text/xml; charset=utf-8"))
            .and(body_string_contains("<GetCatalogRequest"))
            .respond_with(soap(
                r#"<ns2:GetCatalogResponse xmlns:ns2="http://belframework.org/ws/schemas">
                    <ns2:kams><ns2:id>1</ns2:id><ns2:name>small</ns2:name>
                        <ns2:description>Small corpus</ns2:description>
                        <ns2:lastCompiled>2012-03-14T10:00:00.000-04:00</ns2:lastCompiled></ns2:kams>
                    <ns2:kams><ns2:id>2</ns2:id><ns2:name>large</ns2:name></ns2:kams>
                </ns2:GetCatalogResponse>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let kams = client_for(&server).await.get_catalog().await.unwrap();

        assert_eq!(kams.len(), 2);
        assert_eq!(kams[0].name, "small");
        assert_eq!(kams[0].description.as_deref(), Some("Small corpus"));
        assert_eq!(
            kams[0].last_compiled_date().map(|d| d.to_string()),
            Some("2012-03-14".to_string())
        );
        assert_eq!(kams[1].description, None);
    }

    /// Test: a SOAP fault inside an HTTP 500 surfaces as WsError::Fault
    #[tokio::test]
    async fn fault_is_reported_over_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string(format!(
                    "{ENVELOPE_START}<SOAP-ENV:Fault><faultcode>SOAP-ENV:Server</faultcode>\
                     <faultstring>KAM store unavailable</faultstring></SOAP-ENV:Fault>{ENVELOPE_END}"
                )),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_catalog().await.unwrap_err();

        match err {
            WsError::Fault { code, message } => {
                assert_eq!(code, "SOAP-ENV:Server");
                assert_eq!(message, "KAM store unavailable");
            }
            other => panic!("expected Fault, got {other:?}"),
        }
    }

    /// Test: a non-SOAP error page is an HTTP status error
    #[tokio::test]
    async fn plain_http_error_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.get_catalog().await.unwrap_err();
        assert!(matches!(err, WsError::HttpStatus { .. }), "got {err:?}");
    }

    /// Test: nil resolve results map to not-found
    #[tokio::test]
    async fn resolve_node_nil_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<ResolveNodesRequest"))
            .and(body_string_contains("<label>p(HGNC:NOPE)</label>"))
            .respond_with(soap(
                r#"<ns2:ResolveNodesResponse xmlns:ns2="http://belframework.org/ws/schemas">
                    <ns2:kamNodes xsi:nil="true"/>
                </ns2:ResolveNodesResponse>"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let found = resolve_node(&client, &KamHandle::new("h1"), "p(HGNC:NOPE)")
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    /// Test: a resolved edge carries its endpoints and evidence decodes nested statements
    #[tokio::test]
    async fn resolve_edge_and_evidence() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<ResolveEdgesRequest"))
            .respond_with(soap(
                r#"<ns2:ResolveEdgesResponse xmlns:ns2="http://belframework.org/ws/schemas">
                  <ns2:kamEdges>
                    <ns2:id>42</ns2:id>
                    <ns2:source><ns2:id>1</ns2:id><ns2:function>PROTEIN_ABUNDANCE</ns2:function><ns2:label>p(HGNC:A)</ns2:label></ns2:source>
                    <ns2:target><ns2:id>2</ns2:id><ns2:function>RNA_ABUNDANCE</ns2:function><ns2:label>r(HGNC:B)</ns2:label></ns2:target>
                    <ns2:relationship>INCREASES</ns2:relationship>
                  </ns2:kamEdges>
                </ns2:ResolveEdgesResponse>"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("<GetSupportingEvidenceRequest"))
            .and(body_string_contains("<id>42</id>"))
            .respond_with(soap(
                r#"<ns2:GetSupportingEvidenceResponse xmlns:ns2="http://belframework.org/ws/schemas">
                  <ns2:statements>
                    <ns2:subjectTerm><ns2:label>p(HGNC:A)</ns2:label></ns2:subjectTerm>
                    <ns2:relationship>INCREASES</ns2:relationship>
                    <ns2:objectStatement>
                      <ns2:subjectTerm><ns2:label>p(HGNC:C)</ns2:label></ns2:subjectTerm>
                      <ns2:relationship>DECREASES</ns2:relationship>
                      <ns2:objectTerm><ns2:label>r(HGNC:B)</ns2:label></ns2:objectTerm>
                    </ns2:objectStatement>
                    <ns2:citation><ns2:citationType>PUBMED</ns2:citationType><ns2:id>123</ns2:id><ns2:name>Paper</ns2:name></ns2:citation>
                    <ns2:annotations><ns2:annotationType><ns2:name>Species</ns2:name></ns2:annotationType><ns2:value>9606</ns2:value></ns2:annotations>
                  </ns2:statements>
                </ns2:GetSupportingEvidenceResponse>"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let edge = resolve_edge(
            &client,
            &KamHandle::new("h1"),
            "p(HGNC:A)",
            relationship::INCREASES,
            "r(HGNC:B)",
        )
        .await
        .unwrap()
        .expect("edge should resolve");
        assert_eq!(edge.id, "42");
        assert_eq!(edge.target.function, "RNA_ABUNDANCE");

        let statements = client.get_supporting_evidence(&edge).await.unwrap();
        assert_eq!(statements.len(), 1);
        let statement = &statements[0];
        match &statement.object {
            StatementObject::Nested {
                relationship,
                statement: nested,
            } => {
                assert_eq!(relationship, "INCREASES");
                assert_eq!(nested.subject.label, "p(HGNC:C)");
                assert_eq!(nested.object.label, "r(HGNC:B)");
            }
            other => panic!("expected nested statement, got {other:?}"),
        }
        let citation = statement.citation.as_ref().unwrap();
        assert_eq!(citation.citation_type.as_deref(), Some("PUBMED"));
        assert_eq!(statement.annotations[0].annotation_type, "Species");
        assert_eq!(statement.annotations[0].value, "9606");
    }

    /// Test: edge search sends the relationship filter
    #[tokio::test]
    async fn find_kam_edges_sends_filter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<FindKamEdgesRequest"))
            .and(body_string_contains("<valueSet>DIRECTLY_INCREASES</valueSet>"))
            .respond_with(soap(
                r#"<ns2:FindKamEdgesResponse xmlns:ns2="http://belframework.org/ws/schemas"/>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let request = FindKamEdgesRequest::builder()
            .handle(&KamHandle::new("h1"))
            .relationships(relationship::MECHANISM.iter().copied())
            .build()
            .unwrap();
        let edges = client_for(&server).await.find_kam_edges(&request).await.unwrap();
        assert!(edges.is_empty());
    }
}

mod equivalence {
    use super::*;

    const HGNC: &str = "http://resource.belframework.org/belframework/1.0/namespace/hgnc-approved-symbols.belns";
    const EG: &str = "http://resource.belframework.org/belframework/1.0/namespace/entrez-gene-ids-hmr.belns";

    fn namespace(prefix: &str, location: &str) -> Namespace {
        Namespace {
            id: None,
            prefix: Some(prefix.to_string()),
            resource_location: location.to_string(),
        }
    }

    /// Test: the target namespace is sent and the equivalent value decodes
    #[tokio::test]
    async fn namespace_equivalence_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<FindNamespaceEquivalenceRequest"))
            .and(body_string_contains("<value>AKT1</value>"))
            .and(body_string_contains(&format!(
                "<targetNamespace><prefix>EG</prefix><resourceLocation>{EG}</resourceLocation>"
            )))
            .respond_with(soap(&format!(
                r#"<ns2:FindNamespaceEquivalenceResponse xmlns:ns2="http://belframework.org/ws/schemas">
                  <ns2:namespaceValue>
                    <ns2:namespace><ns2:prefix>EG</ns2:prefix><ns2:resourceLocation>{EG}</ns2:resourceLocation></ns2:namespace>
                    <ns2:value>207</ns2:value>
                  </ns2:namespaceValue>
                </ns2:FindNamespaceEquivalenceResponse>"#
            )))
            .expect(1)
            .mount(&server)
            .await;

        let request = FindNamespaceEquivalenceRequest::builder()
            .namespace_value(NamespaceValue::new(namespace("HGNC", HGNC), "AKT1"))
            .target_namespace(namespace("EG", EG))
            .build()
            .unwrap();
        let found = client_for(&server)
            .await
            .find_namespace_equivalence(&request)
            .await
            .unwrap()
            .expect("equivalent should decode");
        assert_eq!(found.qualified(), "EG:207");
    }

    /// Test: a nil equivalence is not found
    #[tokio::test]
    async fn nil_namespace_equivalence_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(soap(
                r#"<ns2:FindNamespaceEquivalenceResponse xmlns:ns2="http://belframework.org/ws/schemas">
                    <ns2:namespaceValue xsi:nil="true"/>
                </ns2:FindNamespaceEquivalenceResponse>"#,
            ))
            .mount(&server)
            .await;

        let request = FindNamespaceEquivalenceRequest::builder()
            .namespace_value(NamespaceValue::new(namespace("HGNC", HGNC), "NOPE"))
            .target_namespace(namespace("EG", EG))
            .build()
            .unwrap();
        let found = client_for(&server)
            .await
            .find_namespace_equivalence(&request)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    /// Test: every equivalent is returned
    #[tokio::test]
    async fn find_equivalences_lists_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<FindEquivalencesRequest><namespaceValue>"))
            .respond_with(soap(&format!(
                r#"<ns2:FindEquivalencesResponse xmlns:ns2="http://belframework.org/ws/schemas">
                  <ns2:namespaceValues><ns2:namespace><ns2:prefix>EG</ns2:prefix><ns2:resourceLocation>{EG}</ns2:resourceLocation></ns2:namespace><ns2:value>3718</ns2:value></ns2:namespaceValues>
                  <ns2:namespaceValues><ns2:namespace><ns2:resourceLocation>http://example.org/sp.belns</ns2:resourceLocation></ns2:namespace><ns2:value>JAK3_HUMAN</ns2:value></ns2:namespaceValues>
                </ns2:FindEquivalencesResponse>"#
            )))
            .expect(1)
            .mount(&server)
            .await;

        let request =
            FindEquivalencesRequest::new(NamespaceValue::new(namespace("HGNC", HGNC), "JAK3"))
                .unwrap();
        let values = client_for(&server)
            .await
            .find_equivalences(&request)
            .await
            .unwrap();
        let values: Vec<&str> = values.iter().map(|nv| nv.value.as_str()).collect();
        assert_eq!(values, ["3718", "JAK3_HUMAN"]);
    }
}

mod loading {
    use super::*;

    /// Test: the loader keeps polling IN_PROCESS until COMPLETE
    #[tokio::test]
    async fn polls_until_complete() {
        let server = MockServer::start().await;
        // Mounted first, so it answers until exhausted.
        Mock::given(method("POST"))
            .and(body_string_contains("<LoadKamRequest"))
            .respond_with(load_response("IN_PROCESS", Some("early")))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_string_contains("<LoadKamRequest"))
            .respond_with(load_response("COMPLETE", Some("handle-1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let policy = LoadPolicy::default().with_interval(Duration::from_millis(1));
        let handle = KamLoader::new(policy).load(&client, "small").await.unwrap();

        assert_eq!(handle, KamHandle::new("handle-1"));
    }

    /// Test: FAILED from the wire ends loading with LoadFailed
    #[tokio::test]
    async fn failed_status_from_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(load_response("FAILED", None))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = KamLoader::default().load(&client, "small").await.unwrap_err();
        assert!(matches!(err, WsError::LoadFailed { .. }), "got {err:?}");
    }

    /// Test: release sends the handle back to the service
    #[tokio::test]
    async fn release_sends_handle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("<ReleaseKamRequest"))
            .and(body_string_contains("<handle>handle-1</handle>"))
            .respond_with(soap(
                r#"<ns2:ReleaseKamResponse xmlns:ns2="http://belframework.org/ws/schemas"/>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .await
            .release_kam(&KamHandle::new("handle-1"))
            .await
            .unwrap();
    }
}
