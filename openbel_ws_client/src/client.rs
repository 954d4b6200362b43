use crate::api::WebApi;
use crate::envelope;
use crate::error::{Result, WsError};
use crate::model::{
    BelDocument, BelStatement, BelTerm, Kam, KamEdge, KamHandle, KamNode, LoadKamResponse,
    Namespace, NamespaceValue,
};
use crate::requests::{
    FindEquivalencesRequest, FindKamEdgesRequest, FindKamNodesByNamespaceValuesRequest,
    FindKamNodesByPatternsRequest, FindNamespaceEquivalenceRequest, GetBelDocumentsRequest,
    GetCatalogRequest, GetNamespacesRequest, GetSupportingEvidenceRequest,
    GetSupportingTermsRequest, LoadKamRequest, ReleaseKamRequest, ResolveEdgesRequest,
    ResolveNodesRequest, SoapRequest,
};
use crate::xml::XmlElement;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

pub const DEFAULT_WSDL_URL: &str = "http://localhost:8080/openbel-ws/belframework.wsdl";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Where and how to reach the Web API. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub wsdl_url: Url,
    /// SOAP endpoint; discovered from the WSDL when unset.
    pub service_url: Option<Url>,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(wsdl_url: Url) -> Self {
        Self {
            wsdl_url,
            service_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_service_url(mut self, service_url: Url) -> Self {
        self.service_url = Some(service_url);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// SOAP-over-HTTP client for the OpenBEL Web API.
#[derive(Debug, Clone)]
pub struct SoapClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl SoapClient {
    /// Build a client, discovering the SOAP endpoint from the WSDL unless
    /// `service_url` is configured.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let endpoint = match &config.service_url {
            Some(url) => url.clone(),
            None => {
                debug!(wsdl = %config.wsdl_url, "Fetching WSDL");
                let res = http.get(config.wsdl_url.clone()).send().await?;
                let status = res.status();
                let body = res.text().await?;
                if !status.is_success() {
                    error!("WSDL fetch failed with status {}", status);
                    return Err(WsError::HttpStatus { status, body });
                }
                service_address(&body, &config.wsdl_url)?
            }
        };

        info!(endpoint = %endpoint, "Using Web API endpoint");
        Ok(Self { http, endpoint })
    }

    /// Build a client for a known SOAP endpoint without WSDL discovery.
    pub fn with_endpoint(endpoint: Url, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one request and return its decoded response payload.
    pub async fn call<R: SoapRequest + Sync>(&self, request: &R) -> Result<R::Response> {
        debug!(operation = R::ELEMENT, "Calling Web API");
        let body = envelope::encode(request)?;
        let res = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "\"\"")
            .body(body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        match envelope::decode::<R>(&text) {
            Err(fault @ WsError::Fault { .. }) => {
                error!(operation = R::ELEMENT, "{}", fault);
                Err(fault)
            }
            _ if !status.is_success() => {
                error!(operation = R::ELEMENT, "HTTP Error: {}", status);
                Err(WsError::HttpStatus { status, body: text })
            }
            decoded => decoded,
        }
    }
}

/// Find the SOAP endpoint declared by a WSDL document.
///
/// Uses the first `address/@location` in the document, resolved against the
/// WSDL URL. Without one, the WSDL URL minus its `.wsdl` suffix is used.
pub fn service_address(wsdl: &str, wsdl_url: &Url) -> Result<Url> {
    let root = XmlElement::parse(wsdl)?;
    if let Some(location) = find_address(&root) {
        return Ok(wsdl_url.join(location.trim())?);
    }

    let mut fallback = wsdl_url.clone();
    if let Some(stripped) = wsdl_url.path().strip_suffix(".wsdl") {
        fallback.set_path(stripped);
    }
    Ok(fallback)
}

fn find_address(element: &XmlElement) -> Option<&str> {
    if element.name == "address"
        && let Some(location) = element.attribute("location")
    {
        return Some(location);
    }
    element.children.iter().find_map(find_address)
}

#[async_trait]
impl WebApi for SoapClient {
    async fn get_catalog(&self) -> Result<Vec<Kam>> {
        Ok(self.call(&GetCatalogRequest).await?.kams)
    }

    async fn load_kam(&self, request: &LoadKamRequest) -> Result<LoadKamResponse> {
        self.call(request).await
    }

    async fn release_kam(&self, handle: &KamHandle) -> Result<()> {
        self.call(&ReleaseKamRequest {
            kam: handle.clone(),
        })
        .await?;
        Ok(())
    }

    async fn resolve_nodes(&self, request: &ResolveNodesRequest) -> Result<Vec<Option<KamNode>>> {
        Ok(self.call(request).await?.into_nodes())
    }

    async fn resolve_edges(&self, request: &ResolveEdgesRequest) -> Result<Vec<Option<KamEdge>>> {
        Ok(self.call(request).await?.into_edges())
    }

    async fn find_kam_edges(&self, request: &FindKamEdgesRequest) -> Result<Vec<KamEdge>> {
        Ok(self.call(request).await?.kam_edges)
    }

    async fn get_supporting_evidence(&self, edge: &KamEdge) -> Result<Vec<BelStatement>> {
        let request = GetSupportingEvidenceRequest {
            kam_edge: edge.clone(),
        };
        Ok(self.call(&request).await?.statements)
    }

    async fn get_supporting_terms(&self, node: &KamNode) -> Result<Vec<BelTerm>> {
        let request = GetSupportingTermsRequest {
            kam_node: node.clone(),
        };
        Ok(self.call(&request).await?.terms)
    }

    async fn get_bel_documents(&self, handle: &KamHandle) -> Result<Vec<BelDocument>> {
        let request = GetBelDocumentsRequest {
            handle: handle.clone(),
        };
        Ok(self.call(&request).await?.documents)
    }

    async fn get_namespaces(&self, handle: &KamHandle) -> Result<Vec<Namespace>> {
        let request = GetNamespacesRequest {
            handle: handle.clone(),
        };
        Ok(self.call(&request).await?.namespaces)
    }

    async fn find_kam_nodes_by_patterns(
        &self,
        request: &FindKamNodesByPatternsRequest,
    ) -> Result<Vec<KamNode>> {
        Ok(self.call(request).await?.kam_nodes)
    }

    async fn find_kam_nodes_by_namespace_values(
        &self,
        request: &FindKamNodesByNamespaceValuesRequest,
    ) -> Result<Vec<KamNode>> {
        Ok(self.call(request).await?.kam_nodes)
    }

    async fn find_namespace_equivalence(
        &self,
        request: &FindNamespaceEquivalenceRequest,
    ) -> Result<Option<NamespaceValue>> {
        Ok(self.call(request).await?.namespace_value)
    }

    async fn find_equivalences(
        &self,
        request: &FindEquivalencesRequest,
    ) -> Result<Vec<NamespaceValue>> {
        Ok(self.call(request).await?.namespace_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wsdl_url() -> Url {
        Url::parse("http://localhost:8080/openbel-ws/belframework.wsdl").unwrap()
    }

    #[test]
    fn service_address_reads_soap_location() {
        let wsdl = r#"<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/">
            <wsdl:service name="WebAPIService">
                <wsdl:port binding="tns:WebAPISoap11" name="WebAPISoap11">
                    <soap:address location="http://bel.example.org:8080/openbel-ws/belframework/"/>
                </wsdl:port>
            </wsdl:service>
        </wsdl:definitions>"#;
        assert_eq!(
            service_address(wsdl, &wsdl_url()).unwrap().as_str(),
            "http://bel.example.org:8080/openbel-ws/belframework/"
        );
    }

    #[test]
    fn service_address_resolves_relative_location() {
        let wsdl = r#"<definitions><service><port><address location="/openbel-ws/api"/></port></service></definitions>"#;
        assert_eq!(
            service_address(wsdl, &wsdl_url()).unwrap().as_str(),
            "http://localhost:8080/openbel-ws/api"
        );
    }

    #[test]
    fn service_address_falls_back_to_wsdl_url() {
        let wsdl = "<definitions><service/></definitions>";
        assert_eq!(
            service_address(wsdl, &wsdl_url()).unwrap().as_str(),
            "http://localhost:8080/openbel-ws/belframework"
        );
    }

    #[test]
    fn new_config_discovers_endpoint_by_default() {
        let config = ClientConfig::new(wsdl_url());
        assert_eq!(config.wsdl_url.as_str(), DEFAULT_WSDL_URL);
        assert_eq!(config.service_url, None);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }
}
