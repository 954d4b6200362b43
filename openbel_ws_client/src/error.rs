use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WsError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("SOAP fault ({code}): {message}")]
    Fault { code: String, message: String },
    #[error("XML parsing failed: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML encoding failed: {0}")]
    Serialize(#[from] quick_xml::SeError),
    #[error("Unexpected response content: {0}")]
    Deserialize(#[from] quick_xml::DeError),
    #[error("Malformed XML: {0}")]
    MalformedXml(String),
    #[error("Missing element '{element}' in '{parent}'")]
    MissingElement { parent: String, element: String },
    #[error("URL parsing failed: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Failed to load KAM '{kam}': {detail}")]
    LoadFailed { kam: String, detail: String },
    #[error("Timed out loading KAM '{kam}' after {attempts} attempts ({}ms)", .elapsed.as_millis())]
    LoadTimeout {
        kam: String,
        attempts: u32,
        elapsed: Duration,
    },
}

impl WsError {
    pub(crate) fn missing(parent: &str, element: &str) -> Self {
        WsError::MissingElement {
            parent: parent.to_string(),
            element: element.to_string(),
        }
    }

    /// Whether this error came from the transport or the remote service
    /// rather than from local validation or the load protocol.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            WsError::HttpRequest(_) | WsError::HttpStatus { .. } | WsError::Fault { .. }
        )
    }

    /// Whether the service ran the load and it ended without a KAM.
    pub fn is_load_outcome(&self) -> bool {
        matches!(self, WsError::LoadFailed { .. } | WsError::LoadTimeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
