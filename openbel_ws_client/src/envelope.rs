use crate::error::{Result, WsError};
use crate::requests::SoapRequest;
use crate::xml::XmlElement;
use serde::Deserialize;

pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SCHEMA_NS: &str = "http://belframework.org/ws/schemas";

/// Wrap a request payload in a SOAP 1.1 envelope.
///
/// The payload is unprefixed and picks up the schema namespace as the
/// envelope's default namespace.
pub fn encode<R: SoapRequest>(request: &R) -> Result<String> {
    let payload = quick_xml::se::to_string_with_root(R::ELEMENT, request)?;
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <soapenv:Envelope xmlns:soapenv=\"{SOAP_ENV_NS}\" xmlns=\"{SCHEMA_NS}\">\
         <soapenv:Header/><soapenv:Body>{payload}</soapenv:Body></soapenv:Envelope>"
    ))
}

#[derive(Deserialize)]
struct ResponseEnvelope<T> {
    #[serde(rename = "Body")]
    body: ResponseBody<T>,
}

#[derive(Deserialize)]
struct ResponseBody<T> {
    #[serde(rename = "$value")]
    payload: T,
}

/// Decode the response payload of `R` from a response envelope.
///
/// A `Fault` payload is returned as [`WsError::Fault`]; a payload with an
/// unexpected name is malformed.
pub fn decode<R: SoapRequest>(document: &str) -> Result<R::Response> {
    check_payload(document, R::RESPONSE)?;
    let envelope: ResponseEnvelope<R::Response> = quick_xml::de::from_str(document)?;
    Ok(envelope.body.payload)
}

fn check_payload(document: &str, expected: &str) -> Result<()> {
    let root = XmlElement::parse(document)?;
    if root.name != "Envelope" {
        return Err(WsError::MalformedXml(format!(
            "expected SOAP Envelope, found '{}'",
            root.name
        )));
    }
    let body = root
        .child("Body")
        .ok_or_else(|| WsError::missing("Envelope", "Body"))?;
    let payload = body
        .children
        .first()
        .ok_or_else(|| WsError::missing("Body", expected))?;

    if payload.name == "Fault" {
        return Err(fault_from(payload));
    }
    if payload.name != expected {
        return Err(WsError::MalformedXml(format!(
            "expected '{}', found '{}'",
            expected, payload.name
        )));
    }
    Ok(())
}

// SOAP 1.1 carries faultcode/faultstring; 1.2 nests Code/Value and Reason/Text.
fn fault_from(fault: &XmlElement) -> WsError {
    let code = fault
        .child_text("faultcode")
        .or_else(|| fault.child("Code").and_then(|c| c.child_text("Value")))
        .unwrap_or_else(|| "unknown".to_string());
    let message = fault
        .child_text("faultstring")
        .or_else(|| fault.child("Reason").and_then(|r| r.child_text("Text")))
        .unwrap_or_default();
    WsError::Fault { code, message }
}
