//! Request and response envelopes exchanged with the transport.

use std::collections::{BTreeMap, HashMap};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::export::InvoiceArchive;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_ZIP: &str = "application/zip";

/// An HTTP-style request event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEvent {
    /// Request method, when the transport provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    /// Request headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Raw request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Whether `body` is itself base64-encoded by the transport.
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl RequestEvent {
    /// Build a JSON `POST` event.
    pub fn json(body: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        Self {
            http_method: Some("POST".to_string()),
            headers,
            body: Some(body.into()),
            is_base64_encoded: false,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the request is tagged as JSON content.
    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .map(|ct| ct.to_ascii_lowercase().contains(CONTENT_TYPE_JSON))
            .unwrap_or(false)
    }
}

/// The decoded JSON request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Original document name, informational only.
    #[serde(default)]
    pub filename: Option<String>,

    /// Declared document MIME type, informational only.
    #[serde(default)]
    pub mime_type: Option<String>,

    /// Base64-encoded PDF bytes.
    #[serde(default)]
    pub base64: Option<String>,
}

/// An HTTP-style response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    /// `body` carries base64-encoded binary data.
    pub is_base64_encoded: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ResponseEnvelope {
    /// Binary ZIP download.
    pub fn zip(archive: &InvoiceArchive) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_ZIP.to_string());
        headers.insert(
            "Content-Disposition".to_string(),
            format!("attachment; filename=\"{}\"", archive.filename),
        );
        Self {
            status_code: 200,
            headers,
            body: STANDARD.encode(&archive.bytes),
            is_base64_encoded: true,
        }
    }

    /// JSON `{"error": message}` payload.
    pub fn error(status_code: u16, message: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        let body = serde_json::to_string(&ErrorBody { error: message })
            .unwrap_or_else(|_| String::from(r#"{"error":"internal error"}"#));
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Decode the body back to bytes.
    pub fn body_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        if self.is_base64_encoded {
            STANDARD.decode(&self.body)
        } else {
            Ok(self.body.clone().into_bytes())
        }
    }
}
