//! Buffered response type

use super::request::RequestLine;
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Url, Version};
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// Response with its body read into memory
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// HTTP version
    pub version: Version,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL after redirects
    pub url: Url,
    /// Raw body bytes
    pub data: Vec<u8>,
    /// The request this response answers
    pub request: RequestLine,
}

impl HttpResponse {
    /// Read a `reqwest` response to completion
    pub(crate) async fn read(
        response: reqwest::Response,
        request: RequestLine,
    ) -> reqwest::Result<Self> {
        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let url = response.url().clone();
        let data = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            version,
            headers,
            url,
            data,
            request,
        })
    }

    /// Deserialize the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.data)
    }

    /// Body as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
