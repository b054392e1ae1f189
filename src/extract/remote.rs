//! Extraction through the conversion service.
//!
//! The service accepts a multipart upload with one or more `files[]` parts
//! and answers with a JSON array of conversion results in submission order.
//! This adapter always uploads a single file and reads the first element.

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::detect::PDF_MEDIA_TYPE;
use crate::error::{Error, Result};
use crate::intake::PendingFile;
use crate::model::{ConversionResult, DocumentRecord};

use super::{BoxFuture, Extractor};

/// Form field name the service reads uploads from.
const UPLOAD_FIELD: &str = "files[]";

/// Uploads files to a conversion service.
#[derive(Debug, Clone)]
pub struct RemoteExtractor {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteExtractor {
    /// Create an extractor for `endpoint` with its own HTTP client.
    pub fn new(endpoint: impl Into<String>, user_agent: &str) -> Result<Self> {
        Ok(Self::with_client(http_client(user_agent)?, endpoint))
    }

    /// Create an extractor sharing an existing HTTP client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a `HEAD` request to the endpoint.
    ///
    /// Any HTTP response counts as reachable, whatever its status; only a
    /// transport failure yields [`Error::ProbeUnavailable`].
    pub async fn probe(&self) -> Result<()> {
        match self.client.head(&self.endpoint).send().await {
            Ok(resp) => {
                log::debug!("Probe {} answered {}", self.endpoint, resp.status());
                Ok(())
            }
            Err(e) => {
                log::debug!("Probe {} failed: {}", self.endpoint, e);
                Err(Error::ProbeUnavailable)
            }
        }
    }

    /// Upload one file and return the service's record for it.
    pub async fn upload(&self, file: &PendingFile) -> Result<DocumentRecord> {
        let part = Part::bytes(file.data().to_vec())
            .file_name(file.name().to_string())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Error::Remote(format!("HTTP {}", resp.status())));
        }

        let body = resp.text().await?;
        parse_conversion_response(&body)
    }
}

impl Extractor for RemoteExtractor {
    fn name(&self) -> &str {
        "remote"
    }

    fn is_available(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move { self.probe().await.is_ok() })
    }

    fn extract<'a>(&'a self, file: &'a PendingFile) -> BoxFuture<'a, Result<DocumentRecord>> {
        Box::pin(self.upload(file))
    }
}

/// Parse a conversion response body and take the first result.
pub fn parse_conversion_response(body: &str) -> Result<DocumentRecord> {
    let results: Vec<ConversionResult> = serde_json::from_str(body)
        .map_err(|e| Error::Remote(format!("malformed response: {}", e)))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| Error::Remote("response contained no results".into()))?;

    if let Some(error) = first.error() {
        return Err(Error::Remote(format!("{}: {}", first.filename(), error)));
    }
    first
        .into_data()
        .ok_or_else(|| Error::Remote("result has no data".into()))
}

/// Build the HTTP client used for service requests.
pub(crate) fn http_client(user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| Error::Remote(format!("cannot build HTTP client: {}", e)))
}
