//! Archive building through the conversion service.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::DocumentRecord;

const DOWNLOAD_ALL: &str = "download_all";

#[derive(Serialize)]
struct ArchiveRequest<'a> {
    action: &'static str,
    json_data: Vec<ArchiveItem<'a>>,
}

#[derive(Serialize)]
struct ArchiveItem<'a> {
    filename: &'a str,
    data: &'a DocumentRecord,
}

#[derive(Deserialize)]
struct ArchiveResponse {
    success: bool,
    #[serde(default)]
    zip_base64: Option<String>,
}

/// Ask the service to build the archive and return its bytes.
pub async fn request_archive(
    client: &reqwest::Client,
    endpoint: &str,
    documents: &[(&str, &DocumentRecord)],
) -> Result<Vec<u8>> {
    let request = ArchiveRequest {
        action: DOWNLOAD_ALL,
        json_data: documents
            .iter()
            .map(|&(filename, data)| ArchiveItem { filename, data })
            .collect(),
    };

    let resp = client.post(endpoint).json(&request).send().await?;
    if !resp.status().is_success() {
        return Err(Error::Remote(format!("HTTP {}", resp.status())));
    }

    let body = resp.text().await?;
    parse_archive_response(&body)
}

/// Decode an archive response body.
pub fn parse_archive_response(body: &str) -> Result<Vec<u8>> {
    let response: ArchiveResponse = serde_json::from_str(body)
        .map_err(|e| Error::Remote(format!("malformed response: {}", e)))?;

    if !response.success {
        return Err(Error::Remote("service reported failure".into()));
    }

    let encoded = response
        .zip_base64
        .ok_or_else(|| Error::Remote("response has no archive".into()))?;
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| Error::Remote(format!("archive is not valid base64: {}", e)))?;

    if !bytes.starts_with(b"PK") {
        return Err(Error::Remote("archive is not a ZIP file".into()));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let mut doc = DocumentRecord::new("a.pdf");
        doc.push_page("x");
        let request = ArchiveRequest {
            action: DOWNLOAD_ALL,
            json_data: vec![ArchiveItem {
                filename: "a.pdf",
                data: &doc,
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "download_all");
        assert_eq!(value["json_data"][0]["filename"], "a.pdf");
        assert_eq!(value["json_data"][0]["data"]["total_pages"], 1);
    }

    #[test]
    fn test_parse_archive_response() {
        let encoded = BASE64.encode(b"PK\x05\x06rest");
        let body = format!(r#"{{"success":true,"zip_base64":"{}"}}"#, encoded);
        assert_eq!(parse_archive_response(&body).unwrap(), b"PK\x05\x06rest");
    }

    #[test]
    fn test_parse_archive_response_failures() {
        let not_zip = format!(r#"{{"success":true,"zip_base64":"{}"}}"#, BASE64.encode(b"nope"));
        for body in [
            r#"{"success":false}"#,
            r#"{"success":true}"#,
            r#"{"success":true,"zip_base64":"***"}"#,
            "not json",
            not_zip.as_str(),
        ] {
            assert!(matches!(parse_archive_response(body), Err(Error::Remote(_))), "{body}");
        }
    }
}
