//! Concrete report sources.

use crate::error::{DashError, Result};
use crate::report::ReportCollection;
use async_compression::tokio::bufread::GzipDecoder;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use url::Url;

/// Gzip member header (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Core trait for retrieving the report document.
///
/// Implementations perform one attempt per call; retry policy, if any, belongs to the caller.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch and decode the whole document.
    async fn fetch(&self) -> Result<ReportCollection>;

    /// Human-readable location for logs and the status line.
    fn describe(&self) -> String;
}

/// Decode raw document bytes, transparently gunzipping when the gzip magic is present.
pub async fn decode_document(bytes: &[u8]) -> Result<ReportCollection> {
    if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoder = GzipDecoder::new(bytes);
        let mut plain = Vec::with_capacity(bytes.len() * 4);
        decoder.read_to_end(&mut plain).await.map_err(|e| {
            DashError::file_error("Failed to decompress gzip report document", e)
        })?;
        return Ok(serde_json::from_slice(&plain)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Report document on the local file system.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSource for FileSource {
    async fn fetch(&self) -> Result<ReportCollection> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DashError::FileNotFound {
                    path: self.path.clone(),
                });
            }
            Err(err) => {
                return Err(DashError::file_error(
                    format!("Failed to read {}", self.path.display()),
                    err,
                ));
            }
        };
        decode_document(&bytes).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Report document served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    url: Url,
}

impl HttpSource {
    /// No request timeout is configured: a hung server leaves the dashboard in its loading state.
    pub fn new(url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("cbsboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl ReportSource for HttpSource {
    async fn fetch(&self) -> Result<ReportCollection> {
        let response = self.http.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashError::HttpStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }
        let body = response.bytes().await?;
        decode_document(&body).await
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{"lastUpdated":"2024-03-02T08:30:00Z","stocks":[{"symbol":"TW01","name":"Foo","cbsScore":85,"date":"2024-03-01"}]}"#;

    #[tokio::test]
    async fn test_decode_plain_json() {
        let collection = decode_document(DOC.as_bytes()).await.unwrap();
        assert_eq!(collection.stocks[0].symbol, "TW01");
        assert_eq!(collection.stocks[0].cbs_score, 85.0);
    }

    #[tokio::test]
    async fn test_decode_gzip_json() {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(DOC.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();

        let collection = decode_document(&compressed).await.unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn test_decode_garbage_is_parse_error() {
        let err = decode_document(b"<html>oops</html>").await.unwrap_err();
        assert!(matches!(err, DashError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("data.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, DashError::FileNotFound { .. }));
        assert!(err.is_load_failure());
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let source = FileSource::new(file.path());
        let collection = source.fetch().await.unwrap();
        assert_eq!(collection.last_updated, "2024-03-02T08:30:00Z");
        assert_eq!(source.describe(), file.path().display().to_string());
    }
}
