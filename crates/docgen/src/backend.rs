use crate::config::ClientConfig;
use crate::prelude::*;
use docgen_core::api::{
    parse_envelope, AnalyzeGithubRequest, GenerateDocsPayload, GenerateDocsRequest, GithubData,
    ProjectData, ANALYZE_GITHUB_PATH, GENERATE_DOCS_PATH, PROCESS_ZIP_PATH,
};
use docgen_core::error::RemoteError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Used when a rejected reply carries no `error` string.
const UNKNOWN_ERROR: &str = "Unknown error";
const GENERATE_FAILED: &str = "Failed to generate documentation";

/// The documentation backend, as seen by the controller.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `POST /process-zip` with the archive as multipart field `file`.
    async fn process_zip(&self, archive: &Path) -> Result<ProjectData, Error>;

    /// `POST /analyze-github` with `{github_url}`.
    async fn analyze_github(&self, github_url: &str) -> Result<GithubData, Error>;

    /// `POST /generate-docs`. Returns the Markdown documentation.
    async fn generate_docs(&self, request: &GenerateDocsRequest) -> Result<String, Error>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> color_eyre::Result<Self> {
        let client = config.build_client()?;
        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

/// Read a reply body and unwrap the `{success, ...}` envelope.
///
/// The backend reports failures in-band, so the body is decoded whatever the
/// HTTP status. A body that is not the expected JSON names the status.
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, Error> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(f!("Failed to read response body: {e}")))?;

    log::debug!("backend replied {status} ({} bytes)", body.len());

    parse_envelope(&body, fallback).map_err(|err| match err {
        RemoteError::Malformed(detail) if !status.is_success() => {
            Error::Remote(RemoteError::Malformed(f!("HTTP {status}: {detail}")))
        }
        other => Error::Remote(other),
    })
}

impl Backend for HttpBackend {
    async fn process_zip(&self, archive: &Path) -> Result<ProjectData, Error> {
        let filename = archive
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let bytes = tokio::fs::read(archive)
            .await
            .map_err(|e| Error::FileRead(f!("{}: {e}", archive.display())))?;

        log::info!("uploading {filename} ({} bytes)", bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("application/zip")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.endpoint(PROCESS_ZIP_PATH))
            .multipart(form)
            .send()
            .await?;

        read_envelope(response, UNKNOWN_ERROR).await
    }

    async fn analyze_github(&self, github_url: &str) -> Result<GithubData, Error> {
        log::info!("analyzing repository {github_url}");

        let response = self
            .client
            .post(self.config.endpoint(ANALYZE_GITHUB_PATH))
            .json(&AnalyzeGithubRequest {
                github_url: github_url.to_string(),
            })
            .send()
            .await?;

        read_envelope(response, UNKNOWN_ERROR).await
    }

    async fn generate_docs(&self, request: &GenerateDocsRequest) -> Result<String, Error> {
        log::info!(
            "generating {} documentation for {} (lang={}, style={})",
            if request.is_batch { "batch" } else { "single-file" },
            request.filename,
            request.lang,
            request.style
        );

        let response = self
            .client
            .post(self.config.endpoint(GENERATE_DOCS_PATH))
            .json(request)
            .send()
            .await?;

        let payload: GenerateDocsPayload = read_envelope(response, GENERATE_FAILED).await?;
        Ok(payload.documentation)
    }
}
