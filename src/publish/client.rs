//! HTTP client for a Bintray-style package repository API.

use super::{
    PackageCoordinates, PackageRepository, PublishedFile, VersionCreation, classify_create_status,
};
use crate::error::{RepositoryError, Result};
use crate::workspace::Credentials;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use std::path::Path;

/// Default API root
pub const DEFAULT_API_URL: &str = "https://api.bintray.com";

#[derive(Debug, Serialize)]
struct CreateVersionRequest<'a> {
    name: &'a str,
    desc: &'a str,
}

/// Package repository client authenticated with HTTP Basic auth
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl RepositoryClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn versions_url(&self, coords: &PackageCoordinates) -> String {
        format!(
            "{}/packages/{}/{}/{}/versions",
            self.base_url, coords.org, coords.repo, coords.package
        )
    }

    fn content_url(&self, coords: &PackageCoordinates, version: &str, file_name: &str) -> String {
        format!(
            "{}/content/{}/{}/{}/{}/{}?publish=1&override=1",
            self.base_url, coords.org, coords.repo, coords.package, version, file_name
        )
    }

    fn transport_error(url: &str, source: reqwest::Error) -> RepositoryError {
        RepositoryError::Transport {
            url: url.to_string(),
            source,
        }
    }
}

impl PackageRepository for RepositoryClient {
    async fn create_version(
        &self,
        coords: &PackageCoordinates,
        version: &str,
        description: &str,
    ) -> Result<VersionCreation> {
        let url = self.versions_url(coords);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.api_key))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&CreateVersionRequest {
                name: version,
                desc: description,
            })
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let status = response.status().as_u16();
        log::debug!("Create version {} answered {}", version, status);

        Ok(classify_create_status(status, coords, version)?)
    }

    async fn publish_file(
        &self,
        coords: &PackageCoordinates,
        version: &str,
        file: &Path,
    ) -> Result<PublishedFile> {
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());

        let body = tokio::fs::read(file)
            .await
            .map_err(|source| RepositoryError::UnreadableFile {
                path: file.to_path_buf(),
                source,
            })?;

        let url = self.content_url(coords, version, &file_name);
        log::debug!("PUT {} ({} bytes)", url, body.len());

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.credentials.user, Some(&self.credentials.api_key))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .body(body)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepositoryError::UploadFailed {
                status: status.as_u16(),
            }
            .into());
        }

        Ok(PublishedFile {
            file_name,
            status: status.as_u16(),
        })
    }
}
