//! MetadataClient: published versions + backend UID of an entity
//!
//! Endpoints:
//! - `GET {staticFilesBase}/{ns}/{kind}/{name}/versions.json` → `["v1.0", ...]`
//! - `GET {metadataBase}/entity/{ns}/{kind}/{name}` → `{ "metadata": { "uid": ... } }`
//!
//! A missing manifest degrades to `{latest}`. The UID lookup retries per
//! `RetryPolicy` and fails with `EntityMetadataUnavailable` once exhausted.

#![allow(async_fn_in_trait)]

use serde::Deserialize;

use super::http::{json_headers, CredentialProvider, HttpClient, HttpResponse};
use super::retry::{retry, Delay, RetryPolicy};
use crate::config::VersioningConfig;
use crate::error::{Result, VersioningError};
use crate::resolve::{EntityIdentity, VersionSet};

/// Opaque backend-assigned entity identifier
pub type EntityUid = String;

/// What the session needs from the backend
pub trait MetadataSource {
    /// Never fails; problems degrade to a set holding only `latest`
    async fn fetch_versions(&self, entity: &EntityIdentity) -> VersionSet;

    async fn fetch_entity_uid(&self, entity: &EntityIdentity) -> Result<EntityUid>;
}

#[derive(Debug, Deserialize)]
struct EntityEnvelope {
    metadata: EntityMetadata,
}

#[derive(Debug, Deserialize)]
struct EntityMetadata {
    uid: Option<String>,
}

pub struct MetadataClient<H, C, D> {
    http: H,
    credentials: C,
    delay: D,
    static_files_base: String,
    metadata_base: String,
    retry: RetryPolicy,
}

impl<H, C, D> MetadataClient<H, C, D>
where
    H: HttpClient,
    C: CredentialProvider,
    D: Delay,
{
    pub fn new(config: &VersioningConfig, http: H, credentials: C, delay: D) -> Self {
        Self {
            http,
            credentials,
            delay,
            static_files_base: config.static_files_base(),
            metadata_base: config.metadata_base(),
            retry: config.retry.clone(),
        }
    }

    pub fn versions_url(&self, entity: &EntityIdentity) -> Result<String> {
        Ok(format!(
            "{}/{}/versions.json",
            self.static_files_base,
            entity.ref_path()?
        ))
    }

    pub fn entity_url(&self, entity: &EntityIdentity) -> Result<String> {
        Ok(format!("{}/entity/{}", self.metadata_base, entity.ref_path()?))
    }

    /// Authenticated GET; non-success statuses become `Status` errors
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let token = self.credentials.bearer_token().await?;
        let headers = json_headers(&token);
        let headers: Vec<(&str, &str)> = headers.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let response = self.http.get(url, &headers).await?;
        if !response.is_success() {
            return Err(VersioningError::Status {
                url: url.to_string(),
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response)
    }

    async fn manifest(&self, entity: &EntityIdentity) -> Result<Vec<String>> {
        let url = self.versions_url(entity)?;
        let response = self.get(&url).await?;
        serde_json::from_str(&response.body).map_err(|e| VersioningError::Decode {
            url,
            message: e.to_string(),
        })
    }

    async fn entity_uid_once(&self, entity: &EntityIdentity) -> Result<EntityUid> {
        let url = self.entity_url(entity)?;
        let response = self.get(&url).await?;
        let envelope: EntityEnvelope =
            serde_json::from_str(&response.body).map_err(|e| VersioningError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;
        envelope
            .metadata
            .uid
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| VersioningError::Decode {
                url,
                message: "metadata.uid is missing".to_string(),
            })
    }
}

impl<H, C, D> MetadataSource for MetadataClient<H, C, D>
where
    H: HttpClient,
    C: CredentialProvider,
    D: Delay,
{
    async fn fetch_versions(&self, entity: &EntityIdentity) -> VersionSet {
        match self.manifest(entity).await {
            Ok(manifest) => VersionSet::from_manifest(manifest),
            Err(err) => {
                log_error!(
                    "[MetadataClient] Could not get techdocs versions.json from file provider backend: {}",
                    err
                );
                VersionSet::new()
            }
        }
    }

    async fn fetch_entity_uid(&self, entity: &EntityIdentity) -> Result<EntityUid> {
        retry(&self.retry, &self.delay, "entity metadata lookup", |_| {
            self.entity_uid_once(entity)
        })
        .await
        .map_err(|exhausted| VersioningError::EntityMetadataUnavailable {
            attempts: exhausted.attempts,
            last: Box::new(exhausted.last_error),
        })
    }
}
