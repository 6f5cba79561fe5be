use std::future::Future;

use data_error::{CatalogError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::model::{Character, CharacterDetail};

pub const API_BASE_URL: &str = "https://hp-api.onrender.com/api";

const CLIENT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Read access to the character dataset.
///
/// Every returned record carries a non-empty identifier. Failures are
/// reported as they happen, no retry is performed.
pub trait CharacterSource: Send + Sync + 'static {
    fn all_characters(
        &self,
    ) -> impl Future<Output = Result<Vec<Character>>> + Send;

    fn students(&self) -> impl Future<Output = Result<Vec<Character>>> + Send;

    fn staff(&self) -> impl Future<Output = Result<Vec<Character>>> + Send;

    /// Fetch one character, `None` when the upstream result set is empty.
    fn character_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<CharacterDetail>>> + Send;
}

/// [`CharacterSource`] backed by the public HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCharacterClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpCharacterClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CatalogError::Path(format!("invalid API url {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Path(format!(
                "API url {} cannot be a base",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the url of an endpoint, each segment is percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        failure: impl FnOnce() -> String,
    ) -> Result<Vec<T>> {
        let url = self.endpoint(segments);
        log::debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("GET {} answered {}", url, status);
            return Err(CatalogError::fetch(failure(), status.as_u16()));
        }

        let records: Vec<T> = response.json().await?;
        log::debug!("GET {} returned {} records", url, records.len());
        Ok(records)
    }

    async fn get_characters(
        &self,
        segments: &[&str],
        failure: &'static str,
    ) -> Result<Vec<Character>> {
        let records: Vec<Character> = self
            .get_list(segments, || failure.to_owned())
            .await?;
        Ok(records
            .into_iter()
            .map(Character::with_derived_id)
            .collect())
    }
}

impl CharacterSource for HttpCharacterClient {
    async fn all_characters(&self) -> Result<Vec<Character>> {
        self.get_characters(&["characters"], "Failed to fetch characters")
            .await
    }

    async fn students(&self) -> Result<Vec<Character>> {
        self.get_characters(
            &["characters", "students"],
            "Failed to fetch students",
        )
        .await
    }

    async fn staff(&self) -> Result<Vec<Character>> {
        self.get_characters(&["characters", "staff"], "Failed to fetch staff")
            .await
    }

    async fn character_by_id(
        &self,
        id: &str,
    ) -> Result<Option<CharacterDetail>> {
        let records: Vec<CharacterDetail> = self
            .get_list(&["character", id], || {
                format!("Failed to fetch character with id {}", id)
            })
            .await?;
        Ok(records
            .into_iter()
            .next()
            .map(CharacterDetail::with_derived_id))
    }
}
