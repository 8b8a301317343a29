use crate::config::Config;
use crate::models::search::SearchResponse;
use crate::repo::catalog::CatalogRepo;
use crate::repo::{RepoError, RepoResult};
use async_trait::async_trait;
use kweh_core::{ItemId, RecordKind};
use reqwest::{Client, StatusCode};

/// xivapi.com over HTTPS. Every request carries the private key as a query parameter.
pub struct XivApiCatalog {
    http: Client,
    base_url: String,
    token: String,
}

impl XivApiCatalog {
    pub fn new(cfg: &Config) -> RepoResult<Self> {
        let http = Client::builder()
            .timeout(cfg.http_timeout())
            .user_agent(concat!("kweh/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.catalog_base_url.clone(),
            token: cfg.catalog_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Request urls carry the private key; keep them out of error messages.
fn redacted(e: reqwest::Error) -> RepoError {
    RepoError::Http(e.without_url())
}

#[async_trait]
impl CatalogRepo for XivApiCatalog {
    async fn search(&self, name: &str, limit: u32, index: &str) -> RepoResult<SearchResponse> {
        let url = self.url("search");
        tracing::debug!(%url, %name, %index, limit, "catalog search");

        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("string", name),
                ("indexes", index),
                ("limit", limit.as_str()),
                ("private_key", self.token.as_str()),
            ])
            .send()
            .await
            .map_err(redacted)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RepoError::Status(status.as_u16()));
        }

        response.json().await.map_err(redacted)
    }

    async fn get_raw(&self, kind: RecordKind, id: ItemId) -> RepoResult<String> {
        let url = self.url(&format!("{kind}/{id}"));
        tracing::debug!(%url, "catalog fetch");

        let response = self
            .http
            .get(&url)
            .query(&[("private_key", self.token.as_str())])
            .send()
            .await
            .map_err(redacted)?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(RepoError::NotFound),
            s if !s.is_success() => Err(RepoError::Status(s.as_u16())),
            _ => response.text().await.map_err(redacted),
        }
    }
}
