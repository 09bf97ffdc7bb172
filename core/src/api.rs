use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use urlencoding::encode;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Genre, GenreList, Page, Season, Show, ShowDetails};

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_base: String,
    pub api_key: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Read-only access to the remote TV catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn genres(&self) -> CatalogResult<Vec<Genre>>;
    async fn popular(&self, page: u32) -> CatalogResult<Vec<Show>>;
    async fn search(&self, query: &str, page: u32) -> CatalogResult<Vec<Show>>;
    async fn show_details(&self, show_id: u64) -> CatalogResult<ShowDetails>;
    async fn season(&self, show_id: u64, season_number: u32) -> CatalogResult<Season>;
}

/// TMDB v3 client. The API key travels as a query parameter on every request.
pub struct TmdbClient {
    cfg: CatalogConfig,
    http: reqwest::Client,
}

impl TmdbClient {
    pub fn new(cfg: CatalogConfig) -> CatalogResult<Self> {
        let http = reqwest::Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self { cfg, http })
    }

    fn endpoint(&self, path: &str, extra: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.cfg.api_base.trim_end_matches('/'),
            path,
            encode(&self.cfg.api_key),
            encode(&self.cfg.language)
        );
        for (key, value) in extra {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> CatalogResult<T> {
        if self.cfg.api_key.trim().is_empty() {
            return Err(CatalogError::MissingCredential);
        }
        let res = self.http.get(self.endpoint(path, extra)).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status, path: path.to_string() });
        }
        let body = res.text().await?;
        log::debug!("GET {} -> {} ({} bytes)", path, status, body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogService for TmdbClient {
    async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        let list: GenreList = self.get_json("/genre/tv/list", &[]).await?;
        Ok(list.genres)
    }

    async fn popular(&self, page: u32) -> CatalogResult<Vec<Show>> {
        let page: Page<Show> = self.get_json("/tv/popular", &[("page", page.to_string())]).await?;
        Ok(page.results)
    }

    async fn search(&self, query: &str, page: u32) -> CatalogResult<Vec<Show>> {
        let page: Page<Show> = self
            .get_json(
                "/search/tv",
                &[("query", query.to_string()), ("page", page.to_string())],
            )
            .await?;
        Ok(page.results)
    }

    async fn show_details(&self, show_id: u64) -> CatalogResult<ShowDetails> {
        self.get_json(&format!("/tv/{}", show_id), &[]).await
    }

    async fn season(&self, show_id: u64, season_number: u32) -> CatalogResult<Season> {
        self.get_json(&format!("/tv/{}/season/{}", show_id, season_number), &[]).await
    }
}
