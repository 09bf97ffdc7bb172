//! In-memory catalog and navigator used by the controller tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio::time::Instant;

use crate::api::CatalogService;
use crate::app_state::{Msg, Outbox};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Episode, Genre, Season, SeasonSummary, Show, ShowDetails};
use crate::navigation::{Navigator, Route};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Genres,
    Popular(u32),
    Search(String, u32),
    Details(u64),
    Season(u64, u32),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub request: Request,
    pub at: Instant,
}

#[derive(Debug, Default)]
pub struct FakeCatalog {
    pub genres: Vec<Genre>,
    pub popular: Vec<Show>,
    pub search: Vec<Show>,
    pub details: ShowDetails,
    pub season: Season,
    pub failing: Vec<&'static str>,
    pub genres_delay: Duration,
    pub(crate) calls: Mutex<Vec<Call>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.calls().into_iter().map(|c| c.request).collect()
    }

    fn record(&self, request: Request) {
        self.calls.lock().unwrap().push(Call { request, at: Instant::now() });
    }

    fn outcome<T>(&self, endpoint: &'static str, value: T) -> CatalogResult<T> {
        if self.failing.contains(&endpoint) {
            Err(CatalogError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                path: endpoint.to_string(),
            })
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn genres(&self) -> CatalogResult<Vec<Genre>> {
        self.record(Request::Genres);
        if !self.genres_delay.is_zero() {
            tokio::time::sleep(self.genres_delay).await;
        }
        self.outcome("genres", self.genres.clone())
    }

    async fn popular(&self, page: u32) -> CatalogResult<Vec<Show>> {
        self.record(Request::Popular(page));
        self.outcome("popular", self.popular.clone())
    }

    async fn search(&self, query: &str, page: u32) -> CatalogResult<Vec<Show>> {
        self.record(Request::Search(query.to_string(), page));
        self.outcome("search", self.search.clone())
    }

    async fn show_details(&self, show_id: u64) -> CatalogResult<ShowDetails> {
        self.record(Request::Details(show_id));
        self.outcome("details", self.details.clone())
    }

    async fn season(&self, show_id: u64, season_number: u32) -> CatalogResult<Season> {
        self.record(Request::Season(show_id, season_number));
        self.outcome("season", self.season.clone())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_root(&self) {
        self.routes.lock().unwrap().push(Route::Catalog);
    }

    fn go_detail(&self, show_id: u64) {
        self.routes.lock().unwrap().push(Route::detail(show_id));
    }
}

pub fn outbox() -> (Outbox, UnboundedReceiver<Msg>) {
    let (tx, rx) = unbounded_channel();
    (Outbox::new(tx), rx)
}

pub fn show(id: u64, name: &str, genre_ids: &[u64]) -> Show {
    Show {
        id,
        name: name.to_string(),
        genre_ids: genre_ids.to_vec(),
        ..Default::default()
    }
}

pub fn genre(id: u64, name: &str) -> Genre {
    Genre { id, name: name.to_string() }
}

pub fn episode(id: u64, number: u32, name: &str) -> Episode {
    Episode {
        id,
        name: name.to_string(),
        overview: String::new(),
        episode_number: number,
        still_path: None,
    }
}

pub fn details(id: u64, name: &str, seasons: &[u32]) -> ShowDetails {
    ShowDetails {
        id,
        name: name.to_string(),
        seasons: seasons
            .iter()
            .map(|n| SeasonSummary { season_number: *n, ..Default::default() })
            .collect(),
    }
}
