use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{CatalogService, FIRST_PAGE};
use crate::app_state::{Msg, Outbox, ViewId};
use crate::debounce::Debouncer;
use crate::error::CatalogResult;
use crate::models::{Genre, GenreTable, Show};
use crate::navigation::Navigator;

pub const OTHERS_BUCKET: &str = "Others";
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shows sharing one primary genre, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenreGroup<'a> {
    pub name: String,
    pub shows: Vec<&'a Show>,
}

/// Buckets shows by the name of their primary genre. Buckets come out in the
/// order their name first appears; shows without a resolvable genre land in
/// [`OTHERS_BUCKET`].
pub fn group_by_genre<'a>(shows: &'a [Show], genres: &GenreTable) -> Vec<GenreGroup<'a>> {
    let mut groups: Vec<GenreGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for show in shows {
        let name = show
            .primary_genre()
            .and_then(|id| genres.name(id))
            .filter(|n| !n.is_empty())
            .unwrap_or(OTHERS_BUCKET);
        match index.get(name) {
            Some(&i) => groups[i].shows.push(show),
            None => {
                index.insert(name.to_string(), groups.len());
                groups.push(GenreGroup { name: name.to_string(), shows: vec![show] });
            }
        }
    }
    groups
}

#[derive(Debug)]
pub enum CatalogEvent {
    GenresLoaded(CatalogResult<Vec<Genre>>),
    PopularLoaded(CatalogResult<Vec<Show>>),
    /// `seq` is the query sequence number the request was issued for.
    SearchLoaded { seq: u64, result: CatalogResult<Vec<Show>> },
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    genres: GenreTable,
    shows: Vec<Show>,
    loading: bool,
    query: String,
    results: Vec<Show>,
    search_seq: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            genres: GenreTable::default(),
            shows: Vec::new(),
            loading: true,
            query: String::new(),
            results: Vec::new(),
            search_seq: 0,
        }
    }
}

impl CatalogState {
    pub fn genres(&self) -> &GenreTable {
        &self.genres
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Show] {
        &self.results
    }

    pub fn grouped(&self) -> Vec<GenreGroup<'_>> {
        group_by_genre(&self.shows, &self.genres)
    }

    pub fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::GenresLoaded(Ok(genres)) => {
                if self.genres.is_empty() {
                    self.genres = genres.into_iter().collect();
                } else {
                    log::debug!("genre table already populated; ignoring reload");
                }
            }
            CatalogEvent::GenresLoaded(Err(e)) => {
                log::error!("Error fetching genres: {}", e);
            }
            CatalogEvent::PopularLoaded(result) => {
                match result {
                    Ok(shows) => self.shows = shows,
                    Err(e) => log::error!("Error fetching shows: {}", e),
                }
                self.loading = false;
            }
            CatalogEvent::SearchLoaded { seq, result } => {
                if seq != self.search_seq {
                    log::debug!("dropping search results for superseded query #{}", seq);
                    return;
                }
                match result {
                    Ok(results) => self.results = results,
                    Err(e) => log::error!("Error searching shows: {}", e),
                }
            }
        }
    }

    /// Stores the new query text. Returns the sequence number a search should be
    /// issued under, or `None` when the query is blank and results were cleared.
    pub fn set_query(&mut self, text: String) -> Option<u64> {
        self.query = text;
        self.search_seq += 1;
        if self.query.trim().is_empty() {
            self.results.clear();
            None
        } else {
            Some(self.search_seq)
        }
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        self.results.clear();
        self.search_seq += 1;
    }
}

/// Catalog screen: popular shows grouped by genre plus a debounced search box.
pub struct CatalogView {
    id: ViewId,
    state: CatalogState,
    service: Arc<dyn CatalogService>,
    navigator: Arc<dyn Navigator>,
    outbox: Outbox,
    debounce: Debouncer,
}

impl CatalogView {
    pub fn new(
        id: ViewId,
        service: Arc<dyn CatalogService>,
        navigator: Arc<dyn Navigator>,
        outbox: Outbox,
        debounce_window: Duration,
    ) -> Self {
        Self {
            id,
            state: CatalogState::default(),
            service,
            navigator,
            outbox,
            debounce: Debouncer::new(debounce_window),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn search_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Starts the two independent initial loads.
    pub fn activate(&mut self) {
        log::info!("catalog view {:?} activated", self.id);
        self.load_genres();
        self.load_popular();
    }

    pub fn load_genres(&self) {
        let service = self.service.clone();
        let outbox = self.outbox.clone();
        let view = self.id;
        tokio::spawn(async move {
            let result = service.genres().await;
            outbox.send(Msg::Catalog { view, event: CatalogEvent::GenresLoaded(result) });
        });
    }

    pub fn load_popular(&self) {
        let service = self.service.clone();
        let outbox = self.outbox.clone();
        let view = self.id;
        tokio::spawn(async move {
            let result = service.popular(FIRST_PAGE).await;
            outbox.send(Msg::Catalog { view, event: CatalogEvent::PopularLoaded(result) });
        });
    }

    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.debounce.cancel();
        let Some(seq) = self.state.set_query(text.into()) else {
            return;
        };
        let query = self.state.query().to_string();
        let service = self.service.clone();
        let outbox = self.outbox.clone();
        let view = self.id;
        self.debounce.arm(async move {
            log::debug!("searching for {:?} (#{})", query, seq);
            let result = service.search(&query, FIRST_PAGE).await;
            outbox.send(Msg::Catalog { view, event: CatalogEvent::SearchLoaded { seq, result } });
        });
    }

    pub fn select_show(&mut self, show_id: u64) {
        self.debounce.cancel();
        self.state.clear_search();
        self.navigator.go_detail(show_id);
    }

    pub fn handle(&mut self, event: CatalogEvent) {
        self.state.apply(event);
    }

    pub fn deactivate(&mut self) {
        self.debounce.cancel();
        log::info!("catalog view {:?} deactivated", self.id);
    }
}
