use std::sync::Arc;

use crate::api::CatalogService;
use crate::app_state::{Msg, Outbox, ViewId};
use crate::error::CatalogResult;
use crate::models::Episode;
use crate::navigation::Navigator;

#[derive(Debug)]
pub enum DetailEvent {
    /// Show metadata arrived; `season` is the season whose episodes are requested next.
    ShowLoaded { name: String, season: u32 },
    /// Terminal event of a load, whichever stage ended it.
    Finished(CatalogResult<Vec<Episode>>),
}

#[derive(Debug, Clone)]
pub struct DetailState {
    show_id: Option<u64>,
    show_name: String,
    season: Option<u32>,
    episodes: Vec<Episode>,
    loading: bool,
}

impl DetailState {
    pub fn new(show_id: Option<u64>) -> Self {
        Self {
            show_id,
            show_name: String::new(),
            season: None,
            episodes: Vec::new(),
            loading: true,
        }
    }

    pub fn show_id(&self) -> Option<u64> {
        self.show_id
    }

    pub fn show_name(&self) -> &str {
        &self.show_name
    }

    pub fn season(&self) -> Option<u32> {
        self.season
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn apply(&mut self, event: DetailEvent) {
        match event {
            DetailEvent::ShowLoaded { name, season } => {
                self.show_name = name;
                self.season = Some(season);
            }
            DetailEvent::Finished(result) => {
                match result {
                    Ok(episodes) => self.episodes = episodes,
                    Err(e) => log::error!("Error fetching episodes: {}", e),
                }
                self.loading = false;
            }
        }
    }
}

/// Metadata first, then the default season's episodes.
async fn fetch_episodes(
    service: &dyn CatalogService,
    outbox: &Outbox,
    view: ViewId,
    show_id: u64,
) -> CatalogResult<Vec<Episode>> {
    let details = service.show_details(show_id).await?;
    let season = details.default_season();
    outbox.send(Msg::Detail {
        view,
        event: DetailEvent::ShowLoaded { name: details.name, season },
    });
    let season = service.season(show_id, season).await?;
    Ok(season.episodes)
}

/// Episode list for one show.
pub struct DetailView {
    id: ViewId,
    state: DetailState,
    service: Arc<dyn CatalogService>,
    navigator: Arc<dyn Navigator>,
    outbox: Outbox,
}

impl DetailView {
    pub fn new(
        id: ViewId,
        show_id: Option<u64>,
        service: Arc<dyn CatalogService>,
        navigator: Arc<dyn Navigator>,
        outbox: Outbox,
    ) -> Self {
        Self {
            id,
            state: DetailState::new(show_id),
            service,
            navigator,
            outbox,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Without a show id nothing is fetched and the view keeps showing its
    /// loading state.
    pub fn activate(&mut self) {
        match self.state.show_id {
            Some(show_id) => {
                log::info!("detail view {:?} activated for show {}", self.id, show_id);
                self.load_detail(show_id);
            }
            None => log::warn!("detail view {:?} opened without a show id; nothing to load", self.id),
        }
    }

    pub fn load_detail(&self, show_id: u64) {
        let service = self.service.clone();
        let outbox = self.outbox.clone();
        let view = self.id;
        tokio::spawn(async move {
            let result = fetch_episodes(service.as_ref(), &outbox, view, show_id).await;
            outbox.send(Msg::Detail { view, event: DetailEvent::Finished(result) });
        });
    }

    pub fn go_back(&self) {
        self.navigator.go_root();
    }

    pub fn handle(&mut self, event: DetailEvent) {
        self.state.apply(event);
    }

    pub fn deactivate(&mut self) {
        log::info!("detail view {:?} deactivated", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Season;
    use crate::navigation::Route;
    use crate::testing::{details, episode, outbox, FakeCatalog, RecordingNavigator, Request};
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn view(
        service: Arc<FakeCatalog>,
        show_id: Option<u64>,
    ) -> (DetailView, UnboundedReceiver<Msg>, Arc<RecordingNavigator>) {
        let (outbox, rx) = outbox();
        let nav = Arc::new(RecordingNavigator::default());
        let v = DetailView::new(ViewId(2), show_id, service, nav.clone(), outbox);
        (v, rx, nav)
    }

    async fn drain_until_finished(v: &mut DetailView, rx: &mut UnboundedReceiver<Msg>) {
        while v.state().is_loading() {
            match rx.recv().await {
                Some(Msg::Detail { view, event }) => {
                    assert_eq!(view, ViewId(2));
                    v.handle(event);
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_first_listed_season() {
        let service = Arc::new(FakeCatalog {
            details: details(1399, "X", &[2]),
            season: Season { episodes: vec![episode(10, 1, "one"), episode(11, 2, "two")] },
            ..Default::default()
        });
        let (mut v, mut rx, _) = view(service.clone(), Some(1399));
        v.activate();
        drain_until_finished(&mut v, &mut rx).await;

        assert_eq!(service.requests(), vec![Request::Details(1399), Request::Season(1399, 2)]);
        assert_eq!(v.state().show_name(), "X");
        assert_eq!(v.state().season(), Some(2));
        let ids: Vec<u64> = v.state().episodes().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_episodes_keep_server_order() {
        let service = Arc::new(FakeCatalog {
            details: details(1, "Y", &[1]),
            season: Season {
                episodes: vec![episode(3, 3, "c"), episode(1, 1, "a"), episode(2, 2, "b")],
            },
            ..Default::default()
        });
        let (mut v, mut rx, _) = view(service, Some(1));
        v.activate();
        drain_until_finished(&mut v, &mut rx).await;
        let numbers: Vec<u32> = v.state().episodes().iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![3, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_without_seasons_uses_default_season() {
        let service = Arc::new(FakeCatalog {
            details: details(5, "Z", &[]),
            ..Default::default()
        });
        let (mut v, mut rx, _) = view(service.clone(), Some(5));
        v.activate();
        drain_until_finished(&mut v, &mut rx).await;
        assert_eq!(service.requests(), vec![Request::Details(5), Request::Season(5, 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_metadata_failure_skips_episodes() {
        let service = Arc::new(FakeCatalog {
            failing: vec!["details"],
            ..Default::default()
        });
        let (mut v, mut rx, _) = view(service.clone(), Some(1399));
        v.activate();
        drain_until_finished(&mut v, &mut rx).await;

        assert_eq!(service.requests(), vec![Request::Details(1399)]);
        assert!(!v.state().is_loading());
        assert!(v.state().episodes().is_empty());
        assert_eq!(v.state().show_name(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_season_failure_keeps_show_name() {
        let service = Arc::new(FakeCatalog {
            details: details(1399, "X", &[1]),
            failing: vec!["season"],
            ..Default::default()
        });
        let (mut v, mut rx, _) = view(service, Some(1399));
        v.activate();
        drain_until_finished(&mut v, &mut rx).await;
        assert_eq!(v.state().show_name(), "X");
        assert!(v.state().episodes().is_empty());
        assert!(!v.state().is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_show_id_stays_loading() {
        let service = Arc::new(FakeCatalog::default());
        let (mut v, mut rx, _) = view(service.clone(), None);
        v.activate();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(service.calls().is_empty());
        assert!(v.state().is_loading());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_go_back_navigates_to_root() {
        let service = Arc::new(FakeCatalog::default());
        let (v, _rx, nav) = view(service, Some(1));
        v.go_back();
        assert_eq!(nav.routes(), vec![Route::Catalog]);
    }
}
