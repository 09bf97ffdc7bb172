use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::api::CatalogService;
use crate::app_state::{Msg, Outbox, ViewId};
use crate::catalog::{CatalogView, SEARCH_DEBOUNCE};
use crate::detail::DetailView;
use crate::navigation::{ChannelNavigator, Navigator, Route};

pub enum ActiveView {
    Catalog(CatalogView),
    Detail(DetailView),
}

impl ActiveView {
    pub fn id(&self) -> ViewId {
        match self {
            ActiveView::Catalog(v) => v.id(),
            ActiveView::Detail(v) => v.id(),
        }
    }

    fn deactivate(&mut self) {
        match self {
            ActiveView::Catalog(v) => v.deactivate(),
            ActiveView::Detail(v) => v.deactivate(),
        }
    }
}

pub struct ShellOptions {
    pub debounce_window: Duration,
    pub wake: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self { debounce_window: SEARCH_DEBOUNCE, wake: None }
    }
}

/// Hosts the single mounted view and routes background messages to it.
/// Must be created and pumped from within a tokio runtime.
pub struct Shell {
    service: Arc<dyn CatalogService>,
    navigator: Arc<dyn Navigator>,
    outbox: Outbox,
    rx: UnboundedReceiver<Msg>,
    debounce_window: Duration,
    next_view: u64,
    route: Route,
    active: ActiveView,
}

impl Shell {
    pub fn new(service: Arc<dyn CatalogService>, options: ShellOptions) -> Self {
        let (tx, rx) = unbounded_channel();
        let mut outbox = Outbox::new(tx);
        if let Some(wake) = options.wake {
            outbox = outbox.with_wake(wake);
        }
        let navigator: Arc<dyn Navigator> = Arc::new(ChannelNavigator::new(outbox.clone()));
        let mut catalog = CatalogView::new(
            ViewId(1),
            service.clone(),
            navigator.clone(),
            outbox.clone(),
            options.debounce_window,
        );
        catalog.activate();
        Self {
            service,
            navigator,
            outbox,
            rx,
            debounce_window: options.debounce_window,
            next_view: 2,
            route: Route::Catalog,
            active: ActiveView::Catalog(catalog),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ActiveView {
        &mut self.active
    }

    /// Tears down the current view and mounts a fresh one for `route`.
    pub fn navigate(&mut self, route: Route) {
        log::info!("navigating {} -> {}", self.route.path(), route.path());
        self.active.deactivate();
        let id = ViewId(self.next_view);
        self.next_view += 1;
        self.active = match &route {
            Route::Catalog => {
                let mut v = CatalogView::new(
                    id,
                    self.service.clone(),
                    self.navigator.clone(),
                    self.outbox.clone(),
                    self.debounce_window,
                );
                v.activate();
                ActiveView::Catalog(v)
            }
            Route::Detail { show_id } => {
                let mut v = DetailView::new(
                    id,
                    *show_id,
                    self.service.clone(),
                    self.navigator.clone(),
                    self.outbox.clone(),
                );
                v.activate();
                ActiveView::Detail(v)
            }
        };
        self.route = route;
    }

    /// Applies every queued message. Returns how many were taken off the queue.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.rx.try_recv() {
            count += 1;
            self.dispatch(msg);
        }
        count
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let msg = match msg {
            Msg::Navigate(route) => {
                self.navigate(route);
                return;
            }
            other => other,
        };
        match (msg, &mut self.active) {
            (Msg::Catalog { view, event }, ActiveView::Catalog(v)) if v.id() == view => v.handle(event),
            (Msg::Detail { view, event }, ActiveView::Detail(v)) if v.id() == view => v.handle(event),
            (msg, active) => {
                log::debug!("dropping {:?} addressed to inactive view (active {:?})", msg, active.id());
            }
        }
    }
}
