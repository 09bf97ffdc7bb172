use crate::app_state::{Msg, Outbox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    /// `show_id` is `None` when the path carried no usable identifier.
    Detail { show_id: Option<u64> },
}

impl Route {
    pub fn detail(show_id: u64) -> Self {
        Route::Detail { show_id: Some(show_id) }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Catalog);
        }
        let rest = trimmed.strip_prefix("/show")?;
        if rest.is_empty() {
            return Some(Route::Detail { show_id: None });
        }
        let id = rest.strip_prefix('/')?;
        Some(Route::Detail { show_id: id.parse().ok() })
    }

    pub fn path(&self) -> String {
        match self {
            Route::Catalog => "/".to_string(),
            Route::Detail { show_id: Some(id) } => format!("/show/{}", id),
            Route::Detail { show_id: None } => "/show/".to_string(),
        }
    }
}

/// Routing collaborator handed to views. Calls are fire-and-forget.
pub trait Navigator: Send + Sync {
    fn go_root(&self);
    fn go_detail(&self, show_id: u64);
}

/// Queues navigation requests for the shell to apply on its next pump.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    outbox: Outbox,
}

impl ChannelNavigator {
    pub fn new(outbox: Outbox) -> Self {
        Self { outbox }
    }
}

impl Navigator for ChannelNavigator {
    fn go_root(&self) {
        self.outbox.send(Msg::Navigate(Route::Catalog));
    }

    fn go_detail(&self, show_id: u64) {
        self.outbox.send(Msg::Navigate(Route::detail(show_id)));
    }
}
