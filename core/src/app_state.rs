use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::CatalogEvent;
use crate::detail::DetailEvent;
use crate::navigation::Route;

/// Identity of one mounted view. A fresh id is issued on every navigation, so
/// responses addressed to a torn-down view can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

#[derive(Debug)]
pub enum Msg {
    Catalog { view: ViewId, event: CatalogEvent },
    Detail { view: ViewId, event: DetailEvent },
    Navigate(Route),
}

type Wake = Arc<dyn Fn() + Send + Sync>;

/// Sending half used by background tasks to report back to the UI thread.
#[derive(Clone)]
pub struct Outbox {
    tx: UnboundedSender<Msg>,
    wake: Option<Wake>,
}

impl Outbox {
    pub fn new(tx: UnboundedSender<Msg>) -> Self {
        Self { tx, wake: None }
    }

    /// `wake` is invoked after each send, e.g. to request a repaint.
    pub fn with_wake(mut self, wake: Wake) -> Self {
        self.wake = Some(wake);
        self
    }

    pub fn send(&self, msg: Msg) {
        if self.tx.send(msg).is_err() {
            log::debug!("message receiver gone; dropping message");
            return;
        }
        if let Some(wake) = &self.wake {
            wake();
        }
    }
}

impl fmt::Debug for Outbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outbox")
            .field("closed", &self.tx.is_closed())
            .field("wake", &self.wake.is_some())
            .finish()
    }
}
