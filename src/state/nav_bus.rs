use crate::routes::Route;
use tokio::sync::mpsc;

/// Carries forced-navigation requests from the API layer to whoever renders pages.
#[derive(Clone)]
pub struct NavBus {
    tx: mpsc::UnboundedSender<Route>,
}

impl NavBus {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn redirect(&self, route: Route) {
        if self.tx.send(route).is_err() {
            tracing::warn!(route = route.path(), "no navigation listener; redirect dropped");
        }
    }
}
