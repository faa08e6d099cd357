use std::path::PathBuf;
use tokio::sync::broadcast;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Path of the sheet file backing the tracker.
    pub sheet: PathBuf,
    /// The "request reload" signal to the presentation layer. Exactly one
    /// event is sent per committed batch, however many cells it touched.
    pub reload_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(sheet: PathBuf) -> Self {
        let (tx, _) = broadcast::channel(64);
        Self {
            sheet,
            reload_tx: tx,
        }
    }

    pub fn request_reload(&self) {
        // No subscribers is fine; the grid may not be connected yet.
        let _ = self.reload_tx.send(());
    }
}
