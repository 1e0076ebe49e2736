use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use trove_storefront::api::{ApiClient, ApiError};
use trove_storefront::domain::Experience;
use trove_storefront::store::{LocationSource, LocationStore};

/// Results delivered back to the UI loop by background work.
#[derive(Debug)]
pub enum AppEvent {
    ExperiencesLoaded(Result<Arc<Vec<Experience>>, ApiError>),
    LocationsReady,
}

/// Owns the shared services and spawns network work off the UI loop.
#[derive(Debug, Clone)]
pub struct AppActions {
    client: Arc<ApiClient>,
    store: Arc<LocationStore>,
    tx: UnboundedSender<AppEvent>,
}

impl AppActions {
    pub fn new(client: Arc<ApiClient>, tx: UnboundedSender<AppEvent>) -> Self {
        let source: Arc<dyn LocationSource> = client.clone();
        Self {
            client,
            store: Arc::new(LocationStore::new(source)),
            tx,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn store(&self) -> &LocationStore {
        &self.store
    }

    pub fn load_locations(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            store.init().await;
            let _ = tx.send(AppEvent::LocationsReady);
        });
    }

    pub fn refresh_locations(&self) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            store.refresh().await;
            let _ = tx.send(AppEvent::LocationsReady);
        });
    }

    pub fn load_experiences(&self) {
        debug!("requesting experiences");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_experiences().await;
            let _ = tx.send(AppEvent::ExperiencesLoaded(result));
        });
    }

    pub fn refresh_experiences(&self) {
        debug!("refreshing experiences");
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.refresh_experiences().await;
            let _ = tx.send(AppEvent::ExperiencesLoaded(result));
        });
    }
}
