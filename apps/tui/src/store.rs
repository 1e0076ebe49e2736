use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ApiResponse;
use crate::domain::{CityFilter, Location};

/// Anything that can produce the location list.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn fetch_locations(&self) -> ApiResponse<Vec<Location>>;
}

/// Locations stored when the source reports failure.
pub fn fallback_locations() -> Vec<Location> {
    vec![
        Location::new("1", "MUM01", "Mumbai"),
        Location::new("2", "PUNE01", "Pune"),
        Location::new("3", "DEL01", "Delhi"),
    ]
}

#[derive(Debug, Default)]
struct LocationState {
    locations: Vec<Location>,
    loading: bool,
    error: Option<String>,
    initialized: bool,
}

/// Shared, lazily loaded location list.
///
/// One instance is built per application and handed to every consumer.
/// `init` fetches at most once until `refresh` is called, no matter how many
/// callers race on it.
pub struct LocationStore {
    source: Arc<dyn LocationSource>,
    state: RwLock<LocationState>,
    init_lock: Mutex<()>,
}

impl LocationStore {
    pub fn new(source: Arc<dyn LocationSource>) -> Self {
        Self {
            source,
            state: RwLock::new(LocationState::default()),
            init_lock: Mutex::new(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LocationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LocationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn init(&self) {
        if self.is_initialized() {
            return;
        }

        let _guard = self.init_lock.lock().await;
        if self.is_initialized() {
            return;
        }

        {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
        }

        let result = self.source.fetch_locations().await;

        {
            let mut state = self.write();
            if result.success {
                state.locations = result.data.unwrap_or_default();
            } else {
                let message = result
                    .message
                    .unwrap_or_else(|| "Failed to load locations".to_string());
                warn!(%message, "location source failed, using fallback locations");
                state.error = Some(message);
                state.locations = fallback_locations();
            }
            state.loading = false;
            state.initialized = true;
            debug!(count = state.locations.len(), "location store initialized");
        }

        for (code, names) in self.code_collisions() {
            warn!(%code, names = ?names, "locations share a city code");
        }
    }

    /// Forgets the loaded list and fetches it again.
    pub async fn refresh(&self) {
        {
            let _guard = self.init_lock.lock().await;
            self.write().initialized = false;
        }
        self.init().await;
    }

    pub fn locations(&self) -> Vec<Location> {
        self.read().locations.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn is_initialized(&self) -> bool {
        self.read().initialized
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// "All Locations" followed by one filter per stored location.
    pub fn city_filters(&self) -> Vec<CityFilter> {
        std::iter::once(CityFilter::all())
            .chain(self.read().locations.iter().map(CityFilter::from))
            .collect()
    }

    /// City codes used by more than one location, with the clashing names.
    pub fn code_collisions(&self) -> Vec<(String, Vec<String>)> {
        let mut by_code: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for location in &self.read().locations {
            by_code
                .entry(location.city_code())
                .or_default()
                .push(location.name.clone());
        }

        by_code
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .collect()
    }
}

impl std::fmt::Debug for LocationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationStore")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ALL_CITIES_CODE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeSource {
        calls: AtomicUsize,
        response: ApiResponse<Vec<Location>>,
        delay: Duration,
    }

    impl FakeSource {
        fn new(response: ApiResponse<Vec<Location>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response,
                delay: Duration::from_millis(20),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LocationSource for FakeSource {
        async fn fetch_locations(&self) -> ApiResponse<Vec<Location>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.response.clone()
        }
    }

    fn cities() -> Vec<Location> {
        vec![
            Location::new("a", "AHMEDABAD01", "Ahmedabad"),
            Location::new("b", "HYD01", "Hyderabad"),
        ]
    }

    #[tokio::test]
    async fn init_fetches_once() {
        let source = FakeSource::new(ApiResponse::ok(cities()));
        let store = LocationStore::new(source.clone());

        store.init().await;
        store.init().await;

        assert_eq!(source.calls(), 1);
        assert!(store.is_initialized());
        assert!(!store.is_loading());
        assert_eq!(store.locations(), cities());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn concurrent_init_shares_one_fetch() {
        let source = FakeSource::new(ApiResponse::ok(cities()));
        let store = LocationStore::new(source.clone());

        tokio::join!(store.init(), store.init(), store.init());

        assert_eq!(source.calls(), 1);
        assert_eq!(store.locations().len(), 2);
    }

    #[tokio::test]
    async fn refresh_fetches_again() {
        let source = FakeSource::new(ApiResponse::ok(cities()));
        let store = LocationStore::new(source.clone());

        store.init().await;
        store.refresh().await;

        assert_eq!(source.calls(), 2);
        assert!(store.is_initialized());
    }

    #[tokio::test]
    async fn failed_source_stores_fallback_and_error() {
        let source = FakeSource::new(ApiResponse::failed("Failed to fetch locations"));
        let store = LocationStore::new(source);

        store.init().await;

        assert_eq!(store.locations(), fallback_locations());
        assert_eq!(store.error().as_deref(), Some("Failed to fetch locations"));
        assert!(store.is_initialized());

        let filters = store.city_filters();
        assert_eq!(filters[0], CityFilter::all());
        assert_eq!(filters.len(), 4);
    }

    #[test]
    fn city_filters_start_with_all_even_before_init() {
        let store = LocationStore::new(FakeSource::new(ApiResponse::ok(vec![])));

        let filters = store.city_filters();

        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].code, ALL_CITIES_CODE);
        assert_eq!(filters[0].name, "All Locations");
    }

    #[tokio::test]
    async fn city_filters_use_three_character_codes() {
        let store = LocationStore::new(FakeSource::new(ApiResponse::ok(cities())));
        store.init().await;

        let codes: Vec<String> = store
            .city_filters()
            .into_iter()
            .map(|filter| filter.code)
            .collect();

        assert_eq!(codes, ["ALL", "AHM", "HYD"]);
    }

    #[tokio::test]
    async fn colliding_codes_are_reported_not_merged() {
        let store = LocationStore::new(FakeSource::new(ApiResponse::ok(
            crate::api::client::fallback_locations(),
        )));
        store.init().await;

        assert_eq!(
            store.code_collisions(),
            vec![(
                "DEL".to_string(),
                vec!["Delhi".to_string(), "Banglore".to_string()]
            )]
        );
        assert_eq!(store.city_filters().len(), 5);
    }
}
