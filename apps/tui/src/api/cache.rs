use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::ApiError;
use crate::domain::Experience;

type FetchResult = Result<Arc<Vec<Experience>>, ApiError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

struct Entry {
    generation: u64,
    fetch: SharedFetch,
}

/// Process-lifetime cache of the experience collection.
///
/// Holds at most one fetch. Callers arriving while it is in flight join it
/// and receive the same `Arc`; a resolved fetch keeps serving its value
/// until [`invalidate`](Self::invalidate). A failed fetch is dropped so the
/// next caller starts a new one.
#[derive(Default)]
pub struct ExperienceCache {
    slot: Mutex<Option<Entry>>,
    next_generation: AtomicU64,
}

impl ExperienceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached collection, starting `loader` only when the slot
    /// is empty.
    ///
    /// The loader runs on its own task, so it completes and fills the slot
    /// even if every caller stops waiting. A failure left there that way is
    /// discarded by the next call, which starts a fresh fetch.
    pub async fn get_or_fetch<F, Fut>(&self, loader: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Experience>, ApiError>> + Send + 'static,
    {
        let (generation, fetch) = {
            let mut slot = self.slot.lock().await;
            // A failure nobody was awaiting is still parked in the slot.
            if slot
                .as_ref()
                .is_some_and(|entry| matches!(entry.fetch.peek(), Some(Err(_))))
            {
                debug!("discarding unobserved failed experience fetch");
                *slot = None;
            }
            if let Some(entry) = slot.as_ref() {
                debug!(generation = entry.generation, "joining experience fetch");
                (entry.generation, entry.fetch.clone())
            } else {
                let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                debug!(generation, "starting experience fetch");

                let handle = tokio::spawn(loader());
                let fetch = async move {
                    match handle.await {
                        Ok(result) => result.map(Arc::new),
                        Err(e) => Err(ApiError::Task(e.to_string())),
                    }
                }
                .boxed()
                .shared();

                *slot = Some(Entry {
                    generation,
                    fetch: fetch.clone(),
                });
                (generation, fetch)
            }
        };

        let result = fetch.await;

        if result.is_err() {
            let mut slot = self.slot.lock().await;
            // A refresh may already have replaced the failed entry.
            if slot
                .as_ref()
                .is_some_and(|entry| entry.generation == generation)
            {
                debug!(generation, "clearing failed experience fetch");
                *slot = None;
            }
        }

        result
    }

    /// Drops the cached entry. Callers already waiting on it still get its
    /// result; the next call starts a new fetch.
    pub async fn invalidate(&self) {
        if let Some(entry) = self.slot.lock().await.take() {
            debug!(generation = entry.generation, "experience cache invalidated");
        }
    }

    /// The resolved collection, if a successful fetch has been observed.
    pub async fn peek(&self) -> Option<Arc<Vec<Experience>>> {
        self.slot
            .lock()
            .await
            .as_ref()
            .and_then(|entry| entry.fetch.peek().cloned())
            .and_then(Result::ok)
    }

    pub async fn is_in_flight(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|entry| entry.fetch.peek().is_none())
    }
}

impl fmt::Debug for ExperienceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let generation = self
            .slot
            .try_lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|entry| entry.generation));
        f.debug_struct("ExperienceCache")
            .field("generation", &generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn experience(id: &str) -> Experience {
        Experience {
            id: id.to_string(),
            ..Experience::default()
        }
    }

    fn counting_loader(
        calls: &Arc<AtomicUsize>,
        delay: Duration,
        result: Result<Vec<Experience>, ApiError>,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<Vec<Experience>, ApiError>> {
        let calls = Arc::clone(calls);
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                result
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let cache = ExperienceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let delay = Duration::from_millis(50);

        let (first, second, third) = tokio::join!(
            cache.get_or_fetch(counting_loader(&calls, delay, Ok(vec![experience("e1")]))),
            cache.get_or_fetch(counting_loader(&calls, delay, Ok(vec![experience("e2")]))),
            cache.get_or_fetch(counting_loader(&calls, delay, Ok(vec![experience("e3")]))),
        );

        let first = first.unwrap();
        let second = second.unwrap();
        let third = third.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &third));
        assert_eq!(first[0].id, "e1");
    }

    #[tokio::test]
    async fn resolved_value_is_served_without_refetching() {
        let cache = ExperienceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("e1")])))
            .await
            .unwrap();
        let second = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![])))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&cache.peek().await.unwrap(), &first));
    }

    #[tokio::test]
    async fn failure_reaches_every_waiter_and_clears_the_slot() {
        let cache = ExperienceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let failure = ApiError::Transport {
            url: "http://backend/api/experiences".to_string(),
            message: "connection refused".to_string(),
        };
        let delay = Duration::from_millis(30);

        let (first, second) = tokio::join!(
            cache.get_or_fetch(counting_loader(&calls, delay, Err(failure.clone()))),
            cache.get_or_fetch(counting_loader(&calls, delay, Ok(vec![]))),
        );

        assert_eq!(first.unwrap_err(), failure);
        assert_eq!(second.unwrap_err(), failure);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.peek().await.is_none());

        let retried = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("e1")])))
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(retried.len(), 1);
    }

    #[tokio::test]
    async fn failure_after_callers_gave_up_is_retried() {
        let cache = ExperienceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let abandoned = tokio::time::timeout(
            Duration::from_millis(5),
            cache.get_or_fetch(counting_loader(
                &calls,
                Duration::from_millis(30),
                Err(ApiError::Task("boom".to_string())),
            )),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!cache.is_in_flight().await);

        let retried = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("e1")])))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(retried[0].id, "e1");
    }

    #[tokio::test]
    async fn invalidate_forces_a_new_fetch() {
        let cache = ExperienceCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("old")])))
            .await
            .unwrap();
        cache.invalidate().await;
        let fresh = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("new")])))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(fresh[0].id, "new");
    }

    #[tokio::test]
    async fn late_response_does_not_replace_newer_entry() {
        let cache = Arc::new(ExperienceCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let slow = {
            let cache = Arc::clone(&cache);
            let loader = counting_loader(
                &calls,
                Duration::from_millis(80),
                Ok(vec![experience("stale")]),
            );
            tokio::spawn(async move { cache.get_or_fetch(loader).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(cache.is_in_flight().await);

        cache.invalidate().await;
        let fresh = cache
            .get_or_fetch(counting_loader(&calls, Duration::ZERO, Ok(vec![experience("fresh")])))
            .await
            .unwrap();

        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale[0].id, "stale");

        let current = cache.peek().await.unwrap();
        assert!(Arc::ptr_eq(&current, &fresh));
        assert_eq!(current[0].id, "fresh");
    }
}
