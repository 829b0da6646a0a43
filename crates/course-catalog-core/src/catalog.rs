// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Fetch-and-cache controller
//
// Fetches the course list from the remote source and keeps a full-overwrite
// snapshot in the local store. When the fetch fails the snapshot is used
// instead; only a failed fetch with no snapshot surfaces as an error state.

use crate::source::CourseSource;
use crate::store::{read_json, write_json, KeyValueStore, CACHED_COURSES_KEY};
use crate::types::{CourseList, LoadState};
use std::sync::{Arc, PoisonError, RwLock};

/// Loads courses from the remote source with a cached fallback
pub struct CourseCatalog {
    source: Arc<dyn CourseSource>,
    store: Arc<dyn KeyValueStore>,
    state: RwLock<LoadState>,
}

impl CourseCatalog {
    pub fn new(source: Arc<dyn CourseSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            source,
            store,
            state: RwLock::new(LoadState::Loading),
        }
    }

    /// Current load state
    pub fn state(&self) -> LoadState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&LoadState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&*state)
    }

    /// Fetch the course list once, falling back to the cached snapshot.
    ///
    /// Overlapping calls are not serialized; whichever finishes last
    /// determines both the state and the cached snapshot.
    pub async fn load(&self) -> LoadState {
        self.set_state(LoadState::Loading);
        tracing::info!("Fetching courses");

        let next = match self.source.fetch_courses().await {
            Ok(courses) => {
                tracing::info!("Fetched {} courses", courses.len());
                self.write_cache(&courses);
                LoadState::Ready(courses)
            }
            Err(e) => {
                tracing::warn!("Course fetch failed: {}", e);
                match self.cached_courses() {
                    Some(cached) => {
                        tracing::info!("Using {} cached courses", cached.len());
                        LoadState::Ready(cached)
                    }
                    None => {
                        tracing::error!("No cached courses available");
                        LoadState::Failed
                    }
                }
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Re-attempt the fetch after a failure. No automatic retries exist.
    pub async fn retry(&self) -> LoadState {
        tracing::info!("Retrying course fetch");
        self.load().await
    }

    /// Cached snapshot, or `None` when absent or unreadable
    pub fn cached_courses(&self) -> Option<CourseList> {
        read_json(self.store.as_ref(), CACHED_COURSES_KEY)
    }

    fn write_cache(&self, courses: &CourseList) {
        // A failed cache write must not turn a successful fetch into a failure
        if let Err(e) = write_json(self.store.as_ref(), CACHED_COURSES_KEY, courses) {
            tracing::error!("Failed to cache courses: {}", e);
        }
    }

    fn set_state(&self, state: LoadState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{AppError, Course};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        result: Result<CourseList, ()>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn ok(courses: CourseList) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(courses),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                result: Err(()),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CourseSource for StubSource {
        async fn fetch_courses(&self) -> Result<CourseList, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .map_err(|_| AppError::Network("unreachable".to_string()))
        }
    }

    fn course(id: u64) -> Course {
        Course {
            id,
            user_id: 1,
            title: format!("Course {}", id),
            body: "body".to_string(),
        }
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let catalog = CourseCatalog::new(StubSource::failing(), Arc::new(MemoryStore::new()));
        assert_eq!(catalog.state(), LoadState::Loading);
    }

    #[tokio::test]
    async fn test_success_overwrites_cache() {
        let store = Arc::new(MemoryStore::new());
        store.set(CACHED_COURSES_KEY, r#"[{"id":99,"userId":1,"title":"old","body":""}]"#).unwrap();

        let catalog = CourseCatalog::new(StubSource::ok(vec![course(1), course(2)]), store.clone());
        let state = catalog.load().await;

        assert_eq!(state, LoadState::Ready(vec![course(1), course(2)]));
        assert_eq!(catalog.state(), state);
        assert_eq!(catalog.cached_courses(), Some(vec![course(1), course(2)]));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_cache() {
        let store = Arc::new(MemoryStore::new());
        store.set(CACHED_COURSES_KEY, r#"[{"id":9,"userId":2,"title":"cached","body":"b"}]"#).unwrap();

        let catalog = CourseCatalog::new(StubSource::failing(), store);
        let state = catalog.load().await;

        let courses = state.courses().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].id, 9);
    }

    #[tokio::test]
    async fn test_failure_without_cache_is_failed() {
        let source = StubSource::failing();
        let catalog = CourseCatalog::new(source.clone(), Arc::new(MemoryStore::new()));

        assert_eq!(catalog.load().await, LoadState::Failed);
        assert_eq!(catalog.retry().await, LoadState::Failed);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupt_cache_counts_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(CACHED_COURSES_KEY, "garbage").unwrap();

        let catalog = CourseCatalog::new(StubSource::failing(), store);
        assert_eq!(catalog.load().await, LoadState::Failed);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_untouched() {
        let store = Arc::new(MemoryStore::new());
        let cached = r#"[{"id":9,"userId":2,"title":"cached","body":"b"}]"#;
        store.set(CACHED_COURSES_KEY, cached).unwrap();

        let catalog = CourseCatalog::new(StubSource::failing(), store.clone());
        catalog.load().await;
        assert_eq!(store.get(CACHED_COURSES_KEY).unwrap().as_deref(), Some(cached));
    }
}
