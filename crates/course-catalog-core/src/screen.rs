// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Screen models
//
// Frontend-agnostic state for the list and detail screens. Frontends render
// these and forward user intents; all behavior lives here or below.

use crate::catalog::CourseCatalog;
use crate::favorites::FavoritesController;
use crate::pipeline;
use crate::types::{AppError, Course, CourseList, FavoriteSet, LoadState, ViewFilterState};

/// Shown when the catalog is loaded but nothing survives the filters
pub const EMPTY_RESULTS_MESSAGE: &str = "No courses match your search or filters.";

/// Shown in the failed state next to the retry action
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching courses.";

/// State behind the course list screen
pub struct CourseListScreen {
    catalog: CourseCatalog,
    favorites: FavoritesController,
    favorite_set: FavoriteSet,
    filters: ViewFilterState,
}

impl CourseListScreen {
    pub fn new(catalog: CourseCatalog, favorites: FavoritesController) -> Self {
        Self {
            catalog,
            favorites,
            favorite_set: FavoriteSet::new(),
            filters: ViewFilterState::default(),
        }
    }

    /// First activation: fetch once, then read favorites
    pub async fn mount(&mut self) -> LoadState {
        let state = self.catalog.load().await;
        self.focus();
        state
    }

    /// Screen regained focus; favorites may have changed elsewhere
    pub fn focus(&mut self) {
        self.favorite_set = self.favorites.load_favorites();
    }

    /// User-triggered re-fetch from the failed state
    pub async fn retry(&mut self) -> LoadState {
        self.catalog.retry().await
    }

    pub fn state(&self) -> LoadState {
        self.catalog.state()
    }

    pub fn filters(&self) -> &ViewFilterState {
        &self.filters
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
    }

    pub fn select_instructor(&mut self, choice: impl Into<String>) {
        self.filters.selected_instructor = choice.into();
    }

    pub fn set_long_titles_only(&mut self, enabled: bool) {
        self.filters.show_long_titles_only = enabled;
    }

    pub fn set_sort_ascending(&mut self, ascending: bool) {
        self.filters.sort_ascending_by_word_count = ascending;
    }

    /// Courses to render, recomputed from the raw list and current filters
    pub fn visible_courses(&self) -> CourseList {
        self.catalog.with_state(|state| match state {
            LoadState::Ready(courses) => pipeline::project(courses, &self.filters),
            _ => Vec::new(),
        })
    }

    /// Instructor choices for the filter control, `"All"` first
    pub fn instructors(&self) -> Vec<String> {
        self.catalog.with_state(|state| {
            pipeline::instructors(state.courses().map(Vec::as_slice).unwrap_or_default())
        })
    }

    pub fn is_favorite(&self, course_id: u64) -> bool {
        self.favorite_set.contains(course_id)
    }

    pub fn favorite_set(&self) -> &FavoriteSet {
        &self.favorite_set
    }

    /// Empty-state message when loaded but every course was filtered out.
    ///
    /// `visible` is the output of [`Self::visible_courses`].
    pub fn empty_message(&self, visible: &[Course]) -> Option<&'static str> {
        let ready = self
            .catalog
            .with_state(|state| matches!(state, LoadState::Ready(_)));
        (ready && visible.is_empty()).then_some(EMPTY_RESULTS_MESSAGE)
    }

    /// Navigate to a course from the loaded list
    pub fn open(&self, course_id: u64) -> Option<CourseDetail> {
        let course = self.catalog.with_state(|state| {
            state
                .courses()
                .and_then(|courses| courses.iter().find(|c| c.id == course_id).cloned())
        })?;
        Some(CourseDetail::new(course, self.favorites.clone()))
    }
}

/// State behind the course detail screen
pub struct CourseDetail {
    course: Course,
    is_favorite: bool,
    favorites: FavoritesController,
}

impl CourseDetail {
    pub fn new(course: Course, favorites: FavoritesController) -> Self {
        let is_favorite = favorites.is_favorite(course.id);
        Self {
            course,
            is_favorite,
            favorites,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn word_count(&self) -> usize {
        self.course.word_count()
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Flip this course's favorite flag and persist it
    pub fn toggle_favorite(&mut self) -> Result<bool, AppError> {
        let favorites = self.favorites.toggle_favorite(self.course.id)?;
        self.is_favorite = favorites.contains(self.course.id);
        Ok(self.is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CourseSource;
    use crate::store::{KeyValueStore, MemoryStore, CACHED_COURSES_KEY};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedSource(Option<CourseList>);

    #[async_trait]
    impl CourseSource for FixedSource {
        async fn fetch_courses(&self) -> Result<CourseList, AppError> {
            self.0
                .clone()
                .ok_or_else(|| AppError::Network("offline".to_string()))
        }
    }

    fn course(id: u64, user_id: u64, title: &str) -> Course {
        Course {
            id,
            user_id,
            title: title.to_string(),
            body: format!("body {}", id),
        }
    }

    fn screen_with(courses: Option<CourseList>, store: Arc<MemoryStore>) -> CourseListScreen {
        let catalog = CourseCatalog::new(Arc::new(FixedSource(courses)), store.clone());
        CourseListScreen::new(catalog, FavoritesController::new(store))
    }

    fn sample() -> CourseList {
        vec![
            course(1, 1, "A B"),
            course(2, 2, "A B C D E"),
            course(3, 1, "A"),
        ]
    }

    #[tokio::test]
    async fn test_mount_projects_loaded_courses() {
        let mut screen = screen_with(Some(sample()), Arc::new(MemoryStore::new()));
        assert!(screen.visible_courses().is_empty());

        screen.mount().await;
        let ids: Vec<u64> = screen.visible_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(screen.instructors(), vec!["All", "1", "2"]);
        assert_eq!(screen.empty_message(&screen.visible_courses()), None);
    }

    #[tokio::test]
    async fn test_intents_update_projection() {
        let mut screen = screen_with(Some(sample()), Arc::new(MemoryStore::new()));
        screen.mount().await;

        screen.set_long_titles_only(true);
        let ids: Vec<u64> = screen.visible_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);

        screen.select_instructor("1");
        assert!(screen.visible_courses().is_empty());
        assert_eq!(
            screen.empty_message(&screen.visible_courses()),
            Some(EMPTY_RESULTS_MESSAGE)
        );

        screen.set_long_titles_only(false);
        screen.set_sort_ascending(false);
        screen.set_search_term("a");
        let ids: Vec<u64> = screen.visible_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_failed_state_without_cache() {
        let mut screen = screen_with(None, Arc::new(MemoryStore::new()));
        assert_eq!(screen.mount().await, LoadState::Failed);
        assert_eq!(screen.instructors(), vec!["All"]);
        assert_eq!(screen.empty_message(&screen.visible_courses()), None);
        assert_eq!(screen.retry().await, LoadState::Failed);
    }

    #[tokio::test]
    async fn test_offline_uses_cache() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(CACHED_COURSES_KEY, r#"[{"id":9,"userId":4,"title":"Cached","body":""}]"#)
            .unwrap();

        let mut screen = screen_with(None, store);
        screen.mount().await;
        let ids: Vec<u64> = screen.visible_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[tokio::test]
    async fn test_focus_reloads_favorites_from_detail() {
        let mut screen = screen_with(Some(sample()), Arc::new(MemoryStore::new()));
        screen.mount().await;
        assert!(!screen.is_favorite(2));

        let mut detail = screen.open(2).unwrap();
        assert_eq!(detail.word_count(), 5);
        assert!(!detail.is_favorite());
        assert!(detail.toggle_favorite().unwrap());

        // Not visible until the list screen regains focus
        assert!(!screen.is_favorite(2));
        screen.focus();
        assert!(screen.is_favorite(2));

        assert!(!detail.toggle_favorite().unwrap());
        screen.focus();
        assert!(!screen.is_favorite(2));
    }

    #[tokio::test]
    async fn test_detail_counts_blank_title_as_one_word() {
        let courses = vec![course(1, 1, "Solo"), course(2, 1, "  ")];
        let mut screen = screen_with(Some(courses), Arc::new(MemoryStore::new()));
        screen.mount().await;

        assert_eq!(screen.open(2).unwrap().word_count(), 1);
        let ids: Vec<u64> = screen.visible_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_open_unknown_course() {
        let mut screen = screen_with(Some(sample()), Arc::new(MemoryStore::new()));
        assert!(screen.open(1).is_none());
        screen.mount().await;
        assert!(screen.open(404).is_none());
        assert_eq!(screen.open(1).unwrap().course().title, "A B");
    }
}
