// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Shared logic for all frontends
//
// This crate provides:
// - Course, FavoriteSet, ViewFilterState, CatalogSettings and AppError types
// - KeyValueStore with file and in-memory backends
// - HttpCourseSource for the remote course endpoint
// - CourseCatalog (fetch with cached fallback) and FavoritesController
// - The derived view pipeline and the list/detail screen models
//
// Frontend-specific code lives in separate crates.

pub mod catalog;
pub mod favorites;
pub mod pipeline;
pub mod screen;
pub mod settings;
pub mod source;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use catalog::CourseCatalog;
pub use favorites::FavoritesController;
pub use pipeline::{instructor_label, instructors, project, word_count};
pub use screen::{CourseDetail, CourseListScreen, EMPTY_RESULTS_MESSAGE, FETCH_ERROR_MESSAGE};
pub use settings::SettingsStore;
pub use source::{CourseSource, HttpCourseSource};
pub use store::{FileStore, KeyValueStore, MemoryStore, CACHED_COURSES_KEY, FAVORITES_KEY};
pub use types::{
    AppError, CatalogSettings, Course, CourseList, FavoriteSet, LoadState, ViewFilterState,
    ALL_INSTRUCTORS,
};
