// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentinel instructor choice that disables the instructor filter
pub const ALL_INSTRUCTORS: &str = "All";

/// Default course endpoint
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// A single catalog entry as returned by the remote source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u64,
    /// Owning instructor
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

impl Course {
    /// Number of whitespace-delimited tokens in the trimmed title
    pub fn word_count(&self) -> usize {
        crate::pipeline::word_count(&self.title)
    }
}

/// Ordered course sequence, either freshly fetched or loaded from cache
pub type CourseList = Vec<Course>;

/// Favorited course ids, each present at most once, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u64>", into = "Vec<u64>")]
pub struct FavoriteSet {
    ids: Vec<u64>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Remove `id` if present, add it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.contains(id) {
            self.ids.retain(|fav| *fav != id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[u64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<u64>> for FavoriteSet {
    fn from(raw: Vec<u64>) -> Self {
        let mut ids = Vec::with_capacity(raw.len());
        for id in raw {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }
}

impl From<FavoriteSet> for Vec<u64> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

/// Transient filter, sort and search state of the list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilterState {
    /// `"All"` or an instructor id rendered as a string
    pub selected_instructor: String,
    /// Keep only titles with at least five words
    pub show_long_titles_only: bool,
    /// Sort direction by title word count
    pub sort_ascending_by_word_count: bool,
    pub search_term: String,
}

impl Default for ViewFilterState {
    fn default() -> Self {
        Self {
            selected_instructor: ALL_INSTRUCTORS.to_string(),
            show_long_titles_only: false,
            sort_ascending_by_word_count: true,
            search_term: String::new(),
        }
    }
}

/// Outcome of the fetch-and-cache controller, as seen by the list screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready(CourseList),
    /// Fetch failed and no cached snapshot exists; needs a user retry
    Failed,
}

impl LoadState {
    pub fn courses(&self) -> Option<&CourseList> {
        match self {
            Self::Ready(courses) => Some(courses),
            _ => None,
        }
    }
}

/// Application settings (frontend-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSettings {
    /// Course list endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Storage directory override. None means the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Whole-request timeout. None means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            data_dir: None,
            request_timeout_secs: None,
        }
    }
}

impl CatalogSettings {
    /// Check that the endpoint is an http(s) URL
    pub fn validate(&self) -> Result<(), AppError> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| AppError::InvalidConfig(format!("Invalid apiUrl '{}': {}", self.api_url, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(AppError::InvalidConfig(format!(
                "Unsupported apiUrl scheme: {}",
                other
            ))),
        }
    }

    /// Resolve the directory holding the persisted records
    pub fn resolve_data_dir(&self) -> Result<PathBuf, AppError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        directories::ProjectDirs::from("com", "coursecatalog", "catalog")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AppError::FileIo("Could not determine data directory".to_string()))
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {0}")]
    HttpStatus(u16),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::HttpStatus(status.as_u16())
        } else {
            AppError::Network(err.to_string())
        }
    }
}
