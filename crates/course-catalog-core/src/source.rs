// SPDX-License-Identifier: AGPL-3.0
// Course Catalog Core - Remote course source
//
// The remote endpoint is an opaque provider: any transport error,
// non-success status or unparseable body counts as a failed fetch.

use crate::types::{AppError, CatalogSettings, CourseList};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Provider of the full course list
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch_courses(&self) -> Result<CourseList, AppError>;
}

/// HTTP client for the course endpoint
pub struct HttpCourseSource {
    http_client: Client,
    url: String,
}

impl HttpCourseSource {
    pub fn new(url: impl Into<String>) -> Result<Self, AppError> {
        Self::build(url.into(), None)
    }

    /// Build a source from validated settings
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, AppError> {
        settings.validate()?;
        Self::build(
            settings.api_url.clone(),
            settings.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(url: String, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client, url })
    }
}

#[async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch_courses(&self) -> Result<CourseList, AppError> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        let courses = response.json::<CourseList>().await?;
        Ok(courses)
    }
}
