// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloud Tasks service for asynchronous activity analysis.
//!
//! Each published activity becomes one HTTP task that Cloud Tasks pushes
//! back to `/tasks/process-activity`, with retries and rate limiting handled
//! by the queue.
//!
//! Uses the official google-cloud-tasks-v2 SDK.

use crate::error::{AppError, Result};
use crate::models::Activity;
use serde::Serialize;

/// Path of the task handler that consumes activity events.
pub const PROCESS_ACTIVITY_PATH: &str = "/tasks/process-activity";

/// Cloud Tasks client wrapper.
pub struct TasksService {
    project_id: String,
    location: String,
    queue_name: String,
}

impl TasksService {
    pub fn new(project_id: &str, region: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            location: region.to_string(),
            queue_name: crate::config::ACTIVITY_QUEUE_NAME.to_string(),
        }
    }

    /// Full resource name of the activity queue.
    pub fn queue_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location, self.queue_name
        )
    }

    /// Queue a single activity for analysis.
    pub async fn queue_activity(&self, service_url: &str, activity: &Activity) -> Result<()> {
        tracing::debug!(activity_id = %activity.id, "Queuing activity analysis task");
        self.queue_task(service_url, PROCESS_ACTIVITY_PATH, activity)
            .await
    }

    /// Generic task queuing helper.
    async fn queue_task<T: Serialize>(
        &self,
        service_url: &str,
        endpoint: &str,
        payload: &T,
    ) -> Result<()> {
        use google_cloud_tasks_v2::client::CloudTasks;
        use google_cloud_tasks_v2::model::{HttpRequest, OidcToken, Task};

        let client = CloudTasks::builder()
            .build()
            .await
            .map_err(|e| AppError::Queue(format!("Cloud Tasks client error: {}", e)))?;

        let body = serde_json::to_vec(payload)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON error: {}", e)))?;

        let http_request = HttpRequest::default()
            .set_url(format!("{}{}", service_url, endpoint))
            .set_http_method("POST")
            .set_body(axum::body::Bytes::from(body))
            .set_headers(std::collections::HashMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]))
            .set_oidc_token(
                OidcToken::default()
                    .set_service_account_email(format!(
                        "activity-insights@{}.iam.gserviceaccount.com",
                        self.project_id
                    ))
                    .set_audience(service_url.to_string()),
            );

        let task = Task::default().set_http_request(http_request);

        let _response = client
            .create_task()
            .set_parent(self.queue_path())
            .set_task(task)
            .send()
            .await
            .map_err(|e| AppError::Queue(format!("Cloud Tasks create error: {}", e)))?;

        Ok(())
    }
}
