//! HTTP gateway implementation
//!
//! Talks to the remote persistence service over HTTP. Every endpoint wraps
//! its payload in a `{success, data, error}` envelope.

use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

use super::trait_def::{Gateway, GatewayError};
use super::wire::{RemoteList, RemoteSubtask, RemoteTask};

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Generic API response structure
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_data(self) -> Result<T, GatewayError> {
        if self.success {
            self.data.ok_or(GatewayError::MissingData)
        } else {
            Err(GatewayError::Api(
                self.error.unwrap_or_else(|| "Unknown API error".to_string()),
            ))
        }
    }
}

#[derive(Serialize)]
struct TitleRequest<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

/// HTTP gateway for the remote to-do service
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: Arc<ReqwestClient>,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Create a new gateway with default configuration
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a new gateway with custom configuration
    pub fn with_config(config: GatewayConfig) -> Self {
        Self {
            http_client: Arc::new(ReqwestClient::new()),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn create_list(&self, title: &str) -> Result<RemoteList, GatewayError> {
        let response = self
            .http_client
            .post(self.url("/api/lists"))
            .json(&TitleRequest { title })
            .send()
            .await?;
        let api_response: ApiResponse<RemoteList> = response.json().await?;
        api_response.into_data()
    }

    async fn update_list(&self, id: &str, title: &str) -> Result<RemoteList, GatewayError> {
        let response = self
            .http_client
            .put(self.url(&format!("/api/lists/{id}")))
            .json(&TitleRequest { title })
            .send()
            .await?;
        let api_response: ApiResponse<RemoteList> = response.json().await?;
        api_response.into_data()
    }

    async fn delete_list(&self, id: &str) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/lists/{id}")))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let api_response: ApiResponse<()> = response.json().await?;
            Err(GatewayError::Api(
                api_response
                    .error
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            ))
        }
    }

    async fn create_task(&self, list_id: &str, text: &str) -> Result<RemoteTask, GatewayError> {
        let response = self
            .http_client
            .post(self.url(&format!("/api/lists/{list_id}/tasks")))
            .json(&TextRequest { text })
            .send()
            .await?;
        let api_response: ApiResponse<RemoteTask> = response.json().await?;
        api_response.into_data()
    }

    async fn toggle_task_completion(&self, task_id: &str) -> Result<RemoteTask, GatewayError> {
        let response = self
            .http_client
            .post(self.url(&format!("/api/tasks/{task_id}/toggle")))
            .send()
            .await?;
        let api_response: ApiResponse<RemoteTask> = response.json().await?;
        api_response.into_data()
    }

    async fn delete_task(&self, task_id: &str) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/tasks/{task_id}")))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let api_response: ApiResponse<()> = response.json().await?;
            Err(GatewayError::Api(
                api_response
                    .error
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            ))
        }
    }

    async fn create_subtask(
        &self,
        task_id: &str,
        text: &str,
    ) -> Result<RemoteSubtask, GatewayError> {
        let response = self
            .http_client
            .post(self.url(&format!("/api/tasks/{task_id}/subtasks")))
            .json(&TextRequest { text })
            .send()
            .await?;
        let api_response: ApiResponse<RemoteSubtask> = response.json().await?;
        api_response.into_data()
    }

    async fn toggle_subtask_completion(
        &self,
        subtask_id: &str,
    ) -> Result<RemoteSubtask, GatewayError> {
        let response = self
            .http_client
            .post(self.url(&format!("/api/subtasks/{subtask_id}/toggle")))
            .send()
            .await?;
        let api_response: ApiResponse<RemoteSubtask> = response.json().await?;
        api_response.into_data()
    }

    async fn delete_subtask(&self, subtask_id: &str) -> Result<(), GatewayError> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/subtasks/{subtask_id}")))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let api_response: ApiResponse<()> = response.json().await?;
            Err(GatewayError::Api(
                api_response
                    .error
                    .unwrap_or_else(|| "Unknown API error".to_string()),
            ))
        }
    }

    async fn get_all_lists(&self) -> Result<Vec<RemoteList>, GatewayError> {
        let response = self.http_client.get(self.url("/api/lists")).send().await?;
        let api_response: ApiResponse<Vec<RemoteList>> = response.json().await?;
        api_response.into_data()
    }

    async fn get_tasks_by_list(&self, list_id: &str) -> Result<Vec<RemoteTask>, GatewayError> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/lists/{list_id}/tasks")))
            .send()
            .await?;
        let api_response: ApiResponse<Vec<RemoteTask>> = response.json().await?;
        api_response.into_data()
    }

    async fn get_subtasks_by_task(
        &self,
        task_id: &str,
    ) -> Result<Vec<RemoteSubtask>, GatewayError> {
        let response = self
            .http_client
            .get(self.url(&format!("/api/tasks/{task_id}/subtasks")))
            .send()
            .await?;
        let api_response: ApiResponse<Vec<RemoteSubtask>> = response.json().await?;
        api_response.into_data()
    }
}
