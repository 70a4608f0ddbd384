//! Pipeline-related API endpoints

use crate::TidewatchClient;
use crate::error::Result;
use tidewatch_core::domain::pipeline::Pipeline;
use tidewatch_core::dto::pipeline::CreatePipeline;

impl TidewatchClient {
    /// Create a new pipeline
    ///
    /// # Arguments
    /// * `req` - The pipeline creation request
    ///
    /// # Returns
    /// The created pipeline
    pub async fn create_pipeline(&self, req: CreatePipeline) -> Result<Pipeline> {
        let url = format!("{}/api/pipelines", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// List all pipelines
    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>> {
        let url = format!("{}/api/pipelines", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Get a pipeline by ID
    pub async fn get_pipeline(&self, pipeline_id: &str) -> Result<Pipeline> {
        let url = format!("{}/api/pipelines/{}", self.base_url, pipeline_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
