//! Job-related API endpoints

use crate::TidewatchClient;
use crate::error::Result;
use tidewatch_core::domain::job::Job;
use tidewatch_core::dto::job::{CreateJob, DeleteJobResponse, JobFilter, JobQuery};

impl TidewatchClient {
    /// List jobs, newest first
    ///
    /// # Arguments
    /// * `filter` - Filters to apply; `JobFilter::default()` lists every job
    ///
    /// # Example
    /// ```no_run
    /// # use tidewatch_client::TidewatchClient;
    /// # use tidewatch_core::domain::job::{JobStatus, JobType};
    /// # use tidewatch_core::dto::job::JobFilter;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TidewatchClient::new("http://localhost:8000");
    /// let failed_tides = client.list_jobs(&JobFilter {
    ///     job_type: Some(JobType::TideForecast),
    ///     status: Some(JobStatus::Failed),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let url = format!("{}/api/jobs", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&JobQuery::from(filter))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Create a new job
    ///
    /// # Returns
    /// The created job, starting in the pending state
    pub async fn create_job(&self, req: CreateJob) -> Result<Job> {
        let url = format!("{}/api/jobs", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Send a failed or pending job back to pending
    pub async fn retry_job(&self, job_id: &str) -> Result<Job> {
        let url = format!("{}/api/jobs/{}/retry", self.base_url, job_id);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }

    /// Delete a job
    pub async fn delete_job(&self, job_id: &str) -> Result<DeleteJobResponse> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        let response = self.client.delete(&url).send().await?;

        self.handle_response(response).await
    }
}
