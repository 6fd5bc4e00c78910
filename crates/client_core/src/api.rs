use reqwest::{Client, Response};
use shared::{
    domain::{Work, WorkId},
    protocol::WorkPayload,
};
use tracing::{debug, info, warn};

use crate::{
    draft::WorkDraft,
    error::{Operation, WorksError},
    gallery::sort_newest_first,
    source::{decode_work_list, endpoint},
};

/// Admin client for the works collection endpoint.
#[derive(Clone)]
pub struct WorksClient {
    http: Client,
    api_url: String,
}

impl WorksClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// All works, newest first.
    pub async fn list_works(&self) -> Result<Vec<Work>, WorksError> {
        let response = self
            .http
            .get(endpoint(&self.api_url, "works"))
            .send()
            .await
            .map_err(|source| transport(Operation::List, source))?;
        let body = checked(Operation::List, response)?
            .text()
            .await
            .map_err(|source| transport(Operation::List, source))?;

        let mut works = decode_work_list(&body)?;
        sort_newest_first(&mut works);
        Ok(works)
    }

    /// Creates a work. Returns the stored record when the server echoes one.
    pub async fn create_work(&self, payload: &WorkPayload) -> Result<Option<Work>, WorksError> {
        let response = self
            .http
            .post(endpoint(&self.api_url, "works"))
            .json(payload)
            .send()
            .await
            .map_err(|source| transport(Operation::Create, source))?;
        let body = checked(Operation::Create, response)?
            .text()
            .await
            .map_err(|source| transport(Operation::Create, source))?;

        let created = match serde_json::from_str::<Work>(&body) {
            Ok(work) => Some(work),
            Err(error) => {
                debug!(%error, "create response carried no work record");
                None
            }
        };
        info!(
            title = %payload.title,
            id = created.as_ref().map(|work| work.id.as_str()),
            "work created"
        );
        Ok(created)
    }

    pub async fn update_work(&self, id: &WorkId, payload: &WorkPayload) -> Result<(), WorksError> {
        let response = self
            .http
            .put(endpoint(&self.api_url, &format!("works/{id}")))
            .json(payload)
            .send()
            .await
            .map_err(|source| transport(Operation::Update, source))?;
        checked(Operation::Update, response)?;
        info!(%id, "work updated");
        Ok(())
    }

    pub async fn delete_work(&self, id: &WorkId) -> Result<(), WorksError> {
        let response = self
            .http
            .delete(endpoint(&self.api_url, &format!("works/{id}")))
            .send()
            .await
            .map_err(|source| transport(Operation::Delete, source))?;
        checked(Operation::Delete, response)?;
        info!(%id, "work deleted");
        Ok(())
    }

    /// Submits a draft: update when it edits an existing work, create otherwise.
    pub async fn submit_draft(&self, draft: &WorkDraft) -> Result<Option<Work>, WorksError> {
        let payload = draft.to_payload()?;
        match &draft.editing {
            Some(id) => {
                self.update_work(id, &payload).await?;
                Ok(Some(payload.into_work(id.clone())))
            }
            None => self.create_work(&payload).await,
        }
    }
}

fn transport(operation: Operation, source: reqwest::Error) -> WorksError {
    WorksError::Transport { operation, source }
}

fn checked(operation: Operation, response: Response) -> Result<Response, WorksError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(operation = operation.as_str(), %status, "works endpoint rejected request");
    Err(WorksError::Rejected {
        operation,
        status: status.as_u16(),
    })
}

/// Admin list state: the last successfully loaded works. Failed calls leave it
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct AdminWorkList {
    works: Vec<Work>,
    loaded: bool,
}

impl AdminWorkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn works(&self) -> &[Work] {
        &self.works
    }

    /// True once a refresh has finished, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub async fn refresh(&mut self, client: &WorksClient) -> Result<&[Work], WorksError> {
        let result = client.list_works().await;
        self.loaded = true;
        self.works = result?;
        Ok(&self.works)
    }

    pub async fn delete(&mut self, client: &WorksClient, id: &WorkId) -> Result<(), WorksError> {
        client.delete_work(id).await?;
        self.works.retain(|work| &work.id != id);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
