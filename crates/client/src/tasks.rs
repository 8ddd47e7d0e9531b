//! Client for `/tasks`.

use std::sync::Arc;

use roster_core::models::task::{Task, TaskDraft};
use roster_core::types::DbId;

use crate::error::ClientError;
use crate::resource::ResourceClient;
use crate::transport::{ApiRequest, Transport};

pub type TaskClient = ResourceClient<Task, TaskDraft>;

impl TaskClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::for_collection(transport, "tasks")
    }

    /// `GET /tasks/personnel/{id}`
    pub async fn get_by_personnel(&self, personnel_id: DbId) -> Result<Vec<Task>, ClientError> {
        self.call(ApiRequest::get(self.path(&format!("/personnel/{personnel_id}"))))
            .await
    }

    /// `GET /tasks/personnel/{id}/completed`
    pub async fn get_completed_by_personnel(
        &self,
        personnel_id: DbId,
    ) -> Result<Vec<Task>, ClientError> {
        self.call(ApiRequest::get(
            self.path(&format!("/personnel/{personnel_id}/completed")),
        ))
        .await
    }

    /// `GET /tasks/personnel/{id}/pending`
    pub async fn get_pending_by_personnel(
        &self,
        personnel_id: DbId,
    ) -> Result<Vec<Task>, ClientError> {
        self.call(ApiRequest::get(
            self.path(&format!("/personnel/{personnel_id}/pending")),
        ))
        .await
    }

    /// `PUT /tasks/{id}/complete` with no body.
    ///
    /// Only the completion flag is the server's to set; the returned
    /// `statut` is whatever the server decided.
    pub async fn mark_as_completed(&self, id: DbId) -> Result<Task, ClientError> {
        self.call(ApiRequest::put(self.item_path(id, "/complete"), None))
            .await
    }
}
