//! Client for `/personnels`.

use std::sync::Arc;

use roster_core::models::personnel::{Personnel, PersonnelDraft};
use roster_core::types::DbId;

use crate::error::ClientError;
use crate::resource::ResourceClient;
use crate::transport::{ApiRequest, Transport};

pub type PersonnelClient = ResourceClient<Personnel, PersonnelDraft>;

impl PersonnelClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::for_collection(transport, "personnels")
    }

    /// `GET /personnels/{id}/tasks` -- the record with `taches` embedded.
    pub async fn get_with_tasks(&self, id: DbId) -> Result<Personnel, ClientError> {
        self.call(ApiRequest::get(self.item_path(id, "/tasks"))).await
    }
}
