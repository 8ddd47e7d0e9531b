//! Generic CRUD client for one REST collection.

use std::marker::PhantomData;
use std::sync::Arc;

use roster_core::models::DeleteOutcome;
use roster_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::transport::{ApiRequest, Transport};

/// Typed client for a collection such as `/personnels` or `/tasks`.
///
/// `E` is the entity returned by the backend, `D` the partial body sent on
/// create and update. Failures are logged once here and returned to the
/// caller unchanged; nothing is retried.
pub struct ResourceClient<E, D> {
    transport: Arc<dyn Transport>,
    collection: &'static str,
    _marker: PhantomData<fn() -> (E, D)>,
}

impl<E, D> Clone for ResourceClient<E, D> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            collection: self.collection,
            _marker: PhantomData,
        }
    }
}

impl<E, D> ResourceClient<E, D>
where
    E: DeserializeOwned,
    D: Serialize,
{
    /// * `collection` - path segment below the base URL, without slashes.
    pub fn for_collection(transport: Arc<dyn Transport>, collection: &'static str) -> Self {
        Self {
            transport,
            collection,
            _marker: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// `GET /{collection}`
    pub async fn get_all(&self) -> Result<Vec<E>, ClientError> {
        self.call(ApiRequest::get(self.path(""))).await
    }

    /// `GET /{collection}/{id}`
    pub async fn get_by_id(&self, id: DbId) -> Result<E, ClientError> {
        self.call(ApiRequest::get(self.item_path(id, ""))).await
    }

    /// `POST /{collection}`
    pub async fn create(&self, draft: &D) -> Result<E, ClientError> {
        let body = serde_json::to_value(draft)?;
        self.call(ApiRequest::post(self.path(""), body)).await
    }

    /// `PUT /{collection}/{id}`
    pub async fn update(&self, id: DbId, draft: &D) -> Result<E, ClientError> {
        let body = serde_json::to_value(draft)?;
        self.call(ApiRequest::put(self.item_path(id, ""), Some(body)))
            .await
    }

    /// `DELETE /{collection}/{id}`. No check for an earlier deletion.
    pub async fn delete(&self, id: DbId) -> Result<DeleteOutcome, ClientError> {
        self.call(ApiRequest::delete(self.item_path(id, ""))).await
    }

    // ---- crate helpers ----

    /// `/{collection}{suffix}`
    pub(crate) fn path(&self, suffix: &str) -> String {
        format!("/{}{}", self.collection, suffix)
    }

    /// `/{collection}/{id}{suffix}`
    pub(crate) fn item_path(&self, id: DbId, suffix: &str) -> String {
        format!("/{}/{}{}", self.collection, id, suffix)
    }

    /// Send a request and decode the body, logging any failure.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let method = request.method;
        let path = request.path.clone();

        let result = match self.transport.send(request).await {
            Ok(value) => serde_json::from_value(value).map_err(ClientError::from),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::error!(method = %method, path = %path, error = %e, "API request failed");
        }
        result
    }
}
