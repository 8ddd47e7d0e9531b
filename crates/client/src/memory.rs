//! In-process stand-in for the REST backend.
//!
//! [`InMemoryTransport`] answers every route of the personnel/task API
//! from a mutable fixture, records each request it receives, and can be
//! told to fail. It behaves like the real server where the client relies
//! on it: ids and timestamps are assigned on create, deleting a person
//! leaves their tasks alone, and completing a task only flips `realisee`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use roster_core::error::CoreError;
use roster_core::models::personnel::{Personnel, PersonnelDraft};
use roster_core::models::task::{Task, TaskDraft};
use roster_core::models::DeleteOutcome;
use roster_core::types::DbId;
use serde::Serialize;

use crate::error::ClientError;
use crate::fixtures;
use crate::transport::{ApiRequest, Method, Transport};

/// A request as seen by the in-memory backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
struct Store {
    personnel: Vec<Personnel>,
    tasks: Vec<Task>,
    next_personnel_id: DbId,
    next_task_id: DbId,
    requests: Vec<RecordedRequest>,
    offline: bool,
    failures: HashMap<(Method, String), u16>,
}

pub struct InMemoryTransport {
    store: Mutex<Store>,
}

impl InMemoryTransport {
    /// Backend with no records.
    pub fn empty() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    /// Backend preloaded with the demo fixture (5 people, 10 tasks).
    pub fn seeded() -> Self {
        Self::with_data(fixtures::personnel(), fixtures::tasks())
    }

    pub fn with_data(personnel: Vec<Personnel>, tasks: Vec<Task>) -> Self {
        let next_personnel_id = personnel.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1;
        let next_task_id = tasks.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(Store {
                personnel,
                tasks,
                next_personnel_id,
                next_task_id,
                ..Store::default()
            }),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// How many times `method path` was requested.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// While offline every request fails as unreachable (still recorded).
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Answer `method path` with `status` until [`clear_failures`](Self::clear_failures).
    pub fn fail_with_status(&self, method: Method, path: &str, status: u16) {
        self.lock()
            .failures
            .insert((method, path.to_string()), status);
    }

    pub fn clear_failures(&self) {
        let mut store = self.lock();
        store.failures.clear();
        store.offline = false;
    }

    /// Current server-side copy of the records.
    pub fn snapshot(&self) -> (Vec<Personnel>, Vec<Task>) {
        let store = self.lock();
        (store.personnel.clone(), store.tasks.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, ClientError> {
        let mut store = self.lock();
        store.requests.push(RecordedRequest {
            method: request.method,
            path: request.path.clone(),
            body: request.body.clone(),
        });

        if store.offline {
            return Err(ClientError::Unreachable("in-memory backend is offline".into()));
        }
        if let Some(&status) = store.failures.get(&(request.method, request.path.clone())) {
            return Err(server_error(status, "injected failure"));
        }

        route(&mut store, &request)
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

fn route(store: &mut Store, request: &ApiRequest) -> Result<serde_json::Value, ClientError> {
    let segments: Vec<&str> = request
        .path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (request.method, segments.as_slice()) {
        (Method::Get, ["personnels"]) => to_json(&store.personnel),
        (Method::Get, ["personnels", id]) => to_json(find_personnel(store, parse_id(id)?)?),
        (Method::Get, ["personnels", id, "tasks"]) => {
            let id = parse_id(id)?;
            let mut person = find_personnel(store, id)?.clone();
            person.tasks = Some(tasks_where(store, |t| t.personnel_id == id));
            to_json(&person)
        }
        (Method::Post, ["personnels"]) => create_personnel(store, body_of(request)?),
        (Method::Put, ["personnels", id]) => {
            update_personnel(store, parse_id(id)?, body_of(request)?)
        }
        (Method::Delete, ["personnels", id]) => {
            let id = parse_id(id)?;
            find_personnel(store, id)?;
            store.personnel.retain(|p| p.id != Some(id));
            to_json(&DeleteOutcome { success: true })
        }

        (Method::Get, ["tasks"]) => to_json(&tasks_where(store, |_| true)),
        (Method::Get, ["tasks", id]) => {
            to_json(&task_view(store, parse_id(id)?)?)
        }
        (Method::Get, ["tasks", "personnel", id]) => {
            let id = parse_id(id)?;
            to_json(&tasks_where(store, |t| t.personnel_id == id))
        }
        (Method::Get, ["tasks", "personnel", id, "completed"]) => {
            let id = parse_id(id)?;
            to_json(&tasks_where(store, |t| t.personnel_id == id && t.completed))
        }
        (Method::Get, ["tasks", "personnel", id, "pending"]) => {
            let id = parse_id(id)?;
            to_json(&tasks_where(store, |t| t.personnel_id == id && !t.completed))
        }
        (Method::Post, ["tasks"]) => create_task(store, body_of(request)?),
        (Method::Put, ["tasks", id]) => update_task(store, parse_id(id)?, body_of(request)?),
        (Method::Put, ["tasks", id, "complete"]) => {
            let id = parse_id(id)?;
            let now = now();
            let task = find_task_mut(store, id)?;
            task.completed = true;
            task.updated_at = Some(now);
            to_json(&task_view(store, id)?)
        }
        (Method::Delete, ["tasks", id]) => {
            let id = parse_id(id)?;
            find_task(store, id)?;
            store.tasks.retain(|t| t.id != Some(id));
            to_json(&DeleteOutcome { success: true })
        }

        _ => Err(server_error(
            404,
            &format!("No route for {} {}", request.method, request.path),
        )),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn create_personnel(store: &mut Store, body: serde_json::Value) -> Result<serde_json::Value, ClientError> {
    let draft: PersonnelDraft = parse_body(body)?;
    let (Some(family_name), Some(given_name), Some(email)) =
        (draft.family_name, draft.given_name, draft.email)
    else {
        return Err(server_error(400, "nom, prenom and email are required"));
    };

    let id = store.next_personnel_id;
    store.next_personnel_id += 1;
    let now = now();
    let person = Personnel {
        id: Some(id),
        family_name,
        given_name,
        email,
        phone: draft.phone,
        job_title: draft.job_title,
        department: draft.department,
        created_at: Some(now.clone()),
        updated_at: Some(now),
        tasks: None,
    };
    store.personnel.push(person.clone());
    to_json(&person)
}

fn update_personnel(
    store: &mut Store,
    id: DbId,
    body: serde_json::Value,
) -> Result<serde_json::Value, ClientError> {
    let draft: PersonnelDraft = parse_body(body)?;
    let now = now();
    let person = store
        .personnel
        .iter_mut()
        .find(|p| p.id == Some(id))
        .ok_or_else(|| not_found("personnel", id))?;

    if let Some(v) = draft.family_name {
        person.family_name = v;
    }
    if let Some(v) = draft.given_name {
        person.given_name = v;
    }
    if let Some(v) = draft.email {
        person.email = v;
    }
    if draft.phone.is_some() {
        person.phone = draft.phone;
    }
    if draft.job_title.is_some() {
        person.job_title = draft.job_title;
    }
    if draft.department.is_some() {
        person.department = draft.department;
    }
    person.updated_at = Some(now);
    to_json(&*person)
}

fn create_task(store: &mut Store, body: serde_json::Value) -> Result<serde_json::Value, ClientError> {
    let draft: TaskDraft = parse_body(body)?;
    let (Some(title), Some(personnel_id)) = (draft.title, draft.personnel_id) else {
        return Err(server_error(400, "titre and personnelId are required"));
    };
    find_personnel(store, personnel_id)?;

    let id = store.next_task_id;
    store.next_task_id += 1;
    let now = now();
    store.tasks.push(Task {
        id: Some(id),
        title,
        description: draft.description,
        due_date: draft.due_date,
        priority: draft.priority,
        status: draft.status,
        completed: draft.completed.unwrap_or(false),
        personnel_id,
        personnel: None,
        created_at: Some(now.clone()),
        updated_at: Some(now),
    });
    to_json(&task_view(store, id)?)
}

fn update_task(
    store: &mut Store,
    id: DbId,
    body: serde_json::Value,
) -> Result<serde_json::Value, ClientError> {
    let draft: TaskDraft = parse_body(body)?;
    if let Some(owner) = draft.personnel_id {
        find_personnel(store, owner)?;
    }
    let now = now();
    let task = find_task_mut(store, id)?;

    if let Some(v) = draft.title {
        task.title = v;
    }
    if draft.description.is_some() {
        task.description = draft.description;
    }
    if draft.due_date.is_some() {
        task.due_date = draft.due_date;
    }
    if draft.priority.is_some() {
        task.priority = draft.priority;
    }
    if draft.status.is_some() {
        task.status = draft.status;
    }
    if let Some(v) = draft.completed {
        task.completed = v;
    }
    if let Some(v) = draft.personnel_id {
        task.personnel_id = v;
    }
    task.updated_at = Some(now);
    to_json(&task_view(store, id)?)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Matching tasks with the owner snapshot filled in, as the server does.
fn tasks_where(store: &Store, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
    store
        .tasks
        .iter()
        .filter(|t| keep(t))
        .map(|t| {
            let mut task = t.clone();
            task.personnel = store
                .personnel
                .iter()
                .find(|p| p.id == Some(t.personnel_id))
                .cloned()
                .map(Box::new);
            task
        })
        .collect()
}

/// One task with its owner snapshot.
fn task_view(store: &Store, id: DbId) -> Result<Task, ClientError> {
    tasks_where(store, |t| t.id == Some(id))
        .into_iter()
        .next()
        .ok_or_else(|| not_found("task", id))
}

fn find_personnel(store: &Store, id: DbId) -> Result<&Personnel, ClientError> {
    store
        .personnel
        .iter()
        .find(|p| p.id == Some(id))
        .ok_or_else(|| not_found("personnel", id))
}

fn find_task(store: &Store, id: DbId) -> Result<&Task, ClientError> {
    store
        .tasks
        .iter()
        .find(|t| t.id == Some(id))
        .ok_or_else(|| not_found("task", id))
}

fn find_task_mut(store: &mut Store, id: DbId) -> Result<&mut Task, ClientError> {
    store
        .tasks
        .iter_mut()
        .find(|t| t.id == Some(id))
        .ok_or_else(|| not_found("task", id))
}

fn parse_id(raw: &str) -> Result<DbId, ClientError> {
    raw.parse()
        .map_err(|_| server_error(400, &format!("Invalid id: {raw}")))
}

fn body_of(request: &ApiRequest) -> Result<serde_json::Value, ClientError> {
    request
        .body
        .clone()
        .ok_or_else(|| server_error(400, "Request body is required"))
}

fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| server_error(400, &e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, ClientError> {
    Ok(serde_json::to_value(value)?)
}

fn not_found(entity: &'static str, id: DbId) -> ClientError {
    server_error(404, &CoreError::NotFound { entity, id }.to_string())
}

fn server_error(status: u16, message: &str) -> ClientError {
    ClientError::Server {
        status,
        body: serde_json::json!({ "error": message }).to_string(),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn unknown_route_is_404() {
        let backend = InMemoryTransport::empty();
        let err = backend.send(ApiRequest::get("/nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn offline_backend_records_then_fails() {
        let backend = InMemoryTransport::seeded();
        backend.set_offline(true);
        let err = backend.send(ApiRequest::get("/tasks")).await.unwrap_err();
        assert_matches!(err, ClientError::Unreachable(_));
        assert_eq!(backend.count(Method::Get, "/tasks"), 1);
    }

    #[tokio::test]
    async fn injected_status_applies_to_one_route() {
        let backend = InMemoryTransport::seeded();
        backend.fail_with_status(Method::Get, "/personnels", 500);

        let err = backend.send(ApiRequest::get("/personnels")).await.unwrap_err();
        assert_matches!(err, ClientError::Server { status: 500, .. });
        assert!(backend.send(ApiRequest::get("/tasks")).await.is_ok());

        backend.clear_failures();
        assert!(backend.send(ApiRequest::get("/personnels")).await.is_ok());
    }

    #[tokio::test]
    async fn fetched_tasks_embed_owner_snapshot() {
        let backend = InMemoryTransport::seeded();
        let value = backend.send(ApiRequest::get("/tasks/6")).await.unwrap();
        assert_eq!(value["personnel"]["nom"], "Petit");
    }

    #[tokio::test]
    async fn create_without_required_fields_is_rejected() {
        let backend = InMemoryTransport::empty();
        let err = backend
            .send(ApiRequest::post("/personnels", serde_json::json!({ "nom": "X" })))
            .await
            .unwrap_err();
        assert_matches!(err, ClientError::Server { status: 400, .. });
    }
}
