//! Integration tests for the typed entity clients against the in-memory
//! backend.
//!
//! Covers request shaping (method + path per operation), server-assigned
//! fields, the loose completion/status coupling and non-cascading deletes.
//! A canned transport covers bodies that do not decode.

use std::io;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use async_trait::async_trait;
use roster_client::memory::InMemoryTransport;
use roster_client::transport::{ApiRequest, Method, Transport};
use roster_client::{ClientError, PersonnelClient, TaskClient};
use tracing_subscriber::fmt::MakeWriter;
use roster_core::models::personnel::PersonnelDraft;
use roster_core::models::task::{TaskDraft, TaskStatus};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clients() -> (Arc<InMemoryTransport>, PersonnelClient, TaskClient) {
    let backend = Arc::new(InMemoryTransport::seeded());
    let personnel = PersonnelClient::new(backend.clone());
    let tasks = TaskClient::new(backend.clone());
    (backend, personnel, tasks)
}

/// Answers every request with the same JSON body.
struct CannedTransport(serde_json::Value);

#[async_trait]
impl Transport for CannedTransport {
    async fn send(&self, _request: ApiRequest) -> Result<serde_json::Value, ClientError> {
        Ok(self.0.clone())
    }
}

fn canned_tasks(body: serde_json::Value) -> TaskClient {
    TaskClient::new(Arc::new(CannedTransport(body)))
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

// ---------------------------------------------------------------------------
// Personnel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn personnel_reads_hit_expected_paths() {
    let (backend, personnel, _) = clients();

    assert_eq!(personnel.get_all().await.unwrap().len(), 5);
    assert_eq!(personnel.get_by_id(2).await.unwrap().given_name, "Sophie");

    let with_tasks = personnel.get_with_tasks(3).await.unwrap();
    let task_ids: Vec<_> = with_tasks
        .tasks
        .unwrap()
        .iter()
        .filter_map(|t| t.id)
        .collect();
    assert_eq!(task_ids, vec![3, 6]);

    assert_eq!(backend.count(Method::Get, "/personnels"), 1);
    assert_eq!(backend.count(Method::Get, "/personnels/2"), 1);
    assert_eq!(backend.count(Method::Get, "/personnels/3/tasks"), 1);
}

#[tokio::test]
async fn create_returns_server_assigned_id_and_timestamps() {
    let (backend, personnel, _) = clients();

    let created = personnel
        .create(&PersonnelDraft {
            family_name: Some("Bernard".into()),
            given_name: Some("Chloé".into()),
            email: Some("chloe.bernard@example.com".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(6));
    assert!(created.created_at.is_some());
    let sent = backend.requests().pop().unwrap();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.path, "/personnels");
    assert_eq!(sent.body.unwrap()["prenom"], "Chloé");
}

#[tokio::test]
async fn update_replaces_given_fields_only() {
    let (backend, personnel, _) = clients();

    let updated = personnel
        .update(
            1,
            &PersonnelDraft {
                department: Some("Direction".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.department.as_deref(), Some("Direction"));
    assert_eq!(updated.family_name, "Dubois");
    assert_eq!(backend.count(Method::Put, "/personnels/1"), 1);
}

#[tokio::test]
async fn deleting_personnel_issues_one_call_and_leaves_tasks() {
    let (backend, personnel, tasks) = clients();
    backend.clear_requests();

    let outcome = personnel.delete(3).await.unwrap();
    assert!(outcome.success);

    let calls = backend.requests();
    assert_eq!(calls.len(), 1);
    assert_eq!((calls[0].method, calls[0].path.as_str()), (Method::Delete, "/personnels/3"));

    // Cascading is the server's business; this backend does not cascade.
    assert_eq!(tasks.get_by_personnel(3).await.unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_twice_is_not_guarded_client_side() {
    let (backend, personnel, _) = clients();

    personnel.delete(5).await.unwrap();
    let err = personnel.delete(5).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(backend.count(Method::Delete, "/personnels/5"), 2);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn per_personnel_task_queries() {
    let (backend, _, tasks) = clients();

    let all = tasks.get_by_personnel(1).await.unwrap();
    let done = tasks.get_completed_by_personnel(3).await.unwrap();
    let pending = tasks.get_pending_by_personnel(3).await.unwrap();

    assert_eq!(all.len(), 2);
    assert!(done.iter().all(|t| t.completed));
    assert!(pending.iter().all(|t| !t.completed));
    assert_eq!(done.len() + pending.len(), 2);

    assert_eq!(backend.count(Method::Get, "/tasks/personnel/1"), 1);
    assert_eq!(backend.count(Method::Get, "/tasks/personnel/3/completed"), 1);
    assert_eq!(backend.count(Method::Get, "/tasks/personnel/3/pending"), 1);
}

#[tokio::test]
async fn mark_as_completed_puts_to_sub_resource_without_body() {
    let (backend, _, tasks) = clients();

    let task = tasks.mark_as_completed(6).await.unwrap();

    assert!(task.completed);
    // The label stays whatever the server has; the client does not force it.
    assert_eq!(task.status, Some(TaskStatus::InProgress));

    let sent = backend.requests().pop().unwrap();
    assert_eq!((sent.method, sent.path.as_str()), (Method::Put, "/tasks/6/complete"));
    assert!(sent.body.is_none());

    let refetched = tasks.get_all().await.unwrap();
    let six = refetched.iter().find(|t| t.id == Some(6)).unwrap();
    assert!(six.completed);
    assert_eq!(six.status, Some(TaskStatus::InProgress));
}

#[tokio::test]
async fn create_task_for_unknown_personnel_fails_server_side() {
    let (_, _, tasks) = clients();

    let err = tasks
        .create(&TaskDraft {
            title: Some("Orpheline".into()),
            personnel_id: Some(99),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Server { status: 404, .. });
}

#[tokio::test]
async fn transport_failure_is_propagated_not_retried() {
    let (backend, _, tasks) = clients();
    backend.set_offline(true);

    let err = tasks.get_all().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(backend.count(Method::Get, "/tasks"), 1);
}

#[tokio::test]
async fn concurrent_identical_calls_are_not_merged() {
    let (backend, _, tasks) = clients();

    let (a, b) = tokio::join!(tasks.get_all(), tasks.get_all());

    assert!(a.is_ok() && b.is_ok());
    assert_eq!(backend.count(Method::Get, "/tasks"), 2);
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrongly_shaped_body_is_a_decode_error_and_is_logged() {
    let logs = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let tasks = canned_tasks(serde_json::json!({}));
    let err = tasks.get_all().await.unwrap_err();

    assert_matches!(err, ClientError::Decode(_));
    assert!(!err.is_transport());
    let output = logs.text();
    assert!(output.contains("API request failed"), "{output}");
    assert!(output.contains("/tasks"), "{output}");
}

#[tokio::test]
async fn null_completion_flag_decodes_as_pending() {
    let tasks = canned_tasks(serde_json::json!([
        { "titre": "x", "personnelId": 1, "realisee": null }
    ]));

    let all = tasks.get_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert!(!all[0].completed);
}
